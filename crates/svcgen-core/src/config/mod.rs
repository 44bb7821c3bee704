//! Resolved generation choices
//!
//! A [`Config`] is built once per generation run (from CLI flags, a preset file
//! or the interactive wizard) and is only ever read by the engine.

pub mod preset;

use crate::error::ConfigError;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

pub use preset::Preset;

/// Default HTTP listening port written into generated config files
pub const DEFAULT_HTTP_PORT: &str = "8080";
/// Default database credentials used by generated config files
pub const DEFAULT_DB_USER: &str = "user";
pub const DEFAULT_DB_PASS: &str = "password";
pub const DEFAULT_DB_NAME: &str = "mydatabase";

/// HTTP framework used by the generated service
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum HttpFramework {
    /// Plain `net/http` from the Go standard library
    #[default]
    None,
    Echo,
    Fiber,
}

/// Database engine the generated service talks to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    #[default]
    None,
    Postgres,
    #[value(name = "mysql")]
    MySql,
    Sqlite,
}

/// Task runner file emitted at the project root
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TaskRunner {
    #[default]
    None,
    #[value(alias = "make")]
    Makefile,
    #[value(alias = "task")]
    Taskfile,
}

/// Format of the runtime configuration file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ConfigFormat {
    #[default]
    None,
    Yaml,
    #[value(name = "dotenv", alias = "env")]
    DotEnv,
}

impl HttpFramework {
    pub fn display_name(&self) -> &'static str {
        match self {
            HttpFramework::None => "net/http",
            HttpFramework::Echo => "Echo",
            HttpFramework::Fiber => "Fiber",
        }
    }
}

impl Database {
    pub fn display_name(&self) -> &'static str {
        match self {
            Database::None => "None",
            Database::Postgres => "PostgreSQL",
            Database::MySql => "MySQL",
            Database::Sqlite => "SQLite",
        }
    }

    /// Port the engine listens on by default
    pub fn default_port(&self) -> &'static str {
        match self {
            Database::MySql => "3306",
            _ => "5432",
        }
    }

    /// Name of the `database/sql` driver registered by the generated code
    pub fn driver_name(&self) -> &'static str {
        match self {
            Database::None => "",
            Database::Postgres => "pgx",
            Database::MySql => "mysql",
            Database::Sqlite => "sqlite3",
        }
    }
}

impl TaskRunner {
    pub fn display_name(&self) -> &'static str {
        match self {
            TaskRunner::None => "None",
            TaskRunner::Makefile => "Makefile",
            TaskRunner::Taskfile => "Taskfile",
        }
    }
}

impl ConfigFormat {
    pub fn display_name(&self) -> &'static str {
        match self {
            ConfigFormat::None => "None",
            ConfigFormat::Yaml => "config.yaml",
            ConfigFormat::DotEnv => ".env",
        }
    }
}

macro_rules! impl_display {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.display_name())
            }
        })*
    };
}

impl_display!(HttpFramework, Database, TaskRunner, ConfigFormat);

/// User choices for a single generation run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub project_name: String,
    pub framework: HttpFramework,
    pub database: Database,
    pub task_runner: TaskRunner,
    pub config_format: ConfigFormat,
    pub websocket: bool,
    pub bot: bool,
    pub html: bool,
}

/// Single-choice groups, used to report conflicting selections
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChoiceGroup {
    HttpFramework,
    Database,
    TaskRunner,
    ConfigFormat,
}

impl fmt::Display for ChoiceGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChoiceGroup::HttpFramework => "HTTP framework",
            ChoiceGroup::Database => "database",
            ChoiceGroup::TaskRunner => "task runner",
            ChoiceGroup::ConfigFormat => "config format",
        };
        f.write_str(name)
    }
}

/// A front-end option label resolved to what it selects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OptionLabel {
    Framework(HttpFramework),
    Database(Database),
    TaskRunner(TaskRunner),
    ConfigFormat(ConfigFormat),
    WebSocket,
    Bot,
    Html,
}

fn parse_label(label: &str) -> Option<OptionLabel> {
    let option = match label.trim().to_lowercase().as_str() {
        "echo" => OptionLabel::Framework(HttpFramework::Echo),
        "fiber" => OptionLabel::Framework(HttpFramework::Fiber),
        "postgres" | "postgresql" | "pg" => OptionLabel::Database(Database::Postgres),
        "mysql" => OptionLabel::Database(Database::MySql),
        "sqlite" | "sqlite3" => OptionLabel::Database(Database::Sqlite),
        "makefile" | "make" => OptionLabel::TaskRunner(TaskRunner::Makefile),
        "taskfile" | "task" => OptionLabel::TaskRunner(TaskRunner::Taskfile),
        "yaml" | "config.yaml" => OptionLabel::ConfigFormat(ConfigFormat::Yaml),
        "dotenv" | ".env" | "env" => OptionLabel::ConfigFormat(ConfigFormat::DotEnv),
        "websocket" | "gorilla/websocket" | "ws" => OptionLabel::WebSocket,
        "bot" | "telegram" | "telegram bot" => OptionLabel::Bot,
        "html" | "enable html templates" => OptionLabel::Html,
        _ => return None,
    };
    Some(option)
}

/// Record `value` for a single-choice group, rejecting a second, different pick
fn choose<T: Copy + PartialEq + fmt::Display>(
    slot: &mut Option<T>,
    value: T,
    group: ChoiceGroup,
) -> Result<(), ConfigError> {
    match slot {
        Some(current) if *current != value => Err(ConfigError::ConflictingChoice {
            group,
            first: current.to_string(),
            second: value.to_string(),
        }),
        _ => {
            *slot = Some(value);
            Ok(())
        }
    }
}

impl Config {
    /// Create a config with every feature disabled
    pub fn new(project_name: impl Into<String>) -> Result<Self, ConfigError> {
        let project_name = project_name.into().trim().to_string();
        if project_name.is_empty() {
            return Err(ConfigError::EmptyProjectName);
        }
        Ok(Self {
            project_name,
            ..Self::default()
        })
    }

    /// Build a config from the labels a front end collected
    ///
    /// Labels are matched case-insensitively. Unknown labels and two different
    /// picks within one single-choice group are rejected.
    pub fn from_options<I, S>(project_name: &str, labels: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut config = Self::new(project_name)?;

        let mut framework = None;
        let mut database = None;
        let mut task_runner = None;
        let mut config_format = None;

        for label in labels {
            let label = label.as_ref();
            match parse_label(label) {
                Some(OptionLabel::Framework(v)) => {
                    choose(&mut framework, v, ChoiceGroup::HttpFramework)?
                }
                Some(OptionLabel::Database(v)) => choose(&mut database, v, ChoiceGroup::Database)?,
                Some(OptionLabel::TaskRunner(v)) => {
                    choose(&mut task_runner, v, ChoiceGroup::TaskRunner)?
                }
                Some(OptionLabel::ConfigFormat(v)) => {
                    choose(&mut config_format, v, ChoiceGroup::ConfigFormat)?
                }
                Some(OptionLabel::WebSocket) => config.websocket = true,
                Some(OptionLabel::Bot) => config.bot = true,
                Some(OptionLabel::Html) => config.html = true,
                None => return Err(ConfigError::UnknownOption(label.to_string())),
            }
        }

        config.framework = framework.unwrap_or_default();
        config.database = database.unwrap_or_default();
        config.task_runner = task_runner.unwrap_or_default();
        config.config_format = config_format.unwrap_or_default();

        Ok(config)
    }

    /// True iff a database engine was selected
    pub fn has_database(&self) -> bool {
        self.database != Database::None
    }

    /// Flat view of the config handed to the template renderer
    pub fn template_context(&self) -> TemplateContext {
        TemplateContext {
            project_name: self.project_name.clone(),
            is_echo: self.framework == HttpFramework::Echo,
            is_fiber: self.framework == HttpFramework::Fiber,
            has_http_framework: self.framework != HttpFramework::None,
            has_db: self.has_database(),
            has_postgres: self.database == Database::Postgres,
            has_mysql: self.database == Database::MySql,
            has_sqlite: self.database == Database::Sqlite,
            has_websocket: self.websocket,
            has_bot: self.bot,
            has_html: self.html,
            has_makefile: self.task_runner == TaskRunner::Makefile,
            has_taskfile: self.task_runner == TaskRunner::Taskfile,
            has_yaml_config: self.config_format == ConfigFormat::Yaml,
            has_dotenv: self.config_format == ConfigFormat::DotEnv,
            http_port: DEFAULT_HTTP_PORT,
            db_user: DEFAULT_DB_USER,
            db_pass: DEFAULT_DB_PASS,
            db_name: DEFAULT_DB_NAME,
            db_port: self.database.default_port(),
            db_driver: self.database.driver_name(),
        }
    }

    /// Human-readable summary lines, one per choice
    pub fn summary(&self) -> Vec<String> {
        let mut extras = Vec::new();
        if self.websocket {
            extras.push("WebSocket");
        }
        if self.bot {
            extras.push("Telegram bot");
        }
        if self.html {
            extras.push("HTML templates");
        }
        let extras = if extras.is_empty() {
            "None".to_string()
        } else {
            extras.join(", ")
        };

        vec![
            format!("Project: {}", self.project_name),
            format!("HTTP framework: {}", self.framework),
            format!("Database: {}", self.database),
            format!("Task runner: {}", self.task_runner),
            format!("Config format: {}", self.config_format),
            format!("Extras: {}", extras),
        ]
    }
}

/// Variables available to templates
#[derive(Debug, Clone, Serialize)]
pub struct TemplateContext {
    pub project_name: String,
    pub is_echo: bool,
    pub is_fiber: bool,
    pub has_http_framework: bool,
    pub has_db: bool,
    pub has_postgres: bool,
    pub has_mysql: bool,
    pub has_sqlite: bool,
    pub has_websocket: bool,
    pub has_bot: bool,
    pub has_html: bool,
    pub has_makefile: bool,
    pub has_taskfile: bool,
    pub has_yaml_config: bool,
    pub has_dotenv: bool,
    pub http_port: &'static str,
    pub db_user: &'static str,
    pub db_pass: &'static str,
    pub db_name: &'static str,
    pub db_port: &'static str,
    pub db_driver: &'static str,
}
