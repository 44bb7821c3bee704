//! Charm-style CLI prompts using cliclack

use crate::config::{Config, ConfigFormat, Database, HttpFramework, Preset, TaskRunner};
use crate::generator::{GenerationReport, Generator};
use crate::runtime::{check, ToolchainSettings};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// CLI arguments for the create command
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    /// Project (and Go module) name
    pub name: Option<String>,

    /// Project directory to create (defaults to the project name)
    pub directory: Option<PathBuf>,

    /// YAML preset providing defaults for every choice
    pub preset: Option<PathBuf>,

    pub framework: Option<HttpFramework>,
    pub database: Option<Database>,
    pub task_runner: Option<TaskRunner>,
    pub config_format: Option<ConfigFormat>,
    pub websocket: bool,
    pub bot: bool,
    pub html: bool,

    /// Only write files, do not run go mod init / tidy / goimports
    pub skip_toolchain: bool,

    /// Auto-confirm all prompts (non-interactive mode)
    pub yes: bool,
}

impl CreateArgs {
    /// Choices given on the command line, as a preset overlay
    fn as_preset(&self) -> Preset {
        Preset {
            project_name: self.name.clone(),
            framework: self.framework,
            database: self.database,
            task_runner: self.task_runner,
            config_format: self.config_format,
            websocket: self.websocket.then_some(true),
            bot: self.bot.then_some(true),
            html: self.html.then_some(true),
        }
    }
}

/// Run the CLI with interactive prompts
pub fn run(args: CreateArgs) -> Result<()> {
    cliclack::intro("svcgen")?;

    // Step 1: Collect choices (preset, then flags, then prompts for the rest)
    let config = collect_config(&args)?;
    cliclack::note("Service layout", config.summary().join("\n"))?;

    // Step 2: Check the Go toolchain
    let settings = ToolchainSettings::from_env();
    if args.skip_toolchain {
        cliclack::log::info("Skipping toolchain bootstrap")?;
    } else {
        check_toolchain(&settings)?;
    }

    // Step 3: Select directory
    let project_dir = select_directory(&config, &args)?;

    // Step 4: Generate
    let mut generator = Generator::new(&config).output_dir(&project_dir);
    generator = if args.skip_toolchain {
        generator.skip_toolchain()
    } else {
        generator.toolchain(settings)
    };

    cliclack::log::step("Generating project...")?;
    let report = match generator.generate() {
        Ok(report) => report,
        Err(e) => {
            cliclack::log::error(format!("{:#}", anyhow::Error::from(e)))?;
            anyhow::bail!("Project generation failed.");
        }
    };

    report_result(&config, &report)?;

    // Step 5: Show next steps
    print_next_steps(&config, &report.output_dir)?;

    Ok(())
}

fn collect_config(args: &CreateArgs) -> Result<Config> {
    let mut preset = match &args.preset {
        Some(path) => {
            let preset = Preset::load(path)?;
            cliclack::log::info(format!("Using preset {}", path.display()))?;
            preset
        }
        None => Preset::default(),
    };
    preset.merge(args.as_preset());

    if !args.yes {
        prompt_missing(&mut preset)?;
    }

    Ok(preset.into_config()?)
}

fn prompt_missing(preset: &mut Preset) -> Result<()> {
    if preset.project_name.is_none() {
        let name: String = cliclack::input("What is the name of your project?")
            .placeholder("my-awesome-service")
            .validate(|input: &String| {
                if input.trim().is_empty() {
                    Err("Please enter a project name")
                } else {
                    Ok(())
                }
            })
            .interact()?;
        preset.project_name = Some(name.trim().to_string());
    }

    if preset.framework.is_none() {
        let framework = cliclack::select("HTTP framework")
            .item(HttpFramework::Echo, "Echo", "labstack/echo")
            .item(HttpFramework::Fiber, "Fiber", "gofiber/fiber")
            .item(HttpFramework::None, "net/http", "standard library only")
            .interact()?;
        preset.framework = Some(framework);
    }

    if preset.database.is_none() {
        let database = cliclack::select("Database")
            .item(Database::Postgres, "PostgreSQL", "")
            .item(Database::MySql, "MySQL", "")
            .item(Database::Sqlite, "SQLite", "")
            .item(Database::None, "None", "no persistence layer")
            .interact()?;
        preset.database = Some(database);
    }

    if preset.task_runner.is_none() {
        let runner = cliclack::select("Task runner")
            .item(TaskRunner::Makefile, "Makefile", "")
            .item(TaskRunner::Taskfile, "Taskfile", "taskfile.dev")
            .item(TaskRunner::None, "None", "")
            .interact()?;
        preset.task_runner = Some(runner);
    }

    if preset.config_format.is_none() {
        let format = cliclack::select("Config format")
            .item(ConfigFormat::Yaml, "config.yaml", "")
            .item(ConfigFormat::DotEnv, ".env", "")
            .item(ConfigFormat::None, "None", "environment variables only")
            .interact()?;
        preset.config_format = Some(format);
    }

    if preset.websocket.is_none() || preset.bot.is_none() || preset.html.is_none() {
        let extras: Vec<&str> = cliclack::multiselect("Extras (optional)")
            .item("websocket", "WebSocket", "gorilla/websocket")
            .item("bot", "Telegram bot", "go-telegram-bot-api")
            .item("html", "HTML templates", "html/template rendering")
            .required(false)
            .interact()?;
        let picked = |key: &str| extras.contains(&key);
        preset.websocket = Some(preset.websocket.unwrap_or(false) || picked("websocket"));
        preset.bot = Some(preset.bot.unwrap_or(false) || picked("bot"));
        preset.html = Some(preset.html.unwrap_or(false) || picked("html"));
    }

    Ok(())
}

fn check_toolchain(settings: &ToolchainSettings) -> Result<()> {
    let spinner = cliclack::spinner();
    spinner.start("Checking Go toolchain...");

    let results = check::check_toolchain(settings);
    let info: Vec<String> = results
        .iter()
        .map(|r| match (&r.version, r.available) {
            (Some(version), true) => version.clone(),
            (None, true) => format!("{} (installed)", r.name),
            (_, false) => format!("{} (not installed)", r.name),
        })
        .collect();
    spinner.stop(format!("Toolchain: {}", info.join(", ")));

    let missing = check::missing_required(&results);
    if !missing.is_empty() {
        cliclack::log::warning(format!(
            "{} not found; module bootstrap will fail. Install it or pass --skip-toolchain.",
            missing.join(", ")
        ))?;
    }

    Ok(())
}

fn select_directory(config: &Config, args: &CreateArgs) -> Result<PathBuf> {
    let current_dir = std::env::current_dir().context("Failed to read current directory")?;

    let dir = args
        .directory
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.project_name));
    let path = if dir.is_absolute() {
        dir
    } else {
        current_dir.join(dir)
    };

    // Warn if directory exists and has files
    if path.is_dir() {
        if let Ok(entries) = std::fs::read_dir(&path) {
            let count = entries.count();
            if count > 0 {
                cliclack::log::warning(format!(
                    "{} has {} existing items; generated files will overwrite them",
                    path.display(),
                    count
                ))?;

                // Auto-confirm with --yes flag
                let confirm = if args.yes {
                    true
                } else {
                    cliclack::confirm("Continue anyway?")
                        .initial_value(true)
                        .interact()?
                };

                if !confirm {
                    anyhow::bail!("Setup cancelled.");
                }
            }
        }
    }

    Ok(path)
}

fn report_result(config: &Config, report: &GenerationReport) -> Result<()> {
    cliclack::log::success(format!(
        "Project '{}' generated successfully ({} files in {})",
        config.project_name,
        report.files.len(),
        report.output_dir.display()
    ))?;

    for warning in &report.warnings {
        cliclack::log::warning(warning.to_string())?;
    }

    Ok(())
}

/// Instructions shown after the project was created
pub fn next_steps(config: &Config, dir: &Path) -> Vec<String> {
    let mut steps = Vec::new();
    let current = std::env::current_dir().ok();

    // Step 1: cd to directory if not current
    if current.as_deref() != Some(dir) {
        steps.push(format!("cd {}", dir.display()));
    }

    if config.has_database() && config.database != Database::Sqlite {
        steps.push("docker compose up -d".to_string());
    }

    let run = match config.task_runner {
        TaskRunner::Makefile => "make run",
        TaskRunner::Taskfile => "task run",
        TaskRunner::None => "go run ./cmd/app",
    };
    steps.push(run.to_string());

    steps
}

fn print_next_steps(config: &Config, project_dir: &Path) -> Result<()> {
    let steps = next_steps(config, project_dir);

    println!();
    println!("  Next steps");
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }

    cliclack::outro("Happy coding!")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_preset() {
        let args = CreateArgs {
            name: Some("svc".to_string()),
            framework: Some(HttpFramework::Fiber),
            html: true,
            ..CreateArgs::default()
        };
        let mut preset = Preset {
            framework: Some(HttpFramework::Echo),
            database: Some(Database::Postgres),
            ..Preset::default()
        };
        preset.merge(args.as_preset());

        let config = preset.into_config().unwrap();
        assert_eq!(config.framework, HttpFramework::Fiber);
        assert_eq!(config.database, Database::Postgres);
        assert!(config.html);
        assert!(!config.bot);
    }

    #[test]
    fn test_next_steps_follow_task_runner() {
        let dir = Path::new("/nonexistent/svc");
        let make = Config {
            task_runner: TaskRunner::Makefile,
            database: Database::Postgres,
            ..Config::new("svc").unwrap()
        };
        assert_eq!(
            next_steps(&make, dir),
            vec!["cd /nonexistent/svc", "docker compose up -d", "make run"]
        );

        let plain = Config::new("svc").unwrap();
        assert_eq!(
            next_steps(&plain, dir),
            vec!["cd /nonexistent/svc", "go run ./cmd/app"]
        );
    }
}
