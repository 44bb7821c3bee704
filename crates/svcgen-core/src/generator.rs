//! Generation entry point: template walk followed by toolchain bootstrap

use crate::config::Config;
use crate::error::{ConfigError, GenerateError};
use crate::runtime::toolchain::{
    CommandRunner, SystemRunner, Toolchain, ToolchainSettings, ToolchainWarning,
};
use crate::templates::{embedded_tree, PathMapper, Rule, Walker, RULES};
use include_dir::Dir;
use std::fs;
use std::path::{Path, PathBuf};

/// What a successful run produced
#[derive(Debug)]
pub struct GenerationReport {
    /// Absolute project directory
    pub output_dir: PathBuf,
    /// Written files, in the order they were written
    pub files: Vec<PathBuf>,
    /// Advisory toolchain failures
    pub warnings: Vec<ToolchainWarning>,
}

impl GenerationReport {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Resolve the output directory against the current directory
pub fn resolve_output_dir(path: &Path) -> Result<PathBuf, GenerateError> {
    std::path::absolute(path).map_err(|source| GenerateError::OutputPath {
        path: path.to_path_buf(),
        source,
    })
}

/// Generate a project for `config` into `./<project_name>` with default settings
pub fn generate(config: &Config) -> Result<GenerationReport, GenerateError> {
    Generator::new(config).generate()
}

/// Configurable generation run
///
/// Defaults: the embedded Go service tree, the built-in inclusion rules, output
/// into `project_name` under the current directory, toolchain programs from
/// the environment.
pub struct Generator<'a> {
    config: &'a Config,
    output_dir: Option<PathBuf>,
    tree: &'a Dir<'a>,
    rules: &'a [Rule],
    toolchain: Option<ToolchainSettings>,
}

impl<'a> Generator<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self {
            config,
            output_dir: None,
            tree: embedded_tree(),
            rules: RULES,
            toolchain: Some(ToolchainSettings::from_env()),
        }
    }

    /// Write into `dir` instead of `./<project_name>`
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    pub fn tree(mut self, tree: &'a Dir<'a>) -> Self {
        self.tree = tree;
        self
    }

    pub fn rules(mut self, rules: &'a [Rule]) -> Self {
        self.rules = rules;
        self
    }

    pub fn toolchain(mut self, settings: ToolchainSettings) -> Self {
        self.toolchain = Some(settings);
        self
    }

    /// Only write files; do not run any external command
    pub fn skip_toolchain(mut self) -> Self {
        self.toolchain = None;
        self
    }

    /// Run with real external processes
    pub fn generate(&self) -> Result<GenerationReport, GenerateError> {
        self.generate_with(&SystemRunner)
    }

    /// Run with a custom command runner
    pub fn generate_with<R: CommandRunner + ?Sized>(
        &self,
        runner: &R,
    ) -> Result<GenerationReport, GenerateError> {
        let project_name = self.config.project_name.trim();
        if project_name.is_empty() {
            return Err(ConfigError::EmptyProjectName.into());
        }

        let requested = self
            .output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(project_name));
        let output_dir = resolve_output_dir(&requested)?;

        fs::create_dir_all(&output_dir).map_err(|source| GenerateError::CreateDir {
            path: output_dir.clone(),
            source,
        })?;

        let mapper = PathMapper::new(self.tree.path(), &output_dir);
        let files = Walker::new(self.config, &mapper, self.rules).walk(self.tree)?;

        let warnings = match &self.toolchain {
            Some(settings) => Toolchain::go_module(project_name, settings).run(&output_dir, runner)?,
            None => Vec::new(),
        };

        Ok(GenerationReport {
            output_dir,
            files,
            warnings,
        })
    }
}
