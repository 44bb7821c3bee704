//! Post-generation toolchain bootstrap
//!
//! Runs a fixed, ordered list of external commands inside the generated
//! project. Each step is either critical (its failure fails generation) or
//! advisory (its failure is reported as a warning and the run continues).

use crate::error::{GenerateError, ToolchainError};
use colored::Colorize;
use std::fmt;
use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

/// Environment variable overriding the Go binary
pub const GO_BIN_ENV: &str = "SVCGEN_GO_BIN";
/// Environment variable overriding the formatter binary (empty disables it)
pub const FORMATTER_ENV: &str = "SVCGEN_FORMATTER";

const DEFAULT_GO_BIN: &str = "go";
const DEFAULT_FORMATTER: &str = "goimports";

/// How a step failure affects the overall result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Critical,
    Advisory,
}

/// A single external command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolchainStep {
    pub name: &'static str,
    pub program: String,
    pub args: Vec<String>,
    pub severity: Severity,
}

impl ToolchainStep {
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for ToolchainStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.command_line())
    }
}

/// What an external command reported
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub success: bool,
    pub code: Option<i32>,
    pub stderr: String,
}

/// Runs external commands; the seam tests use to avoid spawning real tools
pub trait CommandRunner {
    /// Run `program` with `args` in `dir`, blocking until it exits
    fn run(&self, program: &str, args: &[String], dir: &Path) -> io::Result<CommandOutput>;
}

/// Spawns real processes with `std::process::Command`
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[String], dir: &Path) -> io::Result<CommandOutput> {
        let output = Command::new(program)
            .args(args)
            .current_dir(dir)
            .stdin(Stdio::null())
            .output()?;

        Ok(CommandOutput {
            success: output.status.success(),
            code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }
}

/// Result of running one step
#[derive(Debug)]
pub enum StepOutcome {
    Succeeded,
    Failed(ToolchainError),
}

/// An advisory step that failed without failing generation
#[derive(Debug)]
pub struct ToolchainWarning {
    pub step: &'static str,
    pub command: String,
    pub error: ToolchainError,
}

impl fmt::Display for ToolchainWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.error.is_not_installed() {
            write!(f, "{} skipped: '{}' is not installed", self.step, self.command)
        } else {
            write!(f, "{} failed: '{}': {}", self.step, self.command, self.error)
        }
    }
}

/// Program names for the bootstrap commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolchainSettings {
    pub go_bin: String,
    /// `None` skips the formatting step entirely
    pub formatter: Option<String>,
}

impl Default for ToolchainSettings {
    fn default() -> Self {
        Self {
            go_bin: DEFAULT_GO_BIN.to_string(),
            formatter: Some(DEFAULT_FORMATTER.to_string()),
        }
    }
}

impl ToolchainSettings {
    /// Read overrides from [`GO_BIN_ENV`] and [`FORMATTER_ENV`]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let go_bin = lookup(GO_BIN_ENV)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_GO_BIN.to_string());
        let formatter = match lookup(FORMATTER_ENV) {
            Some(v) if v.trim().is_empty() => None,
            Some(v) => Some(v.trim().to_string()),
            None => Some(DEFAULT_FORMATTER.to_string()),
        };
        Self { go_bin, formatter }
    }
}

/// Ordered bootstrap steps for a generated Go module
#[derive(Debug, Clone)]
pub struct Toolchain {
    steps: Vec<ToolchainStep>,
}

impl Toolchain {
    pub fn new(steps: Vec<ToolchainStep>) -> Self {
        Self { steps }
    }

    /// `go mod init <module>`, `go mod tidy`, then the optional formatter
    pub fn go_module(module: &str, settings: &ToolchainSettings) -> Self {
        let mut steps = vec![
            ToolchainStep {
                name: "module init",
                program: settings.go_bin.clone(),
                args: vec!["mod".into(), "init".into(), module.to_string()],
                severity: Severity::Critical,
            },
            ToolchainStep {
                name: "dependency tidy",
                program: settings.go_bin.clone(),
                args: vec!["mod".into(), "tidy".into()],
                severity: Severity::Critical,
            },
        ];

        if let Some(formatter) = &settings.formatter {
            steps.push(ToolchainStep {
                name: "import formatting",
                program: formatter.clone(),
                args: vec!["-w".into(), ".".into()],
                severity: Severity::Advisory,
            });
        }

        Self { steps }
    }

    pub fn steps(&self) -> &[ToolchainStep] {
        &self.steps
    }

    /// Run every step in order inside `dir`
    ///
    /// Returns the advisory failures on success. The first critical failure is
    /// returned as an error and no later step runs.
    pub fn run<R: CommandRunner + ?Sized>(
        &self,
        dir: &Path,
        runner: &R,
    ) -> Result<Vec<ToolchainWarning>, GenerateError> {
        let mut warnings = Vec::new();

        for step in &self.steps {
            println!("  {} {}", "->".blue(), step.command_line());

            match run_step(step, dir, runner) {
                StepOutcome::Succeeded => {}
                StepOutcome::Failed(error) => match step.severity {
                    Severity::Critical => {
                        return Err(GenerateError::Toolchain {
                            step: step.name,
                            command: step.command_line(),
                            source: error,
                        });
                    }
                    Severity::Advisory => {
                        let warning = ToolchainWarning {
                            step: step.name,
                            command: step.command_line(),
                            error,
                        };
                        eprintln!("{} {}", "Warning:".yellow(), warning);
                        warnings.push(warning);
                    }
                },
            }
        }

        Ok(warnings)
    }
}

/// Run a single step and classify its result
pub fn run_step<R: CommandRunner + ?Sized>(
    step: &ToolchainStep,
    dir: &Path,
    runner: &R,
) -> StepOutcome {
    match runner.run(&step.program, &step.args, dir) {
        Ok(output) if output.success => StepOutcome::Succeeded,
        Ok(output) => StepOutcome::Failed(ToolchainError::Exit {
            code: output.code,
            stderr: output.stderr,
        }),
        Err(e) => StepOutcome::Failed(ToolchainError::Spawn(e)),
    }
}
