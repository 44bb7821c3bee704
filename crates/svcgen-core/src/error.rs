//! Error types for configuration, generation and toolchain bootstrap

use crate::config::ChoiceGroup;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Problems with the user's choices, detected before anything is written
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("project name must not be empty")]
    EmptyProjectName,

    #[error("unknown option '{0}'")]
    UnknownOption(String),

    #[error("only one {group} can be selected, got both '{first}' and '{second}'")]
    ConflictingChoice {
        group: ChoiceGroup,
        first: String,
        second: String,
    },

    #[error("failed to read preset {}", .path.display())]
    ReadPreset {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse preset {}", .path.display())]
    ParsePreset {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Why a single external command failed
#[derive(Debug, Error)]
pub enum ToolchainError {
    #[error("could not start process")]
    Spawn(#[source] io::Error),

    #[error("process exited with {}{}", exit_code_label(.code), stderr_suffix(.stderr))]
    Exit { code: Option<i32>, stderr: String },
}

impl ToolchainError {
    /// True when the program itself could not be found
    pub fn is_not_installed(&self) -> bool {
        matches!(self, ToolchainError::Spawn(e) if e.kind() == io::ErrorKind::NotFound)
    }
}

fn exit_code_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

fn stderr_suffix(stderr: &str) -> String {
    let stderr = stderr.trim();
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {}", stderr)
    }
}

/// Fatal generation failure
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("invalid configuration")]
    Config(#[from] ConfigError),

    #[error("could not resolve output directory {}", .path.display())]
    OutputPath {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("error rendering template {path}")]
    Template {
        path: String,
        #[source]
        source: minijinja::Error,
    },

    #[error("template {path} is not valid UTF-8")]
    NonUtf8Template { path: String },

    #[error(
        "template tree maps both {first} and {second} to {}",
        .destination.display()
    )]
    DestinationCollision {
        first: String,
        second: String,
        destination: PathBuf,
    },

    #[error("error creating directory {}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("error writing file {}", .path.display())]
    WriteFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to run '{command}' ({step})")]
    Toolchain {
        step: &'static str,
        command: String,
        #[source]
        source: ToolchainError,
    },
}
