//! External toolchain handling
//!
//! This module provides:
//! - Go / goimports detection for front-end preflight output
//! - The post-generation bootstrap (`go mod init`, `go mod tidy`, `goimports`)

pub mod check;
pub mod toolchain;

pub use check::{check_toolchain, missing_required, RuntimeInfo};
pub use toolchain::{
    CommandOutput, CommandRunner, Severity, StepOutcome, SystemRunner, Toolchain,
    ToolchainSettings, ToolchainStep, ToolchainWarning,
};
