//! svcgen core - template-driven generation of Go backend services
//!
//! Given a [`Config`] this library writes a Go service skeleton from an
//! embedded template tree and bootstraps it as a Go module.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Config** - the resolved user choices, label parsing and YAML presets
//! - **Layer 2: Templates** - inclusion policy, path mapping, rendering and the tree walker
//! - **Layer 3: Runtime** - the post-generation toolchain bootstrap and tool detection
//! - **Layer 4: CLI/TUI Interface** - Optional cliclack-based wizard (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based wizard module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use svcgen_core::{Config, Generator};
//!
//! let config = Config::from_options("billing", ["Echo", "PostgreSQL", "Makefile"])?;
//! let report = Generator::new(&config).generate()?;
//! for warning in &report.warnings {
//!     eprintln!("{warning}");
//! }
//! ```

pub mod config;
pub mod error;
pub mod generator;
pub mod runtime;
pub mod templates;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use config::{Config, ConfigFormat, Database, HttpFramework, Preset, TaskRunner};
pub use error::{ConfigError, GenerateError, ToolchainError};
pub use generator::{generate, GenerationReport, Generator};
pub use runtime::{CommandRunner, Severity, SystemRunner, ToolchainSettings, ToolchainWarning};

#[cfg(feature = "tui")]
pub use tui::run;
