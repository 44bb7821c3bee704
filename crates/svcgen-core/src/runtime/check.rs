//! Detection of the Go toolchain used by the bootstrap steps

use super::toolchain::ToolchainSettings;
use std::process::Command;

/// Tool detection result
#[derive(Debug, Clone)]
pub struct RuntimeInfo {
    pub name: &'static str,
    pub version: Option<String>,
    pub available: bool,
    /// Whether generation fails without this tool
    pub required: bool,
}

fn probe(name: &'static str, program: &str, args: &[&str], required: bool) -> RuntimeInfo {
    let output = Command::new(program).args(args).output();

    match output {
        Ok(out) if out.status.success() => {
            let version = String::from_utf8_lossy(&out.stdout).trim().to_string();
            RuntimeInfo {
                name,
                version: (!version.is_empty()).then_some(version),
                available: true,
                required,
            }
        }
        _ => RuntimeInfo {
            name,
            version: None,
            available: false,
            required,
        },
    }
}

/// Check if Go is available
pub fn check_go(settings: &ToolchainSettings) -> RuntimeInfo {
    probe("Go", &settings.go_bin, &["version"], true)
}

/// Check if the import formatter is available
///
/// `goimports` has no version flag, so `-h` is probed instead; it exits with
/// status 2 after printing usage, which still proves the binary exists.
pub fn check_formatter(settings: &ToolchainSettings) -> Option<RuntimeInfo> {
    let formatter = settings.formatter.as_deref()?;
    let available = Command::new(formatter).arg("-h").output().is_ok();

    Some(RuntimeInfo {
        name: "goimports",
        version: None,
        available,
        required: false,
    })
}

/// Check every tool the bootstrap uses
pub fn check_toolchain(settings: &ToolchainSettings) -> Vec<RuntimeInfo> {
    let mut results = vec![check_go(settings)];
    results.extend(check_formatter(settings));
    results
}

/// Names of missing tools generation cannot succeed without
pub fn missing_required(results: &[RuntimeInfo]) -> Vec<&'static str> {
    results
        .iter()
        .filter(|r| r.required && !r.available)
        .map(|r| r.name)
        .collect()
}
