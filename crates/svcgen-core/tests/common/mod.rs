//! Shared helpers for generation tests.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::io;
use std::path::{Path, PathBuf};
use svcgen_core::{CommandRunner, runtime::CommandOutput};
use tempfile::TempDir;
use walkdir::WalkDir;

/// Command runner that records every invocation instead of spawning it.
///
/// Commands listed in `failing` exit with status 1, those in `missing` fail to
/// spawn. Matching is on the full command line.
#[allow(dead_code)]
#[derive(Default)]
pub struct RecordingRunner {
    calls: RefCell<Vec<(String, PathBuf)>>,
    failing: Vec<&'static str>,
    missing: Vec<&'static str>,
}

#[allow(dead_code)]
impl RecordingRunner {
    pub fn failing(mut self, command_line: &'static str) -> Self {
        self.failing.push(command_line);
        self
    }

    pub fn missing(mut self, command_line: &'static str) -> Self {
        self.missing.push(command_line);
        self
    }

    pub fn command_lines(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|(line, _)| line.clone()).collect()
    }

    pub fn working_dirs(&self) -> Vec<PathBuf> {
        self.calls.borrow().iter().map(|(_, dir)| dir.clone()).collect()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, program: &str, args: &[String], dir: &Path) -> io::Result<CommandOutput> {
        let mut line = program.to_string();
        for arg in args {
            line.push(' ');
            line.push_str(arg);
        }
        self.calls.borrow_mut().push((line.clone(), dir.to_path_buf()));

        if self.missing.contains(&line.as_str()) {
            return Err(io::Error::new(io::ErrorKind::NotFound, "not found"));
        }
        let failed = self.failing.contains(&line.as_str());
        Ok(CommandOutput {
            success: !failed,
            code: Some(if failed { 1 } else { 0 }),
            stderr: if failed { format!("{line}: failed") } else { String::new() },
        })
    }
}

/// Temporary workspace the generated project is written under
pub struct Workspace {
    root: TempDir,
}

#[allow(dead_code)]
impl Workspace {
    pub fn new() -> Self {
        Self { root: TempDir::new().expect("create temp dir") }
    }

    pub fn project(&self, name: &str) -> PathBuf {
        self.root.path().join(name)
    }
}

/// Every file under `dir`, relative to it, with `/` separators
#[allow(dead_code)]
pub fn files_under(dir: &Path) -> BTreeSet<String> {
    WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            e.path()
                .strip_prefix(dir)
                .expect("entry under dir")
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("/")
        })
        .collect()
}
