//! End-to-end generation against the embedded Go service tree.
//!
//! The toolchain is always replaced by a recording runner; no Go binary is
//! ever spawned.

mod common;

use common::{files_under, RecordingRunner, Workspace};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use svcgen_core::templates::{embedded_tree, should_emit, PathMapper};
use svcgen_core::{Config, GenerateError, Generator, ToolchainSettings};

fn generate(
    config: &Config,
    dir: &Path,
    runner: &RecordingRunner,
) -> Result<svcgen_core::GenerationReport, GenerateError> {
    Generator::new(config)
        .output_dir(dir)
        .toolchain(ToolchainSettings::default())
        .generate_with(runner)
}

fn read(dir: &Path, rel: &str) -> String {
    fs::read_to_string(dir.join(rel)).unwrap_or_else(|e| panic!("read {rel}: {e}"))
}

// ---------------------------------------------------------------------------
// Layout selection
// ---------------------------------------------------------------------------

#[test]
fn echo_service_without_database() {
    let ws = Workspace::new();
    let dir = ws.project("svc1");
    let config = Config::from_options("svc1", ["Echo"]).unwrap();
    let runner = RecordingRunner::default();

    let report = generate(&config, &dir, &runner).unwrap();

    let files = files_under(&dir);
    assert!(files.contains("cmd/app/main.go"));
    assert!(files.contains("internal/config/config.go"));
    assert!(files.contains("internal/transport/http/echo/server.go"));
    assert!(files.contains("README.md"));
    assert!(files.contains(".gitignore"));

    assert!(!files.iter().any(|f| f.starts_with("internal/domain/")));
    assert!(!files.iter().any(|f| f.starts_with("internal/usecase/")));
    assert!(!files.iter().any(|f| f.starts_with("internal/repository/")));
    assert!(!files.iter().any(|f| f.starts_with("migrations/")));
    assert!(!files.iter().any(|f| f.starts_with("web/")));
    assert!(!files.iter().any(|f| f.contains("/fiber/") || f.contains("/nethttp/")));
    assert!(!files.contains("docker-compose.yml"));
    assert!(!files.contains("Makefile"));
    assert!(!files.contains("Taskfile.yml"));
    assert!(!files.iter().any(|f| f.ends_with(".tmpl")));

    let main = read(&dir, "cmd/app/main.go");
    assert!(main.contains("\"svc1/internal/config\""));
    assert!(main.contains("svc1/internal/transport/http/echo"));
    assert!(!main.contains("repository"));

    assert!(read(&dir, "README.md").starts_with("# svc1\n"));

    assert_eq!(report.files.len(), files.len());
    assert!(report.warnings.is_empty());
    assert_eq!(
        runner.command_lines(),
        vec!["go mod init svc1", "go mod tidy", "goimports -w ."]
    );
    assert!(runner.working_dirs().iter().all(|d| d == &report.output_dir));
}

#[test]
fn postgres_service_with_makefile() {
    let ws = Workspace::new();
    let dir = ws.project("svc2");
    let config = Config::from_options("svc2", ["PostgreSQL", "Makefile"]).unwrap();
    let runner = RecordingRunner::default();

    generate(&config, &dir, &runner).unwrap();

    let files = files_under(&dir);
    assert!(files.contains("Makefile"));
    assert!(!files.contains("Taskfile.yml"));
    assert!(files.contains("internal/domain/user.go"));
    assert!(files.contains("internal/usecase/user.go"));
    assert!(files.contains("internal/repository/postgres/user.go"));
    assert!(files.contains("migrations/postgres/0001_users.sql"));
    assert!(files.contains("docker-compose.yml"));
    assert!(files.contains("internal/transport/http/nethttp/server.go"));
    assert!(!files.iter().any(|f| f.contains("/mysql/") || f.contains("/sqlite/")));
    assert!(!files.contains("config.yaml"));
    assert!(!files.contains(".env"));

    let compose = read(&dir, "docker-compose.yml");
    assert!(compose.contains("POSTGRES_USER: user"));
    assert!(compose.contains("POSTGRES_PASSWORD: password"));
    assert!(compose.contains("POSTGRES_DB: mydatabase"));

    let config_go = read(&dir, "internal/config/config.go");
    assert!(config_go.contains("Port: \"8080\""));
    assert!(config_go.contains("\"5432\""));
    assert!(config_go.contains("postgres://"));

    let makefile = read(&dir, "Makefile");
    assert!(makefile.contains("\tgo run ./cmd/app"));
    assert!(makefile.contains("APP := svc2"));
}

#[test]
fn extras_and_config_formats_are_emitted_on_request() {
    let ws = Workspace::new();
    let dir = ws.project("svc3");
    let config = Config::from_options(
        "svc3",
        ["fiber", "sqlite", "taskfile", "yaml", "websocket", "bot", "html"],
    )
    .unwrap();

    generate(&config, &dir, &RecordingRunner::default()).unwrap();

    let files = files_under(&dir);
    for expected in [
        "Taskfile.yml",
        "config.yaml",
        "internal/transport/http/fiber/server.go",
        "internal/transport/websocket/hub.go",
        "internal/bot/bot.go",
        "internal/repository/sqlite/user.go",
        "web/render.go",
        "web/templates/index.html",
    ] {
        assert!(files.contains(expected), "missing {expected}");
    }
    assert!(!files.contains(".env"));
    assert!(!files.contains("Makefile"));

    // Go templates inside non-template files are copied untouched
    assert!(read(&dir, "web/templates/index.html").contains("{{ .Title }}"));
    // Escaped blocks reach the output literally
    assert!(read(&dir, "Taskfile.yml").contains("bin/{{.APP}}"));
}

#[test]
fn output_matches_the_mapped_emitted_tree() {
    let ws = Workspace::new();
    let dir = ws.project("svc4");
    let config = Config::from_options("svc4", ["echo", "mysql", "dotenv", "html"]).unwrap();

    let report = Generator::new(&config)
        .output_dir(&dir)
        .skip_toolchain()
        .generate()
        .unwrap();

    let mapper = PathMapper::new(embedded_tree().path(), &report.output_dir);
    let mut expected = BTreeSet::new();
    let mut pending = vec![embedded_tree()];
    while let Some(current) = pending.pop() {
        for file in current.files() {
            if should_emit(file.path(), &config) {
                let mapped = mapper.map(file.path());
                let rel = mapped.strip_prefix(&report.output_dir).unwrap();
                expected.insert(rel.to_string_lossy().replace('\\', "/"));
            }
        }
        pending.extend(current.dirs());
    }

    assert_eq!(files_under(&dir), expected);
}

// ---------------------------------------------------------------------------
// Toolchain failures
// ---------------------------------------------------------------------------

#[test]
fn module_init_failure_keeps_files_and_stops() {
    let ws = Workspace::new();
    let dir = ws.project("svc1");
    let config = Config::from_options("svc1", ["echo"]).unwrap();
    let runner = RecordingRunner::default().failing("go mod init svc1");

    let err = generate(&config, &dir, &runner).unwrap_err();

    match &err {
        GenerateError::Toolchain { step, command, .. } => {
            assert_eq!(*step, "module init");
            assert_eq!(command, "go mod init svc1");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.to_string().contains("go mod init svc1"));
    assert!(dir.join("cmd/app/main.go").is_file());
    assert_eq!(runner.command_lines(), vec!["go mod init svc1"]);
}

#[test]
fn missing_go_binary_is_fatal() {
    let ws = Workspace::new();
    let dir = ws.project("svc1");
    let config = Config::new("svc1").unwrap();
    let runner = RecordingRunner::default().missing("go mod init svc1");

    let err = generate(&config, &dir, &runner).unwrap_err();

    assert!(matches!(err, GenerateError::Toolchain { .. }));
    assert_eq!(runner.command_lines().len(), 1);
}

#[test]
fn missing_formatter_only_warns() {
    let ws = Workspace::new();
    let dir = ws.project("svc1");
    let config = Config::from_options("svc1", ["echo"]).unwrap();
    let runner = RecordingRunner::default().missing("goimports -w .");

    let report = generate(&config, &dir, &runner).unwrap();

    assert_eq!(report.warnings.len(), 1);
    assert!(report.has_warnings());
    assert_eq!(report.warnings[0].command, "goimports -w .");
    assert_eq!(runner.command_lines().len(), 3);
}

#[test]
fn formatter_can_be_disabled() {
    let ws = Workspace::new();
    let dir = ws.project("svc1");
    let config = Config::new("svc1").unwrap();
    let runner = RecordingRunner::default();
    let settings = ToolchainSettings {
        go_bin: "/opt/go/bin/go".to_string(),
        formatter: None,
    };

    Generator::new(&config)
        .output_dir(&dir)
        .toolchain(settings)
        .generate_with(&runner)
        .unwrap();

    assert_eq!(
        runner.command_lines(),
        vec!["/opt/go/bin/go mod init svc1", "/opt/go/bin/go mod tidy"]
    );
}

// ---------------------------------------------------------------------------
// Re-runs
// ---------------------------------------------------------------------------

#[test]
fn second_run_overwrites_generated_files() {
    let ws = Workspace::new();
    let dir = ws.project("svc1");
    let config = Config::from_options("svc1", ["echo"]).unwrap();

    generate(&config, &dir, &RecordingRunner::default()).unwrap();
    let original = read(&dir, "README.md");

    fs::write(dir.join("README.md"), "edited by hand").unwrap();
    fs::write(dir.join("notes.txt"), "kept").unwrap();

    generate(&config, &dir, &RecordingRunner::default()).unwrap();

    assert_eq!(read(&dir, "README.md"), original);
    assert_eq!(read(&dir, "notes.txt"), "kept");
}
