//! Inclusion policy: which template-tree entries are emitted for a config
//!
//! Rules are evaluated against the template-tree path relative to the tree
//! root, before any destination mapping. Mapping strips the `.tmpl` suffix, so
//! matching after it would lose information some rules key on.

use crate::config::{Config, ConfigFormat, Database, HttpFramework, TaskRunner};
use std::path::{Component, Path};

use super::mapper::TEMPLATE_SUFFIX;

/// How a rule recognizes a path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    /// Some path component equals the value exactly
    Segment(&'static str),
    /// The file name equals the value, with or without the template suffix
    FileName(&'static str),
}

impl Pattern {
    pub fn matches(&self, path: &Path) -> bool {
        match self {
            Pattern::Segment(segment) => path.components().any(|c| match c {
                Component::Normal(name) => name.to_str() == Some(*segment),
                _ => false,
            }),
            Pattern::FileName(expected) => {
                let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                    return false;
                };
                let logical = name.strip_suffix(TEMPLATE_SUFFIX).unwrap_or(name);
                logical == *expected
            }
        }
    }
}

/// What must be enabled for a matching path to be emitted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    /// Any database engine
    Database,
    Engine(Database),
    Framework(HttpFramework),
    TaskRunner(TaskRunner),
    ConfigFormat(ConfigFormat),
    WebSocket,
    Bot,
    Html,
}

impl Feature {
    pub fn is_enabled(&self, config: &Config) -> bool {
        match self {
            Feature::Database => config.has_database(),
            Feature::Engine(engine) => config.database == *engine,
            Feature::Framework(framework) => config.framework == *framework,
            Feature::TaskRunner(runner) => config.task_runner == *runner,
            Feature::ConfigFormat(format) => config.config_format == *format,
            Feature::WebSocket => config.websocket,
            Feature::Bot => config.bot,
            Feature::Html => config.html,
        }
    }
}

/// A path pattern and the feature it depends on
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub pattern: Pattern,
    pub requires: Feature,
}

const fn rule(pattern: Pattern, requires: Feature) -> Rule {
    Rule { pattern, requires }
}

/// Rules for the embedded Go service tree
pub const RULES: &[Rule] = &[
    rule(Pattern::Segment("domain"), Feature::Database),
    rule(Pattern::Segment("usecase"), Feature::Database),
    rule(Pattern::Segment("repository"), Feature::Database),
    rule(Pattern::Segment("migrations"), Feature::Database),
    rule(Pattern::FileName("docker-compose.yml"), Feature::Database),
    rule(Pattern::Segment("postgres"), Feature::Engine(Database::Postgres)),
    rule(Pattern::Segment("mysql"), Feature::Engine(Database::MySql)),
    rule(Pattern::Segment("sqlite"), Feature::Engine(Database::Sqlite)),
    rule(Pattern::Segment("echo"), Feature::Framework(HttpFramework::Echo)),
    rule(Pattern::Segment("fiber"), Feature::Framework(HttpFramework::Fiber)),
    rule(Pattern::Segment("nethttp"), Feature::Framework(HttpFramework::None)),
    rule(Pattern::FileName("Makefile"), Feature::TaskRunner(TaskRunner::Makefile)),
    rule(Pattern::FileName("Taskfile.yml"), Feature::TaskRunner(TaskRunner::Taskfile)),
    rule(Pattern::FileName("config.yaml"), Feature::ConfigFormat(ConfigFormat::Yaml)),
    rule(Pattern::FileName(".env"), Feature::ConfigFormat(ConfigFormat::DotEnv)),
    rule(Pattern::Segment("web"), Feature::Html),
    rule(Pattern::Segment("bot"), Feature::Bot),
    rule(Pattern::Segment("websocket"), Feature::WebSocket),
];

/// Decide whether a template-tree path is emitted, using [`RULES`]
pub fn should_emit(template_path: &Path, config: &Config) -> bool {
    should_emit_with(RULES, template_path, config)
}

/// Decide whether a path is emitted under a custom rule table
///
/// A path is skipped as soon as one matching rule's feature is disabled.
pub fn should_emit_with(rules: &[Rule], template_path: &Path, config: &Config) -> bool {
    !rules
        .iter()
        .any(|r| r.pattern.matches(template_path) && !r.requires.is_enabled(config))
}
