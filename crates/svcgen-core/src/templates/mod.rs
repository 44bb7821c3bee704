//! Embedded template tree and the machinery that turns it into a project
//!
//! This module provides:
//! - The Go service template tree, embedded at build time
//! - The inclusion policy deciding which entries a config emits
//! - Path mapping from template-tree paths to destination paths
//! - Template rendering (minijinja) and the tree walker writing the output

pub mod mapper;
pub mod policy;
pub mod renderer;
pub mod walker;

use include_dir::{include_dir, Dir};

pub use mapper::{is_template, PathMapper, TEMPLATE_SUFFIX};
pub use policy::{should_emit, Feature, Pattern, Rule, RULES};
pub use walker::Walker;

static GO_SERVICE_TREE: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/templates/go-service");

/// The template tree bundled with this build
pub fn embedded_tree() -> &'static Dir<'static> {
    &GO_SERVICE_TREE
}
