//! Mapping from template-tree paths to destination paths

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Suffix marking a file as a template to render rather than copy
pub const TEMPLATE_SUFFIX: &str = ".tmpl";

/// Maps template-tree paths onto an output directory
#[derive(Debug, Clone)]
pub struct PathMapper {
    template_root: PathBuf,
    output_root: PathBuf,
}

impl PathMapper {
    /// `output_root` is expected to be absolute; see [`crate::generator::resolve_output_dir`]
    pub fn new(template_root: impl Into<PathBuf>, output_root: impl Into<PathBuf>) -> Self {
        Self {
            template_root: template_root.into(),
            output_root: output_root.into(),
        }
    }

    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    /// Path of an entry relative to the template root
    pub fn relative<'a>(&self, template_path: &'a Path) -> &'a Path {
        template_path
            .strip_prefix(&self.template_root)
            .unwrap_or(template_path)
    }

    /// Destination for a template-tree path
    ///
    /// The template root is replaced by the output root and a trailing
    /// [`TEMPLATE_SUFFIX`] is removed from the file name.
    pub fn map(&self, template_path: &Path) -> PathBuf {
        let mut destination = self.output_root.join(self.relative(template_path));

        if let Some(stripped) = destination
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(|name| name.strip_suffix(TEMPLATE_SUFFIX))
            .filter(|stem| !stem.is_empty())
            .map(OsString::from)
        {
            destination.set_file_name(stripped);
        }

        destination
    }
}

/// Whether a path names a template (as opposed to a plain file)
pub fn is_template(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.len() > TEMPLATE_SUFFIX.len() && name.ends_with(TEMPLATE_SUFFIX))
}
