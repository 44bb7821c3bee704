//! Template tree traversal and file emission

use super::mapper::{is_template, PathMapper};
use super::policy::{should_emit_with, Rule};
use super::renderer;
use crate::config::{Config, TemplateContext};
use crate::error::GenerateError;
use include_dir::{Dir, File};
use std::borrow::Cow;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Walks a template tree and writes every included entry
pub struct Walker<'a> {
    config: &'a Config,
    context: TemplateContext,
    mapper: &'a PathMapper,
    rules: &'a [Rule],
    /// Destination -> template path that produced it
    emitted: HashMap<PathBuf, String>,
    written: Vec<PathBuf>,
}

impl<'a> Walker<'a> {
    pub fn new(config: &'a Config, mapper: &'a PathMapper, rules: &'a [Rule]) -> Self {
        Self {
            config,
            context: config.template_context(),
            mapper,
            rules,
            emitted: HashMap::new(),
            written: Vec::new(),
        }
    }

    /// Visit the whole tree, returning the written destinations in visit order
    ///
    /// Stops at the first failure; files written before it are left in place.
    pub fn walk(mut self, tree: &Dir<'_>) -> Result<Vec<PathBuf>, GenerateError> {
        self.visit_dir(tree)?;
        Ok(self.written)
    }

    fn visit_dir(&mut self, dir: &Dir<'_>) -> Result<(), GenerateError> {
        let mut files: Vec<&File<'_>> = dir.files().collect();
        files.sort_by(|a, b| a.path().cmp(b.path()));
        for file in files {
            self.visit_file(file)?;
        }

        let mut dirs: Vec<&Dir<'_>> = dir.dirs().collect();
        dirs.sort_by(|a, b| a.path().cmp(b.path()));
        for subdir in dirs {
            self.visit_dir(subdir)?;
        }

        Ok(())
    }

    fn visit_file(&mut self, file: &File<'_>) -> Result<(), GenerateError> {
        let relative = self.mapper.relative(file.path());
        if !should_emit_with(self.rules, relative, self.config) {
            return Ok(());
        }

        let template_name = display_path(relative);
        let destination = self.mapper.map(file.path());

        if let Some(first) = self
            .emitted
            .insert(destination.clone(), template_name.clone())
        {
            return Err(GenerateError::DestinationCollision {
                first,
                second: template_name,
                destination,
            });
        }

        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent).map_err(|source| GenerateError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let contents: Cow<'_, [u8]> = if is_template(relative) {
            let rendered = renderer::render_bytes(&template_name, file.contents(), &self.context)?;
            Cow::Owned(rendered.into_bytes())
        } else {
            Cow::Borrowed(file.contents())
        };

        fs::write(&destination, &contents).map_err(|source| GenerateError::WriteFile {
            path: destination.clone(),
            source,
        })?;

        self.written.push(destination);
        Ok(())
    }
}

/// Template paths in errors always use forward slashes
fn display_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
