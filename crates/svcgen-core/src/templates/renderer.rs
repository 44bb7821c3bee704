//! Rendering a single template against the config

use crate::config::TemplateContext;
use crate::error::GenerateError;
use minijinja::{AutoEscape, Environment, UndefinedBehavior};

/// Render template `source` (identified by `path` in errors)
///
/// Undefined variables are errors, nothing is HTML-escaped (the output is Go
/// source and config files), and a trailing newline is preserved so literal
/// text comes back unchanged.
pub fn render(path: &str, source: &str, context: &TemplateContext) -> Result<String, GenerateError> {
    let template_error = |source: minijinja::Error| GenerateError::Template {
        path: path.to_string(),
        source,
    };

    let mut env = Environment::new();
    env.set_undefined_behavior(UndefinedBehavior::Strict);
    env.set_keep_trailing_newline(true);
    env.set_auto_escape_callback(|_| AutoEscape::None);

    env.add_template(path, source).map_err(template_error)?;
    env.get_template(path)
        .map_err(template_error)?
        .render(context)
        .map_err(template_error)
}

/// Render raw template bytes, rejecting content that is not UTF-8
pub fn render_bytes(
    path: &str,
    contents: &[u8],
    context: &TemplateContext,
) -> Result<String, GenerateError> {
    let source = std::str::from_utf8(contents).map_err(|_| GenerateError::NonUtf8Template {
        path: path.to_string(),
    })?;
    render(path, source, context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, Database, HttpFramework};

    fn context() -> TemplateContext {
        Config {
            framework: HttpFramework::Echo,
            database: Database::Postgres,
            ..Config::new("svc1").unwrap()
        }
        .template_context()
    }

    #[test]
    fn test_literal_text_is_unchanged() {
        let source = "package main\n\n// <b>&</b> \"quoted\"\n\tindent\n\n";
        assert_eq!(render("plain.go.tmpl", source, &context()).unwrap(), source);
    }

    #[test]
    fn test_substitutes_fields() {
        let out = render(
            "go.mod.tmpl",
            "module {{ project_name }}\nport={{ http_port }} db={{ db_port }}\n",
            &context(),
        )
        .unwrap();
        assert_eq!(out, "module svc1\nport=8080 db=5432\n");
    }

    #[test]
    fn test_conditionals() {
        let source = "{% if is_echo %}echo{% elif is_fiber %}fiber{% else %}std{% endif %}";
        assert_eq!(render("c.tmpl", source, &context()).unwrap(), "echo");
    }

    #[test]
    fn test_raw_blocks_keep_go_template_syntax() {
        let source = "{% raw %}{{ .Title }}{% endraw %}";
        assert_eq!(render("t.tmpl", source, &context()).unwrap(), "{{ .Title }}");
    }

    #[test]
    fn test_html_is_not_escaped() {
        let out = render("index.html.tmpl", "<h1>{{ project_name }}</h1>", &context()).unwrap();
        assert_eq!(out, "<h1>svc1</h1>");
    }

    #[test]
    fn test_undefined_field_is_an_error() {
        let err = render("bad.go.tmpl", "{{ missing_field }}", &context()).unwrap_err();
        match err {
            GenerateError::Template { path, .. } => assert_eq!(path, "bad.go.tmpl"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_syntax_error_is_an_error() {
        let err = render("broken.tmpl", "{% if has_db %}unterminated", &context()).unwrap_err();
        assert!(matches!(err, GenerateError::Template { .. }));
    }

    #[test]
    fn test_non_utf8_rejected() {
        let err = render_bytes("bin.tmpl", &[0xff, 0xfe, 0x00], &context()).unwrap_err();
        assert!(matches!(err, GenerateError::NonUtf8Template { .. }));
    }
}
