//! Handlebars-based template renderer.
//!
//! Wraps the [`handlebars::Handlebars`] engine with **strict mode** enabled.
//! Any `{{variable}}` referenced in a template must be present in the data
//! context, otherwise rendering returns an error instead of leaving a hole in
//! the generated file.
//!
//! HTML escaping is disabled: the generated files are YAML, TOML, Markdown and
//! Rust source, where `&` or `<` must come through untouched. Two helpers
//! cover the cases where an answer has to be reshaped for its target format:
//!
//! - `{{crate_ident project_slug}}`: `my-project` becomes `my_project`, the
//!   name under which the crate is referenced from Rust code.
//! - `{{toml_escape description}}`: backslashes, quotes and control
//!   characters escaped for a TOML basic string (`"..."`).
//!
//! ## Usage
//!
//! ```ignore
//! use rustplate_core::templates::renderer::TemplateRenderer;
//!
//! let renderer = TemplateRenderer::new();
//! let data = serde_json::json!({ "project_name": "testy" });
//! let output = renderer.render("# {{project_name}}", &data)?;
//! ```

use handlebars::{handlebars_helper, Handlebars};
use serde_json::Value;

use crate::error::{Result, RustplateError};

handlebars_helper!(crate_ident: |name: str| name.replace('-', "_"));
handlebars_helper!(toml_escape_helper: |text: str| toml_escape(text));

/// Template renderer using Handlebars for generating project files.
pub struct TemplateRenderer {
    hbs: Handlebars<'static>,
}

impl TemplateRenderer {
    /// Create a new renderer with strict mode on and escaping off.
    pub fn new() -> Self {
        let mut hbs = Handlebars::new();
        hbs.set_strict_mode(true);
        hbs.register_escape_fn(handlebars::no_escape);
        hbs.register_helper("crate_ident", Box::new(crate_ident));
        hbs.register_helper("toml_escape", Box::new(toml_escape_helper));
        Self { hbs }
    }

    /// Render a template string with the given data context.
    pub fn render(&self, template: &str, data: &Value) -> Result<String> {
        self.render_named("<inline>", template, data)
    }

    /// Render a template string, naming the source in any error.
    pub fn render_named(&self, name: &str, template: &str, data: &Value) -> Result<String> {
        self.hbs
            .render_template(template, data)
            .map_err(|e| RustplateError::TemplateRender {
                name: name.to_string(),
                message: e.to_string(),
            })
    }

    /// Render a condition template and interpret the result with [`is_truthy`].
    pub fn is_truthy(&self, template: &str, data: &Value) -> Result<bool> {
        let rendered = self.render_named("<condition>", template, data)?;
        Ok(is_truthy(&rendered))
    }
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Interpret rendered text as a boolean.
///
/// Empty output and `false`/`0`/`no`/`off` (any case, surrounding whitespace
/// ignored) are falsy. Everything else is truthy.
pub fn is_truthy(rendered: &str) -> bool {
    let trimmed = rendered.trim();
    !(trimmed.is_empty()
        || ["false", "0", "no", "off"]
            .iter()
            .any(|f| trimmed.eq_ignore_ascii_case(f)))
}

/// Escape `text` for use inside a TOML basic string.
pub fn toml_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{:04X}", c as u32)),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_substitutes_variables() {
        let renderer = TemplateRenderer::new();
        let out = renderer
            .render("name = \"{{project_slug}}\"", &json!({ "project_slug": "testy" }))
            .unwrap();
        assert_eq!(out, "name = \"testy\"");
    }

    #[test]
    fn test_strict_mode_rejects_missing_variable() {
        let renderer = TemplateRenderer::new();
        let err = renderer
            .render_named("README.md.hbs", "{{missing}}", &json!({}))
            .unwrap_err();
        match err {
            RustplateError::TemplateRender { name, .. } => assert_eq!(name, "README.md.hbs"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_no_html_escaping() {
        let renderer = TemplateRenderer::new();
        let out = renderer
            .render("{{description}}", &json!({ "description": "Fast & <small>" }))
            .unwrap();
        assert_eq!(out, "Fast & <small>");
    }

    #[test]
    fn test_condition_with_eq_helper() {
        let renderer = TemplateRenderer::new();
        let data = json!({ "project_type": "binary" });
        assert!(renderer
            .is_truthy("{{#if (eq project_type \"binary\")}}true{{/if}}", &data)
            .unwrap());
        assert!(!renderer
            .is_truthy("{{#if (eq project_type \"library\")}}true{{/if}}", &data)
            .unwrap());
    }

    #[test]
    fn test_is_truthy() {
        assert!(is_truthy("true"));
        assert!(is_truthy(" yes "));
        assert!(is_truthy("binary"));
        assert!(!is_truthy(""));
        assert!(!is_truthy("  \n"));
        assert!(!is_truthy("False"));
        assert!(!is_truthy("0"));
        assert!(!is_truthy("OFF"));
    }

    #[test]
    fn test_crate_ident_helper() {
        let renderer = TemplateRenderer::new();
        let out = renderer
            .render("{{crate_ident project_slug}}::add", &json!({ "project_slug": "my-project" }))
            .unwrap();
        assert_eq!(out, "my_project::add");
    }

    #[test]
    fn test_toml_escape_helper() {
        let renderer = TemplateRenderer::new();
        let out = renderer
            .render(
                "description = \"{{toml_escape description}}\"",
                &json!({ "description": r#"The "best" C:\ tool"# }),
            )
            .unwrap();
        assert_eq!(out, r#"description = "The \"best\" C:\\ tool""#);
    }

    #[test]
    fn test_toml_escape() {
        assert_eq!(toml_escape("plain"), "plain");
        assert_eq!(toml_escape("a\nb\tc"), r"a\nb\tc");
        assert_eq!(toml_escape("bell\u{7}"), r"bell\u0007");
    }
}
