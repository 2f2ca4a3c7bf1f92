//! The template manifest (`rustplate.json`).
//!
//! The manifest sits at the root of a template source tree and declares every
//! variable the template's files may reference. It is the single source of
//! truth for both rendering (which questions to ask) and verification (which
//! `{{placeholder}}` tokens must not survive into the output).
//!
//! ```json
//! {
//!   "version": "0.3.0",
//!   "exclude": [".git"],
//!   "conditional_paths": [
//!     { "path": "src/main.rs.hbs", "when": "{{#if (eq project_type \"binary\")}}true{{/if}}" }
//!   ],
//!   "variables": {
//!     "project_name": { "type": "str", "help": "Project name" },
//!     "nextest": { "type": "bool", "help": "Use cargo-nextest?", "default": true }
//!   }
//! }
//! ```

use std::path::{Component, Path};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Result, RustplateError};

/// File name of the manifest inside a template root.
pub const MANIFEST_FILE: &str = "rustplate.json";

fn default_templates_suffix() -> String {
    ".hbs".into()
}

/// Parsed `rustplate.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateManifest {
    /// Template version, `X.Y.Z`.
    pub version: String,
    /// Paths (relative to the template root) that are never rendered.
    #[serde(default)]
    pub exclude: Vec<String>,
    /// Suffix marking files whose contents are Handlebars templates.
    #[serde(default = "default_templates_suffix")]
    pub templates_suffix: String,
    /// Paths emitted only when their condition holds.
    #[serde(default)]
    pub conditional_paths: Vec<ConditionalPath>,
    /// Declared variables, in question order.
    pub variables: IndexMap<String, Variable>,
}

/// A file or directory that is only rendered when `when` is truthy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConditionalPath {
    /// Source-tree path (before suffix stripping), relative to the template root.
    pub path: String,
    /// Condition template.
    pub when: String,
}

/// A single declared template variable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Variable {
    #[serde(flatten)]
    pub kind: VariableKind,
    /// Prompt text shown when asking interactively.
    #[serde(default)]
    pub help: String,
    /// Default value. String defaults are rendered as templates.
    #[serde(default)]
    pub default: Option<serde_json::Value>,
    /// Condition template; when falsy the question is skipped.
    #[serde(default)]
    pub when: Option<String>,
}

/// The value type of a variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum VariableKind {
    Str,
    Bool,
    Choice { choices: Vec<String> },
}

impl VariableKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Str => "str",
            Self::Bool => "bool",
            Self::Choice { .. } => "choice",
        }
    }
}

impl TemplateManifest {
    /// Load `<template_root>/rustplate.json`.
    pub fn load(template_root: &Path) -> Result<Self> {
        let path = template_root.join(MANIFEST_FILE);
        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(RustplateError::ManifestNotFound { path, source: e });
            }
            Err(e) => return Err(e.into()),
        };
        serde_json::from_str(&contents).map_err(|e| RustplateError::ManifestParse { path, source: e })
    }

    /// The literal placeholder token for every declared variable, e.g. `{{description}}`.
    pub fn placeholder_tokens(&self) -> Vec<String> {
        self.variables
            .keys()
            .map(|name| placeholder_token(name))
            .collect()
    }

    /// Whether a source-relative path is excluded, either directly or through
    /// an excluded parent directory. The manifest itself is always excluded.
    pub fn is_excluded(&self, rel_path: &Path) -> bool {
        if rel_path == Path::new(MANIFEST_FILE) {
            return true;
        }
        self.exclude
            .iter()
            .any(|pattern| path_has_prefix(rel_path, Path::new(pattern)))
    }

    /// Conditions that apply to `rel_path`, including those on parent directories.
    pub fn conditions_for<'a>(&'a self, rel_path: &'a Path) -> impl Iterator<Item = &'a str> + 'a {
        self.conditional_paths
            .iter()
            .filter(move |c| path_has_prefix(rel_path, Path::new(&c.path)))
            .map(|c| c.when.as_str())
    }
}

/// Format a variable name as its `{{name}}` token.
pub fn placeholder_token(name: &str) -> String {
    format!("{{{{{name}}}}}")
}

/// Component-wise prefix check, so `src` matches `src/main.rs` but not `srcs`.
fn path_has_prefix(path: &Path, prefix: &Path) -> bool {
    let normal = |p: &Path| -> Vec<String> {
        p.components()
            .filter_map(|c| match c {
                Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect()
    };
    let prefix = normal(prefix);
    !prefix.is_empty() && normal(path).starts_with(&prefix)
}
