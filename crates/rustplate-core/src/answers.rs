//! Answer sets: the concrete values for one rendering run.
//!
//! Answers come from three places, in priority order: values provided up
//! front (CLI `--data`, an answers file, or a test fixture), a [`Prompter`]
//! for anything still missing, and finally the manifest's defaults.

use std::collections::BTreeMap;
use std::path::Path;

use indexmap::IndexMap;
use serde_json::Value;

use crate::error::{Result, RustplateError};
use crate::manifest::{TemplateManifest, Variable, VariableKind};
use crate::templates::renderer::TemplateRenderer;

/// Ordered mapping of variable name to value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Answers {
    values: IndexMap<String, Value>,
}

impl Answers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.values.iter()
    }

    /// Merge `other` over `self`; later values win.
    pub fn extend(&mut self, other: Answers) {
        self.values.extend(other.values);
    }

    /// Parse a `key=value` pair. `true`/`false` become booleans.
    pub fn parse_pair(pair: &str) -> Result<(String, Value)> {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| RustplateError::InvalidAnswer {
                name: pair.to_string(),
                reason: "expected key=value".into(),
            })?;
        let key = key.trim();
        if key.is_empty() {
            return Err(RustplateError::InvalidAnswer {
                name: pair.to_string(),
                reason: "empty variable name".into(),
            });
        }
        let value = match value {
            "true" => Value::Bool(true),
            "false" => Value::Bool(false),
            s => Value::String(s.to_string()),
        };
        Ok((key.to_string(), value))
    }

    /// Load answers from a JSON object file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let values: IndexMap<String, Value> =
            serde_json::from_str(&contents).map_err(|e| RustplateError::AnswersParse {
                path: path.to_path_buf(),
                source: e,
            })?;
        Ok(Self { values })
    }

    /// The answers as a Handlebars data context.
    pub fn to_context(&self) -> Value {
        Value::Object(
            self.values
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        )
    }

    /// Answers sorted by key, for stable on-disk records.
    pub fn sorted(&self) -> BTreeMap<&str, &Value> {
        self.values.iter().map(|(k, v)| (k.as_str(), v)).collect()
    }
}

/// Source of answers for variables nobody supplied up front.
pub trait Prompter {
    /// Ask for `name`. `default` is the already-rendered default, if any.
    /// Returning `Ok(None)` falls back to the default.
    fn ask(&mut self, name: &str, variable: &Variable, default: Option<&Value>)
        -> Result<Option<Value>>;
}

/// A [`Prompter`] that never asks, so defaults are always taken.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultsPrompter;

impl Prompter for DefaultsPrompter {
    fn ask(&mut self, _: &str, _: &Variable, _: Option<&Value>) -> Result<Option<Value>> {
        Ok(None)
    }
}

/// Resolve a full answer set for `manifest`.
///
/// Variables are visited in declaration order, so `when` conditions and
/// string defaults may reference any variable declared earlier.
pub fn resolve(
    manifest: &TemplateManifest,
    provided: &Answers,
    prompter: &mut dyn Prompter,
) -> Result<Answers> {
    if let Some(unknown) = provided
        .values
        .keys()
        .find(|k| !manifest.variables.contains_key(*k))
    {
        return Err(RustplateError::UnknownVariable(unknown.clone()));
    }

    let renderer = TemplateRenderer::new();
    let mut resolved = Answers::new();

    for (name, variable) in &manifest.variables {
        let context = resolved.to_context();
        let default = variable
            .default
            .as_ref()
            .map(|d| render_default(&renderer, name, d, &context))
            .transpose()?;

        let asked = match &variable.when {
            Some(when) => renderer.is_truthy(when, &context)?,
            None => true,
        };

        if !asked {
            tracing::debug!(variable = %name, "condition false, using default");
            let value = default.unwrap_or_else(|| Value::String(String::new()));
            resolved.insert(name.clone(), value);
            continue;
        }

        let value = match provided.get(name) {
            Some(v) => Some(v.clone()),
            None => prompter.ask(name, variable, default.as_ref())?,
        }
        .or(default)
        .ok_or_else(|| RustplateError::MissingAnswer(name.clone()))?;

        let value = validate(name, &variable.kind, value)?;
        resolved.insert(name.clone(), value);
    }

    Ok(resolved)
}

fn render_default(
    renderer: &TemplateRenderer,
    name: &str,
    default: &Value,
    context: &Value,
) -> Result<Value> {
    match default {
        Value::String(s) => renderer
            .render_named(&format!("default for {name}"), s, context)
            .map(Value::String),
        other => Ok(other.clone()),
    }
}

fn validate(name: &str, kind: &VariableKind, value: Value) -> Result<Value> {
    let invalid = |reason: String| RustplateError::InvalidAnswer {
        name: name.to_string(),
        reason,
    };

    match (kind, value) {
        (VariableKind::Str, Value::String(s)) => Ok(Value::String(s)),
        (VariableKind::Str, other) => Err(invalid(format!("expected a string, got {other}"))),

        (VariableKind::Bool, Value::Bool(b)) => Ok(Value::Bool(b)),
        (VariableKind::Bool, Value::String(s)) => match s.as_str() {
            "true" => Ok(Value::Bool(true)),
            "false" => Ok(Value::Bool(false)),
            _ => Err(invalid(format!("expected true or false, got {s:?}"))),
        },
        (VariableKind::Bool, other) => Err(invalid(format!("expected a boolean, got {other}"))),

        (VariableKind::Choice { choices }, Value::String(s)) => {
            if choices.iter().any(|c| c == &s) {
                Ok(Value::String(s))
            } else {
                Err(invalid(format!(
                    "{s:?} is not one of: {}",
                    choices.join(", ")
                )))
            }
        }
        (VariableKind::Choice { .. }, other) => {
            Err(invalid(format!("expected one of the choices, got {other}")))
        }
    }
}
