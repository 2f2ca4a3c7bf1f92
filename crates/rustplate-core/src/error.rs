//! Unified error types for rustplate.

use std::path::PathBuf;
use thiserror::Error;

use crate::verify::Violation;

/// All errors that can occur while loading, rendering, or verifying a template.
#[derive(Error, Debug)]
pub enum RustplateError {
    // --- Manifest ---

    /// The template root has no `rustplate.json`.
    #[error("template manifest not found at {path}")]
    ManifestNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The manifest exists but is not valid JSON for its schema.
    #[error("failed to parse template manifest {path}")]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    // --- Answers ---

    /// An answers file (`--data-file`) is not a JSON object.
    #[error("failed to parse answers file {path}")]
    AnswersParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The answers record could not be serialized.
    #[error("failed to write answers record {path}")]
    AnswersRecord {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// An answer was supplied for a variable the manifest does not declare.
    #[error("unknown template variable: {0}")]
    UnknownVariable(String),

    /// A variable has neither an answer nor a default.
    #[error("no answer for template variable '{0}' and no default")]
    MissingAnswer(String),

    /// An answer does not fit the declared variable kind.
    #[error("invalid answer for '{name}': {reason}")]
    InvalidAnswer { name: String, reason: String },

    // --- Versioning ---

    /// A version string has no `X.Y.Z` component.
    #[error("invalid version: {0}")]
    InvalidVersion(String),

    /// An exact version pin does not match the template's declared version.
    #[error("template version mismatch: pinned {pinned}, template is {found}")]
    TemplateVersionMismatch { pinned: String, found: String },

    // --- Rendering ---

    /// Handlebars rejected a template (syntax error or missing variable in strict mode).
    #[error("template rendering failed for {name}: {message}")]
    TemplateRender { name: String, message: String },

    /// The destination already holds files and overwriting was not requested.
    #[error("destination is not empty: {0}")]
    DestinationNotEmpty(PathBuf),

    // --- Verification ---

    /// A rendered, non-image file could not be read as UTF-8 text.
    #[error("rendered file is not valid UTF-8 text: {path}")]
    UnreadableText { path: PathBuf },

    /// The rendered tree failed verification.
    #[error("verification failed:\n{}", format_violations(.violations))]
    VerificationFailed { violations: Vec<Violation> },

    // --- General ---

    /// Directory traversal failed.
    #[error(transparent)]
    Walk(#[from] walkdir::Error),

    /// A filesystem I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A catch-all for errors from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

fn format_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| format!("  - {v}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Alias for `Result<T, RustplateError>`.
pub type Result<T> = std::result::Result<T, RustplateError>;
