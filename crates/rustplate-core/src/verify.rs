//! Verification of a rendered project tree.
//!
//! Two checks, both deliberately shallow:
//! - every expected path exists;
//! - no declared `{{placeholder}}` token survives in any text file.
//!
//! Raster images are skipped by extension. Any other file must be UTF-8.

use std::fmt;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{Result, RustplateError};

/// Paths every binary-project render of the bundled template must contain.
pub const EXPECTED_FILES: &[&str] = &[
    ".github/workflows/CI.yml",
    ".github/workflows/labeler.yml",
    ".github/workflows/release-drafter.yml",
    ".github/workflows/release.yml",
    ".github/renovate.json",
    ".github/labels.yml",
    ".github/release-drafter.yml",
    ".gitattributes",
    ".gitignore",
    ".rustfmt.toml",
    "src/main.rs",
    "Cargo.toml",
    "LICENSE",
    "README.md",
];

/// Extensions excluded from the leftover-token scan.
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "ico", "webp"];

/// A single verification failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// An expected file is not present.
    MissingFile { path: PathBuf },
    /// A placeholder token was left in a rendered file.
    LeftoverToken { token: String, path: PathBuf },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingFile { path } => {
                write!(f, "{} did not exist in generated template", path.display())
            }
            Self::LeftoverToken { token, path } => {
                write!(f, "Found template tag ({token}) in {}", path.display())
            }
        }
    }
}

/// Result of [`verify`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerifyReport {
    pub missing: Vec<Violation>,
    pub leftovers: Vec<Violation>,
    /// Number of files scanned for tokens.
    pub scanned: usize,
}

impl VerifyReport {
    pub fn is_clean(&self) -> bool {
        self.missing.is_empty() && self.leftovers.is_empty()
    }

    pub fn violations(&self) -> impl Iterator<Item = &Violation> {
        self.missing.iter().chain(self.leftovers.iter())
    }

    /// `Err(VerificationFailed)` unless the report is clean.
    pub fn into_result(self) -> Result<()> {
        if self.is_clean() {
            return Ok(());
        }
        let mut violations = self.missing;
        violations.extend(self.leftovers);
        Err(RustplateError::VerificationFailed { violations })
    }
}

/// Expected paths (relative to `root`) that do not exist.
pub fn missing_files<S: AsRef<str>>(root: &Path, expected: &[S]) -> Vec<Violation> {
    expected
        .iter()
        .map(|rel| PathBuf::from(rel.as_ref()))
        .filter(|rel| !root.join(rel).exists())
        .map(|path| Violation::MissingFile { path })
        .collect()
}

/// Scan every non-image file under `root` for each token.
///
/// Returns the violations and the number of files scanned.
pub fn leftover_tokens<S: AsRef<str>>(root: &Path, tokens: &[S]) -> Result<(Vec<Violation>, usize)> {
    let mut violations = Vec::new();
    let mut scanned = 0;

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_dir() || is_image(entry.path()) {
            continue;
        }

        let bytes = std::fs::read(entry.path())?;
        let contents = String::from_utf8(bytes).map_err(|_| RustplateError::UnreadableText {
            path: entry.path().to_path_buf(),
        })?;
        scanned += 1;

        for token in tokens {
            let token = token.as_ref();
            if contents.contains(token) {
                violations.push(Violation::LeftoverToken {
                    token: token.to_string(),
                    path: entry.path().to_path_buf(),
                });
            }
        }
    }

    Ok((violations, scanned))
}

/// Run both checks.
pub fn verify<E: AsRef<str>, T: AsRef<str>>(
    root: &Path,
    expected: &[E],
    tokens: &[T],
) -> Result<VerifyReport> {
    let missing = missing_files(root, expected);
    let (leftovers, scanned) = leftover_tokens(root, tokens)?;

    for v in missing.iter().chain(leftovers.iter()) {
        tracing::warn!("{v}");
    }
    tracing::info!(
        scanned,
        missing = missing.len(),
        leftovers = leftovers.len(),
        "verification finished"
    );

    Ok(VerifyReport {
        missing,
        leftovers,
        scanned,
    })
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| IMAGE_EXTENSIONS.iter().any(|i| ext.eq_ignore_ascii_case(i)))
}
