//! Template versions and version pins.
//!
//! A template declares its own `X.Y.Z` version in `rustplate.json`. Callers
//! render either the latest template (`latest`, or `HEAD` for people used to
//! git refs) or pin an exact version, and rendering refuses to run when the
//! template on disk does not match the pin.

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, RustplateError};
use crate::manifest::TemplateManifest;

/// A semver-like version with major.minor.patch components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl Version {
    /// Parse the first `X.Y.Z` pattern found in a string.
    ///
    /// Handles `"0.3.1"`, `"v0.3.1"` and `"rust-project@0.3.1"`.
    pub fn parse(s: &str) -> Option<Self> {
        s.char_indices()
            .filter(|(_, c)| c.is_ascii_digit())
            .find_map(|(i, _)| Self::parse_at(s, i))
    }

    /// Try to parse `X.Y.Z` starting at byte offset `start`.
    fn parse_at(s: &str, start: usize) -> Option<Self> {
        let mut parts = s[start..].splitn(3, '.');
        let major: u32 = parts.next()?.parse().ok()?;
        let minor: u32 = parts.next()?.parse().ok()?;
        // patch may have a trailing pre-release or build suffix ("0-beta1")
        let patch_str: String = parts
            .next()?
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .collect();
        let patch: u32 = patch_str.parse().ok()?;

        Some(Self {
            major,
            minor,
            patch,
        })
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Which template version a render should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VersionPin {
    /// Whatever version is on disk.
    #[default]
    Latest,
    /// Exactly this version.
    Exact(Version),
}

impl VersionPin {
    /// Check the pin against a loaded manifest.
    pub fn check(&self, manifest: &TemplateManifest) -> Result<()> {
        let found = Version::parse(&manifest.version)
            .ok_or_else(|| RustplateError::InvalidVersion(manifest.version.clone()))?;

        match self {
            Self::Latest => Ok(()),
            Self::Exact(pinned) if *pinned == found => Ok(()),
            Self::Exact(pinned) => Err(RustplateError::TemplateVersionMismatch {
                pinned: pinned.to_string(),
                found: found.to_string(),
            }),
        }
    }
}

impl FromStr for VersionPin {
    type Err = RustplateError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "" | "latest" | "HEAD" => Ok(Self::Latest),
            other => Version::parse(other)
                .map(Self::Exact)
                .ok_or_else(|| RustplateError::InvalidVersion(other.to_string())),
        }
    }
}

impl fmt::Display for VersionPin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Latest => f.write_str("latest"),
            Self::Exact(v) => write!(f, "{v}"),
        }
    }
}
