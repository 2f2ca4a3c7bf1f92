//! Content digests of rendered trees.
//!
//! Used to check that rendering is deterministic: the same template and the
//! same answers must give byte-identical trees, which shows up as equal
//! [`TreeDigest`]s.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use walkdir::WalkDir;

use crate::error::Result;

/// SHA-256 of every file in a tree, keyed by relative path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeDigest {
    pub files: BTreeMap<PathBuf, String>,
    /// Hash over the sorted `(path, file hash)` sequence.
    pub combined: String,
}

impl TreeDigest {
    /// Paths whose content differs, or that exist on only one side.
    pub fn diff(&self, other: &TreeDigest) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = self
            .files
            .keys()
            .chain(other.files.keys())
            .filter(|p| self.files.get(*p) != other.files.get(*p))
            .cloned()
            .collect();
        paths.sort();
        paths.dedup();
        paths
    }
}

/// Hash every regular file below `root`.
pub fn digest_tree(root: &Path) -> Result<TreeDigest> {
    let mut files = BTreeMap::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let rel = entry
            .path()
            .strip_prefix(root)
            .map_err(|e| anyhow::anyhow!("walked outside digest root: {e}"))?
            .to_path_buf();
        let bytes = std::fs::read(entry.path())?;
        files.insert(rel, hex::encode(Sha256::digest(&bytes)));
    }

    let mut hasher = Sha256::new();
    for (path, hash) in &files {
        // separators keep ("ab", "c") distinct from ("a", "bc")
        hasher.update(path.to_string_lossy().as_bytes());
        hasher.update([0u8]);
        hasher.update(hash.as_bytes());
        hasher.update(b"\n");
    }
    let combined = hex::encode(hasher.finalize());

    Ok(TreeDigest { files, combined })
}
