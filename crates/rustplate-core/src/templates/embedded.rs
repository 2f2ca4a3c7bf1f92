//! The bundled `rust-project` template, embedded at compile time.
//!
//! Every file under `templates/rust-project/` is loaded with [`include_bytes!`]
//! (paths are relative to this source file), so an installed `rustplate`
//! binary renders the template without the source checkout. [`extract`]
//! writes the files back out to a directory that the renderer can walk.
//!
//! ## Adding a template file
//!
//! 1. Place the file under `templates/rust-project/`
//! 2. Add an entry to [`RUST_PROJECT`]
//! 3. Run `cargo test`: `test_embedded_matches_template_dir` fails when the
//!    list and the directory disagree

use std::path::Path;

use crate::error::Result;

/// `(path relative to the template root, contents)` for the bundled template.
pub const RUST_PROJECT: &[(&str, &[u8])] = &[
    (".config/nextest.toml", include_bytes!("../../templates/rust-project/.config/nextest.toml")),
    (".gitattributes", include_bytes!("../../templates/rust-project/.gitattributes")),
    (".github/labeler.yml", include_bytes!("../../templates/rust-project/.github/labeler.yml")),
    (".github/labels.yml", include_bytes!("../../templates/rust-project/.github/labels.yml")),
    (".github/release-drafter.yml", include_bytes!("../../templates/rust-project/.github/release-drafter.yml")),
    (".github/renovate.json", include_bytes!("../../templates/rust-project/.github/renovate.json")),
    (".github/workflows/CI.yml", include_bytes!("../../templates/rust-project/.github/workflows/CI.yml")),
    (".github/workflows/labeler.yml", include_bytes!("../../templates/rust-project/.github/workflows/labeler.yml")),
    (".github/workflows/release-drafter.yml", include_bytes!("../../templates/rust-project/.github/workflows/release-drafter.yml")),
    (".github/workflows/release.yml", include_bytes!("../../templates/rust-project/.github/workflows/release.yml")),
    (".gitignore", include_bytes!("../../templates/rust-project/.gitignore")),
    (".rustfmt.toml", include_bytes!("../../templates/rust-project/.rustfmt.toml")),
    ("Cargo.toml.hbs", include_bytes!("../../templates/rust-project/Cargo.toml.hbs")),
    ("LICENSE.hbs", include_bytes!("../../templates/rust-project/LICENSE.hbs")),
    ("README.md.hbs", include_bytes!("../../templates/rust-project/README.md.hbs")),
    ("docs/img/logo.png", include_bytes!("../../templates/rust-project/docs/img/logo.png")),
    ("rustplate.json", include_bytes!("../../templates/rust-project/rustplate.json")),
    ("src/lib.rs.hbs", include_bytes!("../../templates/rust-project/src/lib.rs.hbs")),
    ("src/main.rs.hbs", include_bytes!("../../templates/rust-project/src/main.rs.hbs")),
];

/// Write an embedded template into `root`, creating directories as needed.
pub fn extract(files: &[(&str, &[u8])], root: &Path) -> Result<()> {
    for (rel, contents) in files {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, contents)?;
    }
    tracing::debug!(files = files.len(), root = %root.display(), "embedded template extracted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use walkdir::WalkDir;

    #[test]
    fn test_embedded_matches_template_dir() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("templates/rust-project");
        let on_disk: BTreeSet<String> = WalkDir::new(&dir)
            .into_iter()
            .map(|e| e.unwrap())
            .filter(|e| e.file_type().is_file())
            .map(|e| {
                e.path()
                    .strip_prefix(&dir)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect();
        let embedded: BTreeSet<String> = RUST_PROJECT.iter().map(|(p, _)| p.to_string()).collect();
        assert_eq!(on_disk, embedded);
    }

    #[test]
    fn test_extract_writes_files() {
        let dir = tempfile::tempdir().unwrap();
        extract(RUST_PROJECT, dir.path()).unwrap();
        assert!(dir.path().join("rustplate.json").exists());
        assert!(dir.path().join(".github/workflows/CI.yml").exists());
        let logo = std::fs::read(dir.path().join("docs/img/logo.png")).unwrap();
        assert_eq!(&logo[1..4], b"PNG");
    }
}
