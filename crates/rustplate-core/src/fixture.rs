//! A rendered project living in a scoped temporary directory.
//!
//! [`RenderedProject`] owns a [`tempfile::TempDir`]. The directory is removed
//! when the value is dropped, including during unwinding after a failed
//! assertion, or explicitly through [`RenderedProject::close`] when the caller
//! wants to see cleanup errors.
//!
//! [`BundledTemplate`] does the same for the embedded `rust-project` template:
//! it extracts the files into a temporary template root for the renderer.

use std::path::Path;

use serde_json::json;
use tempfile::TempDir;

use crate::answers::{self, Answers, DefaultsPrompter};
use crate::error::Result;
use crate::manifest::TemplateManifest;
use crate::render::{self, RenderOptions, RenderReport};
use crate::templates::embedded;

/// The embedded `rust-project` template, extracted to a temporary root.
pub struct BundledTemplate {
    dir: TempDir,
}

impl BundledTemplate {
    pub fn extract() -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix("rustplate-template-")
            .tempdir()?;
        embedded::extract(embedded::RUST_PROJECT, dir.path())?;
        Ok(Self { dir })
    }

    /// Template root containing `rustplate.json`.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

/// The fixed answer set used to exercise the bundled template.
pub fn sample_answers() -> Answers {
    Answers::from_pairs([
        ("project_name", json!("testy")),
        ("project_slug", json!("testy")),
        ("project_type", json!("binary")),
        ("binary_name", json!("testy")),
        ("description", json!("A test package for testing")),
        ("nextest", json!(true)),
        ("license", json!("MIT")),
        ("github_username", json!("TestUser")),
        ("github_url", json!("https://github.com/TestUser/testy")),
        ("author_name", json!("Test McTest")),
        ("author_email", json!("testmctest@gmail.com")),
    ])
}

/// A template rendered into a temporary directory.
pub struct RenderedProject {
    dir: TempDir,
    manifest: TemplateManifest,
    answers: Answers,
    report: RenderReport,
}

impl RenderedProject {
    /// Resolve `provided` against the template's manifest (defaults fill the
    /// gaps, nothing is prompted) and render into a fresh temp directory.
    pub fn render(template_root: &Path, provided: &Answers, options: &RenderOptions) -> Result<Self> {
        let dir = tempfile::Builder::new().prefix("rustplate-").tempdir()?;
        let manifest = TemplateManifest::load(template_root)?;
        let answers = answers::resolve(&manifest, provided, &mut DefaultsPrompter)?;
        let report = render::render_with_manifest(&manifest, template_root, dir.path(), &answers, options)?;
        tracing::debug!(path = %dir.path().display(), "fixture rendered");

        Ok(Self {
            dir,
            manifest,
            answers,
            report,
        })
    }

    /// Root of the rendered tree.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn manifest(&self) -> &TemplateManifest {
        &self.manifest
    }

    pub fn answers(&self) -> &Answers {
        &self.answers
    }

    pub fn report(&self) -> &RenderReport {
        &self.report
    }

    /// Every declared placeholder token, from the template's manifest.
    pub fn template_vars(&self) -> Vec<String> {
        self.manifest.placeholder_tokens()
    }

    /// Remove the directory now, surfacing any I/O error.
    pub fn close(self) -> Result<()> {
        let path = self.dir.path().to_path_buf();
        self.dir.close()?;
        tracing::debug!(path = %path.display(), "fixture removed");
        Ok(())
    }
}
