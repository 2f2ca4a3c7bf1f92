//! Rendering a template source tree into a destination directory.
//!
//! The walk is sorted, so the same template and answers always produce the
//! same tree. For every entry below the template root:
//!
//! 1. excluded paths (and the manifest) are skipped;
//! 2. conditional paths whose `when` renders falsy are skipped, subtree included;
//! 3. each path component is rendered as a template; a component that renders
//!    empty drops the entry;
//! 4. files ending in the manifest's `templates_suffix` are rendered and the
//!    suffix is stripped, everything else is copied byte-for-byte.
//!
//! Finally `.rustplate-answers.json` records where the project came from.

use std::path::{Component, Path, PathBuf};

use serde_json::Value;
use walkdir::WalkDir;

use crate::answers::Answers;
use crate::error::{Result, RustplateError};
use crate::manifest::TemplateManifest;
use crate::templates::renderer::TemplateRenderer;
use crate::version::VersionPin;

/// Name of the answers record written into every rendered project.
pub const ANSWERS_FILE: &str = ".rustplate-answers.json";

/// Options controlling a single render.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Template version to require.
    pub vcs_ref: VersionPin,
    /// Render into a non-empty destination.
    pub overwrite: bool,
}

/// What a render produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderReport {
    /// Files written, relative to the destination, sorted.
    pub files: Vec<PathBuf>,
    /// Source entries skipped by a condition or an empty path component.
    pub skipped: Vec<PathBuf>,
}

/// Render `template_root` into `dst` with a fully resolved answer set.
pub fn render_project(
    template_root: &Path,
    dst: &Path,
    answers: &Answers,
    options: &RenderOptions,
) -> Result<RenderReport> {
    let manifest = TemplateManifest::load(template_root)?;
    render_with_manifest(&manifest, template_root, dst, answers, options)
}

/// Like [`render_project`], with an already-loaded manifest.
pub fn render_with_manifest(
    manifest: &TemplateManifest,
    template_root: &Path,
    dst: &Path,
    answers: &Answers,
    options: &RenderOptions,
) -> Result<RenderReport> {
    options.vcs_ref.check(manifest)?;

    if !options.overwrite && !is_empty_dir(dst)? {
        return Err(RustplateError::DestinationNotEmpty(dst.to_path_buf()));
    }
    std::fs::create_dir_all(dst)?;

    let renderer = TemplateRenderer::new();
    let context = answers.to_context();
    let mut report = RenderReport::default();

    let mut walker = WalkDir::new(template_root)
        .min_depth(1)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter();

    while let Some(entry) = walker.next() {
        let entry = entry?;
        let rel = entry
            .path()
            .strip_prefix(template_root)
            .map_err(|e| anyhow::anyhow!("walked outside template root: {e}"))?
            .to_path_buf();
        let is_dir = entry.file_type().is_dir();

        if manifest.is_excluded(&rel) {
            tracing::debug!(path = %rel.display(), "excluded");
            if is_dir {
                walker.skip_current_dir();
            }
            continue;
        }

        let enabled = manifest
            .conditions_for(&rel)
            .map(|when| renderer.is_truthy(when, &context))
            .collect::<Result<Vec<_>>>()?
            .into_iter()
            .all(|b| b);

        let target = if enabled {
            render_rel_path(&renderer, &rel, &context)?
        } else {
            None
        };

        let Some(target) = target else {
            tracing::debug!(path = %rel.display(), "skipped");
            report.skipped.push(rel);
            if is_dir {
                walker.skip_current_dir();
            }
            continue;
        };

        let out = dst.join(&target);
        if is_dir {
            std::fs::create_dir_all(&out)?;
            continue;
        }

        if let Some(parent) = out.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let stripped = strip_suffix(&target, &manifest.templates_suffix);
        match stripped {
            Some(final_rel) => {
                let source = std::fs::read_to_string(entry.path()).map_err(|_| {
                    RustplateError::UnreadableText {
                        path: entry.path().to_path_buf(),
                    }
                })?;
                let rendered =
                    renderer.render_named(&rel.display().to_string(), &source, &context)?;
                std::fs::write(dst.join(&final_rel), rendered)?;
                tracing::debug!(path = %final_rel.display(), "rendered");
                report.files.push(final_rel);
            }
            None => {
                std::fs::copy(entry.path(), &out)?;
                tracing::debug!(path = %target.display(), "copied");
                report.files.push(target);
            }
        }
    }

    write_answers_record(manifest, template_root, dst, answers)?;
    report.files.push(PathBuf::from(ANSWERS_FILE));
    report.files.sort();

    tracing::info!(
        files = report.files.len(),
        skipped = report.skipped.len(),
        dst = %dst.display(),
        "template rendered"
    );
    Ok(report)
}

/// Render each component of a relative path. `None` if any component is empty.
fn render_rel_path(
    renderer: &TemplateRenderer,
    rel: &Path,
    context: &Value,
) -> Result<Option<PathBuf>> {
    let mut out = PathBuf::new();
    for component in rel.components() {
        let raw = component.as_os_str().to_string_lossy();
        let rendered = if raw.contains("{{") {
            renderer.render_named(&rel.display().to_string(), &raw, context)?
        } else {
            raw.into_owned()
        };
        if rendered.trim().is_empty() {
            return Ok(None);
        }
        // an answer like "../x", "a/b" or "/abs" must not move the entry out of dst
        let mut parts = Path::new(&rendered).components();
        if !matches!((parts.next(), parts.next()), (Some(Component::Normal(_)), None)) {
            return Err(RustplateError::TemplateRender {
                name: rel.display().to_string(),
                message: format!("path component renders to {rendered:?}, not a single file name"),
            });
        }
        out.push(rendered);
    }
    Ok(Some(out))
}

/// `Some(path without suffix)` when the file name ends with a non-empty `suffix`.
fn strip_suffix(path: &Path, suffix: &str) -> Option<PathBuf> {
    if suffix.is_empty() {
        return None;
    }
    let name = path.file_name()?.to_str()?;
    let base = name.strip_suffix(suffix).filter(|b| !b.is_empty())?;
    Some(path.with_file_name(base))
}

fn is_empty_dir(path: &Path) -> Result<bool> {
    match std::fs::read_dir(path) {
        Ok(mut entries) => Ok(entries.next().is_none()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(true),
        Err(e) => Err(e.into()),
    }
}

fn write_answers_record(
    manifest: &TemplateManifest,
    template_root: &Path,
    dst: &Path,
    answers: &Answers,
) -> Result<()> {
    let mut record = serde_json::Map::new();
    record.insert(
        "_src_path".into(),
        Value::String(template_root.display().to_string()),
    );
    record.insert(
        "_template_version".into(),
        Value::String(manifest.version.clone()),
    );
    for (k, v) in answers.sorted() {
        record.insert(k.to_string(), v.clone());
    }

    let path = dst.join(ANSWERS_FILE);
    let json = serde_json::to_string_pretty(&Value::Object(record))
        .map_err(|e| RustplateError::AnswersRecord {
            path: path.clone(),
            source: e,
        })?;
    std::fs::write(&path, json + "\n")?;
    Ok(())
}
