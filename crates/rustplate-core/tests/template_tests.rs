//! Renders the bundled Rust project template and checks the output.

use std::path::PathBuf;

use serde_json::json;

use rustplate_core::answers::Answers;
use rustplate_core::digest::digest_tree;
use rustplate_core::error::RustplateError;
use rustplate_core::fixture::{sample_answers, BundledTemplate, RenderedProject};
use rustplate_core::render::{RenderOptions, ANSWERS_FILE};
use rustplate_core::templates::embedded;
use rustplate_core::verify::{self, Violation, EXPECTED_FILES};

fn template() -> RenderedProject {
    let bundled = BundledTemplate::extract().unwrap();
    RenderedProject::render(bundled.path(), &sample_answers(), &RenderOptions::default()).unwrap()
}

fn render_answers(
    answers: &Answers,
    options: &RenderOptions,
) -> rustplate_core::error::Result<RenderedProject> {
    let bundled = BundledTemplate::extract().unwrap();
    RenderedProject::render(bundled.path(), answers, options)
}

fn render_with(overrides: &[(&str, serde_json::Value)]) -> RenderedProject {
    let mut answers = sample_answers();
    for (k, v) in overrides {
        answers.insert(*k, v.clone());
    }
    render_answers(&answers, &RenderOptions::default()).unwrap()
}

#[test]
fn test_expected_files() {
    let template = template();
    for file in EXPECTED_FILES {
        assert!(
            template.path().join(file).exists(),
            "{file} did not exist in generated template"
        );
    }
}

#[test]
fn test_no_template_tags_remaining() {
    let template = template();
    let template_vars = template.template_vars();
    assert!(template_vars.contains(&"{{description}}".to_string()));

    let (violations, scanned) = verify::leftover_tokens(template.path(), &template_vars).unwrap();
    assert!(scanned > EXPECTED_FILES.len());
    assert!(violations.is_empty(), "{violations:?}");
}

#[test]
fn test_verify_passes_on_bundled_template() {
    let template = template();
    let report = verify::verify(template.path(), EXPECTED_FILES, &template.template_vars()).unwrap();
    assert!(report.is_clean());
}

#[test]
fn test_answers_substituted() {
    let template = template();
    let cargo = std::fs::read_to_string(template.path().join("Cargo.toml")).unwrap();
    assert!(cargo.contains("name = \"testy\""));
    assert!(cargo.contains("authors = [\"Test McTest <testmctest@gmail.com>\"]"));
    assert!(cargo.contains("repository = \"https://github.com/TestUser/testy\""));
    assert!(cargo.contains("[[bin]]"));

    let main = std::fs::read_to_string(template.path().join("src/main.rs")).unwrap();
    assert!(main.contains("Hello from testy!"));

    let license = std::fs::read_to_string(template.path().join("LICENSE")).unwrap();
    assert!(license.contains("MIT License"));
    assert!(license.contains("Copyright (c) Test McTest"));
}

#[test]
fn test_workflow_expressions_untouched() {
    let template = template();
    let ci = std::fs::read_to_string(template.path().join(".github/workflows/CI.yml")).unwrap();
    assert!(ci.contains("${{ matrix.os }}"));
}

#[test]
fn test_binary_assets_copied_verbatim() {
    let template = template();
    let (_, src) = embedded::RUST_PROJECT
        .iter()
        .find(|(path, _)| *path == "docs/img/logo.png")
        .unwrap();
    let out = std::fs::read(template.path().join("docs/img/logo.png")).unwrap();
    assert_eq!(*src, out.as_slice());
}

#[test]
fn test_library_project_type() {
    let template = render_with(&[("project_type", json!("library"))]);
    assert!(template.path().join("src/lib.rs").exists());
    assert!(!template.path().join("src/main.rs").exists());

    let cargo = std::fs::read_to_string(template.path().join("Cargo.toml")).unwrap();
    assert!(!cargo.contains("[[bin]]"));

    let missing = verify::missing_files(template.path(), EXPECTED_FILES);
    assert_eq!(
        missing,
        vec![Violation::MissingFile {
            path: PathBuf::from("src/main.rs")
        }]
    );
}

#[test]
fn test_nextest_flag() {
    let with = template();
    assert!(with.path().join(".config/nextest.toml").exists());

    let without = render_with(&[("nextest", json!(false))]);
    assert!(!without.path().join(".config").exists());
    let readme = std::fs::read_to_string(without.path().join("README.md")).unwrap();
    assert!(readme.contains("cargo test"));
    assert!(!readme.contains("cargo nextest run"));
}

#[test]
fn test_apache_license() {
    let template = render_with(&[("license", json!("Apache-2.0"))]);
    let license = std::fs::read_to_string(template.path().join("LICENSE")).unwrap();
    assert!(license.contains("Apache License, Version 2.0"));
    assert!(!license.contains("MIT License"));
}

#[test]
fn test_defaults_fill_unanswered_variables() {
    let answers = Answers::from_pairs([
        ("project_name", "minimal"),
        ("github_username", "someone"),
        ("author_name", "Some One"),
        ("author_email", "some@one.dev"),
    ]);
    let template = render_answers(&answers, &RenderOptions::default()).unwrap();
    assert_eq!(
        template.answers().get("github_url"),
        Some(&json!("https://github.com/someone/minimal"))
    );
    assert_eq!(template.answers().get("binary_name"), Some(&json!("minimal")));
    assert!(template.path().join("src/main.rs").exists());
}

#[test]
fn test_answers_record_written() {
    let template = template();
    let record: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(template.path().join(ANSWERS_FILE)).unwrap(),
    )
    .unwrap();
    assert_eq!(record["_template_version"], "0.3.0");
    assert_eq!(record["project_slug"], "testy");
    assert_eq!(record["nextest"], true);
}

#[test]
fn test_rendering_is_deterministic() {
    let bundled = BundledTemplate::extract().unwrap();
    let options = RenderOptions::default();
    let first = RenderedProject::render(bundled.path(), &sample_answers(), &options).unwrap();
    let second = RenderedProject::render(bundled.path(), &sample_answers(), &options).unwrap();
    let a = digest_tree(first.path()).unwrap();
    let b = digest_tree(second.path()).unwrap();
    // same extracted root, so _src_path matches too
    assert_eq!(a.diff(&b), Vec::<PathBuf>::new());
    assert_eq!(a.combined, b.combined);
}

#[test]
fn test_planted_token_is_reported() {
    let template = template();
    std::fs::write(template.path().join("NOTES.md"), "by {{author_name}}\n").unwrap();
    let report = verify::verify(template.path(), EXPECTED_FILES, &template.template_vars()).unwrap();
    assert_eq!(report.leftovers.len(), 1);
    let message = report.leftovers[0].to_string();
    assert!(message.starts_with("Found template tag ({{author_name}}) in "));
    assert!(message.ends_with("NOTES.md"));
}

#[test]
fn test_close_removes_directory() {
    let template = template();
    let path = template.path().to_path_buf();
    assert!(path.exists());
    template.close().unwrap();
    assert!(!path.exists());
}

#[test]
fn test_directory_removed_after_failed_assertion() {
    let (tx, rx) = std::sync::mpsc::channel();
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(move || {
        let template = template();
        tx.send(template.path().to_path_buf()).unwrap();
        assert!(template.path().join("does-not-exist").exists());
    }));
    assert!(result.is_err());
    let path = rx.recv().unwrap();
    assert!(!path.exists());
}

#[test]
fn test_unknown_answer_rejected() {
    let mut answers = sample_answers();
    answers.insert("colour", "blue");
    let err = render_answers(&answers, &RenderOptions::default()).err().unwrap();
    assert!(matches!(err, RustplateError::UnknownVariable(name) if name == "colour"));
}

#[test]
fn test_version_pin() {
    let pinned = RenderOptions {
        vcs_ref: "0.3.0".parse().unwrap(),
        ..Default::default()
    };
    assert!(render_answers(&sample_answers(), &pinned).is_ok());

    let stale = RenderOptions {
        vcs_ref: "0.1.0".parse().unwrap(),
        ..Default::default()
    };
    let err = render_answers(&sample_answers(), &stale).err().unwrap();
    assert!(matches!(err, RustplateError::TemplateVersionMismatch { .. }));
}

#[test]
fn test_hyphenated_slug_uses_crate_ident_in_code() {
    let template = render_with(&[
        ("project_slug", json!("my-project")),
        ("project_type", json!("library")),
    ]);
    assert_eq!(template.answers().get("crate_name"), Some(&json!("my_project")));

    let readme = std::fs::read_to_string(template.path().join("README.md")).unwrap();
    assert!(readme.contains("cargo add my-project"));
    assert!(readme.contains("assert_eq!(my_project::add(2, 2), 4);"));

    let cargo = std::fs::read_to_string(template.path().join("Cargo.toml")).unwrap();
    assert!(cargo.contains("name = \"my-project\""));
}

#[test]
fn test_quoted_description_escaped_in_cargo_toml() {
    let template = render_with(&[("description", json!(r#"Say "hi" \o/"#))]);
    let cargo = std::fs::read_to_string(template.path().join("Cargo.toml")).unwrap();
    assert!(cargo.contains(r#"description = "Say \"hi\" \\o/""#), "{cargo}");

    // Markdown gets the answer as typed
    let readme = std::fs::read_to_string(template.path().join("README.md")).unwrap();
    assert!(readme.contains(r#"Say "hi" \o/"#));
}
