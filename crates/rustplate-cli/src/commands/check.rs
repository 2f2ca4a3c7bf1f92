use std::path::Path;

use anyhow::Result;

use rustplate_core::answers::Answers;
use rustplate_core::digest::digest_tree;
use rustplate_core::fixture::{sample_answers, RenderedProject};
use rustplate_core::render::RenderOptions;
use rustplate_core::verify::{self, EXPECTED_FILES};

use crate::output;

/// Render into a scoped temporary directory and verify the output.
///
/// Checks that every expected file exists and that no declared placeholder
/// token is left in any text file. With `twice`, renders a second time and
/// requires byte-identical trees. Temporary directories are removed on every
/// path out of this function.
pub fn run(template_root: &Path, data_file: Option<&Path>, expect: &[String], twice: bool) -> Result<()> {
    output::print_command("check", None);

    let answers = match data_file {
        Some(path) => Answers::load(path)?,
        None => sample_answers(),
    };
    let expected: Vec<String> = if expect.is_empty() {
        EXPECTED_FILES.iter().map(|s| s.to_string()).collect()
    } else {
        expect.to_vec()
    };
    let total = if twice { 3 } else { 2 };

    output::print_phase(1, total, "Rendering template");
    let project = RenderedProject::render(template_root, &answers, &RenderOptions::default())?;
    output::print_field("Files", project.report().files.len());

    output::print_phase(2, total, "Verifying output");
    let report = verify::verify(project.path(), &expected, &project.template_vars())?;
    output::print_field("Scanned", report.scanned);
    for violation in report.violations() {
        output::print_violation(violation);
    }

    let mut failed = !report.is_clean();

    if twice {
        output::print_phase(3, total, "Rendering again for determinism");
        let again = RenderedProject::render(template_root, &answers, &RenderOptions::default())?;
        let first = digest_tree(project.path())?;
        let second = digest_tree(again.path())?;
        let differing = first.diff(&second);
        for path in &differing {
            output::print_drift(path);
        }
        failed |= !differing.is_empty();
        again.close()?;
    }

    project.close()?;

    if failed {
        anyhow::bail!("template verification failed");
    }
    output::print_done("Template rendered cleanly");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustplate_core::fixture::BundledTemplate;

    #[test]
    fn test_check_bundled_template() {
        let bundled = BundledTemplate::extract().unwrap();
        run(bundled.path(), None, &[], true).unwrap();
    }

    #[test]
    fn test_check_fails_on_missing_expectation() {
        let bundled = BundledTemplate::extract().unwrap();
        let result = run(
            bundled.path(),
            None,
            &["does/not/exist.txt".to_string()],
            false,
        );
        assert!(result.is_err());
    }
}
