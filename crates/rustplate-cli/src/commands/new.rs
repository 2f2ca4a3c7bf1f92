use std::path::Path;

use anyhow::Result;

use rustplate_core::answers::{self, Answers, DefaultsPrompter, Prompter};
use rustplate_core::manifest::TemplateManifest;
use rustplate_core::render::{self, RenderOptions};
use rustplate_core::version::VersionPin;

use crate::output;
use crate::prompt::TerminalPrompter;

/// Render a new project from the template.
///
/// Answers are collected from `--data-file`, then `--data` pairs (which win),
/// then interactively for anything left unless `--defaults` is given.
pub fn run(
    template_root: &Path,
    dest: &Path,
    data: &[String],
    data_file: Option<&Path>,
    defaults: bool,
    overwrite: bool,
    vcs_ref: &str,
) -> Result<()> {
    output::print_command("new", Some(&dest.display()));

    output::print_phase(1, 3, "Loading template manifest");
    let manifest = TemplateManifest::load(template_root)?;
    let pin: VersionPin = vcs_ref.parse()?;
    output::print_field("Template", template_root.display());
    output::print_field("Version", &manifest.version);

    output::print_phase(2, 3, "Collecting answers");
    let provided = collect_answers(data, data_file)?;
    let mut prompter: Box<dyn Prompter> = if defaults {
        Box::new(DefaultsPrompter)
    } else {
        Box::new(TerminalPrompter)
    };
    let answers = answers::resolve(&manifest, &provided, prompter.as_mut())?;

    output::print_phase(3, 3, "Rendering project");
    let options = RenderOptions {
        vcs_ref: pin,
        overwrite,
    };
    let report = render::render_with_manifest(&manifest, template_root, dest, &answers, &options)?;

    output::print_done(&format!(
        "Rendered {} files into {}",
        report.files.len(),
        dest.display()
    ));
    for path in &report.skipped {
        output::print_field("Skipped", path.display());
    }
    output::print_next_steps(dest);

    Ok(())
}

/// Merge `--data-file` with `--data` pairs; pairs win.
pub fn collect_answers(data: &[String], data_file: Option<&Path>) -> Result<Answers> {
    let mut answers = match data_file {
        Some(path) => Answers::load(path)?,
        None => Answers::new(),
    };
    for pair in data {
        let (key, value) = Answers::parse_pair(pair)?;
        answers.insert(key, value);
    }
    Ok(answers)
}
