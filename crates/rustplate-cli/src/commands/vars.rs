use std::path::Path;

use anyhow::Result;

use rustplate_core::manifest::{placeholder_token, TemplateManifest, VariableKind};

use crate::output;

/// List the template's declared variables and their placeholder tokens.
pub fn run(template_root: &Path) -> Result<()> {
    let manifest = TemplateManifest::load(template_root)?;
    output::print_command("vars", Some(&manifest.version));

    for (name, variable) in &manifest.variables {
        output::print_variable_token(&placeholder_token(name));
        let kind = match &variable.kind {
            VariableKind::Choice { choices } => format!("choice [{}]", choices.join(", ")),
            other => other.as_str().to_string(),
        };
        output::print_field("Type", kind);
        if !variable.help.is_empty() {
            output::print_field("Help", &variable.help);
        }
        if let Some(default) = &variable.default {
            output::print_field("Default", default);
        }
        if let Some(when) = &variable.when {
            output::print_field("When", when);
        }
    }

    Ok(())
}
