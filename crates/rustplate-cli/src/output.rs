//! What `rustplate` prints while it renders and checks templates.
//!
//! Everything goes to stdout through [`console`], which drops the colors when
//! stdout is not a terminal. Violations get a tag naming their kind so a
//! failed `check` can be scanned at a glance.

use std::fmt::Display;
use std::path::Path;

use console::style;

use rustplate_core::verify::Violation;

/// `rustplate <command>`, optionally followed by what it acts on.
pub fn print_command(command: &str, subject: Option<&dyn Display>) {
    let title = match subject {
        Some(subject) => format!("rustplate {command}: {subject}"),
        None => format!("rustplate {command}"),
    };
    println!("\n{}", style(&title).bold().cyan());
    println!("{}", style("-".repeat(title.chars().count())).dim());
}

/// One phase of a command, e.g. `(2/3) Collecting answers`.
pub fn print_phase(phase: u32, phases: u32, text: &str) {
    println!("{} {}", style(format!("({phase}/{phases})")).dim(), text);
}

/// An indented `name: value` line under the current phase.
pub fn print_field(name: &str, value: impl Display) {
    println!("    {} {}", style(format!("{name}:")).dim(), value);
}

pub fn print_variable_token(token: &str) {
    println!("\n  {}", style(token).bold());
}

pub fn print_violation(violation: &Violation) {
    println!("{} {}", style(violation_tag(violation)).red().bold(), violation);
}

/// A file whose contents changed between two renders of the same answers.
pub fn print_drift(path: &Path) {
    println!(
        "{} {} differs between renders",
        style("[DRIFT]").yellow().bold(),
        path.display()
    );
}

pub fn print_done(text: &str) {
    println!("{} {}", style("[DONE]").green().bold(), text);
}

/// The commands to run inside a freshly rendered project.
pub fn print_next_steps(dest: &Path) {
    println!("\n  Next steps:");
    println!("    cd {}", dest.display());
    println!("    git init");
    println!("    cargo build\n");
}

fn violation_tag(violation: &Violation) -> &'static str {
    match violation {
        Violation::MissingFile { .. } => "[MISSING]",
        Violation::LeftoverToken { .. } => "[LEFTOVER]",
    }
}
