//! rustplate CLI: render and verify the Rust project template.
//!
//! Three commands:
//! - `new` renders a project, prompting for anything not supplied;
//! - `check` renders into a throwaway directory and verifies the output;
//! - `vars` lists the variables the template declares.

mod commands;
mod output;
mod prompt;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use rustplate_core::fixture::BundledTemplate;

#[derive(Parser)]
#[command(
    name = "rustplate",
    about = "Scaffold Rust projects from a Handlebars template",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Template root containing rustplate.json (default: the embedded rust-project template)
    #[arg(long, global = true, env = "RUSTPLATE_TEMPLATE")]
    template: Option<PathBuf>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a new project
    New {
        /// Destination directory
        dest: PathBuf,

        /// Answer a variable up front (repeatable)
        #[arg(short = 'd', long = "data", value_name = "KEY=VALUE")]
        data: Vec<String>,

        /// JSON file of answers
        #[arg(long)]
        data_file: Option<PathBuf>,

        /// Never prompt; use defaults for anything not supplied
        #[arg(long)]
        defaults: bool,

        /// Render into a non-empty destination
        #[arg(long)]
        overwrite: bool,

        /// Template version to require ("latest", "HEAD" or X.Y.Z)
        #[arg(long, default_value = "latest")]
        vcs_ref: String,
    },

    /// Render into a temporary directory and verify the result
    Check {
        /// JSON file of answers (default: the built-in sample answers)
        #[arg(long)]
        data_file: Option<PathBuf>,

        /// Relative path that must exist after rendering (repeatable;
        /// default: the bundled template's expected files)
        #[arg(long = "expect", value_name = "PATH")]
        expect: Vec<String>,

        /// Render twice and require identical output
        #[arg(long)]
        twice: bool,
    },

    /// List the variables the template declares
    Vars,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    // the bundled template lives in a temp dir for the rest of the command
    let bundled;
    let template_root = match cli.template {
        Some(path) => path,
        None => {
            bundled = BundledTemplate::extract()?;
            bundled.path().to_path_buf()
        }
    };
    tracing::debug!(template = %template_root.display(), "using template");

    match cli.command {
        Commands::New {
            dest,
            data,
            data_file,
            defaults,
            overwrite,
            vcs_ref,
        } => {
            commands::new::run(
                &template_root,
                &dest,
                &data,
                data_file.as_deref(),
                defaults,
                overwrite,
                &vcs_ref,
            )?;
        }
        Commands::Check {
            data_file,
            expect,
            twice,
        } => {
            commands::check::run(&template_root, data_file.as_deref(), &expect, twice)?;
        }
        Commands::Vars => {
            commands::vars::run(&template_root)?;
        }
    }

    Ok(())
}
