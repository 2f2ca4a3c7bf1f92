//! CLI command implementations for rustplate.
//!
//! Each module corresponds to a subcommand (`rustplate <command>`).

pub mod check;
pub mod new;
pub mod vars;
