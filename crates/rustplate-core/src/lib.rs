//! Core library for rustplate.
//!
//! rustplate renders a project template (a directory of files containing
//! Handlebars `{{placeholders}}` plus a `rustplate.json` variable manifest) into
//! a new project, and verifies that the result is complete: expected files
//! exist and no declared placeholder survived.
//!
//! - [`manifest`]: the declared variables and path rules
//! - [`answers`]: answer sets and their resolution against a manifest
//! - [`render`]: walking and rendering the template tree
//! - [`verify`]: expected-file and leftover-token checks
//! - [`fixture`]: a render scoped to a temporary directory
//! - [`digest`]: tree hashes for determinism checks

pub mod answers;
pub mod digest;
pub mod error;
pub mod fixture;
pub mod manifest;
pub mod render;
pub mod templates;
pub mod verify;
pub mod version;
