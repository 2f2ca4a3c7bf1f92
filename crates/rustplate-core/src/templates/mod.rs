//! Template rendering for project scaffolding.
//!
//! The bundled template is embedded into the binary via [`include_bytes!`] in
//! the [`embedded`] module. Template files are rendered at runtime with
//! [Handlebars](https://handlebarsjs.com/) via [`renderer::TemplateRenderer`].
//!
//! ## Template variables
//!
//! Templates use Handlebars syntax. Every variable a template may reference is
//! declared in the template's `rustplate.json` manifest, for example:
//! - `{{project_name}}`: human-readable project name
//! - `{{project_slug}}`: crate/package name
//! - `{{project_type}}`: `binary` or `library`
//!
//! Conditions (`when` entries in the manifest) are ordinary templates whose
//! output is read with [`renderer::is_truthy`], so the built-in helpers work
//! there too: `{{#if (eq project_type "binary")}}true{{/if}}`.

pub mod embedded;
pub mod renderer;
