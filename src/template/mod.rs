//! Template system for the nvmetcli configuration document
//!
//! The template is a JSON file with `{{ name }}` placeholders:
//!
//! ```text
//! "subsystems": [
//!     { "nqn": "{{ subsysnqn }}", ... }
//! ]
//! ```
//!
//! A [`TargetDescriptor`] supplies the parameter values, and [`TemplateRenderer`]
//! writes the result to `<subsysnqn>.json`.

mod descriptor;
mod renderer;

pub use descriptor::TargetDescriptor;
pub use renderer::{render_str, TemplateRenderer, TEMPLATE_FILE};
