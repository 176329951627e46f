//! Form rendering module
//!
//! - `field_renderer`: one field line plus its error line
//! - `panel_renderer`: a gated panel of fields

mod field_renderer;
mod panel_renderer;

pub use field_renderer::draw_help_text;
pub use panel_renderer::{draw_panel, panel_height};
