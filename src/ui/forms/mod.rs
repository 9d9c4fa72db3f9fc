//! Form rendering module
//!
//! - `field_renderer`: text and choice fields with inline errors
//! - `budget`: the budget slider
//! - `attachments`: path input and staged file list

mod attachments;
mod budget;
mod field_renderer;

pub use attachments::{draw_attachment_input, draw_attachment_list};
pub use budget::draw_budget;
pub use field_renderer::{draw_error_line, draw_field, field_height};
