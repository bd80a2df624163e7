//! Rendering of outlines and collection reports.

mod json;

pub use json::{to_json, write_json, JsonFormat};
