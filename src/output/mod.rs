//! Report formatting and display
//!
//! - `config` - Output configuration types
//! - `console` - Colored summary and warnings for terminals
//! - `json` - JSON output

mod config;
mod console;
mod json;

pub use config::OutputConfig;
pub use console::ReportFormatter;
pub use json::{print_json, to_json};
