//! Configuration loading and schema definitions
//!
//! Settings shared by the editor, the position view and the CLI.

mod loader;
mod schema;

pub use loader::Config;
pub use schema::*;
