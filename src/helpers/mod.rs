//! Helper functions for rendering
//!
//! Formatting utilities shared by the page renderer, the pagination
//! controller and the CLI.

mod date;

pub use date::*;
