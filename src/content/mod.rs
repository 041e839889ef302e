//! Content module - post models, API wire types and the home page loader

pub mod loader;
mod post;
pub mod wire;

pub use loader::{load_home, HomeProps, LoadContext};
pub use post::{DisplayPost, Post, PostPage};
