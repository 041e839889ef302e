//! Generate the static home page
//!
//! The build-time counterpart of the server: posts are fetched once with the
//! master ref and `index.html` is written to the public directory together
//! with the static assets.

use anyhow::Result;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use crate::client::ContentApi;
use crate::content::{load_home, LoadContext};
use crate::pagination::DisplayState;
use crate::templates::{HomePage, TemplateRenderer};
use crate::Blog;

/// Generate the site with the configured content API
pub async fn run(blog: &Blog) -> Result<()> {
    let api = blog.client()?;
    run_with_api(blog, api.as_ref()).await
}

/// Generate the site with the given content API
pub async fn run_with_api(blog: &Blog, api: &dyn ContentApi) -> Result<()> {
    let start = std::time::Instant::now();

    let props = load_home(api, &blog.config.api, &LoadContext::default()).await?;
    tracing::info!(
        "Loaded {} posts (more: {})",
        props.posts_pagination.items.len(),
        props.posts_pagination.has_next()
    );

    let formatter = blog.config.date_formatter()?;
    let state = DisplayState::from_page(&props.posts_pagination, &formatter);

    let renderer = TemplateRenderer::new()?;
    let html = renderer.render_home(&HomePage::new(&blog.config, &state, props.preview))?;

    fs::create_dir_all(&blog.public_dir)?;
    let copied = copy_static_assets(&blog.static_dir, &blog.public_dir)?;
    tracing::debug!("Copied {} static files", copied);

    let index = blog.public_dir.join("index.html");
    fs::write(&index, html)?;
    tracing::info!("Generated: {:?}", index);

    let duration = start.elapsed();
    tracing::info!("Completed in {:.2}s", duration.as_secs_f64());

    Ok(())
}

/// Copy everything under `static_dir` into `public_dir`, keeping relative paths
fn copy_static_assets(static_dir: &Path, public_dir: &Path) -> Result<usize> {
    if !static_dir.exists() {
        return Ok(0);
    }

    let mut copied = 0;
    for entry in WalkDir::new(static_dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let relative = path.strip_prefix(static_dir)?;
        let dest = public_dir.join(relative);

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::copy(path, &dest)?;
        copied += 1;
    }

    Ok(copied)
}
