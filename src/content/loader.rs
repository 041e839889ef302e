//! Data loading for the home page
//!
//! This is the hook the rendering host calls before it renders: it queries
//! the first page of posts and hands back the props the page is built from.

use serde::Serialize;

use crate::client::{ApiError, ContentApi, QueryOptions};
use crate::config::ApiConfig;

use super::PostPage;

/// What the rendering host knows about the request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadContext {
    /// Whether preview mode is active
    pub preview: bool,
    /// Preview ref, when preview mode carries one
    pub preview_ref: Option<String>,
}

impl LoadContext {
    /// Context for a preview session with the given ref
    pub fn preview(reference: impl Into<String>) -> Self {
        Self {
            preview: true,
            preview_ref: Some(reference.into()),
        }
    }
}

/// Props for the home page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HomeProps {
    pub posts_pagination: PostPage,
    pub preview: bool,
}

/// Query the first page of posts for the home page
pub async fn load_home(
    api: &dyn ContentApi,
    config: &ApiConfig,
    ctx: &LoadContext,
) -> Result<HomeProps, ApiError> {
    let options = QueryOptions {
        document_type: config.document_type.clone(),
        page_size: config.page_size,
        reference: ctx.preview_ref.clone(),
    };

    let posts_pagination = api.query(&options).await?;

    Ok(HomeProps {
        posts_pagination,
        preview: ctx.preview,
    })
}
