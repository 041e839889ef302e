//! HTTP rendering host
//!
//! Renders the home page per request, serves the load-more endpoint used by
//! the page script, handles preview mode and falls back to static files.
//!
//! The load-more endpoint keeps no state between requests: each one builds
//! its own `PaginationController`, so its in-flight guard never trips over
//! HTTP. Overlapping loads are prevented by the page script, which disables
//! the button until the pending request settles.

mod error;

pub use error::LoadMoreError;

use anyhow::Result;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::client::ContentApi;
use crate::config::SiteConfig;
use crate::content::{load_home, DisplayPost, LoadContext};
use crate::helpers::DateFormatter;
use crate::pagination::{DisplayState, PaginationController};
use crate::templates::{ErrorPage, HomePage, TemplateRenderer};
use crate::Blog;

/// Cookie holding the preview ref while preview mode is active
pub const PREVIEW_COOKIE: &str = "io.prismic.preview";

/// Shared server state
pub struct AppState {
    config: SiteConfig,
    api: Arc<dyn ContentApi>,
    renderer: TemplateRenderer,
    formatter: DateFormatter,
    static_dir: PathBuf,
}

impl AppState {
    pub fn new(config: SiteConfig, api: Arc<dyn ContentApi>) -> Result<Self> {
        let formatter = config.date_formatter()?;
        let renderer = TemplateRenderer::new()?;
        let static_dir = PathBuf::from(&config.static_dir);
        Ok(Self {
            config,
            api,
            renderer,
            formatter,
            static_dir,
        })
    }

    /// Serve static files from `dir` instead of the configured path
    pub fn with_static_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.static_dir = dir.into();
        self
    }

    fn error_page(&self, status: StatusCode, message: &str) -> Response {
        let page = ErrorPage::new(&self.config, status.as_u16(), message);
        match self.renderer.render_error(&page) {
            Ok(html) => (status, Html(html)).into_response(),
            Err(e) => {
                tracing::error!("Failed to render error page: {}", e);
                (status, message.to_string()).into_response()
            }
        }
    }
}

/// Build the application router
pub fn router(state: Arc<AppState>) -> Router {
    let static_files = ServeDir::new(&state.static_dir);

    Router::new()
        .route("/", get(home_handler))
        .route("/api/posts", get(more_posts_handler))
        .route("/api/preview", get(preview_handler))
        .route("/api/exit-preview", get(exit_preview_handler))
        .fallback_service(static_files)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the server
pub async fn start(blog: &Blog, ip: &str, port: u16) -> Result<()> {
    let state = AppState::new(blog.config.clone(), blog.client()?)?
        .with_static_dir(&blog.static_dir);
    let state = Arc::new(state);
    let app = router(state);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Home page: load the first page of posts and render it
async fn home_handler(State(state): State<Arc<AppState>>, jar: CookieJar) -> Response {
    let ctx = match jar.get(PREVIEW_COOKIE) {
        Some(cookie) if !cookie.value().is_empty() => LoadContext::preview(cookie.value()),
        _ => LoadContext::default(),
    };

    let props = match load_home(state.api.as_ref(), &state.config.api, &ctx).await {
        Ok(props) => props,
        Err(e) => {
            tracing::error!("Failed to load posts: {}", e);
            return state.error_page(StatusCode::BAD_GATEWAY, "Could not load posts.");
        }
    };

    let display = DisplayState::from_page(&props.posts_pagination, &state.formatter);
    let page = HomePage::new(&state.config, &display, props.preview);
    match state.renderer.render_home(&page) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!("Failed to render home page: {}", e);
            state.error_page(StatusCode::INTERNAL_SERVER_ERROR, "Could not render page.")
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct MoreQuery {
    next: String,
}

/// Body of a successful load-more response
#[derive(Debug, Serialize, Deserialize)]
pub struct MoreResponse {
    pub posts: Vec<DisplayPost>,
    pub next_page: Option<String>,
}

/// Load the page addressed by `next` and return its formatted posts
async fn more_posts_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MoreQuery>,
) -> Result<Json<MoreResponse>, LoadMoreError> {
    let controller = PaginationController::new(state.api.clone(), state.formatter.clone());
    let mut display = DisplayState::resume(query.next);
    controller.load_more(&mut display).await?;

    let (posts, next_page) = display.into_parts();
    Ok(Json(MoreResponse { posts, next_page }))
}

#[derive(Debug, Deserialize)]
pub struct PreviewQuery {
    token: Option<String>,
}

/// Enter preview mode with the ref passed by the CMS
async fn preview_handler(jar: CookieJar, Query(query): Query<PreviewQuery>) -> Response {
    let Some(token) = query.token.filter(|t| !t.is_empty()) else {
        return (StatusCode::BAD_REQUEST, "Missing preview token").into_response();
    };

    tracing::info!("Entering preview mode");
    let cookie = Cookie::build((PREVIEW_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax);
    (jar.add(cookie), Redirect::to("/")).into_response()
}

/// Leave preview mode
async fn exit_preview_handler(jar: CookieJar) -> impl IntoResponse {
    tracing::info!("Exiting preview mode");
    let jar = jar.remove(Cookie::build(PREVIEW_COOKIE).path("/"));
    (jar, Redirect::to("/"))
}
