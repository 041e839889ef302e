//! Incremental pagination of the post list
//!
//! A `DisplayState` accumulates formatted posts page by page. The
//! `PaginationController` owns the content client and allows at most one
//! page fetch in flight at a time.

use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;

use crate::client::{ApiError, ContentApi};
use crate::content::{DisplayPost, PostPage};
use crate::helpers::DateFormatter;

/// Pagination errors
#[derive(Debug, Error)]
pub enum PaginationError {
    /// There is no continuation reference left
    #[error("no more pages to load")]
    Exhausted,

    /// Another page fetch has not settled yet
    #[error("a page is already being loaded")]
    InFlight,

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Posts loaded so far plus the reference to the next page
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct DisplayState {
    posts: Vec<DisplayPost>,
    next_page: Option<String>,
}

impl DisplayState {
    /// Initial state built from the first page
    pub fn from_page(page: &PostPage, formatter: &DateFormatter) -> Self {
        let mut state = Self::default();
        state.append(page, formatter);
        state
    }

    /// A state holding no posts yet, positioned at `next_page`
    ///
    /// Used by the load-more endpoint, where the accumulated posts live in
    /// the browser and only the continuation reference is sent back.
    pub fn resume(next_page: impl Into<String>) -> Self {
        Self {
            posts: Vec::new(),
            next_page: Some(next_page.into()),
        }
    }

    pub fn posts(&self) -> &[DisplayPost] {
        &self.posts
    }

    pub fn next_page(&self) -> Option<&str> {
        self.next_page.as_deref()
    }

    pub fn has_more(&self) -> bool {
        self.next_page.is_some()
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn into_parts(self) -> (Vec<DisplayPost>, Option<String>) {
        (self.posts, self.next_page)
    }

    fn append(&mut self, page: &PostPage, formatter: &DateFormatter) {
        self.posts
            .extend(page.items.iter().map(|p| p.to_display(formatter)));
        self.next_page = page.next_page.clone();
    }
}

/// Clears the in-flight flag when the fetch settles or is dropped
struct InFlightGuard<'a>(&'a AtomicBool);

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Drives "load more" against a content API
pub struct PaginationController {
    api: Arc<dyn ContentApi>,
    formatter: DateFormatter,
    in_flight: AtomicBool,
}

impl PaginationController {
    pub fn new(api: Arc<dyn ContentApi>, formatter: DateFormatter) -> Self {
        Self {
            api,
            formatter,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Whether a page fetch is currently pending
    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Build the initial state from the first page
    pub fn initialize(&self, page: &PostPage) -> DisplayState {
        DisplayState::from_page(page, &self.formatter)
    }

    /// Fetch the next page and append it to `state`
    ///
    /// Returns the number of posts appended. On any error `state` is left
    /// exactly as it was.
    pub async fn load_more(&self, state: &mut DisplayState) -> Result<usize, PaginationError> {
        let next_page = state.next_page.as_deref().ok_or(PaginationError::Exhausted)?;
        let _guard = InFlightGuard::acquire(&self.in_flight).ok_or(PaginationError::InFlight)?;

        let page = self.api.fetch_page(next_page).await.map_err(|e| {
            tracing::warn!("Failed to load more posts: {}", e);
            e
        })?;

        state.append(&page, &self.formatter);
        tracing::debug!(
            "Appended {} posts ({} total, more: {})",
            page.items.len(),
            state.len(),
            state.has_more()
        );
        Ok(page.items.len())
    }

    /// Load pages until the API reports no continuation or `max_pages` is reached
    pub async fn drain(
        &self,
        state: &mut DisplayState,
        max_pages: usize,
    ) -> Result<usize, PaginationError> {
        let mut loaded = 0;
        while state.has_more() {
            if loaded >= max_pages {
                tracing::warn!("Stopped after {} pages, more posts remain", max_pages);
                break;
            }
            self.load_more(state).await?;
            loaded += 1;
        }
        Ok(loaded)
    }
}
