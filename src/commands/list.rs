//! List posts from the content API

use anyhow::Result;
use std::io::Write;
use std::sync::Arc;

use crate::client::ContentApi;
use crate::content::{load_home, LoadContext};
use crate::pagination::{DisplayState, PaginationController};
use crate::Blog;

/// List posts, following every continuation when `all` is set
pub async fn run(blog: &Blog, all: bool) -> Result<()> {
    let api = blog.client()?;
    let state = collect(blog, api, all).await?;

    let stdout = std::io::stdout();
    print_posts(&mut stdout.lock(), &state)?;
    Ok(())
}

/// Load the first page and, with `all`, drain the remaining pages
pub async fn collect(blog: &Blog, api: Arc<dyn ContentApi>, all: bool) -> Result<DisplayState> {
    let props = load_home(api.as_ref(), &blog.config.api, &LoadContext::default()).await?;

    let controller = PaginationController::new(api, blog.config.date_formatter()?);
    let mut state = controller.initialize(&props.posts_pagination);

    if all {
        let pages = controller.drain(&mut state, blog.config.max_pages).await?;
        tracing::info!("Loaded {} additional pages", pages);
    }

    Ok(state)
}

fn print_posts<W: Write>(out: &mut W, state: &DisplayState) -> std::io::Result<()> {
    if state.is_empty() {
        writeln!(out, "No posts found")?;
        return Ok(());
    }

    writeln!(out, "Posts ({}):", state.len())?;
    for post in state.posts() {
        writeln!(
            out,
            "  {} - {} by {} [{}]",
            post.published_at, post.title, post.author, post.id
        )?;
    }
    if state.has_more() {
        writeln!(out, "More posts available (use --all to load them)")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{ApiError, QueryOptions};
    use crate::content::{Post, PostPage};
    use async_trait::async_trait;

    struct TwoPages;

    fn post(id: &str) -> Post {
        Post {
            id: id.to_string(),
            published_at: Some("2023-03-15T14:05:00Z".to_string()),
            title: id.to_uppercase(),
            subtitle: String::new(),
            author: "Ana".to_string(),
        }
    }

    #[async_trait]
    impl ContentApi for TwoPages {
        async fn query(&self, _options: &QueryOptions) -> Result<PostPage, ApiError> {
            Ok(PostPage {
                items: vec![post("a"), post("b")],
                next_page: Some("page-2".to_string()),
            })
        }

        async fn fetch_page(&self, next_page: &str) -> Result<PostPage, ApiError> {
            assert_eq!(next_page, "page-2");
            Ok(PostPage {
                items: vec![post("c"), post("d")],
                next_page: None,
            })
        }
    }

    #[tokio::test]
    async fn test_collect_first_page_only() {
        let dir = tempfile::tempdir().unwrap();
        let blog = Blog::new(dir.path()).unwrap();

        let state = collect(&blog, Arc::new(TwoPages), false).await.unwrap();

        assert_eq!(state.len(), 2);
        assert_eq!(state.next_page(), Some("page-2"));
    }

    #[tokio::test]
    async fn test_collect_all_pages() {
        let dir = tempfile::tempdir().unwrap();
        let blog = Blog::new(dir.path()).unwrap();

        let state = collect(&blog, Arc::new(TwoPages), true).await.unwrap();

        let ids: Vec<_> = state.posts().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c", "d"]);
        assert!(!state.has_more());
    }

    #[tokio::test]
    async fn test_print_posts() {
        let dir = tempfile::tempdir().unwrap();
        let blog = Blog::new(dir.path()).unwrap();
        let state = collect(&blog, Arc::new(TwoPages), false).await.unwrap();

        let mut out = Vec::new();
        print_posts(&mut out, &state).unwrap();
        let out = String::from_utf8(out).unwrap();

        assert!(out.starts_with("Posts (2):"));
        assert!(out.contains("  15 Mar 2023 - A by Ana [a]"));
        assert!(out.contains("use --all"));
    }

    #[test]
    fn test_print_no_posts() {
        let mut out = Vec::new();
        print_posts(&mut out, &DisplayState::default()).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "No posts found\n");
    }
}
