//! Built-in site templates using the Tera template engine
//!
//! Templates are embedded in the binary. Autoescaping is on for every
//! template since titles and authors come straight from the content API.

use serde::Serialize;
use tera::{Context, Tera};
use thiserror::Error;

use crate::config::SiteConfig;
use crate::content::DisplayPost;
use crate::i18n::Locale;
use crate::pagination::DisplayState;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("template error: {0}")]
    Template(#[from] tera::Error),
}

/// Template renderer with embedded site templates
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self, RenderError> {
        let mut tera = Tera::default();

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("site/layout.html")),
            ("index.html", include_str!("site/index.html")),
            ("error.html", include_str!("site/error.html")),
            // Partials
            (
                "partials/header.html",
                include_str!("site/partials/header.html"),
            ),
        ])?;

        Ok(Self { tera })
    }

    /// Render the home page
    pub fn render_home(&self, page: &HomePage<'_>) -> Result<String, RenderError> {
        self.render("index.html", page)
    }

    /// Render an error page
    pub fn render_error(&self, page: &ErrorPage<'_>) -> Result<String, RenderError> {
        self.render("error.html", page)
    }

    fn render<T: Serialize>(&self, template_name: &str, data: &T) -> Result<String, RenderError> {
        let context = Context::from_serialize(data)?;
        Ok(self.tera.render(template_name, &context)?)
    }
}

/// Data structures for template context

#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    pub title: String,
    pub description: String,
    pub lang: &'static str,
}

impl From<&SiteConfig> for SiteData {
    fn from(config: &SiteConfig) -> Self {
        Self {
            title: config.title.clone(),
            description: config.description.clone(),
            lang: config.language.tag(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Labels {
    pub load_more: &'static str,
    pub load_failed: &'static str,
    pub exit_preview: &'static str,
}

impl From<Locale> for Labels {
    fn from(locale: Locale) -> Self {
        Self {
            load_more: locale.load_more_label(),
            load_failed: locale.load_failed_label(),
            exit_preview: locale.exit_preview_label(),
        }
    }
}

/// Context of the home page
#[derive(Debug, Clone, Serialize)]
pub struct HomePage<'a> {
    pub site: SiteData,
    pub labels: Labels,
    pub header_style: Option<&'a str>,
    pub posts: &'a [DisplayPost],
    pub next_page: Option<&'a str>,
    pub preview: bool,
}

impl<'a> HomePage<'a> {
    pub fn new(config: &SiteConfig, state: &'a DisplayState, preview: bool) -> Self {
        Self {
            site: SiteData::from(config),
            labels: Labels::from(config.language),
            header_style: Some("margin: 42px auto"),
            posts: state.posts(),
            next_page: state.next_page(),
            preview,
        }
    }
}

/// Context of an error page
#[derive(Debug, Clone, Serialize)]
pub struct ErrorPage<'a> {
    pub site: SiteData,
    pub labels: Labels,
    pub header_style: Option<&'a str>,
    pub status: u16,
    pub message: &'a str,
}

impl<'a> ErrorPage<'a> {
    pub fn new(config: &SiteConfig, status: u16, message: &'a str) -> Self {
        Self {
            site: SiteData::from(config),
            labels: Labels::from(config.language),
            header_style: None,
            status,
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{Post, PostPage};
    use crate::helpers::DateFormatter;

    fn state(next_page: Option<&str>) -> DisplayState {
        let page = PostPage {
            items: vec![
                Post {
                    id: "first-post".to_string(),
                    published_at: Some("2023-03-15".to_string()),
                    title: "Hooks & <Effects>".to_string(),
                    subtitle: "Subtitle one".to_string(),
                    author: "Ana".to_string(),
                },
                Post {
                    id: "second-post".to_string(),
                    published_at: None,
                    title: "Second".to_string(),
                    subtitle: "Subtitle two".to_string(),
                    author: "Bruno".to_string(),
                },
            ],
            next_page: next_page.map(str::to_string),
        };
        DisplayState::from_page(&page, &DateFormatter::default())
    }

    #[test]
    fn test_render_home_lists_posts() {
        let renderer = TemplateRenderer::new().unwrap();
        let config = SiteConfig::default();
        let state = state(None);
        let html = renderer
            .render_home(&HomePage::new(&config, &state, false))
            .unwrap();

        assert!(html.contains(r#"<img src="/images/logo.svg" alt="logo">"#));
        assert!(html.contains(r#"href="/post/first-post""#));
        assert!(html.contains("15 Mar 2023"));
        assert!(html.contains("Subtitle two"));
        assert!(html.contains("Bruno"));
        // Titles are escaped
        assert!(html.contains("Hooks &amp; &lt;Effects&gt;"));
        // Posts keep their order
        assert!(html.find("first-post").unwrap() < html.find("second-post").unwrap());
    }

    #[test]
    fn test_load_more_hidden_without_next_page() {
        let renderer = TemplateRenderer::new().unwrap();
        let config = SiteConfig::default();
        let state = state(None);
        let html = renderer
            .render_home(&HomePage::new(&config, &state, false))
            .unwrap();

        assert!(!html.contains("load-more"));
        assert!(!html.contains("Load more posts"));
    }

    #[test]
    fn test_load_more_shown_with_next_page() {
        let renderer = TemplateRenderer::new().unwrap();
        let config = SiteConfig::default();
        let state = state(Some("https://repo.cdn.prismic.io/api/v2/documents/search?page=2"));
        let html = renderer
            .render_home(&HomePage::new(&config, &state, false))
            .unwrap();

        assert!(html.contains(r#"id="load-more""#));
        assert!(html.contains("Load more posts"));
        assert!(html.contains("/api/posts?next="));
    }

    #[test]
    fn test_preview_exit_link() {
        let renderer = TemplateRenderer::new().unwrap();
        let config = SiteConfig::default();
        let state = state(None);

        let html = renderer
            .render_home(&HomePage::new(&config, &state, true))
            .unwrap();
        assert!(html.contains(r#"href="/api/exit-preview""#));
        assert!(html.contains("Exit preview mode"));

        let html = renderer
            .render_home(&HomePage::new(&config, &state, false))
            .unwrap();
        assert!(!html.contains("/api/exit-preview"));
    }

    #[test]
    fn test_localized_labels() {
        let renderer = TemplateRenderer::new().unwrap();
        let config = SiteConfig {
            language: Locale::PtBr,
            ..SiteConfig::default()
        };
        let state = state(Some("https://repo.cdn.prismic.io/next"));
        let html = renderer
            .render_home(&HomePage::new(&config, &state, true))
            .unwrap();

        assert!(html.contains(r#"<html lang="pt-BR">"#));
        assert!(html.contains("Carregar mais posts"));
        assert!(html.contains("Sair do modo Preview"));
    }

    #[test]
    fn test_render_error() {
        let renderer = TemplateRenderer::new().unwrap();
        let config = SiteConfig::default();
        let html = renderer
            .render_error(&ErrorPage::new(&config, 502, "content API unavailable"))
            .unwrap();
        assert!(html.contains("502"));
        assert!(html.contains("content API unavailable"));
    }
}
