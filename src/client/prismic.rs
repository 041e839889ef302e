//! reqwest-backed client for Prismic-style repositories

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

use super::{ApiError, ContentApi, QueryOptions};
use crate::config::ApiConfig;
use crate::content::wire::{ApiRoot, SearchResponse};
use crate::content::PostPage;

/// Content API client talking to a Prismic v2 REST endpoint
#[derive(Debug, Clone)]
pub struct PrismicClient {
    client: Client,
    endpoint: Url,
    access_token: Option<String>,
}

impl PrismicClient {
    /// Build a client for the configured endpoint
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let endpoint = Url::parse(&config.endpoint).map_err(|e| ApiError::InvalidUrl {
            url: config.endpoint.clone(),
            message: e.to_string(),
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|source| ApiError::Http {
                url: config.endpoint.clone(),
                source,
            })?;

        Ok(Self {
            client,
            endpoint,
            access_token: config.access_token.clone().filter(|t| !t.is_empty()),
        })
    }

    /// Resolve the repository's current master ref
    pub async fn master_ref(&self) -> Result<String, ApiError> {
        let root: ApiRoot = self.get_json(self.endpoint.clone()).await?;
        root.master_ref()
            .map(str::to_string)
            .ok_or_else(|| ApiError::NoMasterRef(self.endpoint.to_string()))
    }

    /// Parse a continuation reference, rejecting anything outside the endpoint's origin
    pub fn resolve_next_page(&self, next_page: &str) -> Result<Url, ApiError> {
        let url = Url::parse(next_page).map_err(|e| ApiError::InvalidUrl {
            url: next_page.to_string(),
            message: e.to_string(),
        })?;
        if url.origin() != self.endpoint.origin() {
            return Err(ApiError::ForeignUrl(next_page.to_string()));
        }
        Ok(url)
    }

    fn search_url(&self) -> Result<Url, ApiError> {
        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl {
                url: self.endpoint.to_string(),
                message: "endpoint cannot be a base URL".to_string(),
            })?
            .pop_if_empty()
            .extend(["documents", "search"]);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, mut url: Url) -> Result<T, ApiError> {
        let display_url = url.to_string();

        if let Some(token) = &self.access_token {
            let has_token = url.query_pairs().any(|(k, _)| k == "access_token");
            if !has_token {
                url.query_pairs_mut().append_pair("access_token", token);
            }
        }

        tracing::debug!("GET {}", display_url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| ApiError::Http {
                url: display_url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                url: display_url,
            });
        }

        let body = response.bytes().await.map_err(|source| ApiError::Http {
            url: display_url.clone(),
            source,
        })?;

        serde_json::from_slice(&body).map_err(|e| ApiError::Decode {
            url: display_url,
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl ContentApi for PrismicClient {
    async fn query(&self, options: &QueryOptions) -> Result<PostPage, ApiError> {
        let reference = match &options.reference {
            Some(reference) => reference.clone(),
            None => self.master_ref().await?,
        };

        let mut url = self.search_url()?;
        url.query_pairs_mut()
            .append_pair("ref", &reference)
            .append_pair(
                "q",
                &format!("[[at(document.type, \"{}\")]]", options.document_type),
            )
            .append_pair("pageSize", &options.page_size.to_string());

        let response: SearchResponse = self.get_json(url).await?;
        let page = without_access_token(PostPage::from(response));
        tracing::info!(
            "Fetched {} {} (more: {})",
            page.items.len(),
            options.document_type,
            page.has_next()
        );
        Ok(page)
    }

    async fn fetch_page(&self, next_page: &str) -> Result<PostPage, ApiError> {
        let url = self.resolve_next_page(next_page)?;
        let response: SearchResponse = self.get_json(url).await?;
        let page = without_access_token(PostPage::from(response));
        tracing::debug!("Fetched next page with {} posts", page.items.len());
        Ok(page)
    }
}

/// Drop an echoed `access_token` from the continuation URL
///
/// Continuation URLs are handed to browsers. The token is appended again by
/// `get_json` when the page is fetched.
fn without_access_token(mut page: PostPage) -> PostPage {
    page.next_page = page.next_page.map(|next| {
        let Ok(mut url) = Url::parse(&next) else {
            return next;
        };
        if !url.query_pairs().any(|(k, _)| k == "access_token") {
            return next;
        }

        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .filter(|(k, _)| k != "access_token")
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        if pairs.is_empty() {
            url.set_query(None);
        } else {
            url.query_pairs_mut().clear().extend_pairs(pairs);
        }
        url.to_string()
    });
    page
}
