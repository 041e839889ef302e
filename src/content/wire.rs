//! Content API response shapes

use serde::Deserialize;

use super::post::{Post, PostPage};

/// A search response (`/documents/search` or a `next_page` URL)
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub next_page: Option<String>,
    #[serde(default)]
    pub results: Vec<Document>,
}

/// A single document in a search response
#[derive(Debug, Clone, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub uid: Option<String>,
    #[serde(default)]
    pub first_publication_date: Option<String>,
    #[serde(default)]
    pub data: DocumentData,
}

/// The fields of a `posts` document used by the home page
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DocumentData {
    pub title: String,
    pub subtitle: String,
    pub author: String,
}

/// The API root (`GET <endpoint>`), used to find the master ref
#[derive(Debug, Clone, Deserialize)]
pub struct ApiRoot {
    #[serde(default)]
    pub refs: Vec<ApiRef>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiRef {
    #[serde(rename = "ref")]
    pub reference: String,
    #[serde(default)]
    pub is_master_ref: bool,
}

impl ApiRoot {
    pub fn master_ref(&self) -> Option<&str> {
        self.refs
            .iter()
            .find(|r| r.is_master_ref)
            .map(|r| r.reference.as_str())
    }
}

impl From<Document> for Post {
    fn from(doc: Document) -> Self {
        Post {
            id: doc.uid.or(doc.id).unwrap_or_default(),
            published_at: doc.first_publication_date,
            title: doc.data.title,
            subtitle: doc.data.subtitle,
            author: doc.data.author,
        }
    }
}

impl From<SearchResponse> for PostPage {
    fn from(resp: SearchResponse) -> Self {
        PostPage {
            items: resp.results.into_iter().map(Post::from).collect(),
            next_page: resp.next_page.filter(|url| !url.is_empty()),
        }
    }
}
