//! Post models

use serde::{Deserialize, Serialize};

use crate::helpers::DateFormatter;

/// A post summary as returned by the content API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Opaque identifier, unique within a result set
    pub id: String,

    /// First publication date (ISO-8601), `None` for unpublished documents
    pub published_at: Option<String>,

    /// Post title
    pub title: String,

    /// Post subtitle
    pub subtitle: String,

    /// Author name
    pub author: String,
}

impl Post {
    /// Convert into a display post, formatting the publication date once
    pub fn to_display(&self, formatter: &DateFormatter) -> DisplayPost {
        DisplayPost {
            id: self.id.clone(),
            published_at: formatter.display(self.published_at.as_deref()),
            title: self.title.clone(),
            subtitle: self.subtitle.clone(),
            author: self.author.clone(),
        }
    }
}

/// One page of results from the content API
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PostPage {
    /// Posts in API order, never deduplicated
    pub items: Vec<Post>,

    /// Continuation reference (a URL), `None` when exhausted
    pub next_page: Option<String>,
}

impl PostPage {
    pub fn has_next(&self) -> bool {
        self.next_page.is_some()
    }
}

/// A post ready for rendering: the publication date is a display string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayPost {
    pub id: String,
    pub published_at: String,
    pub title: String,
    pub subtitle: String,
    pub author: String,
}
