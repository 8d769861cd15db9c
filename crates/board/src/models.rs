// ABOUTME: Domain records produced by extraction and kept by the bookmark store.
// ABOUTME: Post is built fresh per extraction call; Bookmark is persisted by BookmarkStore.

use serde::{Deserialize, Serialize};

/// Author name used when the markup carries no name.
pub const DEFAULT_AUTHOR: &str = "Anonymous";

/// A single post scraped from a board index or thread page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Thread id for a board listing entry, own post number otherwise.
    pub id: String,
    pub author: String,
    /// Display string copied verbatim from the page.
    pub timestamp: String,
    pub content: String,
    pub image_url: Option<String>,
    pub thumbnail_url: Option<String>,
    /// Post numbers referenced by quote links, in document order.
    pub replies: Vec<String>,
    pub is_thread: bool,
    #[serde(default)]
    pub board_id: String,
}

impl Default for Post {
    fn default() -> Self {
        Self {
            id: String::new(),
            author: DEFAULT_AUTHOR.to_string(),
            timestamp: String::new(),
            content: String::new(),
            image_url: None,
            thumbnail_url: None,
            replies: Vec::new(),
            is_thread: false,
            board_id: String::new(),
        }
    }
}

impl Post {
    /// Returns the post tagged with the board it was fetched from.
    pub fn with_board(mut self, board_id: impl Into<String>) -> Self {
        self.board_id = board_id.into();
        self
    }
}

/// A locally saved reference to a thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    /// Canonical thread URL; unique key in the store.
    pub url: String,
    pub board_id: String,
    pub thread_id: String,
    pub title: String,
    /// Creation time in epoch milliseconds.
    pub timestamp_ms: i64,
}

/// Fields of the new-thread form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewThread {
    pub name: String,
    pub subject: String,
    pub comment: String,
    pub captcha_response: String,
}
