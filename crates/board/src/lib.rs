// ABOUTME: Core library for the uChan imageboard client.
// ABOUTME: Provides post extraction, page fetching, form posting, bookmarks and settings.

//! uChan board core.
//!
//! Scrapes board index and thread pages of a 4chan-style imageboard into
//! [`Post`] records, submits replies and new threads, and keeps the small
//! amount of local state the client needs (board list, bookmarks, settings).
//!
//! # Example
//!
//! ```no_run
//! use uchan_board::{BoardError, Client};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), BoardError> {
//!     let client = Client::builder().build();
//!     for post in client.load_board("g").await? {
//!         println!("{} {}", post.id, post.content);
//!     }
//!     Ok(())
//! }
//! ```

pub mod boards;
pub mod bookmarks;
pub mod client;
pub mod error;
pub mod extract;
pub mod models;
pub mod options;
pub mod resource;
pub mod selectors;
pub mod settings;
pub mod text;
pub mod url_utils;

pub use boards::{BoardList, DEFAULT_BOARDS};
pub use bookmarks::BookmarkStore;
pub use client::Client;
pub use error::BoardError;
pub use extract::{extract_one, extract_post_list, extract_thread_list};
pub use models::{Bookmark, NewThread, Post};
pub use options::{ClientBuilder, Options};
pub use resource::parse_html;
pub use settings::Settings;
pub use text::{clean_message, quote_target};
pub use url_utils::{board_url, normalize_protocol, thread_url};

/// Parses a board index page and extracts its threads.
pub fn threads_from_html(html: &str) -> Result<Vec<Post>, BoardError> {
    let doc = parse_html(html)?;
    Ok(extract_thread_list(&doc))
}

/// Parses a thread page and extracts its posts.
pub fn posts_from_html(html: &str) -> Result<Vec<Post>, BoardError> {
    let doc = parse_html(html)?;
    Ok(extract_post_list(&doc))
}
