// ABOUTME: JSON-file backed bookmark store keyed by thread URL.
// ABOUTME: Every mutation is written through to disk via a temp file and rename.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::debug;

use crate::error::BoardError;
use crate::models::{Bookmark, Post};
use crate::text::bookmark_title;
use crate::url_utils::thread_url;

/// Saved threads, persisted as a JSON array.
#[derive(Debug)]
pub struct BookmarkStore {
    path: PathBuf,
    base_url: String,
    bookmarks: Vec<Bookmark>,
}

impl BookmarkStore {
    /// Opens the store at `path`. A missing file is an empty store.
    ///
    /// `base_url` is the page host used to build thread URLs in [`toggle`](Self::toggle).
    pub fn open(path: impl Into<PathBuf>, base_url: impl Into<String>) -> Result<Self, BoardError> {
        let path = path.into();
        let bookmarks = if path.exists() {
            let raw = fs::read_to_string(&path).map_err(BoardError::storage)?;
            if raw.trim().is_empty() {
                Vec::new()
            } else {
                serde_json::from_str(&raw).map_err(BoardError::storage)?
            }
        } else {
            Vec::new()
        };

        debug!(path = %path.display(), count = bookmarks.len(), "opened bookmark store");
        Ok(Self {
            path,
            base_url: base_url.into(),
            bookmarks,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All bookmarks, newest first.
    pub fn list(&self) -> Vec<Bookmark> {
        let mut out = self.bookmarks.clone();
        out.sort_by(|a, b| b.timestamp_ms.cmp(&a.timestamp_ms));
        out
    }

    pub fn is_bookmarked(&self, url: &str) -> bool {
        self.bookmarks.iter().any(|b| b.url == url)
    }

    /// Inserts a bookmark, replacing any existing one with the same URL.
    pub fn insert(&mut self, bookmark: Bookmark) -> Result<(), BoardError> {
        let mut next: Vec<Bookmark> = self
            .bookmarks
            .iter()
            .filter(|b| b.url != bookmark.url)
            .cloned()
            .collect();
        let url = bookmark.url.clone();
        next.push(bookmark);
        self.commit(next)?;
        debug!(url = %url, "bookmark saved");
        Ok(())
    }

    /// Removes the bookmark for `url`. Returns false if there was none.
    pub fn remove(&mut self, url: &str) -> Result<bool, BoardError> {
        if !self.is_bookmarked(url) {
            return Ok(false);
        }
        let next = self.bookmarks.iter().filter(|b| b.url != url).cloned().collect();
        self.commit(next)?;
        debug!(url, "bookmark removed");
        Ok(true)
    }

    /// Deletes every bookmark.
    pub fn clear(&mut self) -> Result<(), BoardError> {
        let count = self.bookmarks.len();
        self.commit(Vec::new())?;
        debug!(count, "bookmarks cleared");
        Ok(())
    }

    /// Flips the bookmark state of a thread's opening post.
    ///
    /// Returns the new state: true when the thread is now bookmarked.
    pub fn toggle(&mut self, post: &Post, board_id: &str) -> Result<bool, BoardError> {
        let url = thread_url(&self.base_url, board_id, &post.id);
        if self.is_bookmarked(&url) {
            self.remove(&url)?;
            return Ok(false);
        }

        self.insert(Bookmark {
            url,
            board_id: board_id.to_string(),
            thread_id: post.id.clone(),
            title: bookmark_title(&post.content),
            timestamp_ms: Utc::now().timestamp_millis(),
        })?;
        Ok(true)
    }

    /// Writes `next` to disk and only then makes it the in-memory state.
    fn commit(&mut self, next: Vec<Bookmark>) -> Result<(), BoardError> {
        self.persist(&next)?;
        self.bookmarks = next;
        Ok(())
    }

    fn persist(&self, bookmarks: &[Bookmark]) -> Result<(), BoardError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(BoardError::storage)?;
            }
        }

        let json = serde_json::to_string_pretty(bookmarks).map_err(BoardError::storage)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(BoardError::storage)?;
        fs::rename(&tmp, &self.path).map_err(BoardError::storage)?;
        Ok(())
    }
}
