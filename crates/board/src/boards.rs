// ABOUTME: The user's list of boards, owned by whoever holds the settings.
// ABOUTME: Keeps insertion order and rejects duplicates and blank ids.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Boards shown on first launch.
pub const DEFAULT_BOARDS: &[&str] = &["g", "a", "v", "pol", "b"];

/// Ordered, duplicate-free list of board ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoardList {
    boards: Vec<String>,
}

impl Default for BoardList {
    fn default() -> Self {
        Self {
            boards: DEFAULT_BOARDS.iter().map(|b| b.to_string()).collect(),
        }
    }
}

impl BoardList {
    pub fn new() -> Self {
        Self { boards: Vec::new() }
    }

    /// Builds a list from ids, dropping blanks and repeats.
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut list = Self::new();
        for id in ids {
            list.add(id.as_ref());
        }
        list
    }

    /// Appends a board. Returns false if it is blank or already present.
    pub fn add(&mut self, board_id: &str) -> bool {
        let id = board_id.trim();
        if id.is_empty() || self.contains(id) {
            debug!(board = id, "board not added");
            return false;
        }
        self.boards.push(id.to_string());
        debug!(board = id, boards = ?self.boards, "board added");
        true
    }

    /// Removes a board. Returns false if it was not in the list.
    pub fn remove(&mut self, board_id: &str) -> bool {
        let id = board_id.trim();
        match self.boards.iter().position(|b| b == id) {
            Some(idx) => {
                self.boards.remove(idx);
                debug!(board = id, boards = ?self.boards, "board removed");
                true
            }
            None => {
                debug!(board = id, "board not found");
                false
            }
        }
    }

    pub fn contains(&self, board_id: &str) -> bool {
        self.boards.iter().any(|b| b == board_id.trim())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.boards.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.boards
    }

    pub fn len(&self) -> usize {
        self.boards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boards.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_boards() {
        let list = BoardList::default();
        assert_eq!(list.iter().collect::<Vec<_>>(), vec!["g", "a", "v", "pol", "b"]);
    }

    #[test]
    fn test_add_rejects_duplicates_and_blanks() {
        let mut list = BoardList::default();
        assert!(list.add("tv"));
        assert!(!list.add("tv"));
        assert!(!list.add(" g "));
        assert!(!list.add("   "));
        assert_eq!(list.len(), 6);
        assert_eq!(list.as_slice().last().map(String::as_str), Some("tv"));
    }

    #[test]
    fn test_remove() {
        let mut list = BoardList::default();
        assert!(list.remove("pol"));
        assert!(!list.remove("pol"));
        assert!(!list.contains("pol"));
        assert_eq!(list.len(), 4);
    }

    #[test]
    fn test_from_ids_dedups() {
        let list = BoardList::from_ids(["g", "g", "", "a"]);
        assert_eq!(list.as_slice(), &["g".to_string(), "a".to_string()]);
    }
}
