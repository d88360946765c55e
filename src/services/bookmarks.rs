//! Client-local bookmarks.
//!
//! The backend knows nothing about bookmarks. The full set is written to
//! local storage after every change and read back once on open; storage
//! problems are logged and never surface to the caller.

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::models::{BookmarkedNotice, Notice};
use crate::storage::BookmarkStorage;

/// Bookmarked notices backed by a storage record.
#[derive(Debug)]
pub struct BookmarkStore<S: BookmarkStorage> {
    storage: S,
    key: String,
    /// Insertion order
    bookmarks: Vec<BookmarkedNotice>,
}

impl<S: BookmarkStorage> BookmarkStore<S> {
    /// Open the store, restoring whatever the record under `key` holds.
    ///
    /// A missing or unreadable record yields an empty store.
    pub fn open(storage: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let bookmarks = Self::restore(&storage, &key);
        log::debug!("Restored {} bookmarks from {key:?}", bookmarks.len());
        Self {
            storage,
            key,
            bookmarks,
        }
    }

    fn restore(storage: &S, key: &str) -> Vec<BookmarkedNotice> {
        let saved: Vec<BookmarkedNotice> = match storage.read_json(key) {
            Ok(Some(saved)) => saved,
            Ok(None) => return Vec::new(),
            Err(e) => {
                log::warn!("Ignoring unreadable bookmark record {key:?}: {e}");
                return Vec::new();
            }
        };

        let mut seen = HashSet::new();
        saved
            .into_iter()
            .filter(|b| seen.insert(b.id().to_string()))
            .collect()
    }

    /// Bookmark a notice, or remove the bookmark if it already exists.
    ///
    /// Returns whether the notice is bookmarked afterwards.
    pub fn toggle(&mut self, notice: &Notice) -> bool {
        self.toggle_at(notice, Utc::now())
    }

    /// [`toggle`](Self::toggle) with an explicit bookmark time.
    pub fn toggle_at(&mut self, notice: &Notice, now: DateTime<Utc>) -> bool {
        let bookmarked = match self.bookmarks.iter().position(|b| b.id() == notice.id) {
            Some(index) => {
                self.bookmarks.remove(index);
                false
            }
            None => {
                self.bookmarks
                    .push(BookmarkedNotice::new(notice.clone(), now));
                true
            }
        };
        self.persist();
        bookmarked
    }

    pub fn is_bookmarked(&self, id: &str) -> bool {
        self.bookmarks.iter().any(|b| b.id() == id)
    }

    pub fn get(&self, id: &str) -> Option<&BookmarkedNotice> {
        self.bookmarks.iter().find(|b| b.id() == id)
    }

    /// Most recently bookmarked first; equal times keep insertion order.
    pub fn sorted_by_recency(&self) -> Vec<&BookmarkedNotice> {
        let mut sorted: Vec<&BookmarkedNotice> = self.bookmarks.iter().collect();
        sorted.sort_by(|a, b| b.bookmarked_at.cmp(&a.bookmarked_at));
        sorted
    }

    /// Remove every bookmark.
    pub fn clear(&mut self) {
        self.bookmarks.clear();
        self.persist();
    }

    pub fn len(&self) -> usize {
        self.bookmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookmarks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BookmarkedNotice> {
        self.bookmarks.iter()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Write the full set. Failures leave the in-memory set authoritative.
    fn persist(&self) {
        if let Err(e) = self.storage.write_json(&self.key, &self.bookmarks) {
            log::warn!("Failed to persist bookmarks under {:?}: {e}", self.key);
        }
    }
}
