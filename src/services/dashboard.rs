//! Dashboard flows.
//!
//! Each method is one user action: it talks to the repository, applies the
//! confirmed result to the collection and reports the outcome. A failed
//! action leaves the collection as it was.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::error::{AppError, Result};
use crate::interaction::{Confirm, Notification, Notify};
use crate::models::{CategoryCounts, Notice};
use crate::services::bookmarks::BookmarkStore;
use crate::services::collection::{NoticeCollection, SortOrder};
use crate::services::export;
use crate::services::form::NoticeForm;
use crate::services::repository::NoticeRepository;
use crate::storage::BookmarkStorage;

const DELETE_PROMPT: &str = "Are you sure you want to delete this notice?";

/// Notice management backed by a repository.
pub struct Dashboard<R: NoticeRepository> {
    repository: R,
    collection: NoticeCollection,
    form: NoticeForm,
    categories: Vec<String>,
}

impl<R: NoticeRepository> Dashboard<R> {
    /// Create a dashboard whose form accepts `categories`.
    pub fn new(repository: R, categories: Vec<String>) -> Self {
        Self {
            repository,
            collection: NoticeCollection::new(),
            form: NoticeForm::new(categories.clone()),
            categories,
        }
    }

    pub fn collection(&self) -> &NoticeCollection {
        &self.collection
    }

    pub fn form(&self) -> &NoticeForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut NoticeForm {
        &mut self.form
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Reload every notice from the backend.
    pub async fn refresh(&mut self) -> Result<usize> {
        let notices = self.repository.list_notices().await?;
        let count = notices.len();
        self.collection.apply_fetched(notices);
        Ok(count)
    }

    /// Load a cached notice into the form for editing.
    pub fn edit(&mut self, id: &str) -> Result<()> {
        let notice = self
            .collection
            .get(id)
            .ok_or_else(|| AppError::not_found(id))?;
        self.form.start_edit(notice);
        Ok(())
    }

    /// Submit the form and report the outcome.
    pub async fn submit(&mut self, notify: &dyn Notify) -> Result<Notice> {
        let action = if self.form.is_editing() {
            "updated"
        } else {
            "created"
        };

        match self.form.submit(&self.repository, &mut self.collection).await {
            Ok(notice) => {
                notify.notify(Notification::info(format!(
                    "Notice {action} successfully!"
                )));
                Ok(notice)
            }
            Err(e) => {
                notify.notify(Notification::error(e.to_string()));
                Err(e)
            }
        }
    }

    /// Delete a notice after confirmation.
    ///
    /// Returns `false` if the user declined.
    pub async fn delete(
        &mut self,
        id: &str,
        confirm: &dyn Confirm,
        notify: &dyn Notify,
    ) -> Result<bool> {
        if !confirm.confirm(DELETE_PROMPT) {
            log::debug!("Deletion of {id} cancelled");
            return Ok(false);
        }

        match self.repository.delete_notice(id).await {
            Ok(()) => {
                self.collection.apply_deleted(id);
                notify.notify(Notification::info("Notice deleted successfully!"));
                Ok(true)
            }
            Err(e) => {
                notify.notify(Notification::error(e.to_string()));
                Err(e)
            }
        }
    }

    /// Bookmark a notice by ID, or remove its bookmark.
    ///
    /// Removal uses the saved snapshot and never contacts the backend. A new
    /// bookmark needs the live notice, so the cache is refreshed first.
    pub async fn toggle_bookmark<S: BookmarkStorage>(
        &mut self,
        bookmarks: &mut BookmarkStore<S>,
        id: &str,
    ) -> Result<bool> {
        if let Some(saved) = bookmarks.get(id).map(|b| b.notice.clone()) {
            return Ok(bookmarks.toggle(&saved));
        }

        self.refresh().await?;
        let notice = self
            .collection
            .get(id)
            .ok_or_else(|| AppError::not_found(id))?;
        Ok(bookmarks.toggle(notice))
    }

    /// The searched and sorted list.
    pub fn view(&self, search: &str, sort: SortOrder) -> Vec<&Notice> {
        self.collection.filtered_and_sorted(search, sort)
    }

    /// Counts for the configured categories.
    pub fn category_counts(&self) -> CategoryCounts {
        self.collection.category_counts(&self.categories)
    }

    /// Detail text for a cached notice.
    pub fn details(&self, id: &str) -> Option<String> {
        self.collection.get(id).map(Notice::details)
    }

    /// Export the current view to `dir`.
    pub fn export(
        &self,
        dir: &Path,
        search: &str,
        sort: SortOrder,
        today: NaiveDate,
        notify: &dyn Notify,
    ) -> Result<PathBuf> {
        let view = self.view(search, sort);
        let count = view.len();

        match export::write_csv(dir, view, today) {
            Ok(path) => {
                notify.notify(Notification::info(format!(
                    "Exported {count} notices to CSV!"
                )));
                Ok(path)
            }
            Err(AppError::EmptyExport) => {
                notify.notify(Notification::info("No notices to export!"));
                Err(AppError::EmptyExport)
            }
            Err(e) => {
                notify.notify(Notification::error(e.to_string()));
                Err(e)
            }
        }
    }
}
