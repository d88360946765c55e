//! Notice form controller.
//!
//! Holds one editable draft, either for a new notice or for an existing one
//! being edited, and validates it before anything reaches the backend.

use std::fmt;
use std::str::FromStr;

use crate::error::{AppError, Result};
use crate::models::{Notice, NoticePayload};
use crate::services::collection::NoticeCollection;
use crate::services::repository::NoticeRepository;
use crate::utils::char_count;

/// Maximum title length in characters.
pub const TITLE_MAX_CHARS: usize = 200;

/// Maximum description length in characters.
pub const DESCRIPTION_MAX_CHARS: usize = 1000;

/// Whether the form creates a notice or edits an existing one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FormMode {
    #[default]
    Create,
    Edit {
        id: String,
    },
}

/// Text fields of the draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Title,
    Description,
}

impl FromStr for DraftField {
    type Err = AppError;

    fn from_str(name: &str) -> Result<Self> {
        match name {
            "title" => Ok(DraftField::Title),
            "description" => Ok(DraftField::Description),
            other => Err(AppError::validation(format!("Unknown form field: {other}"))),
        }
    }
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DraftField::Title => f.write_str("title"),
            DraftField::Description => f.write_str("description"),
        }
    }
}

/// Draft state for creating or editing a notice.
#[derive(Debug, Clone)]
pub struct NoticeForm {
    mode: FormMode,
    title: String,
    description: String,
    /// Selection order is kept for display
    selected: Vec<String>,
    /// Categories the form accepts
    known_categories: Vec<String>,
}

impl NoticeForm {
    /// Create an empty form accepting the given categories.
    pub fn new(known_categories: Vec<String>) -> Self {
        Self {
            mode: FormMode::Create,
            title: String::new(),
            description: String::new(),
            selected: Vec::new(),
            known_categories,
        }
    }

    /// Switch to create mode with an empty draft.
    pub fn start_create(&mut self) {
        self.mode = FormMode::Create;
        self.title.clear();
        self.description.clear();
        self.selected.clear();
    }

    /// Switch to edit mode with the draft filled from `notice`.
    pub fn start_edit(&mut self, notice: &Notice) {
        self.mode = FormMode::Edit {
            id: notice.id.clone(),
        };
        self.title = notice.title.clone();
        self.description = notice.description.clone();
        self.selected = notice.categories.clone();
    }

    /// Set a text field. No validation happens here.
    pub fn update_field(&mut self, field: DraftField, value: impl Into<String>) {
        match field {
            DraftField::Title => self.title = value.into(),
            DraftField::Description => self.description = value.into(),
        }
    }

    /// Select a category, or deselect it if already selected.
    pub fn toggle_category(&mut self, category: &str) {
        match self.selected.iter().position(|c| c == category) {
            Some(index) => {
                self.selected.remove(index);
            }
            None => self.selected.push(category.to_string()),
        }
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, FormMode::Edit { .. })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn selected_categories(&self) -> &[String] {
        &self.selected
    }

    pub fn known_categories(&self) -> &[String] {
        &self.known_categories
    }

    pub fn title_len(&self) -> usize {
        char_count(&self.title)
    }

    pub fn description_len(&self) -> usize {
        char_count(&self.description)
    }

    /// Check the draft and build the payload to send.
    ///
    /// Selected categories outside the known set are dropped; at least one
    /// known category must remain.
    pub fn validate(&self) -> Result<NoticePayload> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(AppError::validation("Title is required"));
        }
        if char_count(title) > TITLE_MAX_CHARS {
            return Err(AppError::validation(format!(
                "Title must be at most {TITLE_MAX_CHARS} characters"
            )));
        }

        let description = self.description.trim();
        if description.is_empty() {
            return Err(AppError::validation("Description is required"));
        }
        if char_count(description) > DESCRIPTION_MAX_CHARS {
            return Err(AppError::validation(format!(
                "Description must be at most {DESCRIPTION_MAX_CHARS} characters"
            )));
        }

        let (categories, unknown): (Vec<String>, Vec<String>) = self
            .selected
            .iter()
            .cloned()
            .partition(|c| self.known_categories.contains(c));
        if !unknown.is_empty() {
            log::warn!("Dropping unknown categories from draft: {}", unknown.join(", "));
        }
        if categories.is_empty() {
            return Err(AppError::validation("Select at least one category"));
        }

        Ok(NoticePayload {
            title: title.to_string(),
            description: description.to_string(),
            categories,
        })
    }

    /// Validate and send the draft.
    ///
    /// On success the collection is updated and the form goes back to an
    /// empty create draft. On any failure the draft is left as it was.
    pub async fn submit(
        &mut self,
        repository: &dyn NoticeRepository,
        collection: &mut NoticeCollection,
    ) -> Result<Notice> {
        let payload = self.validate()?;

        let notice = match &self.mode {
            FormMode::Create => {
                let notice = repository.create_notice(&payload).await?;
                collection.apply_created(notice.clone());
                notice
            }
            FormMode::Edit { id } => {
                let notice = repository.update_notice(id, &payload).await?;
                collection.apply_updated(notice.clone());
                notice
            }
        };

        self.start_create();
        Ok(notice)
    }
}
