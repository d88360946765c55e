//! Notice data structures.
//!
//! The backend has served notices in more than one shape over time
//! (`createdAt` vs. a legacy `date`, optional `status`). [`WireNotice`]
//! accepts all of them and [`Notice`] is the single strict record the rest
//! of the crate works with.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::utils::{format_date, parse_timestamp};

/// Lifecycle status of a notice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeStatus {
    #[default]
    Active,
    Archived,
}

impl NoticeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoticeStatus::Active => "active",
            NoticeStatus::Archived => "archived",
        }
    }

    /// Anything other than `archived` counts as active.
    fn from_wire(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(s) if s.eq_ignore_ascii_case("archived") => NoticeStatus::Archived,
            _ => NoticeStatus::Active,
        }
    }
}

impl fmt::Display for NoticeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A notice as stored by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    /// Backend-assigned identifier
    #[serde(rename = "_id", alias = "id")]
    pub id: String,

    /// Notice title
    pub title: String,

    /// Notice body text
    pub description: String,

    /// Category tags
    #[serde(default)]
    pub categories: Vec<String>,

    /// Creation time (backend clock)
    pub created_at: DateTime<Utc>,

    /// Last modification time (backend clock)
    pub updated_at: DateTime<Utc>,

    /// Lifecycle status
    #[serde(default)]
    pub status: NoticeStatus,
}

impl Notice {
    /// Exact tag membership, as the dashboard counts categories.
    pub fn has_category(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c == category)
    }

    /// Case-insensitive tag membership, as the public browser filters.
    pub fn has_category_ignore_case(&self, category: &str) -> bool {
        let wanted = category.to_lowercase();
        self.categories.iter().any(|c| c.to_lowercase() == wanted)
    }

    /// Whether an already lowercased search term occurs in the title,
    /// description or any category label.
    pub fn matches(&self, term_lower: &str) -> bool {
        if term_lower.is_empty() {
            return true;
        }
        self.title.to_lowercase().contains(term_lower)
            || self.description.to_lowercase().contains(term_lower)
            || self
                .categories
                .iter()
                .any(|c| c.to_lowercase().contains(term_lower))
    }

    /// Format notice for display using a template.
    ///
    /// Supported placeholders:
    /// - `{id}`, `{title}`, `{description}`, `{categories}`
    /// - `{created}`, `{updated}`, `{status}`
    pub fn format(&self, template: &str) -> String {
        template
            .replace("{id}", &self.id)
            .replace("{title}", &self.title)
            .replace("{description}", &self.description)
            .replace("{categories}", &self.categories.join(", "))
            .replace("{created}", &format_date(&self.created_at))
            .replace("{updated}", &format_date(&self.updated_at))
            .replace("{status}", self.status.as_str())
    }

    /// Plain-text detail block shown when a notice is opened.
    pub fn details(&self) -> String {
        self.format(
            "Title: {title}\nDescription: {description}\nCategories: {categories}\nCreated: {created}\nStatus: {status}",
        )
    }
}

/// The editable subset of a notice sent on create and update.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct NoticePayload {
    pub title: String,
    pub description: String,
    pub categories: Vec<String>,
}

/// A notice exactly as the backend may send it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireNotice {
    #[serde(rename = "_id", alias = "id")]
    pub id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub categories: Option<Vec<String>>,
    pub created_at: Option<String>,
    /// Legacy creation field
    pub date: Option<String>,
    pub updated_at: Option<String>,
    pub status: Option<String>,
}

impl TryFrom<WireNotice> for Notice {
    type Error = AppError;

    fn try_from(wire: WireNotice) -> Result<Self> {
        let id = wire
            .id
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| AppError::network("malformed notice in response: missing _id"))?;

        let created_raw = wire.created_at.or(wire.date);
        let created_at = timestamp_or_epoch(&id, "createdAt", created_raw.as_deref());
        let updated_at = match wire.updated_at.as_deref().and_then(parse_timestamp) {
            Some(ts) => ts,
            None => created_at,
        };

        Ok(Notice {
            title: wire.title.unwrap_or_default(),
            description: wire.description.unwrap_or_default(),
            categories: wire.categories.unwrap_or_default(),
            created_at,
            updated_at,
            status: NoticeStatus::from_wire(wire.status.as_deref()),
            id,
        })
    }
}

fn timestamp_or_epoch(id: &str, field: &str, raw: Option<&str>) -> DateTime<Utc> {
    match raw.and_then(parse_timestamp) {
        Some(ts) => ts,
        None => {
            log::warn!("Notice {id}: missing or invalid {field} {raw:?}, using epoch");
            DateTime::<Utc>::UNIX_EPOCH
        }
    }
}
