//! Bookmarked notice snapshot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Notice;

/// A notice saved by the browsing client.
///
/// Holds a copy of the notice taken at bookmark time; later edits to the
/// original are not reflected here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkedNotice {
    #[serde(flatten)]
    pub notice: Notice,

    /// Client time when the bookmark was made
    pub bookmarked_at: DateTime<Utc>,
}

impl BookmarkedNotice {
    pub fn new(notice: Notice, bookmarked_at: DateTime<Utc>) -> Self {
        Self {
            notice,
            bookmarked_at,
        }
    }

    pub fn id(&self) -> &str {
        &self.notice.id
    }
}
