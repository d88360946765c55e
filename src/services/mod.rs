//! Service layer for the notice board client.
//!
//! This module contains the business logic for:
//! - Talking to the notice backend (`NoticeRepository`)
//! - The client-side notice cache (`NoticeCollection`)
//! - Local bookmarks (`BookmarkStore`)
//! - The create/edit form (`NoticeForm`)
//! - CSV export (`export`)
//! - Dashboard flows tying them together (`Dashboard`)

pub mod bookmarks;
pub mod collection;
pub mod dashboard;
pub mod export;
pub mod form;
pub mod repository;

pub use bookmarks::BookmarkStore;
pub use collection::{CollectionStats, NoticeCollection, SortOrder};
pub use dashboard::Dashboard;
pub use form::{DraftField, FormMode, NoticeForm};
pub use repository::{HttpNoticeRepository, NoticeRepository};
