// src/models/mod.rs

//! Domain models for the notice board client.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod bookmark;
mod category;
mod config;
mod notice;

// Re-export all public types
pub use bookmark::BookmarkedNotice;
pub use category::{ALL_NOTICES, CategoryCount, CategoryCounts};
pub use config::{
    ApiConfig, BookmarkConfig, CategoryConfig, Config, ExportConfig, PublicCategory,
};
pub use notice::{Notice, NoticePayload, NoticeStatus, WireNotice};
