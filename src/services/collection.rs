//! Client-side notice collection.
//!
//! Holds the notices from the last successful fetch or mutation and derives
//! read-only views from them. Nothing here talks to the backend; callers
//! apply a change only after the backend confirmed it.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, TimeZone};
use feruca::Collator;
use serde::Serialize;

use crate::models::{CategoryCount, CategoryCounts, Notice, NoticeStatus};

/// Ordering for the dashboard list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
    Title,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Newest => "newest",
            SortOrder::Oldest => "oldest",
            SortOrder::Title => "title",
        }
    }

    /// Parse a sort name; unknown names fall back to newest-first.
    pub fn parse_lenient(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "oldest" => SortOrder::Oldest,
            "title" => SortOrder::Title,
            _ => SortOrder::Newest,
        }
    }

    fn compare(&self, a: &Notice, b: &Notice, collator: &mut Collator) -> Ordering {
        match self {
            SortOrder::Newest => b.created_at.cmp(&a.created_at),
            SortOrder::Oldest => a.created_at.cmp(&b.created_at),
            SortOrder::Title => collator.collate(a.title.as_str(), b.title.as_str()),
        }
    }
}

impl FromStr for SortOrder {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse_lenient(s))
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dashboard stat cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CollectionStats {
    pub total: usize,
    /// Created in the same calendar month as `now`, in `now`'s time zone
    pub this_month: usize,
    pub active: usize,
    pub archived: usize,
}

/// The client-side cache of notices.
#[derive(Debug, Clone, Default)]
pub struct NoticeCollection {
    notices: Vec<Notice>,
}

impl NoticeCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole cache with a fresh listing.
    pub fn apply_fetched(&mut self, notices: Vec<Notice>) {
        log::debug!(
            "Collection refreshed: {} -> {} notices",
            self.notices.len(),
            notices.len()
        );
        self.notices = notices;
    }

    /// Insert a newly created notice at the front.
    pub fn apply_created(&mut self, notice: Notice) {
        self.notices.insert(0, notice);
    }

    /// Replace the notice with the same ID. Returns whether one was found.
    pub fn apply_updated(&mut self, notice: Notice) -> bool {
        match self.notices.iter_mut().find(|n| n.id == notice.id) {
            Some(slot) => {
                *slot = notice;
                true
            }
            None => {
                log::debug!("Update for unknown notice {} ignored", notice.id);
                false
            }
        }
    }

    /// Remove the notice with the given ID. Returns whether one was found.
    pub fn apply_deleted(&mut self, id: &str) -> bool {
        let before = self.notices.len();
        self.notices.retain(|n| n.id != id);
        before != self.notices.len()
    }

    /// Search and sort without touching the cache.
    ///
    /// Sorting is stable: notices with equal keys keep their cache order.
    /// Titles use Unicode collation (CLDR root order), so accents and case
    /// only break ties between otherwise equal titles.
    pub fn filtered_and_sorted(&self, search: &str, sort: SortOrder) -> Vec<&Notice> {
        let term = search.to_lowercase();
        let mut view: Vec<&Notice> = self.notices.iter().filter(|n| n.matches(&term)).collect();
        let mut collator = Collator::default();
        view.sort_by(|a, b| sort.compare(a, b, &mut collator));
        view
    }

    /// Notices carrying a category (case-insensitive); `None` means all.
    pub fn in_category(&self, category: Option<&str>) -> Vec<&Notice> {
        match category {
            None => self.notices.iter().collect(),
            Some(name) => self
                .notices
                .iter()
                .filter(|n| n.has_category_ignore_case(name))
                .collect(),
        }
    }

    /// Dashboard counts: exact tag membership per category.
    pub fn category_counts(&self, categories: &[String]) -> CategoryCounts {
        self.count_by(categories, |n, c| n.has_category(c))
    }

    /// Public browser counts: case-insensitive tag membership.
    pub fn public_category_counts(&self, categories: &[String]) -> CategoryCounts {
        self.count_by(categories, |n, c| n.has_category_ignore_case(c))
    }

    fn count_by(
        &self,
        categories: &[String],
        carries: impl Fn(&Notice, &str) -> bool,
    ) -> CategoryCounts {
        CategoryCounts {
            total: self.notices.len(),
            categories: categories
                .iter()
                .map(|name| CategoryCount {
                    name: name.clone(),
                    count: self
                        .notices
                        .iter()
                        .filter(|&n| carries(n, name.as_str()))
                        .count(),
                })
                .collect(),
        }
    }

    /// Stat cards as of `now`. Pass local time to count the viewer's month.
    pub fn stats<Tz: TimeZone>(&self, now: DateTime<Tz>) -> CollectionStats {
        let zone = now.timezone();
        let archived = self
            .notices
            .iter()
            .filter(|n| n.status == NoticeStatus::Archived)
            .count();
        let this_month = self
            .notices
            .iter()
            .map(|n| n.created_at.with_timezone(&zone))
            .filter(|created| created.year() == now.year() && created.month() == now.month())
            .count();

        CollectionStats {
            total: self.notices.len(),
            this_month,
            active: self.notices.len() - archived,
            archived,
        }
    }

    pub fn get(&self, id: &str) -> Option<&Notice> {
        self.notices.iter().find(|n| n.id == id)
    }

    pub fn len(&self) -> usize {
        self.notices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notices.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notice> {
        self.notices.iter()
    }

    pub fn as_slice(&self) -> &[Notice] {
        &self.notices
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::NaiveDate;

    use crate::models::{Notice, NoticeStatus};

    /// Build a notice created at midnight UTC on `date` (`YYYY-MM-DD`).
    pub fn notice(id: &str, title: &str, date: &str, categories: &[&str]) -> Notice {
        let created = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
            .and_utc();
        Notice {
            id: id.to_string(),
            title: title.to_string(),
            description: format!("{title} details"),
            categories: categories.iter().map(|c| c.to_string()).collect(),
            created_at: created,
            updated_at: created,
            status: NoticeStatus::Active,
        }
    }

    pub fn titles(view: &[&Notice]) -> Vec<String> {
        view.iter().map(|n| n.title.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::{notice, titles};
    use super::*;
    use chrono::{FixedOffset, Utc};

    fn categories() -> Vec<String> {
        ["Exam", "Events", "Circulars", "General"]
            .into_iter()
            .map(String::from)
            .collect()
    }

    fn two_notices() -> NoticeCollection {
        let mut collection = NoticeCollection::new();
        collection.apply_fetched(vec![
            notice("a", "A", "2024-01-01", &["Exam"]),
            notice("b", "B", "2024-01-03", &["Events"]),
        ]);
        collection
    }

    #[test]
    fn test_sort_orders() {
        let collection = two_notices();
        assert_eq!(
            titles(&collection.filtered_and_sorted("", SortOrder::Oldest)),
            vec!["A", "B"]
        );
        assert_eq!(
            titles(&collection.filtered_and_sorted("", SortOrder::Newest)),
            vec!["B", "A"]
        );
        assert_eq!(
            titles(&collection.filtered_and_sorted("b", SortOrder::Title)),
            vec!["B"]
        );
    }

    #[test]
    fn test_newest_is_stable_for_equal_timestamps() {
        let mut collection = NoticeCollection::new();
        collection.apply_fetched(vec![
            notice("1", "First", "2024-02-01", &[]),
            notice("2", "Second", "2024-02-01", &[]),
            notice("3", "Later", "2024-03-01", &[]),
            notice("4", "Third", "2024-02-01", &[]),
        ]);

        assert_eq!(
            titles(&collection.filtered_and_sorted("", SortOrder::Newest)),
            vec!["Later", "First", "Second", "Third"]
        );
        assert_eq!(
            titles(&collection.filtered_and_sorted("", SortOrder::Oldest)),
            vec!["First", "Second", "Third", "Later"]
        );
    }

    #[test]
    fn test_title_sort_ignores_case() {
        let mut collection = NoticeCollection::new();
        collection.apply_fetched(vec![
            notice("1", "banana", "2024-01-01", &[]),
            notice("2", "Apple", "2024-01-02", &[]),
            notice("3", "cherry", "2024-01-03", &[]),
        ]);

        assert_eq!(
            titles(&collection.filtered_and_sorted("", SortOrder::Title)),
            vec!["Apple", "banana", "cherry"]
        );
    }

    #[test]
    fn test_title_sort_collates_accents_and_case() {
        let mut collection = NoticeCollection::new();
        collection.apply_fetched(vec![
            notice("1", "Zoology lab", "2024-01-01", &[]),
            notice("2", "Élections", "2024-01-02", &[]),
            notice("3", "Fees", "2024-01-03", &[]),
            notice("4", "Apple", "2024-01-04", &[]),
            notice("5", "apple", "2024-01-05", &[]),
        ]);

        assert_eq!(
            titles(&collection.filtered_and_sorted("", SortOrder::Title)),
            vec!["apple", "Apple", "Élections", "Fees", "Zoology lab"]
        );
    }

    #[test]
    fn test_search_matches_description_and_categories() {
        let mut collection = NoticeCollection::new();
        collection.apply_fetched(vec![
            notice("1", "Library hours", "2024-01-01", &["General"]),
            notice("2", "Hackathon", "2024-01-02", &["Events"]),
        ]);

        assert_eq!(
            titles(&collection.filtered_and_sorted("EVENTS", SortOrder::Newest)),
            vec!["Hackathon"]
        );
        assert_eq!(
            titles(&collection.filtered_and_sorted("hours details", SortOrder::Newest)),
            vec!["Library hours"]
        );
        assert!(
            collection
                .filtered_and_sorted("nothing like this", SortOrder::Newest)
                .is_empty()
        );
    }

    #[test]
    fn test_unknown_sort_name_falls_back_to_newest() {
        assert_eq!(SortOrder::parse_lenient("popularity"), SortOrder::Newest);
        assert_eq!(SortOrder::parse_lenient("OLDEST"), SortOrder::Oldest);
        assert_eq!("title".parse::<SortOrder>().unwrap(), SortOrder::Title);
    }

    #[test]
    fn test_views_do_not_mutate_cache() {
        let collection = two_notices();
        let before = collection.as_slice().to_vec();
        let _ = collection.filtered_and_sorted("", SortOrder::Newest);
        let _ = collection.category_counts(&categories());
        assert_eq!(collection.as_slice(), before.as_slice());
    }

    #[test]
    fn test_apply_created_prepends() {
        let mut collection = two_notices();
        collection.apply_created(notice("c", "C", "2023-12-01", &[]));
        assert_eq!(collection.as_slice()[0].id, "c");
        assert_eq!(collection.len(), 3);
    }

    #[test]
    fn test_apply_updated_replaces_in_place() {
        let mut collection = two_notices();
        let mut changed = collection.get("b").unwrap().clone();
        changed.title = "B2".to_string();

        assert!(collection.apply_updated(changed));
        assert_eq!(collection.as_slice()[1].title, "B2");

        let stranger = notice("zzz", "Z", "2024-01-01", &[]);
        assert!(!collection.apply_updated(stranger));
        assert_eq!(collection.len(), 2);
    }

    #[test]
    fn test_apply_deleted_unknown_id_is_noop() {
        let mut collection = two_notices();
        let before = collection.as_slice().to_vec();

        assert!(!collection.apply_deleted("missing"));
        assert_eq!(collection.as_slice(), before.as_slice());

        assert!(collection.apply_deleted("a"));
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn test_category_counts() {
        let mut collection = NoticeCollection::new();
        collection.apply_fetched(vec![
            notice("1", "One", "2024-01-01", &["Exam", "General"]),
            notice("2", "Two", "2024-01-02", &["Exam"]),
            notice("3", "Three", "2024-01-03", &["events"]),
        ]);

        let counts = collection.category_counts(&categories());
        assert_eq!(counts.total, 3);
        assert_eq!(counts.get("Exam"), Some(2));
        assert_eq!(counts.get("General"), Some(1));
        assert_eq!(counts.get("Events"), Some(0));
        assert_eq!(counts.get("Circulars"), Some(0));
        assert_eq!(counts.get(crate::models::ALL_NOTICES), Some(3));

        let public = collection.public_category_counts(&categories());
        assert_eq!(public.get("Events"), Some(1));
    }

    #[test]
    fn test_in_category() {
        let mut collection = NoticeCollection::new();
        collection.apply_fetched(vec![
            notice("1", "One", "2024-01-01", &["Sports"]),
            notice("2", "Two", "2024-01-02", &["Exam"]),
        ]);

        assert_eq!(titles(&collection.in_category(Some("sports"))), vec!["One"]);
        assert_eq!(collection.in_category(None).len(), 2);
        assert!(collection.in_category(Some("Cultural")).is_empty());
    }

    #[test]
    fn test_stats() {
        let mut collection = NoticeCollection::new();
        let mut archived = notice("3", "Old", "2023-12-15", &[]);
        archived.status = NoticeStatus::Archived;
        collection.apply_fetched(vec![
            notice("1", "One", "2024-05-02", &[]),
            notice("2", "Two", "2024-05-20", &[]),
            archived,
        ]);

        let stats = collection.stats(Utc.with_ymd_and_hms(2024, 5, 25, 12, 0, 0).unwrap());
        assert_eq!(
            stats,
            CollectionStats {
                total: 3,
                this_month: 2,
                active: 2,
                archived: 1,
            }
        );
    }

    #[test]
    fn test_stats_month_follows_viewer_time_zone() {
        let mut collection = NoticeCollection::new();
        collection.apply_fetched(vec![
            notice("1", "End of May", "2024-05-31", &[]),
            notice("2", "Start of June", "2024-06-01", &[]),
        ]);

        // 01:00 UTC on June 1st is still May 31st at UTC-5.
        let utc_now = Utc.with_ymd_and_hms(2024, 6, 1, 1, 0, 0).unwrap();
        let eastern = FixedOffset::west_opt(5 * 3600).unwrap();

        assert_eq!(collection.stats(utc_now).this_month, 1);
        assert_eq!(collection.stats(utc_now.with_timezone(&eastern)).this_month, 2);
    }
}
