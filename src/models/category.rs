//! Category counts derived from the notice collection.

use serde::Serialize;

/// Label of the implicit pseudo-category covering every notice.
pub const ALL_NOTICES: &str = "All Notices";

/// One category and how many notices carry it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub name: String,
    pub count: usize,
}

/// Per-category counts plus the grand total.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CategoryCounts {
    /// Count for the implicit "all" category
    pub total: usize,
    /// Counts in configured category order
    pub categories: Vec<CategoryCount>,
}

impl CategoryCounts {
    /// Count for a named category; `ALL_NOTICES` yields the total.
    pub fn get(&self, name: &str) -> Option<usize> {
        if name == ALL_NOTICES {
            return Some(self.total);
        }
        self.categories
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.count)
    }
}
