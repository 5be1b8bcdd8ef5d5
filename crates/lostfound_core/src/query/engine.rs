//! In-memory filter/search/sort pipeline over item records.
//!
//! # Responsibility
//! - Apply status, resolved and text filters with AND semantics.
//! - Order survivors by name, incident date or creation instant.
//!
//! # Invariants
//! - Pipeline order is fixed: status, resolved, search, sort.
//! - Counts ignore the active query.

use crate::model::item::{ItemRecord, ItemStatus};
use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Status restriction applied to the list view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ItemFilter {
    #[default]
    All,
    Lost,
    Found,
}

impl ItemFilter {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Lost => "lost",
            Self::Found => "found",
        }
    }

    fn admits(self, status: ItemStatus) -> bool {
        match self {
            Self::All => true,
            Self::Lost => status == ItemStatus::Lost,
            Self::Found => status == ItemStatus::Found,
        }
    }
}

impl Display for ItemFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemFilter {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "lost" => Ok(Self::Lost),
            "found" => Ok(Self::Found),
            other => Err(format!("unknown filter `{other}`; expected all|lost|found")),
        }
    }
}

/// Field the list is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Case-insensitive item name.
    Name,
    /// Incident date.
    Date,
    /// Creation instant.
    #[default]
    DateCreated,
}

impl SortKey {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Date => "date",
            Self::DateCreated => "created",
        }
    }

    fn compare(self, a: &ItemRecord, b: &ItemRecord) -> Ordering {
        match self {
            Self::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            Self::Date => a.date.cmp(&b.date),
            Self::DateCreated => a.date_created.cmp(&b.date_created),
        }
    }
}

impl Display for SortKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(Self::Name),
            "date" => Ok(Self::Date),
            "created" | "datecreated" | "date_created" => Ok(Self::DateCreated),
            other => Err(format!("unknown sort key `{other}`; expected name|date|created")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

impl Display for SortOrder {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Ascending),
            "desc" | "descending" => Ok(Self::Descending),
            other => Err(format!("unknown sort order `{other}`; expected asc|desc")),
        }
    }
}

/// List view parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemQuery {
    pub filter: ItemFilter,
    /// Case-insensitive substring matched against name, description and
    /// location. Empty disables the search step.
    pub search: String,
    pub sort_key: SortKey,
    pub sort_order: SortOrder,
    /// Whether resolved items stay in the result.
    pub show_resolved: bool,
}

impl ItemQuery {
    /// Applies a sort-button press.
    ///
    /// Pressing the active key flips direction; another key switches to it
    /// in descending order.
    pub fn toggle_sort(&mut self, key: SortKey) {
        if self.sort_key == key {
            self.sort_order = self.sort_order.flipped();
        } else {
            self.sort_key = key;
            self.sort_order = SortOrder::Descending;
        }
    }
}

/// Dashboard counts over the full record set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ItemCounts {
    pub total: usize,
    /// Lost and not yet resolved.
    pub lost: usize,
    /// Found and not yet resolved.
    pub found: usize,
    pub resolved: usize,
}

impl ItemCounts {
    /// Count shown on the "all items" filter badge.
    pub fn visible(&self, show_resolved: bool) -> usize {
        if show_resolved {
            self.total
        } else {
            self.total - self.resolved
        }
    }
}

/// Runs the filter/search/sort pipeline and returns the records to render.
pub fn run_query(records: &[ItemRecord], query: &ItemQuery) -> Vec<ItemRecord> {
    let needle = query.search.to_lowercase();

    let mut matched: Vec<ItemRecord> = records
        .iter()
        .filter(|item| query.filter.admits(item.status))
        .filter(|item| query.show_resolved || !item.resolved)
        .filter(|item| needle.is_empty() || matches_search(item, &needle))
        .cloned()
        .collect();

    // `sort_by` is stable, so equal keys keep their store order in both
    // directions.
    let key = query.sort_key;
    match query.sort_order {
        SortOrder::Ascending => matched.sort_by(|a, b| key.compare(a, b)),
        SortOrder::Descending => matched.sort_by(|a, b| key.compare(b, a)),
    }

    matched
}

/// Computes dashboard counts; independent of any filter or search.
pub fn count_items(records: &[ItemRecord]) -> ItemCounts {
    records.iter().fold(ItemCounts::default(), |mut counts, item| {
        counts.total += 1;
        match (item.status, item.resolved) {
            (_, true) => counts.resolved += 1,
            (ItemStatus::Lost, false) => counts.lost += 1,
            (ItemStatus::Found, false) => counts.found += 1,
        }
        counts
    })
}

fn matches_search(item: &ItemRecord, needle: &str) -> bool {
    [&item.name, &item.description, &item.location]
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
}
