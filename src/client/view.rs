//! Derived view: filter by search term, then sort by name
//!
//! Recomputed from the cache on every render; nothing here is stored.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::record::Record;

use super::collate::locale_compare;

/// Name sort direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Asc => f.write_str("A-Z"),
            SortOrder::Desc => f.write_str("Z-A"),
        }
    }
}

/// Case-insensitive substring match on `name`; an empty term matches all.
pub fn matches_search(record: &Record, term: &str) -> bool {
    term.is_empty() || record.name.to_lowercase().contains(&term.to_lowercase())
}

pub fn derive_view<'a>(records: &'a [Record], search: &str, order: SortOrder) -> Vec<&'a Record> {
    let mut view: Vec<&Record> = records
        .iter()
        .filter(|r| matches_search(r, search))
        .collect();
    // stable: equal names keep cache order
    view.sort_by(|a, b| order.apply(locale_compare(&a.name, &b.name)));
    view
}
