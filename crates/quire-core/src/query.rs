//! Sort and pagination primitives shared by search and the dashboard feed.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::LogEntryView;
use crate::enums::SortColumn;

/// Default number of entries per page.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Ordering of a result page. Ties on `column` are always broken by entry id
/// ascending, so repeated calls against an unchanged store page identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Sort {
    pub column: SortColumn,
    pub ascending: bool,
}

impl Sort {
    #[must_use]
    pub const fn new(column: SortColumn, ascending: bool) -> Self {
        Self { column, ascending }
    }
}

impl Default for Sort {
    /// Newest first.
    fn default() -> Self {
        Self {
            column: SortColumn::CreatedAt,
            ascending: false,
        }
    }
}

/// Offset/limit window into a result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PageRequest {
    pub offset: u32,
    pub limit: u32,
}

impl PageRequest {
    #[must_use]
    pub const fn new(offset: u32, limit: u32) -> Self {
        Self { offset, limit }
    }

    /// A single page holding every row.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            offset: 0,
            limit: u32::MAX,
        }
    }

    /// The page after this one, same size.
    #[must_use]
    pub const fn next(self) -> Self {
        Self {
            offset: self.offset.saturating_add(self.limit),
            limit: self.limit,
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(0, DEFAULT_PAGE_SIZE)
    }
}

/// One page of search results plus the size of the whole result set.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SearchPage {
    pub entries: Vec<LogEntryView>,
    pub total: u64,
}

impl SearchPage {
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            entries: Vec::new(),
            total: 0,
        }
    }
}
