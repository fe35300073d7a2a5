//! List pagination helper.
//!
//! Services receive page parameters in their list requests, use
//! [`Page::offset`] / [`Page::limit`] to drive the query, then record the
//! total and produce a [`PageResult`] for the response.

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;

/// Default page size applied when a page number is given without a size.
pub const DEFAULT_PAGE_SIZE: u32 = 15;
/// Default separator for keyword and search-key lists.
pub const DEFAULT_SEPARATOR: &str = ",";

/// Page parameters as they appear in a list request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PageRequest {
    /// 1-based page number; 0 means unpaginated.
    #[serde(default)]
    pub page_num: u32,
    /// Page size; 0 means unset.
    #[serde(default)]
    pub page_size: u32,
    /// Sort field.
    #[serde(default)]
    pub order_by: String,
    /// Descending sort order.
    #[serde(default)]
    pub is_descending: bool,
    /// Separator-joined search values.
    #[serde(default)]
    pub key_words: String,
    /// Separator-joined search fields.
    #[serde(default)]
    pub search_key: String,
}

/// Pagination state for one list call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    num: u32,
    size: u32,
    order_by: String,
    is_descending: bool,
    key_words: String,
    search_key: String,
    total: u32,
    default_size: u32,
    separator: String,
}

impl Page {
    /// Builds pagination state from request parameters.
    #[must_use]
    pub fn from_request(req: &PageRequest) -> Self {
        Self {
            num: req.page_num,
            size: req.page_size,
            order_by: req.order_by.clone(),
            is_descending: req.is_descending,
            key_words: req.key_words.clone(),
            search_key: req.search_key.clone(),
            total: 0,
            default_size: DEFAULT_PAGE_SIZE,
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }

    /// Overrides the default page size.
    #[must_use]
    pub fn with_default_size(mut self, size: u32) -> Self {
        self.default_size = size;
        self
    }

    /// Overrides the keyword separator.
    #[must_use]
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Returns the sort field.
    #[must_use]
    pub fn order_by(&self) -> &str {
        &self.order_by
    }

    /// Returns true for descending sort order.
    #[must_use]
    pub const fn is_descending(&self) -> bool {
        self.is_descending
    }

    /// Returns the row offset of the page.
    #[must_use]
    pub const fn offset(&self) -> u32 {
        if self.num == 0 {
            0
        } else {
            (self.num - 1) * self.size
        }
    }

    /// Returns the row limit of the page.
    ///
    /// An explicit size wins; a page number without a size falls back to
    /// the default size; neither means no limit (0).
    #[must_use]
    pub const fn limit(&self) -> u32 {
        if self.size != 0 {
            self.size
        } else if self.num != 0 {
            self.default_size
        } else {
            0
        }
    }

    /// Returns true if the request actually asked for pagination.
    #[must_use]
    pub const fn required(&self) -> bool {
        self.num > 0 && self.size > 0
    }

    /// Splits the keyword/search-key lists into a search condition.
    ///
    /// Keys are paired with values positionally; leftover keys (keys
    /// beyond the number of values) are returned as plain field names.
    #[must_use]
    pub fn search_condition(&self) -> (BTreeMap<String, String>, Vec<String>) {
        let values: Vec<&str> = if self.key_words.is_empty() {
            Vec::new()
        } else {
            self.key_words.split(self.separator.as_str()).collect()
        };
        let keys: Vec<&str> = if self.search_key.is_empty() {
            Vec::new()
        } else {
            self.search_key.split(self.separator.as_str()).collect()
        };

        let mut cond = BTreeMap::new();
        let mut fields = Vec::new();
        for (i, key) in keys.iter().enumerate() {
            if let Some(value) = values.get(i) {
                cond.insert((*key).to_string(), value.trim().to_string());
            } else {
                fields.push(key.trim().to_string());
            }
        }
        (cond, fields)
    }

    /// Records the total row count once the query has run.
    pub fn set_total(&mut self, total: u32) {
        self.total = total;
    }

    /// Produces the response-side page summary.
    ///
    /// Fails with [`PaginationError::NoTotal`] until `set_total` has been
    /// called with a non-zero count.
    pub fn result(&self) -> Result<PageResult, PaginationError> {
        if self.total == 0 {
            return Err(PaginationError::NoTotal);
        }
        let (page_size, last_page) = if self.size == 0 {
            (self.total, 0)
        } else if self.total % self.size == 0 {
            (self.size, self.total / self.size)
        } else {
            (self.size, self.total / self.size + 1)
        };
        Ok(PageResult {
            total: self.total,
            page_num: self.num,
            page_size,
            last_page,
        })
    }
}

/// Page summary for a list response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageResult {
    /// Total row count.
    pub total: u32,
    /// Echoed page number.
    pub page_num: u32,
    /// Effective page size (the total when unpaginated).
    pub page_size: u32,
    /// Last page number (0 when unpaginated).
    pub last_page: u32,
}

/// Pagination errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationError {
    /// No total recorded before building the result.
    NoTotal,
}

impl fmt::Display for PaginationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoTotal => write!(f, "no total data"),
        }
    }
}

impl std::error::Error for PaginationError {}
