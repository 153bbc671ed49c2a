use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_LIMIT, MAX_LIMIT, MIN_LIMIT};
use crate::error::{CatalogError, Result};

// ---------------------------------------------------------------------------
// PageRequest
// ---------------------------------------------------------------------------

/// A validated `(limit, offset)` pair; `limit` is always within
/// [`MIN_LIMIT`, `MAX_LIMIT`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    limit: usize,
    offset: usize,
}

impl PageRequest {
    pub fn new(limit: usize, offset: usize) -> Result<Self> {
        if !(MIN_LIMIT..=MAX_LIMIT).contains(&limit) {
            return Err(CatalogError::InvalidArgument(format!(
                "limit must be between {} and {}, got {}",
                MIN_LIMIT, MAX_LIMIT, limit
            )));
        }
        Ok(Self { limit, offset })
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn offset(&self) -> usize {
        self.offset
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

// ---------------------------------------------------------------------------
// Page
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub total: usize,
    pub limit: usize,
    pub offset: usize,
    /// 1-based.
    pub page: usize,
    pub pages: usize,
    pub results: Vec<T>,
}

impl<T> Page<T> {
    /// Envelope for one page of a larger result set.
    pub fn new(total: usize, limit: usize, offset: usize, results: Vec<T>) -> Self {
        let divisor = limit.max(1);
        Self {
            total,
            limit,
            offset,
            page: offset / divisor + 1,
            pages: total.div_ceil(divisor),
            results,
        }
    }

    /// Envelope for an exact-id lookup: `total` is 0 or 1.
    pub fn single(found: Option<T>) -> Self {
        let results: Vec<T> = found.into_iter().collect();
        Self::new(results.len(), 1, 0, results)
    }

    /// Envelope for the complete, unpaginated collection.
    pub fn unpaginated(results: Vec<T>) -> Self {
        Self {
            total: results.len(),
            limit: results.len(),
            offset: 0,
            page: 1,
            pages: 1,
            results,
        }
    }
}

/// `{ total, results }` listing of plain labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StringList {
    pub total: usize,
    pub results: Vec<String>,
}

impl From<Vec<String>> for StringList {
    fn from(results: Vec<String>) -> Self {
        Self {
            total: results.len(),
            results,
        }
    }
}
