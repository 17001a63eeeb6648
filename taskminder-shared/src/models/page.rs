/// Offset pagination used by every list endpoint
///
/// `skip` must be non-negative and `limit` between 1 and 100; both are
/// checked by `Validate` when the page is parsed from a query string.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Largest page a list endpoint returns
pub const MAX_LIMIT: u64 = 100;

/// Pagination window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Page {
    #[serde(default)]
    pub skip: u64,

    #[validate(range(min = 1, max = 100, message = "limit must be between 1 and 100"))]
    #[serde(default = "default_limit")]
    pub limit: u64,
}

pub fn default_limit() -> u64 {
    MAX_LIMIT
}

impl Default for Page {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: MAX_LIMIT,
        }
    }
}

impl Page {
    /// Applies the window to an already ordered iterator
    pub fn slice<T>(&self, items: impl IntoIterator<Item = T>) -> Vec<T> {
        items
            .into_iter()
            .skip(self.skip as usize)
            .take(self.limit as usize)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let page: Page = serde_json::from_str("{}").unwrap();
        assert_eq!(page, Page::default());
        assert!(page.validate().is_ok());
    }

    #[test]
    fn test_limit_bounds() {
        assert!(Page { skip: 0, limit: 0 }.validate().is_err());
        assert!(Page { skip: 0, limit: 101 }.validate().is_err());
        assert!(Page { skip: 5, limit: 100 }.validate().is_ok());
    }

    #[test]
    fn test_slice() {
        let page = Page { skip: 2, limit: 2 };
        assert_eq!(page.slice(1..=10), vec![3, 4]);
    }
}
