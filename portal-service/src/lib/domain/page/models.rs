use std::fmt;

use crate::page::errors::PageNameError;

/// A tracked page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub id: PageId,
    pub name: PageName,
}

/// Page unique identifier type (database-assigned)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageId(pub i64);

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Page name value type
///
/// Trimmed, non-empty, at most 200 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageName(String);

impl PageName {
    const MAX_LENGTH: usize = 200;

    /// # Errors
    /// * `Empty` - Name is blank after trimming
    /// * `TooLong` - Name exceeds 200 characters
    pub fn new(name: String) -> Result<Self, PageNameError> {
        let trimmed = name.trim();
        let length = trimmed.chars().count();

        if length == 0 {
            Err(PageNameError::Empty)
        } else if length > Self::MAX_LENGTH {
            Err(PageNameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Visit counter of a page after an increment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisitCount {
    pub page_id: PageId,
    pub visits: i64,
}

/// Accumulated viewing time of a page after an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSpent {
    pub page_id: PageId,
    pub total_time_seconds: i64,
}

/// KPI row joined with its page name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KpiReport {
    pub page_id: PageId,
    pub page_name: String,
    pub visits: i64,
    pub total_time_seconds: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_name_trims() {
        let name = PageName::new("  home  ".to_string()).unwrap();
        assert_eq!(name.as_str(), "home");
    }

    #[test]
    fn test_page_name_rejects_blank() {
        assert_eq!(PageName::new("   ".to_string()), Err(PageNameError::Empty));
    }

    #[test]
    fn test_page_name_length_limit() {
        assert!(PageName::new("a".repeat(200)).is_ok());
        assert_eq!(
            PageName::new("a".repeat(201)),
            Err(PageNameError::TooLong {
                max: 200,
                actual: 201
            })
        );
    }
}
