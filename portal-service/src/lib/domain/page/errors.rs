use thiserror::Error;

use crate::page::models::PageId;

/// Error for PageName validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PageNameError {
    #[error("Page name must not be empty")]
    Empty,

    #[error("Page name too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Top-level error for page and KPI operations
#[derive(Debug, Clone, Error)]
pub enum PageError {
    #[error("Invalid page name: {0}")]
    InvalidName(#[from] PageNameError),

    #[error("Page not found")]
    NotFound(PageId),

    #[error("Page KPI not found")]
    KpiNotFound(PageId),

    #[error("Page name already exists: {0}")]
    NameAlreadyExists(String),

    #[error("seconds required")]
    MissingSeconds,

    #[error("seconds must not be negative, got {0}")]
    NegativeSeconds(i64),

    #[error("seconds must be at most {max}, got {actual}")]
    TooManySeconds { max: i64, actual: i64 },

    #[error("Total time for page {0} is out of range")]
    TotalTimeOverflow(PageId),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
