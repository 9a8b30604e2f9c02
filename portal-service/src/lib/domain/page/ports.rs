use async_trait::async_trait;

use crate::page::errors::PageError;
use crate::page::models::KpiReport;
use crate::page::models::Page;
use crate::page::models::PageId;
use crate::page::models::PageName;
use crate::page::models::TimeSpent;
use crate::page::models::VisitCount;

/// Port for page and KPI service operations.
#[async_trait]
pub trait PageServicePort: Send + Sync + 'static {
    /// Create a page with zeroed KPI counters.
    ///
    /// # Errors
    /// * `NameAlreadyExists` - Another page has this name
    /// * `DatabaseError` - Database operation failed
    async fn create_page(&self, name: PageName) -> Result<Page, PageError>;

    /// # Errors
    /// * `NotFound` - Page does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_page(&self, id: PageId) -> Result<Page, PageError>;

    /// Count one visit of a page.
    ///
    /// # Errors
    /// * `KpiNotFound` - Page has no KPI row
    /// * `DatabaseError` - Database operation failed
    async fn record_visit(&self, id: PageId) -> Result<VisitCount, PageError>;

    /// Add viewing time to a page.
    ///
    /// # Arguments
    /// * `id` - Page the time was spent on
    /// * `seconds` - Seconds to add; required and non-negative
    ///
    /// # Errors
    /// * `MissingSeconds` - `seconds` not provided
    /// * `NegativeSeconds` - `seconds` below zero
    /// * `KpiNotFound` - Page has no KPI row
    /// * `DatabaseError` - Database operation failed
    async fn add_time(&self, id: PageId, seconds: Option<i64>) -> Result<TimeSpent, PageError>;

    /// KPI counters of every page, ordered by page id.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_kpis(&self) -> Result<Vec<KpiReport>, PageError>;
}

/// Persistence operations for pages and their KPI rows.
#[async_trait]
pub trait PageRepository: Send + Sync + 'static {
    /// Insert a page and its KPI row atomically.
    ///
    /// # Errors
    /// * `NameAlreadyExists` - Another page has this name
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, name: PageName) -> Result<Page, PageError>;

    /// # Returns
    /// Optional page (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: PageId) -> Result<Option<Page>, PageError>;

    /// Atomically add one to the visit counter.
    ///
    /// # Returns
    /// New visit count, or None if the page has no KPI row
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn increment_visits(&self, id: PageId) -> Result<Option<i64>, PageError>;

    /// Atomically add `seconds` to the time counter.
    ///
    /// # Returns
    /// New total, or None if the page has no KPI row
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn add_time(&self, id: PageId, seconds: i64) -> Result<Option<i64>, PageError>;

    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_kpis(&self) -> Result<Vec<KpiReport>, PageError>;
}
