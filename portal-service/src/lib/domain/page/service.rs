use std::sync::Arc;

use async_trait::async_trait;

use crate::page::errors::PageError;
use crate::page::models::KpiReport;
use crate::page::models::Page;
use crate::page::models::PageId;
use crate::page::models::PageName;
use crate::page::models::TimeSpent;
use crate::page::models::VisitCount;
use crate::page::ports::PageRepository;
use crate::page::ports::PageServicePort;

/// Largest single time report accepted, one day.
pub const MAX_SECONDS_PER_REPORT: i64 = 86_400;

/// Domain service implementation for pages and KPI counters.
pub struct PageService<PR>
where
    PR: PageRepository,
{
    repository: Arc<PR>,
}

impl<PR> PageService<PR>
where
    PR: PageRepository,
{
    pub fn new(repository: Arc<PR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<PR> PageServicePort for PageService<PR>
where
    PR: PageRepository,
{
    async fn create_page(&self, name: PageName) -> Result<Page, PageError> {
        let page = self.repository.create(name).await?;
        tracing::info!(page_id = %page.id, name = %page.name, "Page created");
        Ok(page)
    }

    async fn get_page(&self, id: PageId) -> Result<Page, PageError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(PageError::NotFound(id))
    }

    async fn record_visit(&self, id: PageId) -> Result<VisitCount, PageError> {
        let visits = self
            .repository
            .increment_visits(id)
            .await?
            .ok_or(PageError::KpiNotFound(id))?;

        Ok(VisitCount {
            page_id: id,
            visits,
        })
    }

    async fn add_time(&self, id: PageId, seconds: Option<i64>) -> Result<TimeSpent, PageError> {
        let seconds = seconds.ok_or(PageError::MissingSeconds)?;
        if seconds < 0 {
            return Err(PageError::NegativeSeconds(seconds));
        }
        if seconds > MAX_SECONDS_PER_REPORT {
            return Err(PageError::TooManySeconds {
                max: MAX_SECONDS_PER_REPORT,
                actual: seconds,
            });
        }

        let total_time_seconds = self
            .repository
            .add_time(id, seconds)
            .await?
            .ok_or(PageError::KpiNotFound(id))?;

        Ok(TimeSpent {
            page_id: id,
            total_time_seconds,
        })
    }

    async fn list_kpis(&self) -> Result<Vec<KpiReport>, PageError> {
        self.repository.list_kpis().await
    }
}
