use async_trait::async_trait;
use sqlx::FromRow;
use sqlx::PgPool;

use crate::domain::page::models::KpiReport;
use crate::domain::page::models::Page;
use crate::domain::page::models::PageId;
use crate::domain::page::models::PageName;
use crate::domain::page::ports::PageRepository;
use crate::page::errors::PageError;

pub struct PostgresPageRepository {
    pool: PgPool,
}

impl PostgresPageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct PageRow {
    id: i64,
    name: String,
}

#[derive(Debug, FromRow)]
struct KpiRow {
    page_id: i64,
    page_name: String,
    visits: i64,
    total_time_seconds: i64,
}

// SQLSTATE numeric_value_out_of_range
const NUMERIC_OUT_OF_RANGE: &str = "22003";

fn database_error(e: sqlx::Error) -> PageError {
    PageError::DatabaseError(e.to_string())
}

#[async_trait]
impl PageRepository for PostgresPageRepository {
    async fn create(&self, name: PageName) -> Result<Page, PageError> {
        let mut transaction = self.pool.begin().await.map_err(database_error)?;

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO pages (name)
            VALUES ($1)
            RETURNING id
            "#,
        )
        .bind(name.as_str())
        .fetch_one(&mut *transaction)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() && db_err.constraint() == Some("pages_name_key") {
                    return PageError::NameAlreadyExists(name.to_string());
                }
            }
            database_error(e)
        })?;

        sqlx::query(
            r#"
            INSERT INTO kpi (page_id)
            VALUES ($1)
            "#,
        )
        .bind(id)
        .execute(&mut *transaction)
        .await
        .map_err(database_error)?;

        transaction.commit().await.map_err(database_error)?;

        Ok(Page {
            id: PageId(id),
            name,
        })
    }

    async fn find_by_id(&self, id: PageId) -> Result<Option<Page>, PageError> {
        let row = sqlx::query_as::<_, PageRow>(
            r#"
            SELECT id, name
            FROM pages
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        row.map(|r| -> Result<Page, PageError> {
            Ok(Page {
                id: PageId(r.id),
                name: PageName::new(r.name)?,
            })
        })
        .transpose()
    }

    async fn increment_visits(&self, id: PageId) -> Result<Option<i64>, PageError> {
        sqlx::query_scalar(
            r#"
            UPDATE kpi
            SET visits = visits + 1
            WHERE page_id = $1
            RETURNING visits
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)
    }

    async fn add_time(&self, id: PageId, seconds: i64) -> Result<Option<i64>, PageError> {
        sqlx::query_scalar(
            r#"
            UPDATE kpi
            SET total_time_seconds = total_time_seconds + $2
            WHERE page_id = $1
            RETURNING total_time_seconds
            "#,
        )
        .bind(id.0)
        .bind(seconds)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.code().as_deref() == Some(NUMERIC_OUT_OF_RANGE) {
                    return PageError::TotalTimeOverflow(id);
                }
            }
            database_error(e)
        })
    }

    async fn list_kpis(&self) -> Result<Vec<KpiReport>, PageError> {
        let rows = sqlx::query_as::<_, KpiRow>(
            r#"
            SELECT kpi.page_id, pages.name AS page_name, kpi.visits, kpi.total_time_seconds
            FROM kpi
            JOIN pages ON pages.id = kpi.page_id
            ORDER BY kpi.page_id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(rows
            .into_iter()
            .map(|r| KpiReport {
                page_id: PageId(r.page_id),
                page_name: r.page_name,
                visits: r.visits,
                total_time_seconds: r.total_time_seconds,
            })
            .collect())
    }
}
