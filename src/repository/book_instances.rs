//! Book instances repository

use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::book_instance::{BookInstance, LoanStatus, UpdateBookInstance},
};

const INSTANCE_SELECT: &str = r#"
    SELECT bi.id, bi.book_id, bi.imprint, bi.due_back, bi.status, bi.borrower_id,
           b.title AS book_title, u.username AS borrower_username
    FROM book_instances bi
    LEFT JOIN books b ON b.id = bi.book_id
    LEFT JOIN users u ON u.id = bi.borrower_id
"#;

/// Sort direction on `due_back`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueBackOrder {
    Ascending,
    Descending,
}

impl DueBackOrder {
    fn sql(&self) -> &'static str {
        match self {
            DueBackOrder::Ascending => "bi.due_back ASC",
            DueBackOrder::Descending => "bi.due_back DESC",
        }
    }
}

/// Loan-facing access to book instances
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookInstanceStore: Send + Sync {
    /// Get an instance by ID
    async fn get_by_id(&self, id: Uuid) -> AppResult<BookInstance>;

    /// Persist a new due date
    async fn update_due_back(&self, id: Uuid, due_back: NaiveDate) -> AppResult<()>;

    /// Instances on loan, optionally restricted to one borrower
    async fn list_on_loan(
        &self,
        borrower_id: Option<i32>,
        order: DueBackOrder,
        limit: i64,
        offset: i64,
    ) -> AppResult<Vec<BookInstance>>;

    async fn count_on_loan(&self, borrower_id: Option<i32>) -> AppResult<i64>;
}

#[derive(Clone)]
pub struct BookInstancesRepository {
    pool: Pool<Postgres>,
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

impl BookInstancesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Copies of a book in default (due_back) order
    pub async fn list_for_book(&self, book_id: i32) -> AppResult<Vec<BookInstance>> {
        let today = today();
        let instances = sqlx::query_as::<_, BookInstance>(&format!(
            "{} WHERE bi.book_id = $1 ORDER BY bi.due_back, bi.id",
            INSTANCE_SELECT
        ))
        .bind(book_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(instances.into_iter().map(|i| i.with_overdue(today)).collect())
    }

    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM book_instances")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    pub async fn count_by_status(&self, status: LoanStatus) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM book_instances WHERE status = $1")
            .bind(status)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Create a new copy with a fresh identifier and the default status
    pub async fn create(&self, book_id: i32, imprint: &str) -> AppResult<BookInstance> {
        let id = Uuid::new_v4();

        sqlx::query("INSERT INTO book_instances (id, book_id, imprint, status) VALUES ($1, $2, $3, $4)")
            .bind(id)
            .bind(book_id)
            .bind(imprint)
            .bind(LoanStatus::default())
            .execute(&self.pool)
            .await?;

        self.get_by_id(id).await
    }

    /// Administrative edit. No transition rules apply to the status.
    pub async fn update(&self, id: Uuid, data: &UpdateBookInstance) -> AppResult<BookInstance> {
        let result = sqlx::query(
            "UPDATE book_instances SET status = $1, borrower_id = $2, due_back = $3 WHERE id = $4",
        )
        .bind(data.status)
        .bind(data.borrower_id)
        .bind(data.due_back)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book instance {} not found", id)));
        }

        self.get_by_id(id).await
    }
}

#[async_trait]
impl BookInstanceStore for BookInstancesRepository {
    async fn get_by_id(&self, id: Uuid) -> AppResult<BookInstance> {
        sqlx::query_as::<_, BookInstance>(&format!("{} WHERE bi.id = $1", INSTANCE_SELECT))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(|i| i.with_overdue(today()))
            .ok_or_else(|| AppError::NotFound(format!("Book instance {} not found", id)))
    }

    async fn update_due_back(&self, id: Uuid, due_back: NaiveDate) -> AppResult<()> {
        let result = sqlx::query("UPDATE book_instances SET due_back = $1 WHERE id = $2")
            .bind(due_back)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book instance {} not found", id)));
        }
        Ok(())
    }

    async fn list_on_loan(
        &self,
        borrower_id: Option<i32>,
        order: DueBackOrder,
        limit: i64,
        offset: i64,
    ) -> AppResult<Vec<BookInstance>> {
        let today = today();
        let query = format!(
            r#"
            {}
            WHERE bi.status = $1
              AND ($2::INTEGER IS NULL OR bi.borrower_id = $2)
            ORDER BY {}, bi.id
            LIMIT $3 OFFSET $4
            "#,
            INSTANCE_SELECT,
            order.sql()
        );

        let instances = sqlx::query_as::<_, BookInstance>(&query)
            .bind(LoanStatus::OnLoan)
            .bind(borrower_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        Ok(instances.into_iter().map(|i| i.with_overdue(today)).collect())
    }

    async fn count_on_loan(&self, borrower_id: Option<i32>) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM book_instances
            WHERE status = $1
              AND ($2::INTEGER IS NULL OR borrower_id = $2)
            "#,
        )
        .bind(LoanStatus::OnLoan)
        .bind(borrower_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }
}
