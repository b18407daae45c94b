//! Loan listing and due-date renewal service

use std::sync::Arc;

use chrono::{Duration, NaiveDate};
use thiserror::Error;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{book_instance::BookInstance, loan::RenewalForm, pagination::Pagination},
    repository::book_instances::{BookInstanceStore, DueBackOrder},
};

/// Weeks added to today for the suggested renewal date
pub const DEFAULT_RENEWAL_WEEKS: i64 = 3;
/// Furthest a due date may be pushed, in weeks from today
pub const MAX_RENEWAL_WEEKS: i64 = 4;
pub const LOANS_PER_PAGE: i64 = 10;

/// Which bound a proposed renewal date violates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RenewalDateError {
    #[error("Invalid date - renewal in past")]
    InPast,
    #[error("Invalid date - renewal more than 4 weeks ahead")]
    TooFarAhead,
}

impl From<RenewalDateError> for AppError {
    fn from(e: RenewalDateError) -> Self {
        AppError::Validation(format!("renewal_date: {}", e))
    }
}

/// Check that `proposed` lies within `[today, today + 4 weeks]`
pub fn check_renewal_date(proposed: NaiveDate, today: NaiveDate) -> Result<(), RenewalDateError> {
    if proposed < today {
        return Err(RenewalDateError::InPast);
    }
    if proposed > today + Duration::weeks(MAX_RENEWAL_WEEKS) {
        return Err(RenewalDateError::TooFarAhead);
    }
    Ok(())
}

/// Default date offered by the renewal form
pub fn proposed_renewal_date(today: NaiveDate) -> NaiveDate {
    today + Duration::weeks(DEFAULT_RENEWAL_WEEKS)
}

#[derive(Clone)]
pub struct LoansService {
    store: Arc<dyn BookInstanceStore>,
}

impl LoansService {
    pub fn new(store: Arc<dyn BookInstanceStore>) -> Self {
        Self { store }
    }

    /// Renewal form for an instance with the default proposed date
    pub async fn renewal_form(&self, id: Uuid, today: NaiveDate) -> AppResult<RenewalForm> {
        let book_instance = self.store.get_by_id(id).await?;
        Ok(RenewalForm {
            book_instance,
            proposed_renewal_date: proposed_renewal_date(today),
        })
    }

    /// Set a new due date on an instance. The status is left untouched.
    pub async fn renew(
        &self,
        id: Uuid,
        renewal_date: NaiveDate,
        today: NaiveDate,
    ) -> AppResult<BookInstance> {
        check_renewal_date(renewal_date, today)?;

        let mut instance = self.store.get_by_id(id).await?;
        self.store.update_due_back(id, renewal_date).await?;

        tracing::info!(
            "Book instance {} renewed: due_back {:?} -> {}",
            id,
            instance.due_back,
            renewal_date
        );

        instance.due_back = Some(renewal_date);
        Ok(instance.with_overdue(today))
    }

    /// Instances on loan to one borrower, soonest due first
    pub async fn borrowed_by(
        &self,
        borrower_id: i32,
        page: Option<i64>,
    ) -> AppResult<(Vec<BookInstance>, Pagination)> {
        self.on_loan(Some(borrower_id), DueBackOrder::Ascending, page)
            .await
    }

    /// Every instance on loan, latest due first
    pub async fn all_borrowed(&self, page: Option<i64>) -> AppResult<(Vec<BookInstance>, Pagination)> {
        self.on_loan(None, DueBackOrder::Descending, page).await
    }

    async fn on_loan(
        &self,
        borrower_id: Option<i32>,
        order: DueBackOrder,
        page: Option<i64>,
    ) -> AppResult<(Vec<BookInstance>, Pagination)> {
        let total = self.store.count_on_loan(borrower_id).await?;
        let pagination = Pagination::new(page, LOANS_PER_PAGE, total)?;
        let instances = self
            .store
            .list_on_loan(borrower_id, order, pagination.limit(), pagination.offset())
            .await?;
        Ok((instances, pagination))
    }
}
