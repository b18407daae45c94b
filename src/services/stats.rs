//! Home page summary

use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::{book_instance::LoanStatus, session::SessionState},
    repository::Repository,
};

/// Title fragment counted on the home page
pub const TITLE_NEEDLE: &str = "how";

/// Counts shown on the home page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct HomeSummary {
    pub num_books: i64,
    pub num_instances: i64,
    pub num_instances_available: i64,
    pub num_authors: i64,
    /// Books whose title contains "how", ignoring case
    pub num_book_title_icontain_how: i64,
    /// Visits in this session before the current one
    pub num_visits: u64,
}

#[derive(Clone)]
pub struct StatsService {
    repository: Repository,
}

impl StatsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Compute the home summary and count the visit.
    ///
    /// Returns the session state to persist for the caller.
    pub async fn home_summary(&self, session: SessionState) -> AppResult<(HomeSummary, SessionState)> {
        let num_books = self.repository.books.count().await?;
        let num_instances = self.repository.book_instances.count().await?;
        let num_instances_available = self
            .repository
            .book_instances
            .count_by_status(LoanStatus::Available)
            .await?;
        let num_authors = self.repository.authors.count().await?;
        let num_book_title_icontain_how = self
            .repository
            .books
            .count_title_contains(TITLE_NEEDLE)
            .await?;

        let (num_visits, session) = session.record_visit();

        Ok((
            HomeSummary {
                num_books,
                num_instances,
                num_instances_available,
                num_authors,
                num_book_title_icontain_how,
                num_visits,
            },
            session,
        ))
    }
}
