//! Page arithmetic for list views

use serde::Deserialize;
use utoipa::IntoParams;

use crate::error::{AppError, AppResult};

/// `?page=N` query parameter
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct PageQuery {
    /// Page number, starting at 1 (default: 1)
    pub page: Option<i64>,
}

/// A resolved page over `total` rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: i64,
    pub per_page: i64,
    pub total: i64,
}

impl Pagination {
    /// Resolve the requested page.
    ///
    /// Page 1 always exists, even for an empty list. Any other page outside
    /// `1..=num_pages` is not found.
    pub fn new(page: Option<i64>, per_page: i64, total: i64) -> AppResult<Self> {
        let page = page.unwrap_or(1);
        let per_page = per_page.max(1);
        let pagination = Self {
            page,
            per_page,
            total: total.max(0),
        };

        if page < 1 || (page > 1 && page > pagination.num_pages()) {
            return Err(AppError::NotFound(format!("Invalid page ({})", page)));
        }

        Ok(pagination)
    }

    pub fn num_pages(&self) -> i64 {
        ((self.total + self.per_page - 1) / self.per_page).max(1)
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.per_page
    }

    pub fn limit(&self) -> i64 {
        self.per_page
    }
}
