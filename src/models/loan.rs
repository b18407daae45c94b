//! Loan renewal request and form types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::book_instance::BookInstance;

/// Renewal request submitted by a librarian
#[derive(Debug, Deserialize, ToSchema)]
pub struct RenewBookRequest {
    /// New due date (YYYY-MM-DD), between today and 4 weeks from now
    pub renewal_date: NaiveDate,
}

/// Renewal form as first displayed
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RenewalForm {
    pub book_instance: BookInstance,
    /// Suggested new due date (3 weeks from today)
    pub proposed_renewal_date: NaiveDate,
}
