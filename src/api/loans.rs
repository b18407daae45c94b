//! Borrowed book lists and loan renewal endpoints

use axum::{
    extract::State,
    response::Redirect,
    Json,
};
use chrono::Local;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{
        loan::{RenewBookRequest, RenewalForm},
        pagination::PageQuery,
    },
};

use super::{
    AppJson, AppPath, AppQuery, AuthenticatedUser, BookInstancePage, BorrowedViewer, LoanManager,
    API_PREFIX,
};

/// Books on loan to the current user
#[utoipa::path(
    get,
    path = "/mybooks/",
    tag = "loans",
    security(("bearer_auth" = [])),
    params(PageQuery),
    responses(
        (status = 200, description = "Caller's borrowed copies, soonest due first", body = BookInstancePage),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn my_borrowed(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    AppQuery(query): AppQuery<PageQuery>,
) -> AppResult<Json<BookInstancePage>> {
    let (instances, pagination) = state
        .services
        .loans
        .borrowed_by(claims.user_id, query.page)
        .await?;
    Ok(Json(BookInstancePage::new(instances, pagination)))
}

/// Every book on loan (staff)
#[utoipa::path(
    get,
    path = "/borrowed/",
    tag = "loans",
    security(("bearer_auth" = [])),
    params(PageQuery),
    responses(
        (status = 200, description = "All borrowed copies, latest due first", body = BookInstancePage),
        (status = 403, description = "Missing permission")
    )
)]
pub async fn all_borrowed(
    State(state): State<crate::AppState>,
    BorrowedViewer(_claims): BorrowedViewer,
    AppQuery(query): AppQuery<PageQuery>,
) -> AppResult<Json<BookInstancePage>> {
    let (instances, pagination) = state.services.loans.all_borrowed(query.page).await?;
    Ok(Json(BookInstancePage::new(instances, pagination)))
}

/// Renewal form with the proposed date
#[utoipa::path(
    get,
    path = "/book/{id}/renew/",
    tag = "loans",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Book instance ID")
    ),
    responses(
        (status = 200, description = "Renewal form", body = RenewalForm),
        (status = 403, description = "Missing permission"),
        (status = 404, description = "Book instance not found")
    )
)]
pub async fn renew_form(
    State(state): State<crate::AppState>,
    LoanManager(_claims): LoanManager,
    AppPath(id): AppPath<Uuid>,
) -> AppResult<Json<RenewalForm>> {
    let today = Local::now().date_naive();
    let form = state.services.loans.renewal_form(id, today).await?;
    Ok(Json(form))
}

/// Set a new due date on a borrowed copy
#[utoipa::path(
    post,
    path = "/book/{id}/renew/",
    tag = "loans",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Book instance ID")
    ),
    request_body = RenewBookRequest,
    responses(
        (status = 303, description = "Renewed, redirects to all borrowed books"),
        (status = 400, description = "Date in the past or more than 4 weeks ahead"),
        (status = 403, description = "Missing permission"),
        (status = 404, description = "Book instance not found")
    )
)]
pub async fn renew_book(
    State(state): State<crate::AppState>,
    LoanManager(_claims): LoanManager,
    AppPath(id): AppPath<Uuid>,
    AppJson(request): AppJson<RenewBookRequest>,
) -> AppResult<Redirect> {
    let today = Local::now().date_naive();
    state
        .services
        .loans
        .renew(id, request.renewal_date, today)
        .await?;

    Ok(Redirect::to(&format!("{}/borrowed/", API_PREFIX)))
}
