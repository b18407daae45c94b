//! Book list and detail endpoints

use axum::{extract::State, Json};

use crate::{
    error::AppResult,
    models::{book::BookDetails, pagination::PageQuery},
    services::catalog::SOME_DATA,
};

use super::{AppPath, AppQuery, BookPage};

/// List all books
#[utoipa::path(
    get,
    path = "/books/",
    tag = "catalog",
    params(PageQuery),
    responses(
        (status = 200, description = "Page of books", body = BookPage),
        (status = 404, description = "Invalid page")
    )
)]
pub async fn list_books(
    State(state): State<crate::AppState>,
    AppQuery(query): AppQuery<PageQuery>,
) -> AppResult<Json<BookPage>> {
    let (books, pagination) = state.services.catalog.list_books(query.page).await?;
    Ok(Json(BookPage::new(books, pagination).with_some_data(SOME_DATA)))
}

/// Book details with its copies
#[utoipa::path(
    get,
    path = "/book/{id}",
    tag = "catalog",
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book details", body = BookDetails),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    AppPath(id): AppPath<i32>,
) -> AppResult<Json<BookDetails>> {
    let book = state.services.catalog.get_book(id).await?;
    Ok(Json(book))
}
