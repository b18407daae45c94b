//! Catalog administration endpoints (genres, languages, books and copies)

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{
        book::{Book, CreateBook},
        book_instance::{BookInstance, CreateBookInstance, UpdateBookInstance},
        genre::{CreateGenre, Genre},
        language::{CreateLanguage, Language},
    },
};

use super::{AppJson, AppPath, CatalogManager};

/// List genres
#[utoipa::path(
    get,
    path = "/genres/",
    tag = "admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All genres", body = Vec<Genre>),
        (status = 403, description = "Missing permission")
    )
)]
pub async fn list_genres(
    State(state): State<crate::AppState>,
    CatalogManager(_claims): CatalogManager,
) -> AppResult<Json<Vec<Genre>>> {
    let genres = state.services.catalog.list_genres().await?;
    Ok(Json(genres))
}

/// Create a genre
#[utoipa::path(
    post,
    path = "/genres/",
    tag = "admin",
    security(("bearer_auth" = [])),
    request_body = CreateGenre,
    responses(
        (status = 201, description = "Genre created", body = Genre),
        (status = 400, description = "Invalid input"),
        (status = 403, description = "Missing permission")
    )
)]
pub async fn create_genre(
    State(state): State<crate::AppState>,
    CatalogManager(_claims): CatalogManager,
    AppJson(data): AppJson<CreateGenre>,
) -> AppResult<(StatusCode, Json<Genre>)> {
    let genre = state.services.catalog.create_genre(data).await?;
    Ok((StatusCode::CREATED, Json(genre)))
}

/// List languages
#[utoipa::path(
    get,
    path = "/languages/",
    tag = "admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All languages", body = Vec<Language>),
        (status = 403, description = "Missing permission")
    )
)]
pub async fn list_languages(
    State(state): State<crate::AppState>,
    CatalogManager(_claims): CatalogManager,
) -> AppResult<Json<Vec<Language>>> {
    let languages = state.services.catalog.list_languages().await?;
    Ok(Json(languages))
}

/// Create a language
#[utoipa::path(
    post,
    path = "/languages/",
    tag = "admin",
    security(("bearer_auth" = [])),
    request_body = CreateLanguage,
    responses(
        (status = 201, description = "Language created", body = Language),
        (status = 400, description = "Invalid input"),
        (status = 403, description = "Missing permission")
    )
)]
pub async fn create_language(
    State(state): State<crate::AppState>,
    CatalogManager(_claims): CatalogManager,
    AppJson(data): AppJson<CreateLanguage>,
) -> AppResult<(StatusCode, Json<Language>)> {
    let language = state.services.catalog.create_language(data).await?;
    Ok((StatusCode::CREATED, Json(language)))
}

/// Create a book
#[utoipa::path(
    post,
    path = "/books/",
    tag = "admin",
    security(("bearer_auth" = [])),
    request_body = CreateBook,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 400, description = "Invalid input or unknown reference"),
        (status = 403, description = "Missing permission")
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    CatalogManager(_claims): CatalogManager,
    AppJson(data): AppJson<CreateBook>,
) -> AppResult<(StatusCode, Json<Book>)> {
    let book = state.services.catalog.create_book(data).await?;
    Ok((StatusCode::CREATED, Json(book)))
}

/// Add a copy of a book
#[utoipa::path(
    post,
    path = "/book/{id}/instances/",
    tag = "admin",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    request_body = CreateBookInstance,
    responses(
        (status = 201, description = "Copy created in maintenance", body = BookInstance),
        (status = 403, description = "Missing permission"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn create_instance(
    State(state): State<crate::AppState>,
    CatalogManager(_claims): CatalogManager,
    AppPath(book_id): AppPath<i32>,
    AppJson(data): AppJson<CreateBookInstance>,
) -> AppResult<(StatusCode, Json<BookInstance>)> {
    let instance = state.services.catalog.create_instance(book_id, data).await?;
    Ok((StatusCode::CREATED, Json(instance)))
}

/// Get a book copy
#[utoipa::path(
    get,
    path = "/instances/{id}",
    tag = "admin",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Book instance ID")
    ),
    responses(
        (status = 200, description = "Book instance", body = BookInstance),
        (status = 403, description = "Missing permission"),
        (status = 404, description = "Book instance not found")
    )
)]
pub async fn get_instance(
    State(state): State<crate::AppState>,
    CatalogManager(_claims): CatalogManager,
    AppPath(id): AppPath<Uuid>,
) -> AppResult<Json<BookInstance>> {
    let instance = state.services.catalog.get_instance(id).await?;
    Ok(Json(instance))
}

/// Change status, borrower or due date of a copy
#[utoipa::path(
    put,
    path = "/instances/{id}",
    tag = "admin",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Book instance ID")
    ),
    request_body = UpdateBookInstance,
    responses(
        (status = 200, description = "Book instance updated", body = BookInstance),
        (status = 400, description = "Unknown borrower"),
        (status = 403, description = "Missing permission"),
        (status = 404, description = "Book instance not found")
    )
)]
pub async fn update_instance(
    State(state): State<crate::AppState>,
    CatalogManager(_claims): CatalogManager,
    AppPath(id): AppPath<Uuid>,
    AppJson(data): AppJson<UpdateBookInstance>,
) -> AppResult<Json<BookInstance>> {
    let instance = state.services.catalog.update_instance(id, data).await?;
    Ok(Json(instance))
}
