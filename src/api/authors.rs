//! Author list, detail and lifecycle endpoints

use axum::{
    extract::State,
    response::Redirect,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        author::{Author, AuthorDetails, AuthorForm, AuthorFormInitial},
        pagination::PageQuery,
    },
    services::catalog::SOME_DATA,
};

use super::{AppJson, AppPath, AppQuery, AuthenticatedUser, AuthorPage, CatalogManager, API_PREFIX};

fn author_url(id: i32) -> String {
    format!("{}/author/{}", API_PREFIX, id)
}

/// List authors (first 100, ten per page)
#[utoipa::path(
    get,
    path = "/authors/",
    tag = "catalog",
    security(("bearer_auth" = [])),
    params(PageQuery),
    responses(
        (status = 200, description = "Page of authors", body = AuthorPage),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Invalid page")
    )
)]
pub async fn list_authors(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    AppQuery(query): AppQuery<PageQuery>,
) -> AppResult<Json<AuthorPage>> {
    let (authors, pagination) = state.services.catalog.list_authors(query.page).await?;
    Ok(Json(AuthorPage::new(authors, pagination).with_some_data(SOME_DATA)))
}

/// Author details with their books
#[utoipa::path(
    get,
    path = "/author/{id}",
    tag = "catalog",
    params(
        ("id" = i32, Path, description = "Author ID")
    ),
    responses(
        (status = 200, description = "Author details", body = AuthorDetails),
        (status = 404, description = "Author not found")
    )
)]
pub async fn get_author(
    State(state): State<crate::AppState>,
    AppPath(id): AppPath<i32>,
) -> AppResult<Json<AuthorDetails>> {
    let author = state.services.catalog.get_author(id).await?;
    Ok(Json(author))
}

/// Initial values of the author creation form
#[utoipa::path(
    get,
    path = "/author/create/",
    tag = "authors",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Form initial values", body = AuthorFormInitial),
        (status = 403, description = "Missing permission")
    )
)]
pub async fn create_form(
    State(state): State<crate::AppState>,
    CatalogManager(_claims): CatalogManager,
) -> AppResult<Json<AuthorFormInitial>> {
    Ok(Json(state.services.authors.create_form()))
}

/// Create an author
#[utoipa::path(
    post,
    path = "/author/create/",
    tag = "authors",
    security(("bearer_auth" = [])),
    request_body = AuthorForm,
    responses(
        (status = 303, description = "Created, redirects to the author"),
        (status = 400, description = "Invalid input"),
        (status = 403, description = "Missing permission")
    )
)]
pub async fn create_author(
    State(state): State<crate::AppState>,
    CatalogManager(_claims): CatalogManager,
    AppJson(form): AppJson<AuthorForm>,
) -> AppResult<Redirect> {
    let author = state.services.authors.create(form).await?;
    Ok(Redirect::to(&author_url(author.id)))
}

/// Current values of an author, for editing
#[utoipa::path(
    get,
    path = "/author/{id}/update/",
    tag = "authors",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Author ID")
    ),
    responses(
        (status = 200, description = "Author", body = Author),
        (status = 404, description = "Author not found")
    )
)]
pub async fn update_form(
    State(state): State<crate::AppState>,
    CatalogManager(_claims): CatalogManager,
    AppPath(id): AppPath<i32>,
) -> AppResult<Json<Author>> {
    Ok(Json(state.services.authors.get(id).await?))
}

/// Update an author
#[utoipa::path(
    post,
    path = "/author/{id}/update/",
    tag = "authors",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Author ID")
    ),
    request_body = AuthorForm,
    responses(
        (status = 303, description = "Updated, redirects to the author"),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Author not found")
    )
)]
pub async fn update_author(
    State(state): State<crate::AppState>,
    CatalogManager(_claims): CatalogManager,
    AppPath(id): AppPath<i32>,
    AppJson(form): AppJson<AuthorForm>,
) -> AppResult<Redirect> {
    let author = state.services.authors.update(id, form).await?;
    Ok(Redirect::to(&author_url(author.id)))
}

/// Author about to be deleted, for confirmation
#[utoipa::path(
    get,
    path = "/author/{id}/delete/",
    tag = "authors",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Author ID")
    ),
    responses(
        (status = 200, description = "Author", body = Author),
        (status = 404, description = "Author not found")
    )
)]
pub async fn delete_form(
    State(state): State<crate::AppState>,
    CatalogManager(_claims): CatalogManager,
    AppPath(id): AppPath<i32>,
) -> AppResult<Json<Author>> {
    Ok(Json(state.services.authors.get(id).await?))
}

/// Delete an author. Their books are kept with no author.
#[utoipa::path(
    post,
    path = "/author/{id}/delete/",
    tag = "authors",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Author ID")
    ),
    responses(
        (status = 303, description = "Deleted, redirects to the author list"),
        (status = 404, description = "Author not found")
    )
)]
pub async fn delete_author(
    State(state): State<crate::AppState>,
    CatalogManager(_claims): CatalogManager,
    AppPath(id): AppPath<i32>,
) -> AppResult<Redirect> {
    state.services.authors.delete(id).await?;
    Ok(Redirect::to(&format!("{}/authors/", API_PREFIX)))
}
