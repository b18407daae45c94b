//! API handlers for Locallib REST endpoints

pub mod admin;
pub mod auth;
pub mod authors;
pub mod books;
pub mod health;
pub mod home;
pub mod loans;
pub mod openapi;

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts},
    http::request::Parts,
    routing::{get, post},
    Router,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use serde::Serialize;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::ToSchema;

use crate::{
    error::AppError,
    models::{
        author::Author, book::Book, book_instance::BookInstance, pagination::Pagination,
        user::{Capability, UserClaims},
    },
    AppState,
};

/// Prefix under which every API route is mounted
pub const API_PREFIX: &str = "/api/v1";

/// Extractor for authenticated user from JWT token
pub struct AuthenticatedUser(pub UserClaims);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| AppError::Authentication("Missing or invalid authorization header".to_string()))?;

        let claims = UserClaims::from_token(bearer.token(), &state.config.auth.jwt_secret)
            .map_err(|e| AppError::Authentication(e.to_string()))?;

        Ok(AuthenticatedUser(claims))
    }
}

async fn claims_with(
    parts: &mut Parts,
    state: &AppState,
    capability: Capability,
) -> Result<UserClaims, AppError> {
    let AuthenticatedUser(claims) = AuthenticatedUser::from_request_parts(parts, state).await?;
    claims.require_capability(capability)?;
    Ok(claims)
}

/// Requires the `can_manage_loans` capability. Rejects with 403 otherwise.
pub struct LoanManager(pub UserClaims);

#[async_trait]
impl FromRequestParts<AppState> for LoanManager {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        claims_with(parts, state, Capability::CanManageLoans)
            .await
            .map(LoanManager)
    }
}

/// Requires the `can_view_all_borrowed_books` capability.
pub struct BorrowedViewer(pub UserClaims);

#[async_trait]
impl FromRequestParts<AppState> for BorrowedViewer {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        claims_with(parts, state, Capability::CanViewAllBorrowedBooks)
            .await
            .map(BorrowedViewer)
    }
}

/// Requires the `can_manage_catalog` capability.
pub struct CatalogManager(pub UserClaims);

#[async_trait]
impl FromRequestParts<AppState> for CatalogManager {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        claims_with(parts, state, Capability::CanManageCatalog)
            .await
            .map(CatalogManager)
    }
}

/// JSON body extractor reporting malformed input as a validation error
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// Query string extractor reporting unparsable parameters as not found
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct AppQuery<T>(pub T);

/// Path extractor reporting unparsable identifiers as not found
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);

/// Paginated response wrapper
#[derive(Serialize, ToSchema)]
#[aliases(
    BookPage = PaginatedResponse<Book>,
    AuthorPage = PaginatedResponse<Author>,
    BookInstancePage = PaginatedResponse<BookInstance>
)]
pub struct PaginatedResponse<T>
where
    T: for<'a> ToSchema<'a>,
{
    /// Records of the current page
    pub items: Vec<T>,
    /// Total number of records
    pub total: i64,
    /// Current page number
    pub page: i64,
    /// Records per page
    pub per_page: i64,
    pub num_pages: i64,
    /// Informational string attached to some lists
    #[serde(skip_serializing_if = "Option::is_none")]
    pub some_data: Option<String>,
}

impl<T> PaginatedResponse<T>
where
    T: for<'a> ToSchema<'a>,
{
    pub fn new(items: Vec<T>, pagination: Pagination) -> Self {
        Self {
            items,
            total: pagination.total,
            page: pagination.page,
            per_page: pagination.per_page,
            num_pages: pagination.num_pages(),
            some_data: None,
        }
    }

    pub fn with_some_data(mut self, some_data: &str) -> Self {
        self.some_data = Some(some_data.to_string());
        self
    }
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Authentication
        .route("/auth/login", post(auth::login))
        .route("/auth/me", get(auth::me))
        // Home summary
        .route("/", get(home::index))
        // Catalog
        .route("/books/", get(books::list_books).post(admin::create_book))
        .route("/book/:id", get(books::get_book))
        .route("/book/:id/instances/", post(admin::create_instance))
        .route("/authors/", get(authors::list_authors))
        .route("/author/:id", get(authors::get_author))
        // Author lifecycle
        .route(
            "/author/create/",
            get(authors::create_form).post(authors::create_author),
        )
        .route(
            "/author/:id/update/",
            get(authors::update_form).post(authors::update_author),
        )
        .route(
            "/author/:id/delete/",
            get(authors::delete_form).post(authors::delete_author),
        )
        // Loans
        .route("/mybooks/", get(loans::my_borrowed))
        .route("/borrowed/", get(loans::all_borrowed))
        .route(
            "/book/:id/renew/",
            get(loans::renew_form).post(loans::renew_book),
        )
        // Administration
        .route("/genres/", get(admin::list_genres).post(admin::create_genre))
        .route(
            "/languages/",
            get(admin::list_languages).post(admin::create_language),
        )
        .route(
            "/instances/:id",
            get(admin::get_instance).put(admin::update_instance),
        )
        .with_state(state);

    // OpenAPI documentation
    let openapi = openapi::create_openapi_router();

    Router::new()
        .nest(API_PREFIX, api_v1)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
