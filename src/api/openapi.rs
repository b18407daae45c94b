//! OpenAPI documentation

use axum::Router;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{admin, auth, authors, books, health, home, loans};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Locallib API",
        version = "1.0.0",
        description = "Local library catalog and loans REST API"
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::login,
        auth::me,
        // Home
        home::index,
        // Catalog
        books::list_books,
        books::get_book,
        authors::list_authors,
        authors::get_author,
        // Author lifecycle
        authors::create_form,
        authors::create_author,
        authors::update_form,
        authors::update_author,
        authors::delete_form,
        authors::delete_author,
        // Loans
        loans::my_borrowed,
        loans::all_borrowed,
        loans::renew_form,
        loans::renew_book,
        // Administration
        admin::list_genres,
        admin::create_genre,
        admin::list_languages,
        admin::create_language,
        admin::create_book,
        admin::create_instance,
        admin::get_instance,
        admin::update_instance,
    ),
    components(
        schemas(
            // Auth
            crate::models::user::LoginRequest,
            crate::models::user::UserInfo,
            crate::models::user::Capability,
            auth::LoginResponse,
            // Catalog
            crate::models::genre::Genre,
            crate::models::genre::CreateGenre,
            crate::models::language::Language,
            crate::models::language::CreateLanguage,
            crate::models::author::Author,
            crate::models::author::AuthorDetails,
            crate::models::author::AuthorForm,
            crate::models::author::AuthorFormInitial,
            crate::models::book::Book,
            crate::models::book::BookShort,
            crate::models::book::BookDetails,
            crate::models::book::CreateBook,
            crate::models::book_instance::BookInstance,
            crate::models::book_instance::LoanStatus,
            crate::models::book_instance::CreateBookInstance,
            crate::models::book_instance::UpdateBookInstance,
            // Loans
            crate::models::loan::RenewBookRequest,
            crate::models::loan::RenewalForm,
            // Pages
            crate::api::BookPage,
            crate::api::AuthorPage,
            crate::api::BookInstancePage,
            // Home
            crate::services::stats::HomeSummary,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Authentication endpoints"),
        (name = "catalog", description = "Books and authors"),
        (name = "authors", description = "Author management"),
        (name = "loans", description = "Borrowed books and renewals"),
        (name = "admin", description = "Catalog administration")
    )
)]
pub struct ApiDoc;

/// Registers the `bearer_auth` scheme referenced by protected paths
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
