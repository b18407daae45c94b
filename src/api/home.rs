//! Home page summary endpoint

use axum::{extract::State, Json};

use crate::{error::AppResult, services::stats::HomeSummary};

use super::AuthenticatedUser;

/// Catalog counts and the session visit counter
#[utoipa::path(
    get,
    path = "/",
    tag = "catalog",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Home summary", body = HomeSummary),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn index(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<HomeSummary>> {
    let session = state.services.redis.load_session(&claims.sid).await?;

    let (summary, session) = state.services.stats.home_summary(session).await?;

    state
        .services
        .redis
        .save_session(&claims.sid, &session, state.services.users.session_ttl_seconds())
        .await?;

    Ok(Json(summary))
}
