use axum::{
    extract::State,
    response::{IntoResponse, Json, Response},
    Extension,
};

use crate::dto::stats_dto::ProfileResponse;
use crate::middleware::auth::Claims;
use crate::AppState;

/// Recent attempts shown on the profile, matching the app's history list.
const RECENT_ATTEMPTS: usize = 10;

#[axum::debug_handler]
pub async fn profile(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> crate::error::Result<Response> {
    let user_id = claims.user_id()?;
    let (statistics, recent_attempts) = state.stats.profile(user_id, RECENT_ATTEMPTS).await?;

    let response = ProfileResponse {
        name: claims.name,
        statistics,
        recent_attempts,
    };
    Ok(Json(response).into_response())
}
