use axum::{
    extract::{Query, State},
    response::{IntoResponse, Json, Response},
    Extension,
};

use crate::dto::stats_dto::{LeaderboardQuery, LeaderboardResponse, MyRankResponse};
use crate::middleware::auth::Claims;
use crate::AppState;

#[axum::debug_handler]
pub async fn leaderboard(
    State(state): State<AppState>,
    Query(query): Query<LeaderboardQuery>,
) -> crate::error::Result<Response> {
    let entries = state.stats.leaderboard(query.sort).await?;
    let response = LeaderboardResponse {
        sort: query.sort,
        entries,
    };
    Ok(Json(response).into_response())
}

#[axum::debug_handler]
pub async fn my_rank(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Query(query): Query<LeaderboardQuery>,
) -> crate::error::Result<Response> {
    let user_id = claims.user_id()?;
    let (rank, total_users) = state.stats.rank_of(user_id, query.sort).await?;
    let response = MyRankResponse {
        sort: query.sort,
        rank,
        total_users,
    };
    Ok(Json(response).into_response())
}
