use axum::{
    Json, Router,
    extract::{Query, State},
    routing::{get, post},
};

use crate::{
    dto::leaderboard::{
        LeaderboardEntryDto, PayoutDto, PayoutQuery, ScoreSubmission, SuccessResponse, TopQuery,
        WeeklyDistributionResponse,
    },
    error::{AppError, ErrorBody},
    routes::json::JsonBody,
    services::leaderboard_service,
    state::SharedState,
};

/// Score submission, ranking and weekly payout endpoints.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/leaderboard", post(submit_score))
        .route("/leaderboard/top", get(top_scores))
        .route("/leaderboard/distribute-weekly", post(distribute_weekly))
        .route("/leaderboard/payouts", get(list_payouts))
}

/// Record the latest score of a player, replacing any previous row.
#[utoipa::path(
    post,
    path = "/leaderboard",
    tag = "leaderboard",
    request_body = ScoreSubmission,
    responses(
        (status = 200, description = "Score stored", body = SuccessResponse),
        (status = 400, description = "playerId missing", body = ErrorBody),
        (status = 500, description = "Storage failure", body = ErrorBody)
    )
)]
pub async fn submit_score(
    State(state): State<SharedState>,
    JsonBody(submission): JsonBody<ScoreSubmission>,
) -> Result<Json<SuccessResponse>, AppError> {
    Ok(Json(
        leaderboard_service::submit_score(&state, submission).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/leaderboard/top",
    tag = "leaderboard",
    params(TopQuery),
    responses(
        (status = 200, description = "Highest scores first", body = [LeaderboardEntryDto]),
        (status = 500, description = "Storage failure", body = ErrorBody)
    )
)]
/// Highest scores, `limit` clamped to 1..=100 (default 10).
pub async fn top_scores(
    State(state): State<SharedState>,
    Query(query): Query<TopQuery>,
) -> Result<Json<Vec<LeaderboardEntryDto>>, AppError> {
    Ok(Json(
        leaderboard_service::top_entries(&state, query.limit.as_deref()).await?,
    ))
}

/// Pay the weekly prize table to the current top scorers.
#[utoipa::path(
    post,
    path = "/leaderboard/distribute-weekly",
    tag = "leaderboard",
    responses(
        (status = 200, description = "Prizes credited", body = WeeklyDistributionResponse),
        (status = 500, description = "Storage failure; earlier credits stay applied", body = ErrorBody)
    )
)]
pub async fn distribute_weekly(
    State(state): State<SharedState>,
) -> Result<Json<WeeklyDistributionResponse>, AppError> {
    Ok(Json(leaderboard_service::distribute_weekly(&state).await?))
}

/// Payout ledger, optionally restricted to one ISO week.
#[utoipa::path(
    get,
    path = "/leaderboard/payouts",
    tag = "leaderboard",
    params(PayoutQuery),
    responses(
        (status = 200, description = "Recorded payouts", body = [PayoutDto]),
        (status = 500, description = "Storage failure", body = ErrorBody)
    )
)]
pub async fn list_payouts(
    State(state): State<SharedState>,
    Query(query): Query<PayoutQuery>,
) -> Result<Json<Vec<PayoutDto>>, AppError> {
    Ok(Json(
        leaderboard_service::list_payouts(&state, query.week).await?,
    ))
}
