use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use serde_json::{Map, Value};

use crate::{
    dto::player::{PlayerDocument, PlayerUpdateResponse},
    error::{AppError, ErrorBody},
    routes::json::JsonBody,
    services::player_service,
    state::SharedState,
};

/// Player document endpoints. `/player/{id}` is kept as an alias of `/players/{id}`.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/players", get(list_players))
        .route("/players/{id}", get(get_player).post(update_player))
        .route("/player/{id}", get(get_player).post(update_player))
}

/// List every stored player document.
#[utoipa::path(
    get,
    path = "/players",
    tag = "players",
    responses(
        (status = 200, description = "All players", body = [PlayerDocument]),
        (status = 500, description = "Storage failure", body = ErrorBody)
    )
)]
pub async fn list_players(
    State(state): State<SharedState>,
) -> Result<Json<Vec<PlayerDocument>>, AppError> {
    Ok(Json(player_service::list_players(&state).await?))
}

/// Fetch a player, creating it with starting values when unknown.
#[utoipa::path(
    get,
    path = "/players/{id}",
    tag = "players",
    params(("id" = String, Path, description = "Player identifier")),
    responses(
        (status = 200, description = "Player document", body = PlayerDocument),
        (status = 500, description = "Storage failure", body = ErrorBody)
    )
)]
pub async fn get_player(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<PlayerDocument>, AppError> {
    Ok(Json(player_service::get_or_create_player(&state, id).await?))
}

/// Shallow-merge the body into the player document.
#[utoipa::path(
    post,
    path = "/players/{id}",
    tag = "players",
    params(("id" = String, Path, description = "Player identifier")),
    request_body(content = PlayerDocument, description = "Top-level keys to overwrite"),
    responses(
        (status = 200, description = "Merged document", body = PlayerUpdateResponse),
        (status = 400, description = "Body is not a JSON object", body = ErrorBody),
        (status = 500, description = "Storage failure", body = ErrorBody)
    )
)]
pub async fn update_player(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    JsonBody(fields): JsonBody<Map<String, Value>>,
) -> Result<Json<PlayerUpdateResponse>, AppError> {
    Ok(Json(player_service::upsert_player(&state, id, fields).await?))
}
