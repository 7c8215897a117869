use axum::{Router, routing::get};

use crate::state::SharedState;

/// Liveness banner.
#[utoipa::path(
    get,
    path = "/",
    tag = "health",
    responses((status = 200, description = "Server is up", body = String, content_type = "text/plain"))
)]
pub async fn index() -> &'static str {
    "Server is running!"
}

/// Configure the root route.
pub fn router() -> Router<SharedState> {
    Router::<SharedState>::new().route("/", get(index))
}
