use serde::Serialize;
use utoipa::ToSchema;

/// Health response returned by the `/healthcheck` route.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// "ok" when the storage answered a ping, "degraded" otherwise.
    pub status: String,
}

impl HealthResponse {
    /// Storage reachable.
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }

    /// Storage ping failed; requests touching it will answer 500.
    pub fn degraded() -> Self {
        Self {
            status: "degraded".to_string(),
        }
    }
}
