use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use crate::dao::models::{LeaderboardEntryEntity, PayoutEntity};
use crate::dto::{format_system_time, validation::validate_identifier};

/// Score submission. Only `playerId` is mandatory; `score` and `tokens` are
/// coerced to non-negative integers and `name` falls back to `playerId`.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSubmission {
    #[serde(default)]
    #[schema(value_type = String)]
    pub player_id: Option<Value>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub name: Option<Value>,
    #[serde(default)]
    #[schema(value_type = Option<i64>)]
    pub score: Option<Value>,
    #[serde(default)]
    #[schema(value_type = Option<i64>)]
    pub tokens: Option<Value>,
}

impl Validate for ScoreSubmission {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Err(e) = validate_identifier("playerId", self.player_id.as_ref()) {
            errors.add("playerId", e);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Query string of `/leaderboard/top`; the raw value is clamped, never rejected.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TopQuery {
    /// Number of rows, clamped to 1..=100 (default 10).
    pub limit: Option<String>,
}

/// Query string of `/leaderboard/payouts`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PayoutQuery {
    /// ISO week label such as `2026-W42`.
    pub week: Option<String>,
}

/// Generic acknowledgement.
#[derive(Debug, Serialize, ToSchema)]
pub struct SuccessResponse {
    pub success: bool,
}

/// Leaderboard row exposed to clients.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntryDto {
    pub player_id: String,
    pub name: String,
    pub score: i64,
    pub tokens: i64,
    /// RFC 3339 timestamp of the last submission.
    pub updated_at: String,
}

impl From<LeaderboardEntryEntity> for LeaderboardEntryDto {
    fn from(entity: LeaderboardEntryEntity) -> Self {
        Self {
            player_id: entity.player_id,
            name: entity.name,
            score: entity.score,
            tokens: entity.tokens,
            updated_at: format_system_time(entity.updated_at),
        }
    }
}

/// Winner credited by a weekly distribution.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyWinnerDto {
    pub player_id: String,
    pub name: String,
    pub score: i64,
    /// 1-based rank.
    pub position: u32,
    /// Tokens added to the player balance.
    pub prize: i64,
}

/// Outcome of `POST /leaderboard/distribute-weekly`.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyDistributionResponse {
    pub success: bool,
    pub distribution_id: Uuid,
    pub week: String,
    pub winners: Vec<WeeklyWinnerDto>,
}

/// Ledger row of a past payout.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PayoutDto {
    pub distribution_id: Uuid,
    pub week: String,
    pub player_id: String,
    pub position: u32,
    pub amount: i64,
    /// RFC 3339 timestamp of the credit.
    pub paid_at: String,
}

impl From<PayoutEntity> for PayoutDto {
    fn from(entity: PayoutEntity) -> Self {
        Self {
            distribution_id: entity.distribution_id,
            week: entity.week,
            player_id: entity.player_id,
            position: entity.position,
            amount: entity.amount,
            paid_at: format_system_time(entity.paid_at),
        }
    }
}
