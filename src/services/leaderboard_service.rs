//! Leaderboard Store: score submissions, top-N rankings and the weekly reward sweep.
//!
//! The sweep credits each winner with an independent single-document write.
//! A storage failure mid-sweep aborts the call but leaves the winners already
//! processed paid (and recorded in the payout ledger); calling it again pays
//! everybody once more.

use std::time::SystemTime;

use serde_json::Value;
use time::OffsetDateTime;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dao::{
        game_store::GameStore,
        models::{LeaderboardEntryEntity, PayoutEntity},
        storage::StorageResult,
    },
    dto::{
        leaderboard::{
            LeaderboardEntryDto, PayoutDto, ScoreSubmission, SuccessResponse,
            WeeklyDistributionResponse, WeeklyWinnerDto,
        },
        validation::identifier_text,
    },
    error::ServiceError,
    state::SharedState,
};

const DEFAULT_TOP_LIMIT: usize = 10;
const MAX_TOP_LIMIT: usize = 100;

/// Replace the caller's leaderboard row with the submitted values.
pub async fn submit_score(
    state: &SharedState,
    submission: ScoreSubmission,
) -> Result<SuccessResponse, ServiceError> {
    submission.validate()?;
    let player_id = identifier_text(submission.player_id.as_ref());

    let entry = LeaderboardEntryEntity {
        name: coerce_name(submission.name.as_ref(), &player_id),
        score: coerce_non_negative(submission.score.as_ref()),
        tokens: coerce_non_negative(submission.tokens.as_ref()),
        updated_at: SystemTime::now(),
        player_id,
    };

    state.game_store().save_score(entry).await?;
    Ok(SuccessResponse { success: true })
}

/// Highest scores first, most recent submission first among equal scores.
pub async fn top_entries(
    state: &SharedState,
    raw_limit: Option<&str>,
) -> Result<Vec<LeaderboardEntryDto>, ServiceError> {
    let limit = clamp_limit(raw_limit);
    let entries = state.game_store().top_scores(limit).await?;
    Ok(entries.into_iter().map(Into::into).collect())
}

/// Pay the configured prize table to the current top of the leaderboard.
pub async fn distribute_weekly(
    state: &SharedState,
) -> Result<WeeklyDistributionResponse, ServiceError> {
    let store = state.game_store();
    let prizes = state.config().weekly_prizes();
    let entries = store.weekly_winners(prizes.len()).await?;

    let distribution_id = Uuid::new_v4();
    let week = iso_week_label(OffsetDateTime::now_utc());
    info!(%distribution_id, %week, winners = entries.len(), "starting weekly distribution");

    let mut winners = Vec::with_capacity(entries.len());
    for (index, (entry, prize)) in entries.into_iter().zip(prizes.iter().copied()).enumerate() {
        let position = u32::try_from(index + 1).unwrap_or(u32::MAX);
        let payout = PayoutEntity {
            distribution_id,
            week: week.clone(),
            player_id: entry.player_id.clone(),
            position,
            amount: prize,
            paid_at: SystemTime::now(),
        };

        if let Err(err) = pay_winner(store.as_ref(), payout).await {
            warn!(
                %distribution_id,
                player_id = %entry.player_id,
                position,
                already_paid = winners.len(),
                error = %err,
                "weekly distribution aborted mid-sweep; earlier payouts stand"
            );
            return Err(err.into());
        }

        winners.push(WeeklyWinnerDto {
            player_id: entry.player_id,
            name: entry.name,
            score: entry.score,
            position,
            prize,
        });
    }

    info!(%distribution_id, paid = winners.len(), "weekly distribution completed");
    Ok(WeeklyDistributionResponse {
        success: true,
        distribution_id,
        week,
        winners,
    })
}

/// Ledger rows, optionally restricted to one ISO week.
pub async fn list_payouts(
    state: &SharedState,
    week: Option<String>,
) -> Result<Vec<PayoutDto>, ServiceError> {
    let week = week.filter(|week| !week.trim().is_empty());
    let payouts = state.game_store().list_payouts(week).await?;
    Ok(payouts.into_iter().map(Into::into).collect())
}

/// Credit one winner in the Player Store, then record the payout.
async fn pay_winner(store: &dyn GameStore, payout: PayoutEntity) -> StorageResult<()> {
    store.get_or_create_player(payout.player_id.clone()).await?;
    store
        .increment_tokens(payout.player_id.clone(), payout.amount)
        .await?;
    store.record_payout(payout).await
}

/// Display name for a submission: the given string, or the player id when absent or blank.
fn coerce_name(name: Option<&Value>, player_id: &str) -> String {
    match name {
        Some(Value::String(name)) if !name.is_empty() => name.clone(),
        Some(Value::Number(number)) => number.to_string(),
        _ => player_id.to_owned(),
    }
}

/// Non-negative integer read from a loosely typed value. Numbers are truncated,
/// strings are read up to the first non-digit, anything else counts as zero.
fn coerce_non_negative(value: Option<&Value>) -> i64 {
    let parsed = match value {
        Some(Value::Number(number)) => match (number.as_i64(), number.as_u64()) {
            (Some(integer), _) => integer,
            (None, Some(_)) => i64::MAX,
            (None, None) => {
                let float = number.as_f64().unwrap_or_default();
                if float.is_finite() { float.trunc() as i64 } else { 0 }
            }
        },
        Some(Value::String(text)) => parse_leading_integer(text).unwrap_or(0),
        _ => 0,
    };
    parsed.max(0)
}

/// Requested row count clamped to `1..=100`; unusable or zero input means the default.
fn clamp_limit(raw: Option<&str>) -> usize {
    match raw.and_then(parse_leading_integer) {
        None | Some(0) => DEFAULT_TOP_LIMIT,
        Some(requested) => {
            usize::try_from(requested.clamp(1, MAX_TOP_LIMIT as i64)).unwrap_or(DEFAULT_TOP_LIMIT)
        }
    }
}

/// Parse an optionally signed run of leading decimal digits, ignoring leading
/// whitespace and whatever follows the digits. Overflow saturates.
fn parse_leading_integer(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let digits: &str = &digits[..digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len())];
    if digits.is_empty() {
        return None;
    }

    let magnitude = digits.bytes().fold(0_i64, |acc, digit| {
        acc.saturating_mul(10).saturating_add(i64::from(digit - b'0'))
    });
    Some(if negative { -magnitude } else { magnitude })
}

/// ISO-8601 week label such as `2026-W42`.
fn iso_week_label(now: OffsetDateTime) -> String {
    let (year, week, _) = now.to_iso_week_date();
    format!("{year}-W{week:02}")
}
