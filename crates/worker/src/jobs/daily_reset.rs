//! Daily reset of per-IP view dedup.
//!
//! Once a day, at a configured UTC hour, freezes the current distinct-IP view
//! counts into the `best_documents` materialized view and clears
//! `document_viewers` so every IP counts again the next day.

use std::time::Duration;

use chrono::{DateTime, NaiveTime, Utc};
use lexicon_db::error::StoreResult;
use lexicon_db::services::DictionaryService;
use lexicon_db::DbPool;
use tokio_util::sync::CancellationToken;

/// The first instant strictly after `now` at `hour`:00 UTC.
pub fn next_reset_at(now: DateTime<Utc>, hour: u32) -> DateTime<Utc> {
    let time = NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or(NaiveTime::MIN);
    let today = now.date_naive().and_time(time).and_utc();
    if today > now {
        today
    } else {
        today + chrono::Duration::days(1)
    }
}

/// How long to sleep from `now` until the next reset.
pub fn duration_until_next_reset(now: DateTime<Utc>, hour: u32) -> Duration {
    (next_reset_at(now, hour) - now)
        .to_std()
        .unwrap_or(Duration::ZERO)
}

/// Perform one reset. Returns the number of viewer rows cleared.
pub async fn run_once(pool: &DbPool) -> StoreResult<u64> {
    DictionaryService::new(pool.clone())
        .reset_daily_views()
        .await
}

/// Run the daily reset loop until `cancel` is triggered.
///
/// A failed reset is logged and retried at the next scheduled hour.
pub async fn run(pool: DbPool, cancel: CancellationToken, reset_hour_utc: u32) {
    tracing::info!(reset_hour_utc, "Daily reset job started");

    loop {
        let now = Utc::now();
        let next = next_reset_at(now, reset_hour_utc);
        let wait = duration_until_next_reset(now, reset_hour_utc);
        tracing::debug!(next = %next, wait_secs = wait.as_secs(), "Daily reset scheduled");

        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Daily reset job stopping");
                break;
            }
            _ = tokio::time::sleep(wait) => {
                match run_once(&pool).await {
                    Ok(cleared) => {
                        tracing::info!(cleared, "Daily reset: best documents refreshed");
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Daily reset failed");
                    }
                }
            }
        }
    }
}
