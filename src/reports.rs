use serde::Serialize;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::rsvps::RsvpStatus;
use crate::{AppError, AppResult};

/// Counts for every status, zero-filled; no key is ever omitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RsvpSummary {
    pub going: i64,
    pub maybe: i64,
    pub decline: i64,
}

impl RsvpSummary {
    pub fn total(&self) -> i64 {
        self.going + self.maybe + self.decline
    }
}

#[derive(Clone)]
pub struct Reports {
    pool: SqlitePool,
}

impl Reports {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn summarize(&self, event_id: Uuid) -> AppResult<RsvpSummary> {
        if sqlx::query_as::<_, ()>("SELECT 1 FROM events WHERE id=?")
            .bind(event_id)
            .fetch_optional(&self.pool)
            .await?
            .is_none()
        {
            return Err(AppError::NotFound);
        }

        let rows: Vec<(RsvpStatus, i64)> =
            sqlx::query_as("SELECT status, COUNT(*) FROM rsvps WHERE event_id=? GROUP BY status")
                .bind(event_id)
                .fetch_all(&self.pool)
                .await?;

        let mut summary = RsvpSummary::default();
        for (status, count) in rows {
            match status {
                RsvpStatus::Going => summary.going = count,
                RsvpStatus::Maybe => summary.maybe = count,
                RsvpStatus::Decline => summary.decline = count,
            }
        }

        Ok(summary)
    }
}
