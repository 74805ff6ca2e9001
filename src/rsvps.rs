use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use time::Date;
use tracing::info;
use uuid::Uuid;

use crate::{AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
pub enum RsvpStatus {
    Going,
    Maybe,
    Decline,
}

impl FromStr for RsvpStatus {
    type Err = AppError;

    // the only way in from host-supplied form text
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Going" => Ok(RsvpStatus::Going),
            "Maybe" => Ok(RsvpStatus::Maybe),
            "Decline" => Ok(RsvpStatus::Decline),
            _ => Err(AppError::InvalidStatus),
        }
    }
}

impl fmt::Display for RsvpStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RsvpStatus::Going => write!(f, "Going"),
            RsvpStatus::Maybe => write!(f, "Maybe"),
            RsvpStatus::Decline => write!(f, "Decline"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow, Serialize)]
pub struct Rsvp {
    pub id: Uuid,
    pub user_id: Uuid,
    pub event_id: Uuid,
    pub status: RsvpStatus,
}

/// One line of the "my rsvps" listing: a decision joined with the event it
/// belongs to.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow, Serialize)]
pub struct RsvpEntry {
    pub event_id: Uuid,
    pub event_title: String,
    pub event_date: Date,
    pub status: RsvpStatus,
}

#[derive(Clone)]
pub struct RsvpLedger {
    pool: SqlitePool,
}

impl RsvpLedger {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Upsert keyed by (user, event): the first decision inserts, any later
    /// one overwrites the status in place. `today` comes from the caller so
    /// nothing here reads the wall clock.
    pub async fn submit(
        &self,
        user_id: Uuid,
        event_id: Uuid,
        status: RsvpStatus,
        today: Date,
    ) -> AppResult<Rsvp> {
        let Some((date,)): Option<(Date,)> = sqlx::query_as("SELECT date FROM events WHERE id=?")
            .bind(event_id)
            .fetch_optional(&self.pool)
            .await?
        else {
            return Err(AppError::NotFound);
        };

        if date < today {
            return Err(AppError::EventPast);
        }

        let rsvp = match self.insert(user_id, event_id, status).await {
            // the (user_id, event_id) uniqueness turns a duplicate insert
            // into an update, including the losing side of two concurrent
            // submits for the same pair
            Err(AppError::Conflict) => self.update_status(user_id, event_id, status).await?,
            other => other?,
        };

        info!(user = %user_id, event = %event_id, status = %status, "rsvp recorded");
        Ok(rsvp)
    }

    async fn insert(&self, user_id: Uuid, event_id: Uuid, status: RsvpStatus) -> AppResult<Rsvp> {
        let rsvp = Rsvp {
            id: Uuid::now_v7(),
            user_id,
            event_id,
            status,
        };

        sqlx::query("INSERT INTO rsvps (id,user_id,event_id,status) VALUES (?,?,?,?)")
            .bind(rsvp.id)
            .bind(rsvp.user_id)
            .bind(rsvp.event_id)
            .bind(rsvp.status)
            .execute(&self.pool)
            .await
            .map_err(AppError::from_insert)?;

        Ok(rsvp)
    }

    async fn update_status(
        &self,
        user_id: Uuid,
        event_id: Uuid,
        status: RsvpStatus,
    ) -> AppResult<Rsvp> {
        sqlx::query("UPDATE rsvps SET status=? WHERE user_id=? AND event_id=?")
            .bind(status)
            .bind(user_id)
            .bind(event_id)
            .execute(&self.pool)
            .await?;

        // the row can only be gone if the event was deleted underneath us
        self.get(user_id, event_id).await?.ok_or(AppError::Conflict)
    }

    /// Absence is a valid state: the user has simply not decided yet.
    pub async fn get(&self, user_id: Uuid, event_id: Uuid) -> AppResult<Option<Rsvp>> {
        let rsvp = sqlx::query_as(
            "SELECT id,user_id,event_id,status FROM rsvps WHERE user_id=? AND event_id=?",
        )
        .bind(user_id)
        .bind(event_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(rsvp)
    }

    pub async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<RsvpEntry>> {
        let entries = sqlx::query_as(
            "SELECT r.event_id, e.title AS event_title, e.date AS event_date, r.status \
             FROM rsvps r JOIN events e ON e.id = r.event_id \
             WHERE r.user_id=? ORDER BY e.date ASC, e.rowid ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(entries)
    }
}
