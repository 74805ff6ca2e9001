use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use time::{Date, Time};
use tracing::info;
use uuid::Uuid;

use crate::auth::{Authorization, Role};
use crate::{AppError, AppResult};

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow, Serialize)]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub date: Date,
    pub start_time: Time,
    pub end_time: Option<Time>,
    pub location: String,
    pub admin_id: Uuid,
}

/// Everything the host's event form collects. Presence and format checks
/// stay with the form layer.
#[derive(Debug, Clone, Deserialize)]
pub struct EventDraft {
    pub title: String,
    pub description: String,
    pub date: Date,
    pub start_time: Time,
    pub end_time: Option<Time>,
    pub location: String,
}

#[derive(Clone)]
pub struct EventCatalog {
    pool: SqlitePool,
}

impl EventCatalog {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, admin: &Authorization, draft: EventDraft) -> AppResult<Event> {
        // events are only ever owned by administrators
        if admin.role != Role::Admin {
            return Err(AppError::Forbidden);
        }

        let event = Event {
            id: Uuid::now_v7(),
            title: draft.title,
            description: draft.description,
            date: draft.date,
            start_time: draft.start_time,
            end_time: draft.end_time,
            location: draft.location,
            admin_id: admin.user_id,
        };

        sqlx::query(
            "INSERT INTO events (id,title,description,date,start_time,end_time,location,admin_id) \
             VALUES (?,?,?,?,?,?,?,?)",
        )
        .bind(event.id)
        .bind(&event.title)
        .bind(&event.description)
        .bind(event.date)
        .bind(event.start_time)
        .bind(event.end_time)
        .bind(&event.location)
        .bind(event.admin_id)
        .execute(&self.pool)
        .await?;

        info!(event = %event.id, title = %event.title, "event created");
        Ok(event)
    }

    pub async fn update(
        &self,
        admin: &Authorization,
        event_id: Uuid,
        draft: EventDraft,
    ) -> AppResult<Event> {
        let mut tx = self.pool.begin().await?;

        let Some((owner,)): Option<(Uuid,)> =
            sqlx::query_as("SELECT admin_id FROM events WHERE id=?")
                .bind(event_id)
                .fetch_optional(&mut *tx)
                .await?
        else {
            return Err(AppError::NotFound);
        };
        if owner != admin.user_id {
            return Err(AppError::Forbidden);
        }

        sqlx::query(
            "UPDATE events SET title=?,description=?,date=?,start_time=?,end_time=?,location=? \
             WHERE id=?",
        )
        .bind(&draft.title)
        .bind(&draft.description)
        .bind(draft.date)
        .bind(draft.start_time)
        .bind(draft.end_time)
        .bind(&draft.location)
        .bind(event_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        info!(event = %event_id, "event updated");
        Ok(Event {
            id: event_id,
            title: draft.title,
            description: draft.description,
            date: draft.date,
            start_time: draft.start_time,
            end_time: draft.end_time,
            location: draft.location,
            admin_id: owner,
        })
    }

    pub async fn delete(&self, admin: &Authorization, event_id: Uuid) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        let Some((owner,)): Option<(Uuid,)> =
            sqlx::query_as("SELECT admin_id FROM events WHERE id=?")
                .bind(event_id)
                .fetch_optional(&mut *tx)
                .await?
        else {
            return Err(AppError::NotFound);
        };
        if owner != admin.user_id {
            return Err(AppError::Forbidden);
        }

        // the event owns its rsvps; both leave in the same transaction
        sqlx::query("DELETE FROM rsvps WHERE event_id=?")
            .bind(event_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM events WHERE id=?")
            .bind(event_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        info!(event = %event_id, "event deleted");
        Ok(())
    }

    pub async fn get(&self, event_id: Uuid) -> AppResult<Event> {
        sqlx::query_as(
            "SELECT id,title,description,date,start_time,end_time,location,admin_id \
             FROM events WHERE id=?",
        )
        .bind(event_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::NotFound)
    }

    /// Upcoming means on or after the reference date. Same-day events keep
    /// their insertion order.
    pub async fn list_upcoming(&self, reference_date: Date) -> AppResult<Vec<Event>> {
        let events = sqlx::query_as(
            "SELECT id,title,description,date,start_time,end_time,location,admin_id \
             FROM events WHERE date >= ? ORDER BY date ASC, rowid ASC",
        )
        .bind(reference_date)
        .fetch_all(&self.pool)
        .await?;
        Ok(events)
    }
}
