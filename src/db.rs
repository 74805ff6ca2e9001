use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::AppResult;

// unique: users.email
// unique: rsvps (user_id, event_id)
// rsvps live and die with their event
const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id            BLOB PRIMARY KEY,
    email         TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    role          TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS events (
    id          BLOB PRIMARY KEY,
    title       TEXT NOT NULL,
    description TEXT NOT NULL,
    date        TEXT NOT NULL,
    start_time  TEXT NOT NULL,
    end_time    TEXT,
    location    TEXT NOT NULL,
    admin_id    BLOB NOT NULL REFERENCES users(id)
);

CREATE TABLE IF NOT EXISTS rsvps (
    id       BLOB PRIMARY KEY,
    user_id  BLOB NOT NULL REFERENCES users(id),
    event_id BLOB NOT NULL REFERENCES events(id) ON DELETE CASCADE,
    status   TEXT NOT NULL,
    UNIQUE (user_id, event_id)
);
"#;

pub async fn connect(database_url: &str) -> AppResult<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(16)
        .connect_with(options)
        .await?;

    Ok(pool)
}

/// Idempotent; safe to run on every startup.
pub async fn ensure_schema(pool: &SqlitePool) -> AppResult<()> {
    sqlx::raw_sql(SCHEMA).execute(pool).await?;
    Ok(())
}
