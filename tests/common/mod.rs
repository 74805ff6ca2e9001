#![allow(dead_code)]

use gatherly::auth::{self, Authorization, Role, Session, User};
use gatherly::events::EventDraft;
use gatherly::{App, db};
use time::Date;
use time::macros::{date, time};

/// Fixed reference date; every date in the suite is relative to it.
pub const TODAY: Date = date!(2031 - 05 - 10);

pub async fn app() -> App {
    // a second connection would see a fresh, empty in-memory database
    let pool = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    db::ensure_schema(&pool).await.unwrap();
    App::new(pool)
}

pub async fn user(app: &App, email: &str) -> User {
    app.identity
        .register(email, "secret1", Role::User)
        .await
        .unwrap()
}

pub async fn admin(app: &App, email: &str) -> Authorization {
    let user = app
        .identity
        .register(email, "secret2", Role::Admin)
        .await
        .unwrap();
    auth::require_role(&Session { user }, Role::Admin).unwrap()
}

pub fn draft(title: &str, date: Date) -> EventDraft {
    EventDraft {
        title: title.to_owned(),
        description: "An evening get-together.".to_owned(),
        date,
        start_time: time!(18:00),
        end_time: Some(time!(21:00)),
        location: "Main hall".to_owned(),
    }
}
