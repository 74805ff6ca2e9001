//! Domain rules for a small event-planning service: accounts with two
//! roles, an event catalog owned by administrators, and an RSVP ledger
//! holding one decision per (user, event) pair. The embedding host owns
//! HTTP, templates, and cookies; it calls these services per request and
//! maps [`AppError`] onto its own responses.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod events;
pub mod reports;
pub mod rsvps;

pub use config::Config;
pub use error::{AppError, AppResult};

use sqlx::SqlitePool;

use auth::Identity;
use events::EventCatalog;
use reports::Reports;
use rsvps::RsvpLedger;

/// All four services over one shared pool, constructed by the host entry
/// point and handed to whatever dispatches requests.
#[derive(Clone)]
pub struct App {
    pub identity: Identity,
    pub events: EventCatalog,
    pub rsvps: RsvpLedger,
    pub reports: Reports,
}

impl App {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            identity: Identity::new(pool.clone()),
            events: EventCatalog::new(pool.clone()),
            rsvps: RsvpLedger::new(pool.clone()),
            reports: Reports::new(pool),
        }
    }
}
