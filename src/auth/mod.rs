pub mod password;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::info;
use uuid::Uuid;

use crate::{AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
pub enum Role {
    User,
    Admin,
}

impl FromStr for Role {
    type Err = AppError;

    // portal strings as the login forms submit them; an unknown portal
    // falls through to the same mismatch the wrong portal would
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            _ => Err(AppError::RoleMismatch),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "User"),
            Role::Admin => write!(f, "Admin"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow, Serialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
}

/// Issued by `authenticate`; the host keeps it for the cookie's lifetime
/// and hands it back with each request.
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub user: User,
}

/// Proof that `require_role` has run. Role-gated operations take this
/// instead of re-deriving the caller's role themselves.
#[derive(Debug, Clone, Copy)]
pub struct Authorization {
    pub user_id: Uuid,
    pub role: Role,
}

pub fn require_role(session: &Session, role: Role) -> AppResult<Authorization> {
    if session.user.role != role {
        return Err(AppError::Forbidden);
    }
    Ok(Authorization {
        user_id: session.user.id,
        role,
    })
}

#[derive(Clone)]
pub struct Identity {
    pool: SqlitePool,
}

impl Identity {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Stores only the salted hash; the raw password is dropped here.
    pub async fn register(&self, email: &str, password: &str, role: Role) -> AppResult<User> {
        let user = User {
            id: Uuid::now_v7(),
            email: email.to_owned(),
            password_hash: password::hash(password),
            role,
        };

        sqlx::query("INSERT INTO users (id,email,password_hash,role) VALUES (?,?,?,?)")
            .bind(user.id)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.role)
            .execute(&self.pool)
            .await
            .map_err(|e| match AppError::from_insert(e) {
                AppError::Conflict => AppError::DuplicateEmail,
                other => other,
            })?;

        info!(%user.email, role = %user.role, "account registered");
        Ok(user)
    }

    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
        claimed_role: Role,
    ) -> AppResult<Session> {
        let user: Option<User> =
            sqlx::query_as("SELECT id,email,password_hash,role FROM users WHERE email=?")
                .bind(email)
                .fetch_optional(&self.pool)
                .await?;

        let Some(user) = user else {
            return Err(AppError::InvalidCredentials);
        };

        if !password::verify(password, &user.password_hash) {
            return Err(AppError::InvalidCredentials);
        }

        // valid credentials still have to come in through the right portal
        if user.role != claimed_role {
            return Err(AppError::RoleMismatch);
        }

        info!(%user.email, role = %user.role, "login successful");
        Ok(Session { user })
    }

    /// The host session layer's user loader: it stores the id in the
    /// cookie and reloads the account per request.
    pub async fn find_user(&self, id: Uuid) -> AppResult<Option<User>> {
        let user = sqlx::query_as("SELECT id,email,password_hash,role FROM users WHERE id=?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }
}
