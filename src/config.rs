use tracing::warn;

/// Read once by the host at process start; never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    /// Signing key for the host's session layer. Carried here so the whole
    /// environment is read in one place; this crate never signs anything.
    pub secret_key: String,
}

impl Config {
    pub fn from_env() -> Config {
        Config {
            database_url: dotenv::var("DATABASE_URL").unwrap_or_else(|_| {
                warn!("DATABASE_URL not set, using local file database");
                "sqlite:gatherly.db".to_owned()
            }),
            secret_key: dotenv::var("SECRET_KEY").unwrap_or_else(|_| {
                warn!("SECRET_KEY not set, using fallback dev key");
                "dev-only-fallback-key".to_owned()
            }),
        }
    }
}
