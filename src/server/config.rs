/**
 * Server Configuration
 *
 * This module handles loading of server configuration from environment
 * variables, with sensible defaults for local development.
 *
 * # Configuration Sources
 *
 * - `DATABASE_URL` - relational store connection string; defaults to an
 *   embedded SQLite file created on first use
 * - `SECRET_KEY` / `ALGORITHM` / `ACCESS_TOKEN_EXPIRE_MINUTES` - local
 *   signed-token scheme
 *
 * Missing optional values are logged and replaced with defaults; the
 * database itself is required and connection failures abort startup.
 */

use std::str::FromStr;

use jsonwebtoken::Algorithm;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

/// Connection string used when `DATABASE_URL` is absent
pub const DEFAULT_DATABASE_URL: &str = "sqlite:resrv.db";

const DEFAULT_TOKEN_EXPIRE_MINUTES: u64 = 60;

/// Configuration for the locally-issued signed tokens
#[derive(Clone, Debug)]
pub struct TokenConfig {
    /// Signing secret
    pub secret: String,
    /// Signing algorithm (HMAC family)
    pub algorithm: Algorithm,
    /// Token lifetime in minutes
    pub expire_minutes: u64,
}

impl TokenConfig {
    /// Load token configuration from the environment
    ///
    /// Falls back to an insecure default secret (with a warning), HS256,
    /// and a 60-minute expiry when variables are absent or malformed.
    pub fn from_env() -> Self {
        let secret = std::env::var("SECRET_KEY").unwrap_or_else(|_| {
            tracing::warn!("SECRET_KEY not set, using insecure default");
            "change_me".to_string()
        });

        let algorithm = match std::env::var("ALGORITHM").as_deref() {
            Ok("HS256") | Err(_) => Algorithm::HS256,
            Ok("HS384") => Algorithm::HS384,
            Ok("HS512") => Algorithm::HS512,
            Ok(other) => {
                tracing::warn!("Unsupported ALGORITHM {:?}, falling back to HS256", other);
                Algorithm::HS256
            }
        };

        let expire_minutes = std::env::var("ACCESS_TOKEN_EXPIRE_MINUTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TOKEN_EXPIRE_MINUTES);

        Self {
            secret,
            algorithm,
            expire_minutes,
        }
    }
}

/// Create the database connection pool and run migrations
///
/// Reads `DATABASE_URL` from the environment; when absent, an embedded
/// SQLite file is used and created if missing.
///
/// # Errors
///
/// Returns an error if the pool cannot be created or migrations fail.
pub async fn load_database() -> Result<SqlitePool, sqlx::Error> {
    let database_url = std::env::var("DATABASE_URL").unwrap_or_else(|_| {
        tracing::warn!(
            "DATABASE_URL not set, using embedded store at {}",
            DEFAULT_DATABASE_URL
        );
        DEFAULT_DATABASE_URL.to_string()
    });

    tracing::info!("Connecting to database...");

    let options = SqliteConnectOptions::from_str(&database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new().connect_with(options).await?;

    tracing::info!("Running database migrations...");
    sqlx::migrate!()
        .run(&pool)
        .await
        .map_err(|e| sqlx::Error::Migrate(Box::new(e)))?;

    tracing::info!("Database ready");
    Ok(pool)
}
