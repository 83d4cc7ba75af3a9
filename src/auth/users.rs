/**
 * User Model and Database Operations
 *
 * This module handles user data and database operations.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

/// User struct representing a user in the database
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (autoincrement)
    pub id: i64,
    /// Display name
    pub name: String,
    /// User email address (unique)
    pub email: String,
    /// Hashed password (bcrypt); None for externally-provisioned accounts
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    /// External identity reference (unique); None for local-only accounts
    pub provider_uid: Option<String>,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
}

/// Create a new user
///
/// # Arguments
/// * `pool` - Database connection pool
/// * `name` - Display name
/// * `email` - User email
/// * `password_hash` - Hashed password, absent for external identities
/// * `provider_uid` - External identity reference, absent for local accounts
///
/// # Returns
/// Created user or error
pub async fn create_user(
    pool: &SqlitePool,
    name: &str,
    email: &str,
    password_hash: Option<String>,
    provider_uid: Option<String>,
) -> Result<User, sqlx::Error> {
    let now = Utc::now();

    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (name, email, password_hash, provider_uid, created_at)
        VALUES (?, ?, ?, ?, ?)
        RETURNING id, name, email, password_hash, provider_uid, created_at
        "#,
    )
    .bind(name)
    .bind(email)
    .bind(password_hash)
    .bind(provider_uid)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(user)
}

/// Get user by email, or None if not found
pub async fn get_user_by_email(
    pool: &SqlitePool,
    email: &str,
) -> Result<Option<User>, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, name, email, password_hash, provider_uid, created_at
        FROM users
        WHERE email = ?
        "#,
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Get user by ID, or None if not found
pub async fn get_user_by_id(pool: &SqlitePool, id: i64) -> Result<Option<User>, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, name, email, password_hash, provider_uid, created_at
        FROM users
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Get user by external identity reference, or None if not found
pub async fn get_user_by_provider_uid(
    pool: &SqlitePool,
    provider_uid: &str,
) -> Result<Option<User>, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, name, email, password_hash, provider_uid, created_at
        FROM users
        WHERE provider_uid = ?
        "#,
    )
    .bind(provider_uid)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Attach an external identity reference to an existing user
///
/// Used for account linking when a verified external identity shares an
/// email with a pre-existing local-only account.
pub async fn link_provider_uid(
    pool: &SqlitePool,
    user_id: i64,
    provider_uid: &str,
) -> Result<User, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(
        r#"
        UPDATE users
        SET provider_uid = ?
        WHERE id = ?
        RETURNING id, name, email, password_hash, provider_uid, created_at
        "#,
    )
    .bind(provider_uid)
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    Ok(user)
}
