//! Repository for the `users` and `profiles` tables.

use gestion_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::{CreateUser, Profile, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, username, email, password_hash, is_active, created_at";

/// Profile column list.
const PROFILE_COLUMNS: &str = "id, user_id, role";

/// Provides operations for users and their profiles.
pub struct UserRepo;

impl UserRepo {
    /// Insert a user and its profile in one transaction.
    ///
    /// This is the only way users are created, so every user row has exactly
    /// one profile from the moment it becomes visible.
    pub async fn create_with_profile(
        pool: &PgPool,
        input: &CreateUser,
    ) -> Result<(User, Profile), sqlx::Error> {
        let mut tx = pool.begin().await?;

        let user_query = format!(
            "INSERT INTO users (username, email, password_hash)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        let user = sqlx::query_as::<_, User>(&user_query)
            .bind(&input.username)
            .bind(&input.email)
            .bind(&input.password_hash)
            .fetch_one(&mut *tx)
            .await?;

        let profile_query = format!(
            "INSERT INTO profiles (user_id, role)
             VALUES ($1, $2)
             RETURNING {PROFILE_COLUMNS}"
        );
        let profile = sqlx::query_as::<_, Profile>(&profile_query)
            .bind(user.id)
            .bind(input.role.as_str())
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::debug!(user_id = user.id, role = %profile.role, "Created user with profile");
        Ok((user, profile))
    }

    /// Find a user by username (case-sensitive).
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE username = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// Load the profile belonging to a user.
    pub async fn find_profile(pool: &PgPool, user_id: DbId) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!("SELECT {PROFILE_COLUMNS} FROM profiles WHERE user_id = $1");
        sqlx::query_as::<_, Profile>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Load the profile of a user only while that user is active.
    ///
    /// `None` covers both a missing user and a deactivated one; callers
    /// authenticating a token treat the two the same way.
    pub async fn find_active_profile(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<Profile>, sqlx::Error> {
        sqlx::query_as::<_, Profile>(
            "SELECT p.id, p.user_id, p.role
             FROM profiles p
             JOIN users u ON u.id = p.user_id
             WHERE p.user_id = $1 AND u.is_active",
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await
    }
}
