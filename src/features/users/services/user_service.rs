use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::Role;
use crate::features::users::models::User;
use crate::shared::constants::MAX_USER_LISTING;

const USER_COLUMNS: &str = "id, display_name, email, phone, role, created_at";

/// Service for the account directory
pub struct UserService {
    pool: PgPool,
}

impl UserService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List accounts newest-first, optionally filtered by role.
    /// Bounded scan; the directory is a pick-list, not an export.
    pub async fn list(&self, role: Option<Role>) -> Result<Vec<User>> {
        sqlx::query_as::<_, User>(&format!(
            r#"
            SELECT {USER_COLUMNS}
            FROM users
            WHERE ($1::user_role IS NULL OR role = $1)
            ORDER BY created_at DESC
            LIMIT $2
            "#
        ))
        .bind(role)
        .bind(MAX_USER_LISTING)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list users: {:?}", e);
            AppError::Database(e)
        })
    }
}
