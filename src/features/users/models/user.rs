use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::features::auth::model::Role;

/// Database model for a user account
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub display_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}
