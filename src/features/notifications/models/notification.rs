use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for a notification.
///
/// `report_id` links status-change notifications back to their report so the
/// report-delete cascade can clean them up.
#[derive(Debug, Clone, FromRow)]
pub struct Notification {
    pub id: i64,
    pub recipient_id: i64,
    pub report_id: Option<i64>,
    pub title: String,
    pub body: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}
