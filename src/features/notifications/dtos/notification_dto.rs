use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::features::notifications::models::Notification;

/// Read/unread filter for the notification list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum NotificationReadFilter {
    All,
    Unread,
    Read,
}

impl Default for NotificationReadFilter {
    fn default() -> Self {
        NotificationReadFilter::All
    }
}

impl NotificationReadFilter {
    /// Tri-state to an optional `read` predicate
    pub fn as_read_flag(&self) -> Option<bool> {
        match self {
            NotificationReadFilter::All => None,
            NotificationReadFilter::Unread => Some(false),
            NotificationReadFilter::Read => Some(true),
        }
    }
}

/// Query parameters for listing notifications
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct NotificationListQuery {
    #[serde(default)]
    pub filter: NotificationReadFilter,
    /// Admin only; citizens always see their own notifications.
    pub recipient_id: Option<i64>,
}

/// Request DTO for flipping the read flag
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MarkReadDto {
    pub read: bool,
}

/// Response DTO for a notification
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NotificationResponseDto {
    pub id: i64,
    pub recipient_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_id: Option<i64>,
    pub title: String,
    pub body: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Notification> for NotificationResponseDto {
    fn from(n: Notification) -> Self {
        Self {
            id: n.id,
            recipient_id: n.recipient_id,
            report_id: n.report_id,
            title: n.title,
            body: n.body,
            read: n.read,
            created_at: n.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_filter_flags() {
        assert_eq!(NotificationReadFilter::All.as_read_flag(), None);
        assert_eq!(NotificationReadFilter::Unread.as_read_flag(), Some(false));
        assert_eq!(NotificationReadFilter::Read.as_read_flag(), Some(true));
    }
}
