use sqlx::{PgConnection, PgPool};

use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::notifications::dtos::NotificationReadFilter;
use crate::features::notifications::models::Notification;

const NOTIFICATION_COLUMNS: &str =
    "id, recipient_id, report_id, title, body, read, created_at";

/// Service for citizen notifications
pub struct NotificationService {
    pool: PgPool,
}

impl NotificationService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a notification on an existing connection.
    ///
    /// Called from the report status-change transaction so the notification
    /// commits or rolls back with the status it announces.
    pub async fn enqueue_with(
        conn: &mut PgConnection,
        recipient_id: i64,
        report_id: Option<i64>,
        title: &str,
        body: &str,
    ) -> Result<Notification> {
        let notification = sqlx::query_as::<_, Notification>(&format!(
            r#"
            INSERT INTO notifications (recipient_id, report_id, title, body)
            VALUES ($1, $2, $3, $4)
            RETURNING {NOTIFICATION_COLUMNS}
            "#
        ))
        .bind(recipient_id)
        .bind(report_id)
        .bind(title)
        .bind(body)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| {
            tracing::error!("Failed to enqueue notification: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(notification)
    }

    /// List notifications, newest first.
    ///
    /// Citizens see their own; an admin may pass another recipient.
    pub async fn list(
        &self,
        caller: &AuthenticatedUser,
        recipient_id: Option<i64>,
        filter: NotificationReadFilter,
    ) -> Result<Vec<Notification>> {
        let recipient = recipient_id.unwrap_or(caller.user_id);
        if recipient != caller.user_id && !caller.role.is_admin() {
            return Err(AppError::Forbidden);
        }

        sqlx::query_as::<_, Notification>(&format!(
            r#"
            SELECT {NOTIFICATION_COLUMNS}
            FROM notifications
            WHERE recipient_id = $1
              AND ($2::BOOLEAN IS NULL OR read = $2)
            ORDER BY created_at DESC
            "#
        ))
        .bind(recipient)
        .bind(filter.as_read_flag())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list notifications: {:?}", e);
            AppError::Database(e)
        })
    }

    /// Flip the read flag. Only the recipient or an admin may do this.
    pub async fn mark_read(
        &self,
        caller: &AuthenticatedUser,
        notification_id: i64,
        read: bool,
    ) -> Result<Notification> {
        let notification = sqlx::query_as::<_, Notification>(&format!(
            r#"
            SELECT {NOTIFICATION_COLUMNS}
            FROM notifications
            WHERE id = $1
            "#
        ))
        .bind(notification_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get notification: {:?}", e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound(format!("Notification {} not found", notification_id)))?;

        if notification.recipient_id != caller.user_id && !caller.role.is_admin() {
            return Err(AppError::Forbidden);
        }

        sqlx::query_as::<_, Notification>(&format!(
            r#"
            UPDATE notifications
            SET read = $2
            WHERE id = $1
            RETURNING {NOTIFICATION_COLUMNS}
            "#
        ))
        .bind(notification_id)
        .bind(read)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update notification: {:?}", e);
            AppError::Database(e)
        })
    }

    /// Mark all of the caller's unread notifications as read.
    /// Returns the number of rows updated.
    pub async fn mark_all_read(&self, caller: &AuthenticatedUser) -> Result<i64> {
        let result = sqlx::query(
            r#"
            UPDATE notifications
            SET read = true
            WHERE recipient_id = $1 AND read = false
            "#,
        )
        .bind(caller.user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to mark notifications read: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(result.rows_affected() as i64)
    }
}
