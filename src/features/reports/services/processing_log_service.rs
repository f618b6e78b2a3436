use sqlx::{PgConnection, PgPool};

use crate::core::error::{AppError, Result};
use crate::features::reports::models::{
    ProcessingLogEntry, ProcessingLogEntryWithReport, ReportStatus,
};

const LOG_COLUMNS: &str =
    "id, report_id, actor_id, note, status, evidence_image_ref, created_at";

/// Service for the append-only processing log.
///
/// Entries are only ever inserted; there is no update or reorder path. The
/// insert runs on a caller-supplied connection so the report status change
/// and its log entry commit together.
pub struct ProcessingLogService {
    pool: PgPool,
}

impl ProcessingLogService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Append one entry on an existing connection (pure insert).
    pub async fn append_with(
        conn: &mut PgConnection,
        report_id: i64,
        actor_id: Option<i64>,
        note: Option<&str>,
        status: ReportStatus,
        evidence_image_ref: Option<&str>,
    ) -> Result<ProcessingLogEntry> {
        let entry = sqlx::query_as::<_, ProcessingLogEntry>(&format!(
            r#"
            INSERT INTO processing_logs (report_id, actor_id, note, status, evidence_image_ref)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {LOG_COLUMNS}
            "#
        ))
        .bind(report_id)
        .bind(actor_id)
        .bind(note)
        .bind(status)
        .bind(evidence_image_ref)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| {
            tracing::error!("Failed to append processing log entry: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(entry)
    }

    /// List entries for one report, newest first.
    ///
    /// Callers are expected to have resolved report visibility already
    /// (owner or triage role).
    pub async fn list_for_report(&self, report_id: i64) -> Result<Vec<ProcessingLogEntry>> {
        sqlx::query_as::<_, ProcessingLogEntry>(&format!(
            r#"
            SELECT {LOG_COLUMNS}
            FROM processing_logs
            WHERE report_id = $1
            ORDER BY created_at DESC
            "#
        ))
        .bind(report_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list processing log: {:?}", e);
            AppError::Database(e)
        })
    }

    /// Batched fetch across all of one citizen's reports, newest first,
    /// each entry joined with its parent report's title/type and the acting
    /// staff member's display name. Backs the citizen "status" view.
    pub async fn list_for_owner(
        &self,
        owner_id: i64,
    ) -> Result<Vec<ProcessingLogEntryWithReport>> {
        sqlx::query_as::<_, ProcessingLogEntryWithReport>(
            r#"
            SELECT
                l.id, l.report_id,
                r.title AS report_title,
                r.issue_type AS report_issue_type,
                l.actor_id,
                u.display_name AS actor_name,
                l.note, l.status, l.evidence_image_ref, l.created_at
            FROM processing_logs l
            JOIN reports r ON r.id = l.report_id
            LEFT JOIN users u ON u.id = l.actor_id
            WHERE r.owner_id = $1
            ORDER BY l.created_at DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list status feed: {:?}", e);
            AppError::Database(e)
        })
    }
}
