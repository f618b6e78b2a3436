use chrono::{DateTime, Utc};
use sqlx::FromRow;

use super::report::{IssueType, ReportStatus};

/// Database model for one processing-log entry.
///
/// Append-only: rows are inserted by the same transaction that updates the
/// parent report and are never edited or reordered. `status` is the snapshot
/// the report was set to at this step.
#[derive(Debug, Clone, FromRow)]
pub struct ProcessingLogEntry {
    pub id: i64,
    pub report_id: i64,
    pub actor_id: Option<i64>,
    pub note: Option<String>,
    pub status: ReportStatus,
    pub evidence_image_ref: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Log entry joined with its parent report and the acting staff member,
/// used for the citizen status feed.
#[derive(Debug, Clone, FromRow)]
pub struct ProcessingLogEntryWithReport {
    pub id: i64,
    pub report_id: i64,
    pub report_title: String,
    pub report_issue_type: IssueType,
    pub actor_id: Option<i64>,
    pub actor_name: Option<String>,
    pub note: Option<String>,
    pub status: ReportStatus,
    pub evidence_image_ref: Option<String>,
    pub created_at: DateTime<Utc>,
}
