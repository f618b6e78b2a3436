use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::features::reports::models::{
    IssueType, ProcessingLogEntry, ProcessingLogEntryWithReport, ReportStatus,
};

/// Response DTO for a processing-log entry
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LogEntryResponseDto {
    pub id: i64,
    pub report_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub status: ReportStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evidence_image_ref: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<ProcessingLogEntry> for LogEntryResponseDto {
    fn from(e: ProcessingLogEntry) -> Self {
        Self {
            id: e.id,
            report_id: e.report_id,
            actor_id: e.actor_id,
            note: e.note,
            status: e.status,
            evidence_image_ref: e.evidence_image_ref,
            created_at: e.created_at,
        }
    }
}

/// Response DTO for the citizen status feed: each log entry joined back to
/// its parent report's title and type for display.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StatusFeedEntryDto {
    pub id: i64,
    pub report_id: i64,
    pub report_title: String,
    pub report_issue_type: IssueType,
    pub status: ReportStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evidence_image_ref: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<ProcessingLogEntryWithReport> for StatusFeedEntryDto {
    fn from(e: ProcessingLogEntryWithReport) -> Self {
        Self {
            id: e.id,
            report_id: e.report_id,
            report_title: e.report_title,
            report_issue_type: e.report_issue_type,
            status: e.status,
            note: e.note,
            evidence_image_ref: e.evidence_image_ref,
            actor_id: e.actor_id,
            actor_name: e.actor_name,
            created_at: e.created_at,
        }
    }
}

/// Query parameters for the status feed
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct StatusFeedQuery {
    /// Staff/admin only; citizens always see their own feed.
    pub user_id: Option<i64>,
}
