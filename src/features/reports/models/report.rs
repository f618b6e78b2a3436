use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;

/// Report lifecycle stage matching database enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "report_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Pending,
    Processing,
    Completed,
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportStatus::Pending => write!(f, "pending"),
            ReportStatus::Processing => write!(f, "processing"),
            ReportStatus::Completed => write!(f, "completed"),
        }
    }
}

/// Incident category matching database enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "issue_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum IssueType {
    Pothole,
    Flooding,
    TrafficLight,
    Waste,
    Congestion,
    Other,
}

impl std::fmt::Display for IssueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IssueType::Pothole => write!(f, "pothole"),
            IssueType::Flooding => write!(f, "flooding"),
            IssueType::TrafficLight => write!(f, "traffic_light"),
            IssueType::Waste => write!(f, "waste"),
            IssueType::Congestion => write!(f, "congestion"),
            IssueType::Other => write!(f, "other"),
        }
    }
}

/// Database model for a citizen incident report.
///
/// `owner_id` and `created_at` are immutable after creation. The `ai_*`
/// columns hold the optional recognizer annotation; advisory only, the
/// citizen-chosen `issue_type` stays authoritative.
#[derive(Debug, Clone, FromRow)]
pub struct Report {
    pub id: i64,
    pub owner_id: i64,
    pub title: String,
    pub description: String,
    pub issue_type: IssueType,
    pub lat: f64,
    pub lng: f64,
    pub image_ref: Option<String>,
    pub severity: i32,
    pub status: ReportStatus,
    pub ai_issue_type: Option<IssueType>,
    pub ai_confidence: Option<f64>,
    pub ai_annotated_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}
