use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::features::reports::models::{IssueType, Report, ReportStatus};
use crate::shared::constants::DEFAULT_PAGE_SIZE;
use crate::shared::types::PaginationQuery;

/// Request DTO for filing a report
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateReportDto {
    /// Owner of the report. Defaults to the caller; only admins may set it
    /// to another user.
    pub owner_id: Option<i64>,

    #[validate(length(max = 255, message = "Title must not exceed 255 characters"))]
    pub title: String,

    #[validate(length(max = 5000, message = "Description must not exceed 5000 characters"))]
    pub description: String,

    pub issue_type: IssueType,

    pub lat: f64,
    pub lng: f64,

    /// URL or stored-file path; the raw bytes live in external storage.
    pub image_ref: Option<String>,

    /// 1 (low) to 5 (critical). Defaults to 3 for citizen submissions and
    /// 1 for admin data entry.
    pub severity: Option<i32>,

    /// Advisory recognizer guess, if the client ran one.
    pub ai_issue_type: Option<IssueType>,
    pub ai_confidence: Option<f64>,
}

/// Request DTO for a staff status/severity update
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateReportStatusDto {
    pub status: Option<ReportStatus>,
    pub severity: Option<i32>,
    #[validate(length(max = 5000, message = "Note must not exceed 5000 characters"))]
    pub note: Option<String>,
    pub evidence_image_ref: Option<String>,
}

/// Request DTO for assigning an officer to a report
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct AssignOfficerDto {
    pub officer_id: i64,
    #[validate(length(max = 5000, message = "Note must not exceed 5000 characters"))]
    pub note: Option<String>,
}

/// Response DTO for a report
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReportResponseDto {
    pub id: i64,
    pub owner_id: i64,
    pub title: String,
    pub description: String,
    pub issue_type: IssueType,
    pub lat: f64,
    pub lng: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<String>,
    pub severity: i32,
    pub status: ReportStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_issue_type: Option<IssueType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_confidence: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_annotated_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<Report> for ReportResponseDto {
    fn from(r: Report) -> Self {
        Self {
            id: r.id,
            owner_id: r.owner_id,
            title: r.title,
            description: r.description,
            issue_type: r.issue_type,
            lat: r.lat,
            lng: r.lng,
            image_ref: r.image_ref,
            severity: r.severity,
            status: r.status,
            ai_issue_type: r.ai_issue_type,
            ai_confidence: r.ai_confidence,
            ai_annotated_at: r.ai_annotated_at,
            created_at: r.created_at,
        }
    }
}

/// Query parameters for listing reports
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct ReportListQuery {
    /// Staff/admin only; citizens are always scoped to their own reports.
    pub owner_id: Option<i64>,
    pub status: Option<ReportStatus>,
    pub issue_type: Option<IssueType>,
    pub severity: Option<i32>,
    /// Creation-time range; applied only when both endpoints are given.
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,

    #[serde(default = "default_page")]
    #[param(minimum = 1)]
    pub page: i64,
    #[serde(default = "default_page_size")]
    #[param(minimum = 1, maximum = 100)]
    pub page_size: i64,
}

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

impl ReportListQuery {
    pub fn pagination(&self) -> PaginationQuery {
        PaginationQuery {
            page: self.page,
            page_size: self.page_size,
        }
    }
}

/// Per-citizen dashboard summary
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MySummaryDto {
    pub total: i64,
    pub processing: i64,
    pub completed: i64,
    pub recent: Vec<ReportResponseDto>,
}

/// Query parameters for the public map view
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct MapQuery {
    pub status: Option<ReportStatus>,
}

/// Minimal projection for map markers
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct MapMarkerDto {
    pub id: i64,
    pub title: String,
    pub issue_type: IssueType,
    pub status: ReportStatus,
    pub severity: i32,
    pub lat: f64,
    pub lng: f64,
    pub created_at: DateTime<Utc>,
}
