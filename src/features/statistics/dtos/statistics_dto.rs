use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::features::reports::models::{IssueType, ReportStatus};

/// Query parameters for the statistics snapshot
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct StatisticsQuery {
    pub issue_type: Option<IssueType>,
    /// Creation-time range; applied only when both endpoints are given.
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    /// Time-series window in days when no explicit range is given.
    /// Clamped to [1, 180].
    pub window_days: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StatusCountDto {
    pub status: ReportStatus,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TypeCountDto {
    pub issue_type: IssueType,
    pub count: i64,
}

/// One 0.02°-grid cell with its report count
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HotspotCellDto {
    pub lat: f64,
    pub lng: f64,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TimeSeriesPointDto {
    pub date: NaiveDate,
    pub count: i64,
}

/// Full dashboard snapshot
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StatisticsSnapshotDto {
    pub total_reports: i64,
    pub total_users: i64,
    pub total_staff: i64,
    pub status_breakdown: Vec<StatusCountDto>,
    pub type_breakdown: Vec<TypeCountDto>,
    pub hotspots: Vec<HotspotCellDto>,
    /// Mean creation-to-completion time in milliseconds; absent when no
    /// completed report has a qualifying log entry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_resolution_ms: Option<i64>,
    pub time_series: Vec<TimeSeriesPointDto>,
}
