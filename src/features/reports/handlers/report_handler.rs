use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::guards::{RequireAdmin, RequireStaff};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::reports::dtos::{
    AssignOfficerDto, CreateReportDto, LogEntryResponseDto, MapMarkerDto, MapQuery, MySummaryDto,
    ReportListQuery, ReportResponseDto, StatusFeedEntryDto, StatusFeedQuery,
    UpdateReportStatusDto,
};
use crate::features::reports::services::{ProcessingLogService, ReportService};
use crate::shared::types::{ApiResponse, Meta};

/// State for report handlers
#[derive(Clone)]
pub struct ReportState {
    pub report_service: Arc<ReportService>,
    pub log_service: Arc<ProcessingLogService>,
}

/// File a new report
#[utoipa::path(
    post,
    path = "/api/reports",
    request_body = CreateReportDto,
    responses(
        (status = 201, description = "Report filed", body = ApiResponse<ReportResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Access denied")
    ),
    security(("bearer_auth" = [])),
    tag = "reports"
)]
pub async fn create_report(
    user: AuthenticatedUser,
    State(state): State<ReportState>,
    AppJson(dto): AppJson<CreateReportDto>,
) -> Result<Json<ApiResponse<ReportResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let report = state.report_service.create(&user, dto).await?;
    Ok(Json(ApiResponse::success(Some(report.into()), None, None)))
}

/// List reports with optional filters (citizens see their own)
#[utoipa::path(
    get,
    path = "/api/reports",
    params(ReportListQuery),
    responses(
        (status = 200, description = "Page of reports", body = ApiResponse<Vec<ReportResponseDto>>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "reports"
)]
pub async fn list_reports(
    user: AuthenticatedUser,
    State(state): State<ReportState>,
    Query(query): Query<ReportListQuery>,
) -> Result<Json<ApiResponse<Vec<ReportResponseDto>>>> {
    let (reports, total) = state.report_service.list(&user, &query).await?;
    let dtos: Vec<ReportResponseDto> = reports.into_iter().map(|r| r.into()).collect();
    Ok(Json(ApiResponse::success(
        Some(dtos),
        None,
        Some(Meta { total }),
    )))
}

/// Per-citizen dashboard summary
#[utoipa::path(
    get,
    path = "/api/reports/summary",
    responses(
        (status = 200, description = "Counts and recent reports", body = ApiResponse<MySummaryDto>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "reports"
)]
pub async fn my_summary(
    user: AuthenticatedUser,
    State(state): State<ReportState>,
) -> Result<Json<ApiResponse<MySummaryDto>>> {
    let summary = state.report_service.my_summary(&user).await?;
    Ok(Json(ApiResponse::success(Some(summary), None, None)))
}

/// Citizen status feed: processing-log entries across the caller's reports
#[utoipa::path(
    get,
    path = "/api/reports/statuses",
    params(StatusFeedQuery),
    responses(
        (status = 200, description = "Status feed entries", body = ApiResponse<Vec<StatusFeedEntryDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Access denied")
    ),
    security(("bearer_auth" = [])),
    tag = "reports"
)]
pub async fn status_feed(
    user: AuthenticatedUser,
    State(state): State<ReportState>,
    Query(query): Query<StatusFeedQuery>,
) -> Result<Json<ApiResponse<Vec<StatusFeedEntryDto>>>> {
    let owner_id = query.user_id.unwrap_or(user.user_id);
    if owner_id != user.user_id && !user.role.can_triage() {
        return Err(AppError::Forbidden);
    }

    let entries = state.log_service.list_for_owner(owner_id).await?;
    let dtos: Vec<StatusFeedEntryDto> = entries.into_iter().map(|e| e.into()).collect();
    Ok(Json(ApiResponse::success(Some(dtos), None, None)))
}

/// Get report by ID
#[utoipa::path(
    get,
    path = "/api/reports/{id}",
    params(
        ("id" = i64, Path, description = "Report ID")
    ),
    responses(
        (status = 200, description = "Report found", body = ApiResponse<ReportResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Access denied"),
        (status = 404, description = "Report not found")
    ),
    security(("bearer_auth" = [])),
    tag = "reports"
)]
pub async fn get_report(
    user: AuthenticatedUser,
    State(state): State<ReportState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<ReportResponseDto>>> {
    let report = state.report_service.get(id, &user).await?;
    Ok(Json(ApiResponse::success(Some(report.into()), None, None)))
}

/// Processing log for one report, newest first
#[utoipa::path(
    get,
    path = "/api/reports/{id}/logs",
    params(
        ("id" = i64, Path, description = "Report ID")
    ),
    responses(
        (status = 200, description = "Log entries", body = ApiResponse<Vec<LogEntryResponseDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Access denied"),
        (status = 404, description = "Report not found")
    ),
    security(("bearer_auth" = [])),
    tag = "reports"
)]
pub async fn list_report_logs(
    user: AuthenticatedUser,
    State(state): State<ReportState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Vec<LogEntryResponseDto>>>> {
    // Resolves visibility (owner or triage role) and 404s first
    state.report_service.get(id, &user).await?;

    let entries = state.log_service.list_for_report(id).await?;
    let dtos: Vec<LogEntryResponseDto> = entries.into_iter().map(|e| e.into()).collect();
    Ok(Json(ApiResponse::success(Some(dtos), None, None)))
}

/// Update report status and/or severity (staff/admin)
#[utoipa::path(
    patch,
    path = "/api/reports/{id}/status",
    params(
        ("id" = i64, Path, description = "Report ID")
    ),
    request_body = UpdateReportStatusDto,
    responses(
        (status = 200, description = "Report updated", body = ApiResponse<ReportResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Access denied"),
        (status = 404, description = "Report not found")
    ),
    security(("bearer_auth" = [])),
    tag = "reports"
)]
pub async fn update_report_status(
    RequireStaff(user): RequireStaff,
    State(state): State<ReportState>,
    Path(id): Path<i64>,
    AppJson(dto): AppJson<UpdateReportStatusDto>,
) -> Result<Json<ApiResponse<ReportResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let (report, _entry) = state
        .report_service
        .update_status_and_severity(id, dto, &user)
        .await?;
    Ok(Json(ApiResponse::success(Some(report.into()), None, None)))
}

/// Assign an officer to a report (staff/admin)
#[utoipa::path(
    post,
    path = "/api/reports/{id}/assign",
    params(
        ("id" = i64, Path, description = "Report ID")
    ),
    request_body = AssignOfficerDto,
    responses(
        (status = 200, description = "Officer assigned", body = ApiResponse<ReportResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Access denied"),
        (status = 404, description = "Report or officer not found")
    ),
    security(("bearer_auth" = [])),
    tag = "reports"
)]
pub async fn assign_officer(
    RequireStaff(user): RequireStaff,
    State(state): State<ReportState>,
    Path(id): Path<i64>,
    AppJson(dto): AppJson<AssignOfficerDto>,
) -> Result<Json<ApiResponse<ReportResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let (report, _entry) = state.report_service.assign_officer(id, dto, &user).await?;
    Ok(Json(ApiResponse::success(Some(report.into()), None, None)))
}

/// Delete a report and its dependent rows (admin)
#[utoipa::path(
    delete,
    path = "/api/reports/{id}",
    params(
        ("id" = i64, Path, description = "Report ID")
    ),
    responses(
        (status = 200, description = "Report deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Access denied"),
        (status = 404, description = "Report not found")
    ),
    security(("bearer_auth" = [])),
    tag = "reports"
)]
pub async fn delete_report(
    RequireAdmin(user): RequireAdmin,
    State(state): State<ReportState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>> {
    state.report_service.delete(id, &user).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Report deleted".to_string()),
        None,
    )))
}

/// Public map markers
#[utoipa::path(
    get,
    path = "/api/reports/map",
    params(MapQuery),
    responses(
        (status = 200, description = "Map markers", body = ApiResponse<Vec<MapMarkerDto>>)
    ),
    tag = "reports"
)]
pub async fn map_markers(
    State(state): State<ReportState>,
    Query(query): Query<MapQuery>,
) -> Result<Json<ApiResponse<Vec<MapMarkerDto>>>> {
    let markers = state.report_service.map_markers(query.status).await?;
    Ok(Json(ApiResponse::success(Some(markers), None, None)))
}
