use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};

use crate::core::error::Result;
use crate::features::auth::guards::RequireAdmin;
use crate::features::statistics::dtos::{StatisticsQuery, StatisticsSnapshotDto};
use crate::features::statistics::services::StatisticsService;
use crate::shared::types::ApiResponse;

/// Aggregate dashboard snapshot (admin)
#[utoipa::path(
    get,
    path = "/api/statistics",
    params(StatisticsQuery),
    responses(
        (status = 200, description = "Dashboard snapshot", body = ApiResponse<StatisticsSnapshotDto>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Access denied")
    ),
    security(("bearer_auth" = [])),
    tag = "statistics"
)]
pub async fn get_statistics(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<StatisticsService>>,
    Query(query): Query<StatisticsQuery>,
) -> Result<Json<ApiResponse<StatisticsSnapshotDto>>> {
    let snapshot = service.snapshot(&query).await?;
    Ok(Json(ApiResponse::success(Some(snapshot), None, None)))
}
