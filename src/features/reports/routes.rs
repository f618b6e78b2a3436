use std::sync::Arc;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::features::reports::handlers::{report_handler, ReportState};
use crate::features::reports::services::{ProcessingLogService, ReportService};

/// Protected report routes (auth middleware applied by the caller)
pub fn routes(
    report_service: Arc<ReportService>,
    log_service: Arc<ProcessingLogService>,
) -> Router {
    let state = ReportState {
        report_service,
        log_service,
    };

    Router::new()
        .route(
            "/api/reports",
            post(report_handler::create_report).get(report_handler::list_reports),
        )
        .route("/api/reports/summary", get(report_handler::my_summary))
        .route("/api/reports/statuses", get(report_handler::status_feed))
        .route(
            "/api/reports/{id}",
            get(report_handler::get_report).delete(report_handler::delete_report),
        )
        .route(
            "/api/reports/{id}/logs",
            get(report_handler::list_report_logs),
        )
        .route(
            "/api/reports/{id}/status",
            patch(report_handler::update_report_status),
        )
        .route(
            "/api/reports/{id}/assign",
            post(report_handler::assign_officer),
        )
        .with_state(state)
}

/// Public report routes (no auth)
pub fn public_routes(
    report_service: Arc<ReportService>,
    log_service: Arc<ProcessingLogService>,
) -> Router {
    let state = ReportState {
        report_service,
        log_service,
    };

    Router::new()
        .route("/api/reports/map", get(report_handler::map_markers))
        .with_state(state)
}
