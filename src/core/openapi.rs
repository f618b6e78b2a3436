use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::auth;
use crate::features::notifications::{
    dtos as notifications_dtos, handlers as notifications_handlers,
};
use crate::features::reports::{
    dtos as reports_dtos, handlers as reports_handlers, models as reports_models,
};
use crate::features::statistics::{
    dtos as statistics_dtos, handlers as statistics_handlers,
};
use crate::features::users::{dtos as users_dtos, handlers as users_handlers};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Reports
        reports_handlers::report_handler::create_report,
        reports_handlers::report_handler::list_reports,
        reports_handlers::report_handler::my_summary,
        reports_handlers::report_handler::status_feed,
        reports_handlers::report_handler::get_report,
        reports_handlers::report_handler::list_report_logs,
        reports_handlers::report_handler::update_report_status,
        reports_handlers::report_handler::assign_officer,
        reports_handlers::report_handler::delete_report,
        reports_handlers::report_handler::map_markers,
        // Notifications
        notifications_handlers::notification_handler::list_notifications,
        notifications_handlers::notification_handler::mark_read,
        notifications_handlers::notification_handler::mark_all_read,
        // Statistics (admin)
        statistics_handlers::statistics_handler::get_statistics,
        // Users (admin)
        users_handlers::user_handler::list_users,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Auth
            auth::model::Role,
            auth::model::AuthenticatedUser,
            // Reports
            reports_models::ReportStatus,
            reports_models::IssueType,
            reports_dtos::CreateReportDto,
            reports_dtos::UpdateReportStatusDto,
            reports_dtos::AssignOfficerDto,
            reports_dtos::ReportResponseDto,
            reports_dtos::MySummaryDto,
            reports_dtos::MapMarkerDto,
            reports_dtos::LogEntryResponseDto,
            reports_dtos::StatusFeedEntryDto,
            ApiResponse<reports_dtos::ReportResponseDto>,
            ApiResponse<Vec<reports_dtos::ReportResponseDto>>,
            ApiResponse<reports_dtos::MySummaryDto>,
            ApiResponse<Vec<reports_dtos::MapMarkerDto>>,
            ApiResponse<Vec<reports_dtos::LogEntryResponseDto>>,
            ApiResponse<Vec<reports_dtos::StatusFeedEntryDto>>,
            // Notifications
            notifications_dtos::NotificationReadFilter,
            notifications_dtos::MarkReadDto,
            notifications_dtos::NotificationResponseDto,
            ApiResponse<notifications_dtos::NotificationResponseDto>,
            ApiResponse<Vec<notifications_dtos::NotificationResponseDto>>,
            // Statistics
            statistics_dtos::StatusCountDto,
            statistics_dtos::TypeCountDto,
            statistics_dtos::HotspotCellDto,
            statistics_dtos::TimeSeriesPointDto,
            statistics_dtos::StatisticsSnapshotDto,
            ApiResponse<statistics_dtos::StatisticsSnapshotDto>,
            // Users
            users_dtos::UserResponseDto,
            ApiResponse<Vec<users_dtos::UserResponseDto>>,
        )
    ),
    tags(
        (name = "reports", description = "Citizen incident reports and their processing log"),
        (name = "notifications", description = "Status-change notifications"),
        (name = "statistics", description = "Aggregate dashboard (admin only)"),
        (name = "users", description = "Account directory (admin only)"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "CityVoice API",
        version = "0.1.0",
        description = "Municipal incident reporting API",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
