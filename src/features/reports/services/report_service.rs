use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::{AuthenticatedUser, Role};
use crate::features::notifications::NotificationService;
use crate::features::reports::dtos::{
    AssignOfficerDto, CreateReportDto, MapMarkerDto, MySummaryDto, ReportListQuery,
    UpdateReportStatusDto,
};
use crate::features::reports::models::{ProcessingLogEntry, Report, ReportStatus};
use crate::features::reports::services::ProcessingLogService;
use crate::shared::validation::IMAGE_REF_REGEX;

const REPORT_COLUMNS: &str = "id, owner_id, title, description, issue_type, lat, lng, \
     image_ref, severity, status, ai_issue_type, ai_confidence, ai_annotated_at, created_at";

/// Severity a citizen submission defaults to when none is given
const DEFAULT_CITIZEN_SEVERITY: i32 = 3;

/// Severity an admin data-entry submission defaults to when none is given
const DEFAULT_ADMIN_SEVERITY: i32 = 1;

/// Upper bound on the public map marker scan
const MAP_MARKER_CAP: i64 = 5000;

/// Service for report lifecycle operations
pub struct ReportService {
    pool: PgPool,
}

impl ReportService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// File a new report. Status is always forced to `pending`.
    ///
    /// The owner defaults to the caller; naming another owner requires
    /// admin. Rejects titles under 5 characters, descriptions under 10,
    /// and the 0-coordinate "no location" sentinel on either axis.
    pub async fn create(
        &self,
        caller: &AuthenticatedUser,
        dto: CreateReportDto,
    ) -> Result<Report> {
        let owner_id = dto.owner_id.unwrap_or(caller.user_id);
        if owner_id != caller.user_id && !caller.role.is_admin() {
            return Err(AppError::Forbidden);
        }

        let (title, description) = validate_submission(&dto)?;

        let default_severity = if caller.role.is_admin() {
            DEFAULT_ADMIN_SEVERITY
        } else {
            DEFAULT_CITIZEN_SEVERITY
        };
        let severity = dto.severity.unwrap_or(default_severity).clamp(1, 5);

        let owner_exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM users WHERE id = $1)",
        )
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to check report owner: {:?}", e);
            AppError::Database(e)
        })?;
        if !owner_exists {
            return Err(AppError::NotFound(format!("User {} not found", owner_id)));
        }

        // Annotation is advisory; a confidence without a guess is dropped
        let (ai_issue_type, ai_confidence, ai_annotated_at) = match dto.ai_issue_type {
            Some(guess) => (Some(guess), dto.ai_confidence, Some(Utc::now())),
            None => (None, None, None),
        };

        let report = sqlx::query_as::<_, Report>(&format!(
            r#"
            INSERT INTO reports
                (owner_id, title, description, issue_type, lat, lng, image_ref,
                 severity, status, ai_issue_type, ai_confidence, ai_annotated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 'pending', $9, $10, $11)
            RETURNING {REPORT_COLUMNS}
            "#
        ))
        .bind(owner_id)
        .bind(title)
        .bind(description)
        .bind(dto.issue_type)
        .bind(dto.lat)
        .bind(dto.lng)
        .bind(dto.image_ref.as_deref())
        .bind(severity)
        .bind(ai_issue_type)
        .bind(ai_confidence)
        .bind(ai_annotated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create report: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!(
            "Created report {} (owner: {}, type: {})",
            report.id,
            report.owner_id,
            report.issue_type
        );

        Ok(report)
    }

    /// Get a report. Visible to the owner and to triage roles only.
    pub async fn get(&self, report_id: i64, caller: &AuthenticatedUser) -> Result<Report> {
        let report = sqlx::query_as::<_, Report>(&format!(
            r#"
            SELECT {REPORT_COLUMNS}
            FROM reports
            WHERE id = $1
            "#
        ))
        .bind(report_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get report: {:?}", e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound(format!("Report {} not found", report_id)))?;

        if !caller.can_view_report_of(report.owner_id) {
            return Err(AppError::Forbidden);
        }

        Ok(report)
    }

    /// List reports newest-first with optional filters.
    /// Returns (reports, total_count).
    ///
    /// A citizen caller is implicitly pinned to their own reports; the
    /// date-range filter applies only when both endpoints are given.
    pub async fn list(
        &self,
        caller: &AuthenticatedUser,
        query: &ReportListQuery,
    ) -> Result<(Vec<Report>, i64)> {
        let owner_filter = if caller.role.can_triage() {
            query.owner_id
        } else {
            Some(caller.user_id)
        };
        let (from, to) = normalized_range(query.from, query.to);
        let pagination = query.pagination();

        let filter_sql = r#"
              ($1::BIGINT IS NULL OR owner_id = $1)
              AND ($2::report_status IS NULL OR status = $2)
              AND ($3::issue_type IS NULL OR issue_type = $3)
              AND ($4::INT IS NULL OR severity = $4)
              AND ($5::TIMESTAMPTZ IS NULL OR created_at >= $5)
              AND ($6::TIMESTAMPTZ IS NULL OR created_at <= $6)
        "#;

        let total = sqlx::query_scalar::<_, i64>(&format!(
            "SELECT COUNT(*) FROM reports WHERE {filter_sql}"
        ))
        .bind(owner_filter)
        .bind(query.status)
        .bind(query.issue_type)
        .bind(query.severity)
        .bind(from)
        .bind(to)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to count reports: {:?}", e);
            AppError::Database(e)
        })?;

        let reports = sqlx::query_as::<_, Report>(&format!(
            r#"
            SELECT {REPORT_COLUMNS}
            FROM reports
            WHERE {filter_sql}
            ORDER BY created_at DESC
            OFFSET $7 LIMIT $8
            "#
        ))
        .bind(owner_filter)
        .bind(query.status)
        .bind(query.issue_type)
        .bind(query.severity)
        .bind(from)
        .bind(to)
        .bind(pagination.offset())
        .bind(pagination.limit())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list reports: {:?}", e);
            AppError::Database(e)
        })?;

        Ok((reports, total))
    }

    /// Staff status/severity update.
    ///
    /// When a status, note or evidence image is supplied the matching
    /// processing-log entry is appended in the same transaction; a status
    /// change also notifies the owner within that transaction.
    pub async fn update_status_and_severity(
        &self,
        report_id: i64,
        dto: UpdateReportStatusDto,
        actor: &AuthenticatedUser,
    ) -> Result<(Report, Option<ProcessingLogEntry>)> {
        if !actor.role.can_triage() {
            return Err(AppError::Forbidden);
        }

        if dto.status.is_none()
            && dto.severity.is_none()
            && dto.note.is_none()
            && dto.evidence_image_ref.is_none()
        {
            return Err(AppError::BadRequest(
                "Nothing to update: supply a status, severity, note or evidence image"
                    .to_string(),
            ));
        }

        let severity = dto.severity.map(|s| s.clamp(1, 5));

        self.apply_transition(
            report_id,
            dto.status,
            severity,
            dto.note.as_deref(),
            dto.evidence_image_ref.as_deref(),
            actor.user_id,
        )
        .await
    }

    /// Explicit officer assignment: moves the report to `processing` through
    /// the same transactional update path, attributing the log entry to the
    /// assigned officer.
    pub async fn assign_officer(
        &self,
        report_id: i64,
        dto: AssignOfficerDto,
        actor: &AuthenticatedUser,
    ) -> Result<(Report, Option<ProcessingLogEntry>)> {
        if !actor.role.can_triage() {
            return Err(AppError::Forbidden);
        }

        let officer_role = sqlx::query_scalar::<_, Role>("SELECT role FROM users WHERE id = $1")
            .bind(dto.officer_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to look up officer: {:?}", e);
                AppError::Database(e)
            })?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", dto.officer_id)))?;

        if !officer_role.can_triage() {
            return Err(AppError::Validation(
                "Assigned officer must hold a staff role".to_string(),
            ));
        }

        self.apply_transition(
            report_id,
            Some(ReportStatus::Processing),
            None,
            dto.note.as_deref(),
            None,
            dto.officer_id,
        )
        .await
    }

    /// Delete a report and its dependent rows. Admin only.
    pub async fn delete(&self, report_id: i64, caller: &AuthenticatedUser) -> Result<()> {
        if !caller.role.is_admin() {
            return Err(AppError::Forbidden);
        }

        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        // Dependent rows go first (referential cleanup before the parent)
        sqlx::query("DELETE FROM notifications WHERE report_id = $1")
            .bind(report_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete report notifications: {:?}", e);
                AppError::Database(e)
            })?;

        sqlx::query("DELETE FROM processing_logs WHERE report_id = $1")
            .bind(report_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete processing log: {:?}", e);
                AppError::Database(e)
            })?;

        let result = sqlx::query("DELETE FROM reports WHERE id = $1")
            .bind(report_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete report: {:?}", e);
                AppError::Database(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Report {} not found",
                report_id
            )));
        }

        tx.commit().await.map_err(AppError::Database)?;

        tracing::info!("Deleted report {} and dependent rows", report_id);
        Ok(())
    }

    /// Per-citizen dashboard counts and the five most recent reports.
    pub async fn my_summary(&self, caller: &AuthenticatedUser) -> Result<MySummaryDto> {
        let (total, processing, completed) = sqlx::query_as::<_, (i64, i64, i64)>(
            r#"
            SELECT
                COUNT(*),
                COUNT(*) FILTER (WHERE status = 'processing'),
                COUNT(*) FILTER (WHERE status = 'completed')
            FROM reports
            WHERE owner_id = $1
            "#,
        )
        .bind(caller.user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get report summary: {:?}", e);
            AppError::Database(e)
        })?;

        let recent = sqlx::query_as::<_, Report>(&format!(
            r#"
            SELECT {REPORT_COLUMNS}
            FROM reports
            WHERE owner_id = $1
            ORDER BY created_at DESC
            LIMIT 5
            "#
        ))
        .bind(caller.user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get recent reports: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(MySummaryDto {
            total,
            processing,
            completed,
            recent: recent.into_iter().map(Into::into).collect(),
        })
    }

    /// Public map markers, newest first, bounded scan.
    pub async fn map_markers(&self, status: Option<ReportStatus>) -> Result<Vec<MapMarkerDto>> {
        sqlx::query_as::<_, MapMarkerDto>(
            r#"
            SELECT id, title, issue_type, status, severity, lat, lng, created_at
            FROM reports
            WHERE ($1::report_status IS NULL OR status = $1)
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(status)
        .bind(MAP_MARKER_CAP)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list map markers: {:?}", e);
            AppError::Database(e)
        })
    }

    /// The single transactional update path behind status changes.
    ///
    /// Report row, processing-log entry and owner notification commit
    /// together or not at all; a concurrent reader can never observe one
    /// without the others.
    async fn apply_transition(
        &self,
        report_id: i64,
        new_status: Option<ReportStatus>,
        new_severity: Option<i32>,
        note: Option<&str>,
        evidence_image_ref: Option<&str>,
        log_actor_id: i64,
    ) -> Result<(Report, Option<ProcessingLogEntry>)> {
        if let Some(evidence) = evidence_image_ref {
            if !IMAGE_REF_REGEX.is_match(evidence) {
                return Err(AppError::Validation(
                    "Evidence image reference must be a URL or an upload path".to_string(),
                ));
            }
        }

        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let report = sqlx::query_as::<_, Report>(&format!(
            r#"
            UPDATE reports
            SET status = COALESCE($2, status),
                severity = COALESCE($3, severity)
            WHERE id = $1
            RETURNING {REPORT_COLUMNS}
            "#
        ))
        .bind(report_id)
        .bind(new_status)
        .bind(new_severity)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update report: {:?}", e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound(format!("Report {} not found", report_id)))?;

        let entry = if new_status.is_some() || note.is_some() || evidence_image_ref.is_some() {
            Some(
                ProcessingLogService::append_with(
                    &mut *tx,
                    report_id,
                    Some(log_actor_id),
                    note,
                    report.status,
                    evidence_image_ref,
                )
                .await?,
            )
        } else {
            None
        };

        if new_status.is_some() {
            NotificationService::enqueue_with(
                &mut *tx,
                report.owner_id,
                Some(report.id),
                "Report status updated",
                &format!("\"{}\" is now {}", report.title, report.status),
            )
            .await?;
        }

        tx.commit().await.map_err(AppError::Database)?;

        tracing::info!(
            "Report {} transitioned (status: {}, actor: {})",
            report.id,
            report.status,
            log_actor_id
        );

        Ok((report, entry))
    }
}

/// Field checks for a new submission; returns the trimmed title and
/// description. A constraint violation is a typed failure: the 0-coordinate
/// sentinel is rejected, not accepted as "no location".
fn validate_submission(dto: &CreateReportDto) -> Result<(String, String)> {
    let title = dto.title.trim();
    if title.chars().count() < 5 {
        return Err(AppError::Validation(
            "Title must be at least 5 characters".to_string(),
        ));
    }

    let description = dto.description.trim();
    if description.chars().count() < 10 {
        return Err(AppError::Validation(
            "Description must be at least 10 characters".to_string(),
        ));
    }

    if dto.lat == 0.0 || dto.lng == 0.0 {
        return Err(AppError::Validation(
            "A location is required (latitude/longitude must be set)".to_string(),
        ));
    }

    if let Some(image_ref) = dto.image_ref.as_deref() {
        if !IMAGE_REF_REGEX.is_match(image_ref) {
            return Err(AppError::Validation(
                "Image reference must be a URL or an upload path".to_string(),
            ));
        }
    }

    Ok((title.to_string(), description.to_string()))
}

/// A half-open date filter is ignored: the range applies only when both
/// endpoints are present.
fn normalized_range(
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
) -> (Option<DateTime<Utc>>, Option<DateTime<Utc>>) {
    match (from, to) {
        (Some(f), Some(t)) => (Some(f), Some(t)),
        _ => (None, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn submission() -> CreateReportDto {
        CreateReportDto {
            owner_id: None,
            title: "Large pothole on Elm Street".to_string(),
            description: "Deep pothole near the crossing, dangerous for bikes".to_string(),
            issue_type: crate::features::reports::models::IssueType::Pothole,
            lat: 16.0544,
            lng: 108.2022,
            image_ref: None,
            severity: None,
            ai_issue_type: None,
            ai_confidence: None,
        }
    }

    #[test]
    fn test_valid_submission_passes_and_trims() {
        let mut dto = submission();
        dto.title = "  Large pothole on Elm Street  ".to_string();

        let (title, description) = validate_submission(&dto).unwrap();
        assert_eq!(title, "Large pothole on Elm Street");
        assert_eq!(description, dto.description);
    }

    #[test]
    fn test_short_title_rejected() {
        let mut dto = submission();
        dto.title = "Hole".to_string();
        assert!(matches!(
            validate_submission(&dto),
            Err(AppError::Validation(_))
        ));

        // Whitespace padding does not rescue a short title
        dto.title = "  Hole     ".to_string();
        assert!(matches!(
            validate_submission(&dto),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_short_description_rejected() {
        let mut dto = submission();
        dto.description = "Too short".to_string();
        assert!(matches!(
            validate_submission(&dto),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_zero_coordinate_sentinel_rejected() {
        let mut dto = submission();
        dto.lat = 0.0;
        dto.lng = 0.0;
        assert!(matches!(
            validate_submission(&dto),
            Err(AppError::Validation(_))
        ));

        // Either axis at exactly 0 is the "no location" sentinel
        let mut dto = submission();
        dto.lng = 0.0;
        assert!(matches!(
            validate_submission(&dto),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_malformed_image_ref_rejected() {
        let mut dto = submission();
        dto.image_ref = Some("not a reference".to_string());
        assert!(matches!(
            validate_submission(&dto),
            Err(AppError::Validation(_))
        ));

        dto.image_ref = Some("/uploads/reports/42_ab12.jpg".to_string());
        assert!(validate_submission(&dto).is_ok());
    }

    #[test]
    fn test_normalized_range_requires_both_endpoints() {
        let f = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let t = Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap();

        assert_eq!(normalized_range(Some(f), Some(t)), (Some(f), Some(t)));
        assert_eq!(normalized_range(Some(f), None), (None, None));
        assert_eq!(normalized_range(None, Some(t)), (None, None));
        assert_eq!(normalized_range(None, None), (None, None));
    }
}
