use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::reports::models::{IssueType, ReportStatus};
use crate::features::statistics::dtos::{
    HotspotCellDto, StatisticsQuery, StatisticsSnapshotDto, StatusCountDto, TimeSeriesPointDto,
    TypeCountDto,
};

/// Hotspot grid step in degrees; both axes snap independently
const GRID_STEP: f64 = 0.02;

/// Number of hotspot cells returned
const TOP_HOTSPOT_CELLS: usize = 10;

/// Scan bounds. Deliberate backpressure caps, not tuning knobs: they bound
/// worst-case latency of every aggregate read.
const GEO_SCAN_CAP: i64 = 500;
const RESOLUTION_SCAN_CAP: i64 = 200;
const SERIES_SCAN_CAP: i64 = 5000;

const MIN_WINDOW_DAYS: i64 = 1;
const MAX_WINDOW_DAYS: i64 = 180;
const DEFAULT_WINDOW_DAYS: i64 = 30;

const ALL_STATUSES: [ReportStatus; 3] = [
    ReportStatus::Pending,
    ReportStatus::Processing,
    ReportStatus::Completed,
];

const ALL_ISSUE_TYPES: [IssueType; 6] = [
    IssueType::Pothole,
    IssueType::Flooding,
    IssueType::TrafficLight,
    IssueType::Waste,
    IssueType::Congestion,
    IssueType::Other,
];

/// Service for the read-only dashboard snapshot
pub struct StatisticsService {
    pool: PgPool,
}

impl StatisticsService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Compute the full snapshot under the given filter.
    ///
    /// Pure read; an empty store yields zero counts, no hotspots, an absent
    /// resolution average and a zero-filled series.
    pub async fn snapshot(&self, query: &StatisticsQuery) -> Result<StatisticsSnapshotDto> {
        let (from, to) = match (query.from, query.to) {
            (Some(f), Some(t)) => (Some(f), Some(t)),
            _ => (None, None),
        };
        let window_days = query
            .window_days
            .unwrap_or(DEFAULT_WINDOW_DAYS)
            .clamp(MIN_WINDOW_DAYS, MAX_WINDOW_DAYS);

        let status_breakdown = self.status_breakdown(query.issue_type, from, to).await?;
        let type_breakdown = self.type_breakdown(query.issue_type, from, to).await?;
        let hotspots = self.hotspots(query.issue_type, from, to).await?;
        let avg_resolution_ms = self.avg_resolution(query.issue_type, from, to).await?;
        let time_series = self
            .time_series(query.issue_type, from, to, window_days)
            .await?;
        let total_reports = self.total_reports(query.issue_type, from, to).await?;
        let (total_users, total_staff) = self.user_totals().await?;

        Ok(StatisticsSnapshotDto {
            total_reports,
            total_users,
            total_staff,
            status_breakdown,
            type_breakdown,
            hotspots,
            avg_resolution_ms,
            time_series,
        })
    }

    async fn status_breakdown(
        &self,
        issue_type: Option<IssueType>,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Result<Vec<StatusCountDto>> {
        let rows = sqlx::query_as::<_, (ReportStatus, i64)>(
            r#"
            SELECT status, COUNT(*)
            FROM reports
            WHERE ($1::issue_type IS NULL OR issue_type = $1)
              AND ($2::TIMESTAMPTZ IS NULL OR created_at >= $2)
              AND ($3::TIMESTAMPTZ IS NULL OR created_at <= $3)
            GROUP BY status
            "#,
        )
        .bind(issue_type)
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get status breakdown: {:?}", e);
            AppError::Database(e)
        })?;

        let counts: HashMap<ReportStatus, i64> = rows.into_iter().collect();
        Ok(ALL_STATUSES
            .iter()
            .map(|&status| StatusCountDto {
                status,
                count: counts.get(&status).copied().unwrap_or(0),
            })
            .collect())
    }

    async fn type_breakdown(
        &self,
        issue_type: Option<IssueType>,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Result<Vec<TypeCountDto>> {
        let rows = sqlx::query_as::<_, (IssueType, i64)>(
            r#"
            SELECT issue_type, COUNT(*)
            FROM reports
            WHERE ($1::issue_type IS NULL OR issue_type = $1)
              AND ($2::TIMESTAMPTZ IS NULL OR created_at >= $2)
              AND ($3::TIMESTAMPTZ IS NULL OR created_at <= $3)
            GROUP BY issue_type
            "#,
        )
        .bind(issue_type)
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get type breakdown: {:?}", e);
            AppError::Database(e)
        })?;

        let counts: HashMap<IssueType, i64> = rows.into_iter().collect();
        Ok(ALL_ISSUE_TYPES
            .iter()
            .map(|&issue_type| TypeCountDto {
                issue_type,
                count: counts.get(&issue_type).copied().unwrap_or(0),
            })
            .collect())
    }

    async fn hotspots(
        &self,
        issue_type: Option<IssueType>,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Result<Vec<HotspotCellDto>> {
        let points = sqlx::query_as::<_, (f64, f64)>(
            r#"
            SELECT lat, lng
            FROM reports
            WHERE ($1::issue_type IS NULL OR issue_type = $1)
              AND ($2::TIMESTAMPTZ IS NULL OR created_at >= $2)
              AND ($3::TIMESTAMPTZ IS NULL OR created_at <= $3)
            ORDER BY created_at DESC
            LIMIT $4
            "#,
        )
        .bind(issue_type)
        .bind(from)
        .bind(to)
        .bind(GEO_SCAN_CAP)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get hotspot points: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(bucket_hotspots(&points))
    }

    async fn avg_resolution(
        &self,
        issue_type: Option<IssueType>,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Result<Option<i64>> {
        let pairs = sqlx::query_as::<_, (DateTime<Utc>, Option<DateTime<Utc>>)>(
            r#"
            SELECT
                r.created_at,
                (
                    SELECT MIN(l.created_at)
                    FROM processing_logs l
                    WHERE l.report_id = r.id AND l.status = 'completed'
                )
            FROM reports r
            WHERE r.status = 'completed'
              AND ($1::issue_type IS NULL OR r.issue_type = $1)
              AND ($2::TIMESTAMPTZ IS NULL OR r.created_at >= $2)
              AND ($3::TIMESTAMPTZ IS NULL OR r.created_at <= $3)
            LIMIT $4
            "#,
        )
        .bind(issue_type)
        .bind(from)
        .bind(to)
        .bind(RESOLUTION_SCAN_CAP)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get resolution pairs: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(average_resolution_ms(&pairs))
    }

    async fn time_series(
        &self,
        issue_type: Option<IssueType>,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
        window_days: i64,
    ) -> Result<Vec<TimeSeriesPointDto>> {
        let series_to = to.unwrap_or_else(Utc::now);
        let series_from = from.unwrap_or(series_to - Duration::days(window_days));

        let created = sqlx::query_scalar::<_, DateTime<Utc>>(
            r#"
            SELECT created_at
            FROM reports
            WHERE ($1::issue_type IS NULL OR issue_type = $1)
              AND created_at >= $2
              AND created_at <= $3
            ORDER BY created_at ASC
            LIMIT $4
            "#,
        )
        .bind(issue_type)
        .bind(series_from)
        .bind(series_to)
        .bind(SERIES_SCAN_CAP)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get time series points: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(daily_series(series_from, series_to, &created))
    }

    async fn total_reports(
        &self,
        issue_type: Option<IssueType>,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Result<i64> {
        sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM reports
            WHERE ($1::issue_type IS NULL OR issue_type = $1)
              AND ($2::TIMESTAMPTZ IS NULL OR created_at >= $2)
              AND ($3::TIMESTAMPTZ IS NULL OR created_at <= $3)
            "#,
        )
        .bind(issue_type)
        .bind(from)
        .bind(to)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to count reports: {:?}", e);
            AppError::Database(e)
        })
    }

    /// Total and staff-role user counts; never affected by the report filter.
    async fn user_totals(&self) -> Result<(i64, i64)> {
        sqlx::query_as::<_, (i64, i64)>(
            r#"
            SELECT COUNT(*), COUNT(*) FILTER (WHERE role = 'staff')
            FROM users
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to count users: {:?}", e);
            AppError::Database(e)
        })
    }
}

/// Snap a coordinate to the nearest grid step.
fn snap_to_grid(value: f64) -> i64 {
    (value / GRID_STEP).round() as i64
}

/// Count points per 0.02° grid cell and return the top cells by count.
///
/// A cheap spatial-density proxy, not geocoding. Ties rank in
/// first-occurrence order of the (newest-first) input; the stable sort
/// never reorders equal counts.
fn bucket_hotspots(points: &[(f64, f64)]) -> Vec<HotspotCellDto> {
    let mut index: HashMap<(i64, i64), usize> = HashMap::new();
    let mut cells: Vec<HotspotCellDto> = Vec::new();

    for &(lat, lng) in points {
        let key = (snap_to_grid(lat), snap_to_grid(lng));
        match index.get(&key) {
            Some(&i) => cells[i].count += 1,
            None => {
                index.insert(key, cells.len());
                cells.push(HotspotCellDto {
                    lat: key.0 as f64 * GRID_STEP,
                    lng: key.1 as f64 * GRID_STEP,
                    count: 1,
                });
            }
        }
    }

    cells.sort_by(|a, b| b.count.cmp(&a.count));
    cells.truncate(TOP_HOTSPOT_CELLS);
    cells
}

/// Mean creation-to-completion delta in milliseconds over pairs that have a
/// completion timestamp; `None` (not zero) when nothing qualifies.
fn average_resolution_ms(pairs: &[(DateTime<Utc>, Option<DateTime<Utc>>)]) -> Option<i64> {
    let deltas: Vec<i64> = pairs
        .iter()
        .filter_map(|(created, completed)| {
            completed.map(|c| (c - *created).num_milliseconds())
        })
        .collect();

    if deltas.is_empty() {
        return None;
    }

    let sum: i64 = deltas.iter().sum();
    Some((sum as f64 / deltas.len() as f64).round() as i64)
}

/// One zero-initialized bucket per UTC calendar day in the closed range
/// `[from, to]`, incremented per creation timestamp, ascending by date.
fn daily_series(
    from: DateTime<Utc>,
    to: DateTime<Utc>,
    created: &[DateTime<Utc>],
) -> Vec<TimeSeriesPointDto> {
    let start = from.date_naive();
    let end = to.date_naive();

    let mut series = Vec::new();
    let mut day = start;
    while day <= end {
        series.push(TimeSeriesPointDto {
            date: day,
            count: 0,
        });
        match day.succ_opt() {
            Some(next) => day = next,
            None => break,
        }
    }

    for ts in created {
        let date = ts.date_naive();
        if date < start {
            continue;
        }
        let idx = (date - start).num_days() as usize;
        if let Some(point) = series.get_mut(idx) {
            point.count += 1;
        }
    }

    series
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    #[test]
    fn test_nearby_points_share_a_grid_cell() {
        let cells = bucket_hotspots(&[(16.0544, 108.2022), (16.0601, 108.2105)]);

        assert_eq!(cells.len(), 1);
        assert_eq!(cells[0].count, 2);
        assert!((cells[0].lat - 16.06).abs() < 1e-9);
        assert!((cells[0].lng - 108.20).abs() < 1e-9);
    }

    #[test]
    fn test_distant_point_lands_in_another_cell() {
        let cells = bucket_hotspots(&[
            (16.0544, 108.2022),
            (16.0601, 108.2105),
            (15.98, 108.23),
        ]);

        assert_eq!(cells.len(), 2);
        assert_eq!(cells[0].count, 2);
        assert_eq!(cells[1].count, 1);
        assert!((cells[1].lat - 15.98).abs() < 1e-9);
    }

    #[test]
    fn test_hotspots_cap_at_top_ten() {
        // 12 distinct cells, one with three points, one with two
        let mut points = vec![(10.0, 10.0), (10.0, 10.0), (10.0, 10.0), (11.0, 11.0), (11.0, 11.0)];
        for i in 0..10 {
            points.push((20.0 + i as f64, 20.0));
        }

        let cells = bucket_hotspots(&points);

        assert_eq!(cells.len(), TOP_HOTSPOT_CELLS);
        assert_eq!(cells[0].count, 3);
        assert_eq!(cells[1].count, 2);
    }

    #[test]
    fn test_hotspot_ties_keep_first_occurrence_order() {
        let cells = bucket_hotspots(&[(10.0, 10.0), (11.0, 11.0), (12.0, 12.0)]);

        assert_eq!(cells.len(), 3);
        assert!((cells[0].lat - 10.0).abs() < 1e-9);
        assert!((cells[1].lat - 11.0).abs() < 1e-9);
        assert!((cells[2].lat - 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_hotspots_empty_input() {
        assert!(bucket_hotspots(&[]).is_empty());
    }

    #[test]
    fn test_average_resolution_skips_unqualified_pairs() {
        let t0 = ts(2026, 3, 1, 8, 0);
        let pairs = vec![
            (t0, Some(t0 + Duration::hours(2))),
            (t0, None), // completed status but no completed log entry
        ];

        assert_eq!(average_resolution_ms(&pairs), Some(2 * 60 * 60 * 1000));
    }

    #[test]
    fn test_average_resolution_absent_when_nothing_qualifies() {
        let t0 = ts(2026, 3, 1, 8, 0);
        assert_eq!(average_resolution_ms(&[(t0, None)]), None);
        assert_eq!(average_resolution_ms(&[]), None);
    }

    #[test]
    fn test_average_resolution_rounds_the_mean() {
        let t0 = ts(2026, 3, 1, 8, 0);
        let pairs = vec![
            (t0, Some(t0 + Duration::milliseconds(1))),
            (t0, Some(t0 + Duration::milliseconds(2))),
        ];

        // (1 + 2) / 2 rounds to 2
        assert_eq!(average_resolution_ms(&pairs), Some(2));
    }

    #[test]
    fn test_daily_series_has_one_bucket_per_day_inclusive() {
        let to = ts(2026, 3, 8, 12, 0);
        let from = to - Duration::days(7);

        let series = daily_series(from, to, &[]);

        assert_eq!(series.len(), 8);
        assert_eq!(series[0].date, from.date_naive());
        assert_eq!(series[7].date, to.date_naive());
        assert!(series.iter().all(|p| p.count == 0));
    }

    #[test]
    fn test_daily_series_counts_land_in_their_buckets() {
        let from = ts(2026, 3, 1, 0, 0);
        let to = ts(2026, 3, 4, 23, 59);
        let created = vec![
            ts(2026, 3, 1, 9, 30),
            ts(2026, 3, 1, 18, 0),
            ts(2026, 3, 3, 7, 15),
        ];

        let series = daily_series(from, to, &created);

        assert_eq!(series.len(), 4);
        assert_eq!(series[0].count, 2);
        assert_eq!(series[1].count, 0);
        assert_eq!(series[2].count, 1);
        assert_eq!(series[3].count, 0);
        assert_eq!(
            series.iter().map(|p| p.count).sum::<i64>(),
            created.len() as i64
        );
    }

    #[test]
    fn test_daily_series_dates_ascend() {
        let from = ts(2026, 2, 26, 0, 0);
        let to = ts(2026, 3, 2, 0, 0);

        let series = daily_series(from, to, &[]);

        assert!(series.windows(2).all(|w| w[0].date < w[1].date));
    }

    #[test]
    fn test_window_days_clamped() {
        assert_eq!(0_i64.clamp(MIN_WINDOW_DAYS, MAX_WINDOW_DAYS), 1);
        assert_eq!(365_i64.clamp(MIN_WINDOW_DAYS, MAX_WINDOW_DAYS), 180);
        assert_eq!(
            DEFAULT_WINDOW_DAYS.clamp(MIN_WINDOW_DAYS, MAX_WINDOW_DAYS),
            30
        );
    }
}
