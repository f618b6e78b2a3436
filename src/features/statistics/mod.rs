//! Read-only dashboard aggregation over reports and their processing logs:
//! grouped counts, grid-bucketed hotspots, resolution-time averaging and a
//! daily time series. Safe to compute repeatedly; tolerates empty data by
//! returning zero-filled structures.

pub mod dtos;
pub mod handlers;
pub mod routes;
pub mod services;

pub use services::StatisticsService;
