//! Citizen incident reports: lifecycle, processing log, map and summary views.
//!
//! A report is created `pending`, moves to `processing` when staff take it on
//! (or an officer is assigned) and ends `completed`. Every status change is
//! paired with an append-only processing-log entry written in the same
//! transaction; the report row is the single source of truth for the current
//! status and the log is its trailing history.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::{ProcessingLogService, ReportService};
