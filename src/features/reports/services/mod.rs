mod processing_log_service;
mod report_service;

pub use processing_log_service::ProcessingLogService;
pub use report_service::ReportService;
