mod processing_log;
mod report;

pub use processing_log::{ProcessingLogEntry, ProcessingLogEntryWithReport};
pub use report::{IssueType, Report, ReportStatus};
