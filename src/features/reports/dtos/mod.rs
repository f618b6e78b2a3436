mod processing_log_dto;
mod report_dto;

pub use processing_log_dto::{LogEntryResponseDto, StatusFeedEntryDto, StatusFeedQuery};
pub use report_dto::{
    AssignOfficerDto, CreateReportDto, MapMarkerDto, MapQuery, MySummaryDto, ReportListQuery,
    ReportResponseDto, UpdateReportStatusDto,
};
