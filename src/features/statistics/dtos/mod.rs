mod statistics_dto;

pub use statistics_dto::{
    HotspotCellDto, StatisticsQuery, StatisticsSnapshotDto, StatusCountDto, TimeSeriesPointDto,
    TypeCountDto,
};
