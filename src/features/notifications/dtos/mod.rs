mod notification_dto;

pub use notification_dto::{
    MarkReadDto, NotificationListQuery, NotificationReadFilter, NotificationResponseDto,
};
