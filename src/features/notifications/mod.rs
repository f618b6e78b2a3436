//! Notification sink: persists status-change facts as read/unread messages
//! for the citizen. Pure side-effect consumer: rows are written by the
//! report status-change transaction and only flipped read/unread here.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::NotificationService;
