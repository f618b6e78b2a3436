pub mod statistics_handler;
