pub mod analytics;
pub mod assign;
pub mod backup;
pub mod import;
pub mod log;
pub mod report;
pub mod uploads;
