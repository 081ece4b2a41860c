pub mod config;
pub mod error;
pub mod header;
pub mod report;
