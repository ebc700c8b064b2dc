pub mod config;
pub mod export;
pub mod listing;
pub mod output;
pub mod rank;
pub mod scoring;
pub mod source;
pub mod telemetry;
