//! Data models: extracted records and configuration.

pub mod config;
pub mod record;

pub use config::{CvexConfig, LlmConfig, TableConfig};
pub use record::ResumeRecord;
