#![forbid(unsafe_code)]

pub mod app_services;
pub mod config;
pub mod error;
pub mod progress;

pub use app_services::AppServices;
pub use config::{CorruptProgressPolicy, ProgressConfig};
pub use error::{AppServicesError, ProgressError};
pub use progress::{
    ChapterOutline, CurriculumOutline, LoadReport, ProgressService, TopicOutlineItem,
};
