mod outline;
mod service;

pub use outline::{ChapterOutline, CurriculumOutline, TopicOutlineItem};
pub use service::{LoadReport, ProgressService};
