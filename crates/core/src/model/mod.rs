mod completion;
mod curriculum;
mod ids;
mod progress;
mod selection;

pub use completion::CompletionMap;
pub use curriculum::{Chapter, Curriculum, CurriculumError, Topic};
pub use ids::{ParseTopicIdError, TopicId};
pub use progress::{ProgressSnapshot, progress_ratio};
pub use selection::Selection;
