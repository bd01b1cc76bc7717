use crate::model::curriculum::{Curriculum, Topic};

/// Coordinates of the displayed topic.
///
/// Stored exactly as given; validity is derived against the curriculum when
/// resolving, so out-of-range coordinates mean "no topic selected".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Selection {
    pub chapter_index: usize,
    pub topic_index: usize,
}

impl Selection {
    #[must_use]
    pub fn new(chapter_index: usize, topic_index: usize) -> Self {
        Self {
            chapter_index,
            topic_index,
        }
    }

    /// First chapter, first topic.
    #[must_use]
    pub fn first() -> Self {
        Self::new(0, 0)
    }

    /// Default selection for a freshly loaded catalog.
    ///
    /// Returns `None` when there is no first topic to show.
    #[must_use]
    pub fn initial_for(curriculum: &Curriculum) -> Option<Self> {
        let first = Self::first();
        first.resolve(curriculum).map(|_| first)
    }

    #[must_use]
    pub fn resolve(self, curriculum: &Curriculum) -> Option<&Topic> {
        curriculum.topic(self.chapter_index, self.topic_index)
    }
}
