use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::TopicId;
use crate::model::selection::Selection;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CurriculumError {
    #[error("topic id cannot be empty (chapter {chapter_index}, topic {topic_index})")]
    EmptyTopicId {
        chapter_index: usize,
        topic_index: usize,
    },

    #[error("duplicate topic id: {0}")]
    DuplicateTopicId(TopicId),
}

//
// ─── TOPIC ─────────────────────────────────────────────────────────────────────
//

/// Smallest curriculum unit: one lesson with a stable id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    id: TopicId,
    title: String,
    content: String,
}

impl Topic {
    #[must_use]
    pub fn new(
        id: impl Into<TopicId>,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            content: content.into(),
        }
    }

    #[must_use]
    pub fn id(&self) -> &TopicId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }
}

//
// ─── CHAPTER ───────────────────────────────────────────────────────────────────
//

/// Ordered group of topics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    title: String,
    topics: Vec<Topic>,
}

impl Chapter {
    #[must_use]
    pub fn new(title: impl Into<String>, topics: Vec<Topic>) -> Self {
        Self {
            title: title.into(),
            topics,
        }
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    #[must_use]
    pub fn topic(&self, index: usize) -> Option<&Topic> {
        self.topics.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.topics.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }
}

//
// ─── CURRICULUM ────────────────────────────────────────────────────────────────
//

/// Immutable, ordered lesson catalog.
///
/// Construction checks that every topic id is non-blank and unique across the
/// whole catalog; after that the value is read-only.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Curriculum {
    chapters: Vec<Chapter>,
}

impl Curriculum {
    /// Validates and freezes a catalog.
    ///
    /// Empty chapters and an empty catalog are accepted.
    ///
    /// # Errors
    ///
    /// Returns `CurriculumError::EmptyTopicId` for a blank id and
    /// `CurriculumError::DuplicateTopicId` when an id appears twice.
    pub fn new(chapters: Vec<Chapter>) -> Result<Self, CurriculumError> {
        let mut seen = HashSet::new();
        for (chapter_index, chapter) in chapters.iter().enumerate() {
            for (topic_index, topic) in chapter.topics().iter().enumerate() {
                if topic.id().is_blank() {
                    return Err(CurriculumError::EmptyTopicId {
                        chapter_index,
                        topic_index,
                    });
                }
                if !seen.insert(topic.id()) {
                    return Err(CurriculumError::DuplicateTopicId(topic.id().clone()));
                }
            }
        }
        Ok(Self { chapters })
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    #[must_use]
    pub fn chapter(&self, index: usize) -> Option<&Chapter> {
        self.chapters.get(index)
    }

    /// Looks up a topic by coordinates. Out of range yields `None`.
    #[must_use]
    pub fn topic(&self, chapter_index: usize, topic_index: usize) -> Option<&Topic> {
        self.chapters.get(chapter_index)?.topic(topic_index)
    }

    /// Sum of topic counts over all chapters.
    #[must_use]
    pub fn total_topics(&self) -> usize {
        self.chapters.iter().map(Chapter::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chapters.is_empty()
    }

    #[must_use]
    pub fn contains_topic(&self, id: &TopicId) -> bool {
        self.locate(id).is_some()
    }

    /// Finds the coordinates of the topic with the given id.
    #[must_use]
    pub fn locate(&self, id: &TopicId) -> Option<Selection> {
        self.chapters
            .iter()
            .enumerate()
            .find_map(|(chapter_index, chapter)| {
                chapter
                    .topics()
                    .iter()
                    .position(|topic| topic.id() == id)
                    .map(|topic_index| Selection::new(chapter_index, topic_index))
            })
    }

    /// Iterates over every topic in catalog order.
    pub fn topics(&self) -> impl Iterator<Item = &Topic> {
        self.chapters.iter().flat_map(|chapter| chapter.topics().iter())
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
