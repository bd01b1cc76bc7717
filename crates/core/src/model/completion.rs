use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::curriculum::Curriculum;
use crate::model::ids::TopicId;

/// Which topics the learner has marked done.
///
/// An absent key means "not completed". Keys are only ever added: toggling a
/// topic off keeps its key with a `false` value. Ids are not checked against
/// the curriculum.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompletionMap(BTreeMap<TopicId, bool>);

impl CompletionMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips the flag for `id` and returns the new value.
    pub fn toggle(&mut self, id: TopicId) -> bool {
        let entry = self.0.entry(id).or_insert(false);
        *entry = !*entry;
        *entry
    }

    #[must_use]
    pub fn is_completed(&self, id: &TopicId) -> bool {
        self.0.get(id).copied().unwrap_or(false)
    }

    /// Number of ids currently mapped to `true`.
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.0.values().filter(|done| **done).count()
    }

    /// Number of curriculum topics currently mapped to `true`.
    ///
    /// Ids that are not part of `curriculum` are ignored.
    #[must_use]
    pub fn completed_in(&self, curriculum: &Curriculum) -> usize {
        curriculum
            .topics()
            .filter(|topic| self.is_completed(topic.id()))
            .count()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TopicId, bool)> {
        self.0.iter().map(|(id, done)| (id, *done))
    }
}

impl FromIterator<(TopicId, bool)> for CompletionMap {
    fn from_iter<I: IntoIterator<Item = (TopicId, bool)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
