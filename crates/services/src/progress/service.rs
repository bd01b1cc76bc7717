use std::sync::Arc;

use storage::repository::{CompletionRepository, StorageError};
use tracing::{debug, info, warn};
use tutor_core::model::{
    CompletionMap, Curriculum, ProgressSnapshot, Selection, Topic, TopicId, progress_ratio,
};

use crate::config::{CorruptProgressPolicy, ProgressConfig};
use crate::error::ProgressError;
use crate::progress::outline::CurriculumOutline;

/// Outcome of loading persisted progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadReport {
    /// Nothing was stored yet; starting from an empty map.
    Fresh,
    /// A stored map with `entries` keys was restored.
    Restored { entries: usize },
    /// The stored slot was unreadable and was replaced by an empty map.
    Recovered { reason: String },
}

impl LoadReport {
    #[must_use]
    pub fn is_recovered(&self) -> bool {
        matches!(self, Self::Recovered { .. })
    }
}

/// Single owner of the learner's navigation and completion state.
///
/// Holds the current selection and the completion map, and writes the full
/// map back to storage after every toggle. The curriculum is shared read-only.
///
/// Mutating methods take `&mut self`: there is exactly one owner driving it
/// from user intents, one at a time.
pub struct ProgressService {
    curriculum: Arc<Curriculum>,
    repo: Arc<dyn CompletionRepository>,
    config: ProgressConfig,
    selection: Option<Selection>,
    completion: CompletionMap,
}

impl ProgressService {
    /// Build the service with an empty map and the default selection.
    ///
    /// Call [`ProgressService::initialize`] to load persisted progress.
    #[must_use]
    pub fn new(
        curriculum: Arc<Curriculum>,
        repo: Arc<dyn CompletionRepository>,
        config: ProgressConfig,
    ) -> Self {
        let selection = Selection::initial_for(&curriculum);
        Self {
            curriculum,
            repo,
            config,
            selection,
            completion: CompletionMap::new(),
        }
    }

    /// Load the completion map from storage and reset the selection.
    ///
    /// A missing or blank slot starts empty. A malformed slot either starts empty
    /// (`CorruptProgressPolicy::Reset`) or fails, depending on configuration.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::CorruptProgress` under `CorruptProgressPolicy::Fail`.
    /// Returns `ProgressError::Storage` on other repository failures.
    pub async fn initialize(&mut self) -> Result<LoadReport, ProgressError> {
        let key = self.config.storage_key.as_str();
        let (completion, report) = match self.repo.load_completion(key).await {
            Ok(Some(map)) => {
                let entries = map.len();
                (map, LoadReport::Restored { entries })
            }
            Ok(None) => (CompletionMap::new(), LoadReport::Fresh),
            Err(StorageError::Serialization(reason)) => match self.config.on_corrupt {
                CorruptProgressPolicy::Reset => {
                    warn!(key, %reason, "stored progress is unreadable, starting fresh");
                    (CompletionMap::new(), LoadReport::Recovered { reason })
                }
                CorruptProgressPolicy::Fail => {
                    return Err(ProgressError::CorruptProgress(reason));
                }
            },
            Err(err) => return Err(err.into()),
        };

        self.completion = completion;
        self.selection = Selection::initial_for(&self.curriculum);
        info!(
            key,
            completed = self.completion.completed_count(),
            total = self.curriculum.total_topics(),
            "progress loaded"
        );
        Ok(report)
    }

    /// Move the selection. Coordinates are stored as given and not persisted.
    pub fn select_topic(&mut self, chapter_index: usize, topic_index: usize) {
        debug!(chapter_index, topic_index, "select topic");
        self.selection = Some(Selection::new(chapter_index, topic_index));
    }

    /// Select a topic by id. Returns `false` and leaves the selection alone
    /// when the id is not in the curriculum.
    pub fn select_topic_by_id(&mut self, id: &TopicId) -> bool {
        match self.curriculum.locate(id) {
            Some(selection) => {
                self.select_topic(selection.chapter_index, selection.topic_index);
                true
            }
            None => false,
        }
    }

    /// Flip the completion flag for `id` and persist the whole map.
    ///
    /// The id is not checked against the curriculum. Returns the new flag.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Storage` if the write fails. The in-memory flip
    /// is kept; the next successful write catches storage up.
    pub async fn toggle_completion(
        &mut self,
        id: impl Into<TopicId>,
    ) -> Result<bool, ProgressError> {
        let id = id.into();
        let completed = self.completion.toggle(id.clone());
        debug!(topic = %id, completed, "toggle completion");
        self.persist().await?;
        Ok(completed)
    }

    /// Forget all completion flags, in memory and in storage.
    ///
    /// Storage is cleared first; if that fails the in-memory map is untouched.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Storage` if the slot cannot be cleared.
    pub async fn reset_progress(&mut self) -> Result<(), ProgressError> {
        self.repo
            .clear_completion(&self.config.storage_key)
            .await?;
        self.completion = CompletionMap::new();
        info!(key = %self.config.storage_key, "progress reset");
        Ok(())
    }

    /// Completed share of the curriculum in `[0, 1]`; `0` for an empty curriculum.
    ///
    /// Only ids that belong to the curriculum count towards the ratio.
    #[must_use]
    pub fn progress_ratio(&self) -> f64 {
        progress_ratio(
            self.completion.completed_in(&self.curriculum),
            self.curriculum.total_topics(),
        )
    }

    #[must_use]
    pub fn progress(&self) -> ProgressSnapshot {
        ProgressSnapshot::new(
            self.completion.completed_in(&self.curriculum),
            self.curriculum.total_topics(),
        )
    }

    /// Topic currently on screen, if the selection points at one.
    #[must_use]
    pub fn current_topic(&self) -> Option<&Topic> {
        self.selection?.resolve(&self.curriculum)
    }

    #[must_use]
    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    #[must_use]
    pub fn is_completed(&self, id: &TopicId) -> bool {
        self.completion.is_completed(id)
    }

    /// Number of ids mapped to `true`, including ids outside the curriculum.
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.completion.completed_count()
    }

    #[must_use]
    pub fn completion(&self) -> &CompletionMap {
        &self.completion
    }

    #[must_use]
    pub fn curriculum(&self) -> &Curriculum {
        &self.curriculum
    }

    #[must_use]
    pub fn config(&self) -> &ProgressConfig {
        &self.config
    }

    #[must_use]
    pub fn outline(&self) -> CurriculumOutline {
        CurriculumOutline::build(&self.curriculum, self.selection, &self.completion)
    }

    async fn persist(&self) -> Result<(), ProgressError> {
        self.repo
            .save_completion(&self.config.storage_key, &self.completion)
            .await?;
        Ok(())
    }
}
