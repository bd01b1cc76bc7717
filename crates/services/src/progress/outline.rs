use tutor_core::model::{CompletionMap, Curriculum, ProgressSnapshot, Selection, TopicId};

/// Presentation-agnostic navigation tree.
///
/// No pre-formatted strings: the renderer decides how to show checkmarks,
/// counts and highlighting.
#[derive(Debug, Clone, PartialEq)]
pub struct CurriculumOutline {
    pub chapters: Vec<ChapterOutline>,
    pub progress: ProgressSnapshot,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterOutline {
    pub index: usize,
    pub title: String,
    pub completed: usize,
    pub total: usize,
    pub topics: Vec<TopicOutlineItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicOutlineItem {
    pub index: usize,
    pub id: TopicId,
    pub title: String,
    pub selected: bool,
    pub completed: bool,
}

impl CurriculumOutline {
    #[must_use]
    pub fn build(
        curriculum: &Curriculum,
        selection: Option<Selection>,
        completion: &CompletionMap,
    ) -> Self {
        let chapters = curriculum
            .chapters()
            .iter()
            .enumerate()
            .map(|(chapter_index, chapter)| {
                let topics: Vec<TopicOutlineItem> = chapter
                    .topics()
                    .iter()
                    .enumerate()
                    .map(|(topic_index, topic)| TopicOutlineItem {
                        index: topic_index,
                        id: topic.id().clone(),
                        title: topic.title().to_owned(),
                        selected: selection == Some(Selection::new(chapter_index, topic_index)),
                        completed: completion.is_completed(topic.id()),
                    })
                    .collect();
                ChapterOutline {
                    index: chapter_index,
                    title: chapter.title().to_owned(),
                    completed: topics.iter().filter(|item| item.completed).count(),
                    total: topics.len(),
                    topics,
                }
            })
            .collect();

        Self {
            chapters,
            progress: ProgressSnapshot::new(
                completion.completed_in(curriculum),
                curriculum.total_topics(),
            ),
        }
    }

    /// The highlighted topic, if the selection is in range.
    #[must_use]
    pub fn selected(&self) -> Option<&TopicOutlineItem> {
        self.chapters
            .iter()
            .flat_map(|chapter| chapter.topics.iter())
            .find(|item| item.selected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tutor_core::model::{Chapter, Topic};

    fn curriculum() -> Curriculum {
        Curriculum::new(vec![
            Chapter::new(
                "Basics",
                vec![Topic::new("a", "A", ""), Topic::new("b", "B", "")],
            ),
            Chapter::new("Loops", vec![Topic::new("c", "C", "")]),
        ])
        .unwrap()
    }

    #[test]
    fn marks_selected_and_completed_topics() {
        let mut completion = CompletionMap::new();
        completion.toggle(TopicId::new("b"));
        completion.toggle(TopicId::new("ghost"));

        let outline =
            CurriculumOutline::build(&curriculum(), Some(Selection::new(1, 0)), &completion);

        assert_eq!(outline.chapters.len(), 2);
        assert_eq!(outline.chapters[0].completed, 1);
        assert_eq!(outline.chapters[0].total, 2);
        assert!(outline.chapters[0].topics[1].completed);
        assert!(!outline.chapters[0].topics[0].selected);
        assert_eq!(outline.selected().unwrap().id, TopicId::new("c"));
        assert_eq!(outline.progress, ProgressSnapshot::new(1, 3));
    }

    #[test]
    fn out_of_range_selection_highlights_nothing() {
        let outline = CurriculumOutline::build(
            &curriculum(),
            Some(Selection::new(9, 9)),
            &CompletionMap::new(),
        );
        assert!(outline.selected().is_none());

        let outline = CurriculumOutline::build(&curriculum(), None, &CompletionMap::new());
        assert!(outline.selected().is_none());
    }
}
