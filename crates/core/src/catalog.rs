//! Bundled Python lesson catalog.
//!
//! Lessons are short on purpose: one idea per topic, a tiny example, and a
//! nudge to try it. Ids follow `<chapter>-<topic>` and must never be renamed,
//! because saved progress is keyed by them.

use crate::model::{Chapter, Curriculum, CurriculumError, Topic};

struct TopicDef {
    id: &'static str,
    title: &'static str,
    content: &'static str,
}

struct ChapterDef {
    title: &'static str,
    topics: &'static [TopicDef],
}

const PYTHON_CHAPTERS: &[ChapterDef] = &[
    ChapterDef {
        title: "Getting Started",
        topics: &[
            TopicDef {
                id: "basics-hello",
                title: "Hello, Python!",
                content: "Python runs your code top to bottom.\n\n```python\nprint(\"Hello, world!\")\n```\n\nTry it: print your own name.",
            },
            TopicDef {
                id: "basics-variables",
                title: "Variables",
                content: "A variable is a name that points at a value.\n\n```python\nscore = 10\nname = \"Ada\"\n```\n\nTry it: make a variable for your favourite number.",
            },
            TopicDef {
                id: "basics-types",
                title: "Numbers and Strings",
                content: "Numbers do maths, strings hold text.\n\n```python\nprint(3 + 4)\nprint(\"3\" + \"4\")\n```\n\nTry it: guess both outputs before running.",
            },
        ],
    },
    ChapterDef {
        title: "Making Decisions",
        topics: &[
            TopicDef {
                id: "control-if",
                title: "if / else",
                content: "Run code only when a condition is true.\n\n```python\nif score > 5:\n    print(\"Nice!\")\nelse:\n    print(\"Keep going\")\n```",
            },
            TopicDef {
                id: "control-comparisons",
                title: "Comparisons",
                content: "`==`, `!=`, `<`, `>`, `<=`, `>=` all give `True` or `False`.\n\n```python\nprint(2 == 2)\n```",
            },
        ],
    },
    ChapterDef {
        title: "Repeating Things",
        topics: &[
            TopicDef {
                id: "loops-for",
                title: "for loops",
                content: "Do something once per item.\n\n```python\nfor fruit in [\"apple\", \"pear\"]:\n    print(fruit)\n```",
            },
            TopicDef {
                id: "loops-while",
                title: "while loops",
                content: "Repeat while a condition holds. Make sure it ends!\n\n```python\ncount = 3\nwhile count > 0:\n    count -= 1\n```",
            },
            TopicDef {
                id: "loops-range",
                title: "range()",
                content: "`range(n)` counts from 0 up to n - 1.\n\n```python\nfor i in range(3):\n    print(i)\n```",
            },
        ],
    },
    ChapterDef {
        title: "Functions",
        topics: &[
            TopicDef {
                id: "functions-def",
                title: "Defining functions",
                content: "Name a block of code so you can reuse it.\n\n```python\ndef greet(name):\n    print(f\"Hi {name}\")\n```",
            },
            TopicDef {
                id: "functions-return",
                title: "Return values",
                content: "`return` hands a value back to the caller.\n\n```python\ndef double(x):\n    return x * 2\n```",
            },
        ],
    },
    ChapterDef {
        title: "Collections",
        topics: &[
            TopicDef {
                id: "collections-lists",
                title: "Lists",
                content: "Ordered, changeable sequences.\n\n```python\nnums = [1, 2, 3]\nnums.append(4)\n```",
            },
            TopicDef {
                id: "collections-dicts",
                title: "Dictionaries",
                content: "Look values up by key.\n\n```python\nages = {\"ada\": 36}\nprint(ages[\"ada\"])\n```",
            },
        ],
    },
];

/// Builds the bundled Python curriculum.
///
/// # Errors
///
/// Returns `CurriculumError` if the bundled data breaks the id invariants.
pub fn python_curriculum() -> Result<Curriculum, CurriculumError> {
    let chapters = PYTHON_CHAPTERS
        .iter()
        .map(|chapter| {
            let topics = chapter
                .topics
                .iter()
                .map(|topic| Topic::new(topic.id, topic.title, topic.content))
                .collect();
            Chapter::new(chapter.title, topics)
        })
        .collect();
    Curriculum::new(chapters)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Selection;

    #[test]
    fn bundled_catalog_is_valid() {
        let curriculum = python_curriculum().unwrap();
        assert_eq!(curriculum.chapters().len(), 5);
        assert_eq!(curriculum.total_topics(), 12);
    }

    #[test]
    fn bundled_catalog_starts_at_hello() {
        let curriculum = python_curriculum().unwrap();
        let first = Selection::initial_for(&curriculum)
            .and_then(|selection| selection.resolve(&curriculum))
            .unwrap();
        assert_eq!(first.id().as_str(), "basics-hello");
    }

    #[test]
    fn every_topic_has_content() {
        let curriculum = python_curriculum().unwrap();
        assert!(curriculum
            .topics()
            .all(|topic| !topic.title().is_empty() && !topic.content().is_empty()));
    }
}
