use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Stable identifier of a lesson topic.
///
/// Ids are opaque strings chosen by the curriculum author. They key the
/// persisted completion map, so they must never change once published.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TopicId(String);

impl TopicId {
    /// Creates a new `TopicId` from any string.
    ///
    /// No validation happens here: completion toggles accept ids that are not
    /// part of the curriculum. Use `FromStr` for user input.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the underlying string value
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for TopicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TopicId({:?})", self.0)
    }
}

impl fmt::Display for TopicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TopicId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl AsRef<str> for TopicId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Error type for parsing a `TopicId` from user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTopicIdError;

impl fmt::Display for ParseTopicIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "topic id cannot be empty")
    }
}

impl std::error::Error for ParseTopicIdError {}

impl FromStr for TopicId {
    type Err = ParseTopicIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseTopicIdError);
        }
        Ok(Self::new(trimmed))
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topic_id_display() {
        let id = TopicId::new("c1t1");
        assert_eq!(id.to_string(), "c1t1");
        assert_eq!(format!("{id:?}"), "TopicId(\"c1t1\")");
    }

    #[test]
    fn test_topic_id_from_str_trims() {
        let id: TopicId = "  py-variables ".parse().unwrap();
        assert_eq!(id, TopicId::new("py-variables"));
    }

    #[test]
    fn test_topic_id_from_str_rejects_blank() {
        assert_eq!("   ".parse::<TopicId>(), Err(ParseTopicIdError));
    }

    #[test]
    fn test_topic_id_serializes_as_plain_string() {
        let json = serde_json::to_string(&TopicId::new("c2t2")).unwrap();
        assert_eq!(json, "\"c2t2\"");
    }

    #[test]
    fn test_blank_detection() {
        assert!(TopicId::new(" ").is_blank());
        assert!(!TopicId::new("a").is_blank());
    }
}
