//! Slot value format: a flat JSON object mapping topic id to a boolean.
//!
//! There is no version field. An empty or whitespace-only value counts as
//! "nothing saved". Anything else that does not decode to that exact shape is
//! reported as `StorageError::Serialization`.

use tutor_core::model::CompletionMap;

use crate::repository::StorageError;

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

/// Encode the full completion map for storage.
///
/// # Errors
///
/// Returns `StorageError::Serialization` if JSON encoding fails.
pub fn encode_completion(map: &CompletionMap) -> Result<String, StorageError> {
    serde_json::to_string(map).map_err(ser)
}

/// Decode a stored slot value. Blank values decode to `None`.
///
/// # Errors
///
/// Returns `StorageError::Serialization` if the value is not a JSON object of booleans.
pub fn decode_completion(raw: &str) -> Result<Option<CompletionMap>, StorageError> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    serde_json::from_str(raw).map(Some).map_err(ser)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tutor_core::model::TopicId;

    #[test]
    fn decodes_browser_style_slot() {
        let map = decode_completion(r#"{"c1t1":true,"c2t2":false}"#)
            .unwrap()
            .unwrap();
        assert!(map.is_completed(&TopicId::new("c1t1")));
        assert!(!map.is_completed(&TopicId::new("c2t2")));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn empty_object_is_empty_map() {
        assert!(decode_completion("{}").unwrap().unwrap().is_empty());
    }

    #[test]
    fn blank_value_means_nothing_saved() {
        for raw in ["", "   ", "\n\t"] {
            assert_eq!(decode_completion(raw).unwrap(), None, "raw={raw:?}");
        }
    }

    #[test]
    fn rejects_malformed_json() {
        let err = decode_completion("{not json").unwrap_err();
        assert!(matches!(err, StorageError::Serialization(_)));
    }

    #[test]
    fn rejects_wrong_shape() {
        for raw in ["[]", "true", r#"{"c1t1":"yes"}"#, "null"] {
            let err = decode_completion(raw).unwrap_err();
            assert!(matches!(err, StorageError::Serialization(_)), "raw={raw}");
        }
    }

    #[test]
    fn encoding_is_key_ordered() {
        let mut map = CompletionMap::new();
        map.toggle(TopicId::new("z"));
        map.toggle(TopicId::new("a"));
        assert_eq!(encode_completion(&map).unwrap(), r#"{"a":true,"z":true}"#);
    }
}
