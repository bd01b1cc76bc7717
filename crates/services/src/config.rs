use std::env;
use std::fmt;
use std::str::FromStr;

use storage::repository::DEFAULT_PROGRESS_KEY;
use tracing::warn;

/// What `initialize` does when the stored slot cannot be decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CorruptProgressPolicy {
    /// Start over with an empty map and report the recovery.
    #[default]
    Reset,
    /// Surface `ProgressError::CorruptProgress` to the caller.
    Fail,
}

impl fmt::Display for CorruptProgressPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reset => write!(f, "reset"),
            Self::Fail => write!(f, "fail"),
        }
    }
}

/// Error type for parsing a `CorruptProgressPolicy`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePolicyError {
    raw: String,
}

impl fmt::Display for ParsePolicyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown corrupt-progress policy: {} (expected reset|fail)", self.raw)
    }
}

impl std::error::Error for ParsePolicyError {}

impl FromStr for CorruptProgressPolicy {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reset" => Ok(Self::Reset),
            "fail" => Ok(Self::Fail),
            _ => Err(ParsePolicyError { raw: s.to_string() }),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgressConfig {
    pub storage_key: String,
    pub on_corrupt: CorruptProgressPolicy,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_PROGRESS_KEY.to_string(),
            on_corrupt: CorruptProgressPolicy::default(),
        }
    }
}

impl ProgressConfig {
    /// Read `TUTOR_PROGRESS_KEY` and `TUTOR_ON_CORRUPT`, falling back to defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(key) = lookup("TUTOR_PROGRESS_KEY") {
            let key = key.trim();
            if !key.is_empty() {
                config.storage_key = key.to_string();
            }
        }

        if let Some(raw) = lookup("TUTOR_ON_CORRUPT") {
            match raw.parse() {
                Ok(policy) => config.on_corrupt = policy,
                Err(err) => warn!(%err, "ignoring TUTOR_ON_CORRUPT"),
            }
        }

        config
    }
}
