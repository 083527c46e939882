use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unique identifier for a Phrase
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PhraseId(u64);

impl PhraseId {
    /// Creates a new `PhraseId`
    #[must_use]
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the underlying u64 value
    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Unique identifier for an answer option within a question.
///
/// Options reuse the id of the phrase their text was drawn from, so the id
/// space is shared with `PhraseId` but the two are never interchangeable.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OptionId(u64);

impl OptionId {
    /// Creates a new `OptionId`
    #[must_use]
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the underlying u64 value
    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl From<PhraseId> for OptionId {
    fn from(id: PhraseId) -> Self {
        Self(id.value())
    }
}

impl fmt::Debug for PhraseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PhraseId({})", self.0)
    }
}

impl fmt::Debug for OptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OptionId({})", self.0)
    }
}

// ─── Display Implementations ───────────────────────────────────────────────────

impl fmt::Display for PhraseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for OptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ─── FromStr Implementations ───────────────────────────────────────────────────

/// Error type for parsing ID from string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    kind: String,
}

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse {} from string", self.kind)
    }
}

impl std::error::Error for ParseIdError {}

impl FromStr for PhraseId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>()
            .map(PhraseId::new)
            .map_err(|_| ParseIdError {
                kind: "PhraseId".to_string(),
            })
    }
}

impl FromStr for OptionId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>()
            .map(OptionId::new)
            .map_err(|_| ParseIdError {
                kind: "OptionId".to_string(),
            })
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phrase_id_display() {
        let id = PhraseId::new(42);
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn test_phrase_id_from_str() {
        let id: PhraseId = "123".parse().unwrap();
        assert_eq!(id, PhraseId::new(123));
    }

    #[test]
    fn test_phrase_id_from_str_invalid() {
        let result = "not-a-number".parse::<PhraseId>();
        assert!(result.is_err());
    }

    #[test]
    fn test_option_id_from_phrase_id() {
        let phrase = PhraseId::new(7);
        let option = OptionId::from(phrase);
        assert_eq!(option.value(), 7);
    }

    #[test]
    fn test_option_id_display() {
        let id = OptionId::new(99);
        assert_eq!(id.to_string(), "99");
    }

    #[test]
    fn test_id_roundtrip() {
        let original = PhraseId::new(42);
        let serialized = original.to_string();
        let deserialized: PhraseId = serialized.parse().unwrap();
        assert_eq!(original, deserialized);
    }
}
