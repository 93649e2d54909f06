//! Journal record domain model.
//!
//! # Responsibility
//! - Define the canonical dated-entry record shared by all category views.
//! - Model the sharing list including the all-friends sentinel.
//!
//! # Invariants
//! - `id` is unique across the whole store and positive.
//! - A record with no `owner_id` predates per-record ownership ("legacy").
//! - `shared_with` is always a well-defined (possibly empty) list.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable identifier for a record: the epoch-millisecond creation timestamp.
pub type RecordId = i64;

/// Highest star rating a record can carry.
pub const MAX_RATING: u8 = 5;

/// Wire token for [`ShareTarget::AllFriends`].
pub const ALL_FRIENDS_TOKEN: &str = "ALL_FRIENDS";

static DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid date regex"));

/// One entry of a record's sharing list.
///
/// `AllFriends` means "visible to anyone who has friended me", not "visible
/// to everyone"; the visibility filter applies the friend gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareTarget {
    AllFriends,
    User(String),
}

impl ShareTarget {
    pub fn as_str(&self) -> &str {
        match self {
            Self::AllFriends => ALL_FRIENDS_TOKEN,
            Self::User(id) => id.as_str(),
        }
    }

    pub fn from_token(token: &str) -> Self {
        if token == ALL_FRIENDS_TOKEN {
            Self::AllFriends
        } else {
            Self::User(token.to_string())
        }
    }
}

impl Serialize for ShareTarget {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ShareTarget {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;
        Ok(Self::from_token(&token))
    }
}

/// Canonical dated journal entry.
///
/// Media references (`image`, `audio`, `youtube`) are opaque payloads owned
/// by the presentation layer; the core only stores and returns them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: RecordId,
    /// Absent only for records created before ownership existed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
    /// Calendar date in `YYYY-MM-DD` form.
    pub date: String,
    #[serde(default)]
    pub title: Option<String>,
    /// Open vocabulary; drives which `details` fields the UI offers.
    pub category: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub release_year: Option<String>,
    /// Star rating, 0 (unrated) to [`MAX_RATING`].
    #[serde(default)]
    pub rating: u8,
    #[serde(default)]
    pub mood: Option<String>,
    #[serde(default)]
    pub review: Option<String>,
    /// Category-driven field name to value mapping.
    #[serde(default)]
    pub details: BTreeMap<String, String>,
    #[serde(default)]
    pub shared_with: Vec<ShareTarget>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub youtube: Option<String>,
    #[serde(default)]
    pub audio: Option<String>,
}

impl Record {
    /// Creates a record dated `date` with a fresh timestamp id.
    pub fn new(date: impl Into<String>, category: impl Into<String>) -> Self {
        Self::with_id(super::epoch_ms_now(), date, category)
    }

    /// Creates a record with a caller-provided id.
    ///
    /// Used by import paths where identity already exists externally.
    pub fn with_id(id: RecordId, date: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id,
            owner_id: None,
            date: date.into(),
            title: None,
            category: category.into(),
            location: None,
            release_year: None,
            rating: 0,
            mood: None,
            review: None,
            details: BTreeMap::new(),
            shared_with: Vec::new(),
            image: None,
            youtube: None,
            audio: None,
        }
    }

    /// Whether this record predates per-record ownership.
    pub fn is_legacy(&self) -> bool {
        self.owner_id.is_none()
    }

    pub fn is_shared_with_all_friends(&self) -> bool {
        self.shared_with.contains(&ShareTarget::AllFriends)
    }

    pub fn shares_with(&self, user_id: &str) -> bool {
        self.shared_with
            .iter()
            .any(|target| matches!(target, ShareTarget::User(id) if id == user_id))
    }

    pub fn validate(&self) -> Result<(), RecordValidationError> {
        if self.id <= 0 {
            return Err(RecordValidationError::NonPositiveId(self.id));
        }
        if self.category.trim().is_empty() {
            return Err(RecordValidationError::EmptyCategory);
        }
        if !DATE_RE.is_match(&self.date) {
            return Err(RecordValidationError::InvalidDate(self.date.clone()));
        }
        if self.rating > MAX_RATING {
            return Err(RecordValidationError::RatingOutOfRange(self.rating));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordValidationError {
    NonPositiveId(i64),
    EmptyCategory,
    InvalidDate(String),
    RatingOutOfRange(u8),
}

impl Display for RecordValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonPositiveId(id) => write!(f, "record id must be positive, got {id}"),
            Self::EmptyCategory => write!(f, "record category cannot be empty"),
            Self::InvalidDate(date) => {
                write!(f, "record date `{date}` is not in YYYY-MM-DD form")
            }
            Self::RatingOutOfRange(rating) => {
                write!(f, "record rating {rating} exceeds maximum {MAX_RATING}")
            }
        }
    }
}

impl Error for RecordValidationError {}

#[cfg(test)]
mod tests {
    use super::{Record, RecordValidationError, ShareTarget, ALL_FRIENDS_TOKEN};

    #[test]
    fn valid_record_passes_validation() {
        let record = Record::with_id(1714521600000, "2024-05-01", "movie");
        assert!(record.validate().is_ok());
    }

    #[test]
    fn validation_rejects_bad_shapes() {
        let mut record = Record::with_id(0, "2024-05-01", "movie");
        assert_eq!(
            record.validate(),
            Err(RecordValidationError::NonPositiveId(0))
        );

        record.id = 1;
        record.date = "May 1st 2024".to_string();
        assert!(matches!(
            record.validate(),
            Err(RecordValidationError::InvalidDate(_))
        ));

        record.date = "2024-05-01".to_string();
        record.rating = 6;
        assert_eq!(
            record.validate(),
            Err(RecordValidationError::RatingOutOfRange(6))
        );

        record.rating = 5;
        record.category = "  ".to_string();
        assert_eq!(record.validate(), Err(RecordValidationError::EmptyCategory));
    }

    #[test]
    fn share_target_round_trips_through_wire_tokens() {
        let json = serde_json::to_string(&vec![
            ShareTarget::AllFriends,
            ShareTarget::User("bob".to_string()),
        ])
        .unwrap();
        assert_eq!(json, format!(r#"["{ALL_FRIENDS_TOKEN}","bob"]"#));

        let parsed: Vec<ShareTarget> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed[0], ShareTarget::AllFriends);
        assert_eq!(parsed[1], ShareTarget::User("bob".to_string()));
    }

    #[test]
    fn missing_shared_with_deserializes_to_empty_list() {
        let record: Record = serde_json::from_str(
            r#"{"id": 1, "date": "2024-05-01", "category": "movie"}"#,
        )
        .unwrap();
        assert!(record.shared_with.is_empty());
        assert!(record.is_legacy());
    }

    #[test]
    fn sharing_helpers_reflect_list_contents() {
        let mut record = Record::with_id(2, "2024-05-02", "book");
        assert!(!record.is_shared_with_all_friends());
        record.shared_with.push(ShareTarget::User("bob".to_string()));
        record.shared_with.push(ShareTarget::AllFriends);
        assert!(record.shares_with("bob"));
        assert!(!record.shares_with("carol"));
        assert!(record.is_shared_with_all_friends());
    }
}
