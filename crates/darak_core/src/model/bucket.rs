//! Bucket-list ("want to watch/read") item.
//!
//! Functionally outside the data core, but persisted alongside it as a flat
//! entry and carried by the backup bundle.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketItem {
    pub title: String,
    pub category: String,
    /// Shelf-spine color picked once by the UI so renders stay stable.
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub date_added: String,
}

impl BucketItem {
    pub fn new(title: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            category: category.into(),
            color: None,
            completed: false,
            date_added: super::now_utc_rfc3339(),
        }
    }
}
