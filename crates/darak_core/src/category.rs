//! Category vocabulary and per-category detail-field schemas.
//!
//! Default categories ship with the app; user-defined ones persist as a flat
//! entry. Unknown categories fall back to a generic note field.

use crate::repo::kv_repo::{KvStore, KEY_CATEGORIES};
use crate::repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const DEFAULT_CATEGORIES: &[&str] = &["movie", "book", "drama", "performance", "exhibition"];

/// Detail-field ids the UI renders for `category`.
pub fn detail_field_ids(category: &str) -> &'static [&'static str] {
    match category {
        "movie" => &["director", "cast", "genre"],
        "book" => &["author", "publisher", "pages"],
        "drama" => &["platform", "season", "episodes"],
        "performance" => &["venue", "cast", "seat"],
        "exhibition" => &["artist", "gallery", "period"],
        _ => &["note"],
    }
}

pub fn is_default_category(name: &str) -> bool {
    DEFAULT_CATEGORIES.contains(&name)
}

/// Flat-entry backed directory of user-defined categories.
pub struct CategoryDirectory<'conn> {
    kv: KvStore<'conn>,
}

impl<'conn> CategoryDirectory<'conn> {
    pub fn new(kv: KvStore<'conn>) -> Self {
        Self { kv }
    }

    /// Defaults followed by custom categories, in insertion order.
    pub fn list(&self) -> Result<Vec<String>, CategoryError> {
        let mut all: Vec<String> = DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect();
        all.extend(self.custom()?);
        Ok(all)
    }

    pub fn custom(&self) -> Result<Vec<String>, CategoryError> {
        Ok(self.kv.get_json(KEY_CATEGORIES)?.unwrap_or_default())
    }

    pub fn add(&self, name: &str) -> Result<(), CategoryError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CategoryError::EmptyName);
        }
        let mut custom = self.custom()?;
        if is_default_category(name) || custom.iter().any(|c| c == name) {
            return Err(CategoryError::Duplicate(name.to_string()));
        }
        custom.push(name.to_string());
        self.kv.put_json(KEY_CATEGORIES, &custom)?;
        Ok(())
    }

    pub fn remove(&self, name: &str) -> Result<(), CategoryError> {
        if is_default_category(name) {
            return Err(CategoryError::DefaultImmutable(name.to_string()));
        }
        let mut custom = self.custom()?;
        let before = custom.len();
        custom.retain(|c| c != name);
        if custom.len() == before {
            return Err(CategoryError::Unknown(name.to_string()));
        }
        self.kv.put_json(KEY_CATEGORIES, &custom)?;
        Ok(())
    }
}

#[derive(Debug)]
pub enum CategoryError {
    EmptyName,
    Duplicate(String),
    DefaultImmutable(String),
    Unknown(String),
    Storage(RepoError),
}

impl Display for CategoryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "category name cannot be empty"),
            Self::Duplicate(name) => write!(f, "category `{name}` already exists"),
            Self::DefaultImmutable(name) => {
                write!(f, "default category `{name}` cannot be removed")
            }
            Self::Unknown(name) => write!(f, "category `{name}` does not exist"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CategoryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for CategoryError {
    fn from(value: RepoError) -> Self {
        Self::Storage(value)
    }
}
