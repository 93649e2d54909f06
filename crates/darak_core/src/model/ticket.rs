//! Ticket memento domain model.
//!
//! # Invariants
//! - `id` is unique and positive.
//! - The image payload is opaque to the core and never empty.
//! - Tickets carry no ownership field (single store per device).

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable identifier for a ticket: the epoch-millisecond creation timestamp.
pub type TicketId = i64;

/// A rendered memento generated from a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: TicketId,
    /// Opaque encoded image payload produced by the presentation layer.
    pub image: String,
    /// Display rotation hint in degrees.
    #[serde(default)]
    pub rotation: f64,
    #[serde(default)]
    pub created_at: String,
}

impl Ticket {
    /// Creates a ticket with a fresh timestamp id and creation time.
    pub fn new(image: impl Into<String>, rotation: f64) -> Self {
        Self::with_id(super::epoch_ms_now(), image, rotation)
    }

    pub fn with_id(id: TicketId, image: impl Into<String>, rotation: f64) -> Self {
        Self {
            id,
            image: image.into(),
            rotation,
            created_at: super::now_utc_rfc3339(),
        }
    }

    pub fn validate(&self) -> Result<(), TicketValidationError> {
        if self.id <= 0 {
            return Err(TicketValidationError::NonPositiveId(self.id));
        }
        if self.image.is_empty() {
            return Err(TicketValidationError::EmptyImage);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TicketValidationError {
    NonPositiveId(i64),
    EmptyImage,
}

impl Display for TicketValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonPositiveId(id) => write!(f, "ticket id must be positive, got {id}"),
            Self::EmptyImage => write!(f, "ticket image payload cannot be empty"),
        }
    }
}

impl Error for TicketValidationError {}
