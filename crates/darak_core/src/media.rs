//! Helpers for opaque media references.
//!
//! The core never interprets media payloads; this module only extracts the
//! identifiers the presentation layer needs to embed them.

use once_cell::sync::Lazy;
use regex::Regex;

static YOUTUBE_ID_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:youtu\.be/|/v/|/embed/|watch\?v=|&v=)([A-Za-z0-9_-]{11})")
        .expect("valid youtube id regex")
});

/// Extracts the 11-character video id from the usual YouTube URL shapes.
pub fn youtube_video_id(url: &str) -> Option<String> {
    YOUTUBE_ID_RE
        .captures(url)
        .map(|caps| caps[1].to_string())
}
