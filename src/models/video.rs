//! Search and comment domain types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Watch page prefix used when reporting videos.
const WATCH_URL: &str = "https://www.youtube.com/watch";

/// A search query handed to the platform.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchTerm(String);

impl SearchTerm {
    pub fn new(term: impl Into<String>) -> Self {
        Self(term.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SearchTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Platform identifier of a single video.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VideoId(String);

impl VideoId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Public watch page for this video.
    pub fn watch_url(&self) -> String {
        // WATCH_URL is a constant known to parse.
        match url::Url::parse_with_params(WATCH_URL, [("v", self.as_str())]) {
            Ok(url) => url.to_string(),
            Err(_) => format!("{WATCH_URL}?v={}", self.0),
        }
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Continuation cursor for a paginated search.
///
/// Only meaningful together with the term that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageToken(String);

impl PageToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PageToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One search result; channels and playlists carry no video id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchItem {
    pub video_id: Option<VideoId>,
}

impl SearchItem {
    pub fn video(id: impl Into<String>) -> Self {
        Self {
            video_id: Some(VideoId::new(id)),
        }
    }

    pub fn other() -> Self {
        Self { video_id: None }
    }
}

/// A single page of search results.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPage {
    pub items: Vec<SearchItem>,
    pub next_page_token: Option<PageToken>,
}

/// Outcome of looking for an existing marker comment on a video.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentCheckResult {
    HasMarkerComment,
    NoMarkerComment,
    CommentsDisabled,
}

impl fmt::Display for CommentCheckResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::HasMarkerComment => "marker comment present, skipping",
            Self::NoMarkerComment => "no marker comment",
            Self::CommentsDisabled => "comments disabled, skipping",
        };
        f.write_str(label)
    }
}
