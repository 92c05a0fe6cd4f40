//! Platform abstraction used by the pipeline.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{PageToken, SearchPage, SearchTerm, VideoId};

/// Requests the pipeline needs from a video platform.
///
/// Every call is awaited to completion before the next one is issued.
#[async_trait]
pub trait VideoPlatform: Send + Sync {
    /// One page of videos matching `term`, newest first.
    async fn search_videos(
        &self,
        term: &SearchTerm,
        page_token: Option<&PageToken>,
    ) -> Result<SearchPage>;

    /// Number of comment threads on `video` matching `marker`, capped at one result.
    ///
    /// Fails with a forbidden `AppError::Api` when comments are disabled.
    async fn count_marker_threads(&self, video: &VideoId, marker: &str) -> Result<u64>;

    /// Post `text` as a new top-level comment on `video`.
    async fn create_comment_thread(&self, video: &VideoId, text: &str) -> Result<()>;
}
