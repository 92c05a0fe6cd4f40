// src/pipeline/gatekeeper.rs

//! Marker check and comment posting, one video at a time.

use super::{DelayWindow, Sleeper};
use crate::error::Result;
use crate::models::{
    CheckFailurePolicy, CommentCheckResult, CommentConfig, PipelineReport, SkipReason, VideoId,
};
use crate::services::{CommentComposer, VideoPlatform};

/// Whether a video gets a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Post,
    Skip(SkipReason),
}

/// Decides per video whether to comment, posts, and paces the next attempt.
pub struct CommentGatekeeper<'a> {
    platform: &'a dyn VideoPlatform,
    composer: &'a dyn CommentComposer,
    sleeper: &'a dyn Sleeper,
    marker: String,
    on_check_failure: CheckFailurePolicy,
    delay: DelayWindow,
    dry_run: bool,
}

impl<'a> CommentGatekeeper<'a> {
    pub fn new(
        platform: &'a dyn VideoPlatform,
        composer: &'a dyn CommentComposer,
        sleeper: &'a dyn Sleeper,
        config: &CommentConfig,
        delay: DelayWindow,
    ) -> Self {
        Self {
            platform,
            composer,
            sleeper,
            marker: config.marker.clone(),
            on_check_failure: config.on_check_failure,
            delay,
            dry_run: false,
        }
    }

    /// Check only; no post is sent and no delay is waited.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Process every video in order, recording outcomes in `report`.
    pub async fn process_all(&self, videos: &[VideoId], report: &mut PipelineReport) {
        let total = videos.len();
        for (index, video) in videos.iter().enumerate() {
            log::info!("[{}/{}] Checking video {}", index + 1, total, video);
            self.process(video, report).await;
        }
    }

    /// Check, maybe post, maybe wait. Completes before returning.
    pub async fn process(&self, video: &VideoId, report: &mut PipelineReport) {
        let checked = self.check_existing_comment(video).await;
        match self.decide(video, checked) {
            Verdict::Skip(reason) => report.record_skip(reason),
            Verdict::Post => {
                let posted = self.post_comment(video).await;
                report.commented.push(video.clone());
                if !posted {
                    report.failed_posts.push(video.clone());
                }
            }
        }
    }

    /// Look for an existing marker comment.
    ///
    /// A forbidden reply means comments are disabled and is not an error.
    pub async fn check_existing_comment(&self, video: &VideoId) -> Result<CommentCheckResult> {
        match self.platform.count_marker_threads(video, &self.marker).await {
            Ok(0) => Ok(CommentCheckResult::NoMarkerComment),
            Ok(_) => Ok(CommentCheckResult::HasMarkerComment),
            Err(error) if error.is_forbidden() => Ok(CommentCheckResult::CommentsDisabled),
            Err(error) => Err(error),
        }
    }

    fn decide(&self, video: &VideoId, checked: Result<CommentCheckResult>) -> Verdict {
        match checked {
            Ok(result) => {
                log::info!("Video {}: {}", video, result);
                match result {
                    CommentCheckResult::NoMarkerComment => Verdict::Post,
                    CommentCheckResult::HasMarkerComment => {
                        Verdict::Skip(SkipReason::AlreadyCommented)
                    }
                    CommentCheckResult::CommentsDisabled => {
                        Verdict::Skip(SkipReason::CommentsDisabled)
                    }
                }
            }
            Err(error) => match self.on_check_failure {
                CheckFailurePolicy::FailOpen => {
                    log::warn!(
                        "Video {}: marker check failed, treating as uncommented: {}",
                        video,
                        error
                    );
                    Verdict::Post
                }
                CheckFailurePolicy::FailClosed => {
                    log::warn!("Video {}: marker check failed, skipping: {}", video, error);
                    Verdict::Skip(SkipReason::CheckFailed)
                }
            },
        }
    }

    /// Post a generated comment, then wait a random delay.
    ///
    /// Returns whether the post went through. Failures are logged with the
    /// platform's payload and never propagate.
    pub async fn post_comment(&self, video: &VideoId) -> bool {
        let text = self.composer.compose();

        if self.dry_run {
            log::info!("Video {}: dry run, would post {:?}", video, text);
            return true;
        }

        let posted = match self.platform.create_comment_thread(video, &text).await {
            Ok(()) => {
                log::info!("Video {}: comment posted ({})", video, video.watch_url());
                true
            }
            Err(error) => {
                log::error!(
                    "Video {}: failed to post comment: {} | payload: {}",
                    video,
                    error,
                    error.payload().unwrap_or("<none>")
                );
                false
            }
        };

        let pause = self.delay.draw();
        log::info!("Waiting {} ms before the next video", pause.as_millis());
        self.sleeper.sleep(pause).await;

        posted
    }
}
