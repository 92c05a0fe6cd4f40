//! Per-run report.

use chrono::{DateTime, Utc};

use super::VideoId;
use crate::utils::log;

/// Why a discovered video received no comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    AlreadyCommented,
    CommentsDisabled,
    CheckFailed,
}

/// Everything a single run did, in the order it happened.
#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,

    /// Search requests issued during discovery
    pub searches_issued: u32,

    /// Video ids in discovery order, duplicates included
    pub discovered: Vec<VideoId>,

    /// Videos a comment was posted (or attempted) to, in processing order
    pub commented: Vec<VideoId>,

    /// Subset of `commented` whose post request failed
    pub failed_posts: Vec<VideoId>,

    pub skipped_already_commented: usize,
    pub skipped_comments_disabled: usize,
    pub skipped_check_failed: usize,

    /// Set when no post request was actually sent
    pub dry_run: bool,
}

impl PipelineReport {
    pub fn new(dry_run: bool) -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
            searches_issued: 0,
            discovered: Vec::new(),
            commented: Vec::new(),
            failed_posts: Vec::new(),
            skipped_already_commented: 0,
            skipped_comments_disabled: 0,
            skipped_check_failed: 0,
            dry_run,
        }
    }

    pub fn record_skip(&mut self, reason: SkipReason) {
        match reason {
            SkipReason::AlreadyCommented => self.skipped_already_commented += 1,
            SkipReason::CommentsDisabled => self.skipped_comments_disabled += 1,
            SkipReason::CheckFailed => self.skipped_check_failed += 1,
        }
    }

    pub fn skipped(&self) -> usize {
        self.skipped_already_commented + self.skipped_comments_disabled + self.skipped_check_failed
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// Narrate the outcome of the run.
    pub fn log_summary(&self) {
        let elapsed = self
            .finished_at
            .map(|end| (end - self.started_at).num_seconds())
            .unwrap_or_default();

        let title = if self.dry_run {
            "Commenter run (dry run)"
        } else {
            "Commenter run"
        };

        log::summary(
            title,
            &[
                ("Searches issued", self.searches_issued.to_string()),
                ("Videos discovered", self.discovered.len().to_string()),
                ("Newly commented", self.commented.len().to_string()),
                ("Failed posts", self.failed_posts.len().to_string()),
                ("Skipped", self.skipped().to_string()),
                ("Already commented", self.skipped_already_commented.to_string()),
                ("Comments disabled", self.skipped_comments_disabled.to_string()),
                ("Check failed (skipped)", self.skipped_check_failed.to_string()),
                ("Elapsed", format!("{elapsed}s")),
            ],
        );

        for id in &self.commented {
            log::sub_item(&id.watch_url());
        }
    }
}
