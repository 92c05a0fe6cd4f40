// src/pipeline/run.rs

//! Full commenter pipeline.

use super::{CommentGatekeeper, DelayWindow, RunState, Sleeper, VideoDiscoverer};
use crate::models::{Config, PipelineReport, VideoId};
use crate::services::{CommentComposer, VideoPlatform};
use crate::utils::log as narrate;

/// Videos found by one discovery pass.
#[derive(Debug, Clone)]
pub struct Discovery {
    pub videos: Vec<VideoId>,
    pub searches_issued: u32,
}

/// Walk the configured search terms and collect video ids.
pub async fn run_discovery(config: &Config, platform: &dyn VideoPlatform) -> Discovery {
    let mut state = RunState::from_config(&config.search);
    let videos = VideoDiscoverer::new(platform).discover(&mut state).await;
    Discovery {
        videos,
        searches_issued: state.budget.issued(),
    }
}

/// Run discovery followed by the check/post loop.
///
/// Never fails: every request error is turned into a skip or an early stop
/// and shows up in the returned report.
pub async fn run_pipeline(
    config: &Config,
    platform: &dyn VideoPlatform,
    composer: &dyn CommentComposer,
    sleeper: &dyn Sleeper,
    dry_run: bool,
) -> PipelineReport {
    narrate::header(if dry_run {
        "Commenter starting (dry run)"
    } else {
        "Commenter starting"
    });
    let mut report = PipelineReport::new(dry_run);

    narrate::step(1, 2, "Discover - Searching for candidate videos");
    let discovery = run_discovery(config, platform).await;
    report.searches_issued = discovery.searches_issued;

    narrate::step(2, 2, "Comment - Checking and posting");
    let gatekeeper = CommentGatekeeper::new(
        platform,
        composer,
        sleeper,
        &config.comments,
        DelayWindow::from_config(&config.pacing),
    )
    .dry_run(dry_run);
    gatekeeper.process_all(&discovery.videos, &mut report).await;
    report.discovered = discovery.videos;

    report.finish();
    narrate::separator();
    report.log_summary();
    report
}
