// src/pipeline/discover.rs

//! Video discovery across rotating search terms.

use super::RunState;
use crate::models::VideoId;
use crate::services::{SEARCH_PAGE_SIZE, VideoPlatform};

/// Walks search result pages for each term until the budget or the terms run out.
pub struct VideoDiscoverer<'a> {
    platform: &'a dyn VideoPlatform,
}

impl<'a> VideoDiscoverer<'a> {
    pub fn new(platform: &'a dyn VideoPlatform) -> Self {
        Self { platform }
    }

    /// Collect video ids in discovery order.
    ///
    /// A page shorter than `SEARCH_PAGE_SIZE` exhausts the term even if a
    /// next-page token came back. A failed search ends discovery and keeps
    /// what was collected so far.
    pub async fn discover(&self, state: &mut RunState) -> Vec<VideoId> {
        let mut videos = Vec::new();

        loop {
            let Some(term) = state.rotator.current().cloned() else {
                log::info!("No search terms left, stopping discovery");
                break;
            };

            if !state.budget.consume() {
                log::info!(
                    "Search budget spent ({} requests), stopping discovery",
                    state.budget.issued()
                );
                break;
            }
            log::info!(
                "Searching '{}' (page {}) [{}/{}]",
                term,
                state
                    .page_token
                    .as_ref()
                    .map_or("first", |token| token.as_str()),
                state.budget.issued(),
                state.budget.max()
            );

            let page = match self
                .platform
                .search_videos(&term, state.page_token.as_ref())
                .await
            {
                Ok(page) => page,
                Err(error) => {
                    log::error!("Search for '{}' failed, stopping discovery: {}", term, error);
                    break;
                }
            };

            let returned = page.items.len();
            let before = videos.len();
            videos.extend(page.items.into_iter().filter_map(|item| item.video_id));
            log::debug!(
                "'{}' returned {} results, {} videos",
                term,
                returned,
                videos.len() - before
            );

            match page.next_page_token {
                Some(token) if returned >= SEARCH_PAGE_SIZE => {
                    state.page_token = Some(token);
                }
                _ => {
                    log::info!("Results for '{}' exhausted ({} on last page)", term, returned);
                    if !state.rotate() {
                        log::info!("Search term queue exhausted, stopping discovery");
                        break;
                    }
                    if let Some(next) = state.rotator.current() {
                        log::info!(
                            "Rotating to search term '{}' ({} more queued)",
                            next,
                            state.rotator.remaining()
                        );
                    }
                }
            }
        }

        log::info!("Discovered {} videos", videos.len());
        videos
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PageToken, SearchItem, SearchPage};
    use crate::pipeline::{QueryRotator, SearchBudget};
    use crate::testing::{Event, ScriptedPlatform, video_page};

    fn state(terms: &[&str], max: u32) -> RunState {
        RunState::new(
            QueryRotator::new(terms.iter().copied()),
            SearchBudget::new(max),
        )
    }

    fn search(term: &str, token: Option<&str>) -> Event {
        Event::Search {
            term: term.to_string(),
            token: token.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn budget_ends_discovery_before_second_term() {
        let platform = ScriptedPlatform::new()
            .search_page(video_page("a", 50, Some("tok1")))
            .search_page(video_page("a-next", 10, Some("tok2")));
        let mut state = state(&["a", "b"], 2);

        let videos = VideoDiscoverer::new(&platform).discover(&mut state).await;

        assert_eq!(videos.len(), 60);
        assert_eq!(videos[0], VideoId::new("a0"));
        assert_eq!(videos[50], VideoId::new("a-next0"));
        assert_eq!(state.budget.issued(), 2);
        assert_eq!(
            platform.recorded(),
            vec![search("a", None), search("a", Some("tok1"))]
        );
    }

    #[tokio::test]
    async fn short_page_rotates_even_with_token() {
        let platform = ScriptedPlatform::new()
            .search_page(video_page("a", 10, Some("tok-a")))
            .search_page(video_page("b", 3, None));
        let mut state = state(&["a", "b"], 10);

        let videos = VideoDiscoverer::new(&platform).discover(&mut state).await;

        assert_eq!(videos.len(), 13);
        assert_eq!(
            platform.recorded(),
            vec![search("a", None), search("b", None)]
        );
        // Queue exhaustion stops the loop with budget to spare.
        assert_eq!(state.budget.issued(), 2);
        assert!(state.rotator.current().is_none());
    }

    #[tokio::test]
    async fn full_page_keeps_term_and_carries_token() {
        let platform = ScriptedPlatform::new()
            .search_page(video_page("p1-", 50, Some("t1")))
            .search_page(video_page("p2-", 50, Some("t2")))
            .search_page(video_page("p3-", 0, None));
        let mut state = state(&["only"], 10);

        let videos = VideoDiscoverer::new(&platform).discover(&mut state).await;

        assert_eq!(videos.len(), 100);
        assert_eq!(
            platform.recorded(),
            vec![
                search("only", None),
                search("only", Some("t1")),
                search("only", Some("t2")),
            ]
        );
    }

    #[tokio::test]
    async fn search_count_never_exceeds_budget() {
        let mut platform = ScriptedPlatform::new();
        for n in 0..20 {
            platform = platform.search_page(video_page("v", 50, Some(format!("t{n}").as_str())));
        }
        let mut state = state(&["a", "b", "c"], 7);

        let videos = VideoDiscoverer::new(&platform).discover(&mut state).await;

        assert_eq!(platform.recorded().len(), 7);
        assert_eq!(state.budget.issued(), 7);
        assert_eq!(videos.len(), 350);
    }

    #[tokio::test]
    async fn failed_search_stops_and_keeps_partial_results() {
        let platform = ScriptedPlatform::new()
            .search_page(video_page("a", 50, Some("t1")))
            .search_failure(500)
            .search_page(video_page("never", 50, Some("t3")));
        let mut state = state(&["a", "b"], 10);

        let videos = VideoDiscoverer::new(&platform).discover(&mut state).await;

        assert_eq!(videos.len(), 50);
        assert_eq!(platform.recorded().len(), 2);
        // The failing request still counts and the term is not advanced.
        assert_eq!(state.budget.issued(), 2);
        assert_eq!(state.rotator.current().map(|t| t.as_str()), Some("a"));
    }

    #[tokio::test]
    async fn non_video_items_are_dropped_in_order() {
        let page = SearchPage {
            items: vec![
                SearchItem::video("v1"),
                SearchItem::other(),
                SearchItem::video("v2"),
                SearchItem::other(),
            ],
            next_page_token: Some(PageToken::new("ignored")),
        };
        let platform = ScriptedPlatform::new().search_page(page);
        let mut state = state(&["a"], 5);

        let videos = VideoDiscoverer::new(&platform).discover(&mut state).await;

        assert_eq!(videos, vec![VideoId::new("v1"), VideoId::new("v2")]);
    }

    #[tokio::test]
    async fn duplicates_across_terms_are_kept() {
        let platform = ScriptedPlatform::new()
            .search_page(video_page("v", 2, None))
            .search_page(video_page("v", 2, None));
        let mut state = state(&["a", "b"], 5);

        let videos = VideoDiscoverer::new(&platform).discover(&mut state).await;

        assert_eq!(
            videos,
            vec![
                VideoId::new("v0"),
                VideoId::new("v1"),
                VideoId::new("v0"),
                VideoId::new("v1"),
            ]
        );
    }

    #[tokio::test]
    async fn spent_budget_issues_no_search() {
        let platform = ScriptedPlatform::new().search_page(video_page("v", 50, Some("t")));
        let mut state = state(&["a"], 0);

        let videos = VideoDiscoverer::new(&platform).discover(&mut state).await;

        assert!(videos.is_empty());
        assert!(platform.recorded().is_empty());
        assert_eq!(state.budget.issued(), 0);
    }

    #[tokio::test]
    async fn no_terms_means_no_requests() {
        let platform = ScriptedPlatform::new();
        let mut state = state(&[], 5);

        let videos = VideoDiscoverer::new(&platform).discover(&mut state).await;

        assert!(videos.is_empty());
        assert!(platform.recorded().is_empty());
    }
}
