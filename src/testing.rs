//! Scripted platform and sleeper for pipeline tests.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::error::{AppError, Result};
use crate::models::{PageToken, SearchItem, SearchPage, SearchTerm, VideoId};
use crate::pipeline::Sleeper;
use crate::services::{CommentComposer, VideoPlatform};

/// Everything the pipeline did, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Search { term: String, token: Option<String> },
    Check(String),
    Post(String),
    Sleep(Duration),
}

pub type EventLog = Arc<Mutex<Vec<Event>>>;

/// Scripted reply to a marker check.
#[derive(Debug, Clone, Copy)]
pub enum CheckReply {
    Count(u64),
    Forbidden,
    ServerError,
}

/// Scripted reply to a search request.
pub enum SearchReply {
    Page(SearchPage),
    Fail(u16),
}

#[derive(Default)]
pub struct ScriptedPlatform {
    searches: Mutex<VecDeque<SearchReply>>,
    checks: HashMap<String, CheckReply>,
    failing_posts: HashSet<String>,
    events: EventLog,
}

impl ScriptedPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search_page(self, page: SearchPage) -> Self {
        self.push_search(SearchReply::Page(page))
    }

    pub fn search_failure(self, status: u16) -> Self {
        self.push_search(SearchReply::Fail(status))
    }

    fn push_search(self, reply: SearchReply) -> Self {
        self.searches
            .lock()
            .expect("search script lock")
            .push_back(reply);
        self
    }

    pub fn check(mut self, video: &str, reply: CheckReply) -> Self {
        self.checks.insert(video.to_string(), reply);
        self
    }

    pub fn failing_post(mut self, video: &str) -> Self {
        self.failing_posts.insert(video.to_string());
        self
    }

    pub fn events(&self) -> EventLog {
        Arc::clone(&self.events)
    }

    pub fn recorded(&self) -> Vec<Event> {
        self.events.lock().expect("event log lock").clone()
    }

    fn record(&self, event: Event) {
        self.events.lock().expect("event log lock").push(event);
    }
}

#[async_trait]
impl VideoPlatform for ScriptedPlatform {
    async fn search_videos(
        &self,
        term: &SearchTerm,
        page_token: Option<&PageToken>,
    ) -> Result<SearchPage> {
        self.record(Event::Search {
            term: term.to_string(),
            token: page_token.map(|t| t.to_string()),
        });
        let reply = self
            .searches
            .lock()
            .expect("search script lock")
            .pop_front();
        match reply {
            Some(SearchReply::Page(page)) => Ok(page),
            Some(SearchReply::Fail(status)) => Err(AppError::api(status, "search failed")),
            None => Ok(SearchPage::default()),
        }
    }

    async fn count_marker_threads(&self, video: &VideoId, _marker: &str) -> Result<u64> {
        self.record(Event::Check(video.to_string()));
        match self.checks.get(video.as_str()).copied() {
            Some(CheckReply::Count(n)) => Ok(n),
            Some(CheckReply::Forbidden) => Err(AppError::api(403, r#"{"error":"forbidden"}"#)),
            Some(CheckReply::ServerError) => Err(AppError::api(500, r#"{"error":"backend"}"#)),
            None => Ok(0),
        }
    }

    async fn create_comment_thread(&self, video: &VideoId, _text: &str) -> Result<()> {
        self.record(Event::Post(video.to_string()));
        if self.failing_posts.contains(video.as_str()) {
            return Err(AppError::api(400, r#"{"error":"processingFailure"}"#));
        }
        Ok(())
    }
}

/// Records sleeps into a shared event log without waiting.
pub struct RecordingSleeper {
    events: EventLog,
}

impl RecordingSleeper {
    pub fn new(events: EventLog) -> Self {
        Self { events }
    }
}

#[async_trait]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.events
            .lock()
            .expect("event log lock")
            .push(Event::Sleep(duration));
    }
}

/// Always produces the same text.
pub struct FixedComposer(pub &'static str);

impl CommentComposer for FixedComposer {
    fn compose(&self) -> String {
        self.0.to_string()
    }
}

/// A page of `count` videos named `{prefix}{n}`.
pub fn video_page(prefix: &str, count: usize, token: Option<&str>) -> SearchPage {
    SearchPage {
        items: (0..count)
            .map(|n| SearchItem::video(format!("{prefix}{n}")))
            .collect(),
        next_page_token: token.map(PageToken::new),
    }
}

pub fn ids(values: &[&str]) -> Vec<VideoId> {
    values.iter().copied().map(VideoId::new).collect()
}
