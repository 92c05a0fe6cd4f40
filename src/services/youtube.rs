// src/services/youtube.rs

//! YouTube Data API v3 client.
//!
//! Reads (search, comment listing) authenticate with the API key; creating a
//! comment thread needs the OAuth bearer token.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};

use super::VideoPlatform;
use crate::error::Result;
use crate::models::{ApiConfig, PageToken, SearchItem, SearchPage, SearchTerm, VideoId};
use crate::utils::http;

/// Results requested per search page.
pub const SEARCH_PAGE_SIZE: usize = 50;

/// HTTP client for the data API endpoints the pipeline uses.
pub struct YouTubeClient {
    client: Client,
    base_url: String,
    api_key: String,
    access_token: String,
}

impl YouTubeClient {
    /// Create a client from API settings.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = http::create_async_client(config)?;
        Ok(Self::with_client(client, config))
    }

    /// Create a client reusing an existing `reqwest::Client`.
    pub fn with_client(client: Client, config: &ApiConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            access_token: config.access_token.clone(),
        }
    }

    fn endpoint(&self, resource: &str) -> String {
        format!("{}/{}", self.base_url, resource)
    }

    fn search_request(
        &self,
        term: &SearchTerm,
        page_token: Option<&PageToken>,
    ) -> RequestBuilder {
        let page_size = SEARCH_PAGE_SIZE.to_string();
        let mut query = vec![
            ("part", "snippet"),
            ("q", term.as_str()),
            ("order", "date"),
            ("maxResults", page_size.as_str()),
            ("key", self.api_key.as_str()),
        ];
        if let Some(token) = page_token {
            query.push(("pageToken", token.as_str()));
        }

        self.client.get(self.endpoint("search")).query(&query)
    }

    fn marker_check_request(&self, video: &VideoId, marker: &str) -> RequestBuilder {
        self.client
            .get(self.endpoint("commentThreads"))
            .query(&[
                ("part", "id"),
                ("videoId", video.as_str()),
                ("searchTerms", marker),
                ("maxResults", "1"),
                ("key", self.api_key.as_str()),
            ])
    }

    fn insert_request(&self, video: &VideoId, text: &str) -> RequestBuilder {
        self.client
            .post(self.endpoint("commentThreads"))
            .query(&[("part", "snippet")])
            .bearer_auth(&self.access_token)
            .json(&CommentThreadInsert::new(video, text))
    }
}

#[async_trait]
impl VideoPlatform for YouTubeClient {
    async fn search_videos(
        &self,
        term: &SearchTerm,
        page_token: Option<&PageToken>,
    ) -> Result<SearchPage> {
        let response = self.search_request(term, page_token).send().await?;
        let body: SearchListResponse = http::error_for_status(response).await?.json().await?;
        Ok(body.into())
    }

    async fn count_marker_threads(&self, video: &VideoId, marker: &str) -> Result<u64> {
        let response = self.marker_check_request(video, marker).send().await?;
        let body: CommentThreadListResponse =
            http::error_for_status(response).await?.json().await?;
        Ok(body.page_info.total_results)
    }

    async fn create_comment_thread(&self, video: &VideoId, text: &str) -> Result<()> {
        let response = self.insert_request(video, text).send().await?;
        http::error_for_status(response).await?;
        Ok(())
    }
}

// --- Wire types ---

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchListResponse {
    #[serde(default)]
    next_page_token: Option<String>,
    #[serde(default)]
    items: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    #[serde(default)]
    id: ResourceId,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResourceId {
    #[serde(default)]
    video_id: Option<String>,
}

impl From<SearchListResponse> for SearchPage {
    fn from(response: SearchListResponse) -> Self {
        Self {
            items: response
                .items
                .into_iter()
                .map(|item| SearchItem {
                    video_id: item.id.video_id.map(VideoId::new),
                })
                .collect(),
            next_page_token: response.next_page_token.map(PageToken::new),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommentThreadListResponse {
    #[serde(default)]
    page_info: PageInfo,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageInfo {
    #[serde(default)]
    total_results: u64,
}

#[derive(Debug, Serialize)]
struct CommentThreadInsert<'a> {
    snippet: ThreadSnippet<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ThreadSnippet<'a> {
    video_id: &'a str,
    top_level_comment: TopLevelComment<'a>,
}

#[derive(Debug, Serialize)]
struct TopLevelComment<'a> {
    snippet: CommentSnippet<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CommentSnippet<'a> {
    text_original: &'a str,
}

impl<'a> CommentThreadInsert<'a> {
    fn new(video: &'a VideoId, text: &'a str) -> Self {
        Self {
            snippet: ThreadSnippet {
                video_id: video.as_str(),
                top_level_comment: TopLevelComment {
                    snippet: CommentSnippet {
                        text_original: text,
                    },
                },
            },
        }
    }
}
