// src/models/mod.rs

//! Domain models for the commenter application.

mod config;
mod report;
mod video;

// Re-export all public types
pub use config::{
    ACCESS_TOKEN_ENV, API_KEY_ENV, ApiConfig, CheckFailurePolicy, CommentConfig, Config,
    PacingConfig, SearchConfig,
};
pub use report::{PipelineReport, SkipReason};
pub use video::{CommentCheckResult, PageToken, SearchItem, SearchPage, SearchTerm, VideoId};
