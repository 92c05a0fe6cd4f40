//! Service layer for the commenter application.
//!
//! This module contains the collaborators the pipeline talks to:
//! - The platform seam (`VideoPlatform`) and its YouTube Data API client
//! - Comment text generation (`CommentComposer`)

mod composer;
mod platform;
mod youtube;

pub use composer::{CommentComposer, TemplateComposer};
pub use platform::VideoPlatform;
pub use youtube::{SEARCH_PAGE_SIZE, YouTubeClient};
