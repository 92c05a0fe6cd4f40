//! Pipeline entry points for commenter operations.
//!
//! - `run_discovery`: Walk search terms and collect candidate videos
//! - `run_pipeline`: Discover, then check and comment on each video in order

pub mod discover;
pub mod gatekeeper;
pub mod pacing;
pub mod rotator;
pub mod run;
pub mod state;

pub use discover::VideoDiscoverer;
pub use gatekeeper::{CommentGatekeeper, Verdict};
pub use pacing::{DelayWindow, Sleeper, TokioSleeper};
pub use rotator::QueryRotator;
pub use run::{Discovery, run_discovery, run_pipeline};
pub use state::{RunState, SearchBudget};
