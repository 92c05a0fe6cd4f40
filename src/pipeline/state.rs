//! Run-scoped discovery state.

use super::QueryRotator;
use crate::models::{PageToken, SearchConfig};

/// Counter of search requests issued against a fixed maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchBudget {
    issued: u32,
    max: u32,
}

impl SearchBudget {
    pub fn new(max: u32) -> Self {
        Self { issued: 0, max }
    }

    pub fn has_remaining(&self) -> bool {
        self.issued < self.max
    }

    /// Record one request. Returns false, without counting, when already spent.
    #[must_use]
    pub fn consume(&mut self) -> bool {
        if !self.has_remaining() {
            return false;
        }
        self.issued += 1;
        true
    }

    pub fn issued(&self) -> u32 {
        self.issued
    }

    pub fn max(&self) -> u32 {
        self.max
    }
}

/// Mutable state for one discovery run.
///
/// Only the discoverer touches it; the page token always belongs to the
/// rotator's current term.
#[derive(Debug, Clone)]
pub struct RunState {
    pub rotator: QueryRotator,
    pub budget: SearchBudget,
    pub page_token: Option<PageToken>,
}

impl RunState {
    pub fn new(rotator: QueryRotator, budget: SearchBudget) -> Self {
        Self {
            rotator,
            budget,
            page_token: None,
        }
    }

    pub fn from_config(config: &SearchConfig) -> Self {
        Self::new(
            QueryRotator::new(config.terms.iter().cloned()),
            SearchBudget::new(config.max_search_count),
        )
    }

    /// Move to the next term, dropping the old term's page token.
    pub fn rotate(&mut self) -> bool {
        self.page_token = None;
        self.rotator.advance().is_some()
    }
}
