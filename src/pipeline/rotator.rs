//! Ordered rotation over search terms.

use std::collections::VecDeque;

use crate::models::SearchTerm;

/// Queue of search terms with one active term.
///
/// The first term becomes active on construction; `advance` drops the
/// active term and activates the next one.
#[derive(Debug, Clone)]
pub struct QueryRotator {
    queue: VecDeque<SearchTerm>,
    current: Option<SearchTerm>,
}

impl QueryRotator {
    /// Build a rotator; blank terms are ignored.
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut queue: VecDeque<SearchTerm> = terms
            .into_iter()
            .map(Into::into)
            .filter(|t: &String| !t.trim().is_empty())
            .map(SearchTerm::new)
            .collect();
        let current = queue.pop_front();
        Self { queue, current }
    }

    /// The active term, or `None` once every term is used up.
    pub fn current(&self) -> Option<&SearchTerm> {
        self.current.as_ref()
    }

    /// Activate the next term. `None` means the queue is exhausted.
    pub fn advance(&mut self) -> Option<&SearchTerm> {
        self.current = self.queue.pop_front();
        self.current.as_ref()
    }

    /// Terms still waiting behind the active one.
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}
