//! Latest-wins coordination for as-you-type search.
//!
//! Each keystroke starts a new search. A search waits out the debounce
//! delay, then runs only if nothing newer has started; its result is
//! returned only if nothing newer started while it was in flight. The
//! displayed results therefore always belong to the most recent input, no
//! matter in which order responses arrive.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::error::Result;

/// Generation counter shared by every search issued from one input box.
#[derive(Clone, Debug)]
pub struct SearchGate {
    generation: Arc<AtomicU64>,
    debounce: Duration,
}

/// Identifies one search within its gate.
#[derive(Clone, Debug)]
pub struct SearchTicket {
    id: u64,
    generation: Arc<AtomicU64>,
}

impl SearchTicket {
    /// True while no newer search has begun.
    pub fn is_current(&self) -> bool {
        self.generation.load(Ordering::Acquire) == self.id
    }
}

impl SearchGate {
    pub fn new(debounce: Duration) -> Self {
        Self {
            generation: Arc::new(AtomicU64::new(0)),
            debounce,
        }
    }

    pub fn debounce(&self) -> Duration {
        self.debounce
    }

    /// Starts a new search, superseding every earlier one.
    pub fn begin(&self) -> SearchTicket {
        let id = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        SearchTicket {
            id,
            generation: self.generation.clone(),
        }
    }

    /// Supersedes in-flight searches without starting a new one, e.g. when
    /// the input is cleared.
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
    }

    /// Debounces and runs `search`, discarding stale outcomes.
    ///
    /// # Returns
    ///
    /// `Ok(None)` when a newer search began before this one finished,
    /// including when it was superseded during the debounce delay (in which
    /// case `search` is never called). Errors of stale searches are
    /// discarded too.
    pub async fn run<F, Fut, T>(&self, search: F) -> Result<Option<T>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let ticket = self.begin();

        if !self.debounce.is_zero() {
            tokio::time::sleep(self.debounce).await;
        }
        if !ticket.is_current() {
            tracing::debug!("⏭️ Search {} superseded before sending", ticket.id);
            return Ok(None);
        }

        let outcome = search().await;
        if !ticket.is_current() {
            tracing::debug!("⏭️ Discarding stale search {}", ticket.id);
            return Ok(None);
        }

        outcome.map(Some)
    }
}
