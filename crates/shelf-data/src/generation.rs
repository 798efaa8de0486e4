//! Request generations.
//!
//! A view takes a [`RequestTicket`] before each fetch and applies the
//! result only while that ticket is still current. Issuing a newer ticket
//! or closing the generation makes older tickets stale, so late responses
//! are dropped instead of overwriting newer state or touching a view that
//! has been torn down.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

/// Shared, monotonically increasing request counter.
///
/// Clones share the same counter, so a clone can be handed to whatever
/// tears the view down.
#[derive(Debug, Clone, Default)]
pub struct RequestGeneration {
    inner: Arc<GenerationState>,
}

#[derive(Debug, Default)]
struct GenerationState {
    current: AtomicU64,
    closed: AtomicBool,
}

/// Proof that a request was issued at a given generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket {
    generation: u64,
}

impl RequestTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl RequestGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request, superseding every earlier ticket.
    pub fn issue(&self) -> RequestTicket {
        let generation = self.inner.current.fetch_add(1, Ordering::SeqCst) + 1;
        RequestTicket { generation }
    }

    /// Whether a result for `ticket` may still be applied.
    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        !self.is_closed() && self.inner.current.load(Ordering::SeqCst) == ticket.generation
    }

    /// Invalidate every outstanding ticket without issuing a new one.
    pub fn invalidate(&self) {
        self.inner.current.fetch_add(1, Ordering::SeqCst);
    }

    /// Tear down: no ticket, past or future, is current afterwards.
    pub fn close(&self) {
        self.inner.closed.store(true, Ordering::SeqCst);
        self.invalidate();
    }

    pub fn is_closed(&self) -> bool {
        self.inner.closed.load(Ordering::SeqCst)
    }

    /// Generation of the most recently issued ticket.
    pub fn current(&self) -> u64 {
        self.inner.current.load(Ordering::SeqCst)
    }
}
