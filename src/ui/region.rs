//! Owned render sinks.
//!
//! A [`Region`] is written by exactly one controller. Each fetch cycle starts
//! with [`Region::begin`], which clears the view and hands out a
//! [`RenderTicket`]; only the most recently issued ticket may render, so a slow
//! response can never overwrite a newer one.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::debug;

/// A view that can be reset to its empty state.
pub trait View: Clone {
    fn clear(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Fetching,
    Rendered,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderTicket(u64);

struct RegionState<V> {
    view: V,
    issued: u64,
    phase: Phase,
}

pub struct Region<V> {
    name: &'static str,
    state: Mutex<RegionState<V>>,
}

impl<V: View> Region<V> {
    pub fn new(name: &'static str, view: V) -> Self {
        Self {
            name,
            state: Mutex::new(RegionState {
                view,
                issued: 0,
                phase: Phase::Idle,
            }),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Clear the view and start a new cycle.
    pub fn begin(&self) -> RenderTicket {
        let mut state = self.lock();
        state.issued += 1;
        state.view.clear();
        state.phase = Phase::Fetching;
        RenderTicket(state.issued)
    }

    pub fn is_current(&self, ticket: RenderTicket) -> bool {
        self.lock().issued == ticket.0
    }

    /// Render into the view if `ticket` is still the latest one issued.
    pub fn commit(&self, ticket: RenderTicket, render: impl FnOnce(&mut V)) -> bool {
        let mut state = self.lock();
        if state.issued != ticket.0 {
            debug!(
                region = self.name,
                stale = ticket.0,
                latest = state.issued,
                "Discarding stale response"
            );
            return false;
        }
        render(&mut state.view);
        state.phase = Phase::Rendered;
        true
    }

    /// Mark the cycle failed; the view stays as `begin` left it.
    pub fn fail(&self, ticket: RenderTicket) -> bool {
        self.fail_with(ticket, |_| {})
    }

    /// Mark the cycle failed after rendering an inline failure.
    pub fn fail_with(&self, ticket: RenderTicket, render: impl FnOnce(&mut V)) -> bool {
        let mut state = self.lock();
        if state.issued != ticket.0 {
            return false;
        }
        render(&mut state.view);
        state.phase = Phase::Failed;
        true
    }

    /// Apply a local change that is not part of a fetch cycle.
    pub fn update<R>(&self, change: impl FnOnce(&mut V) -> R) -> R {
        change(&mut self.lock().view)
    }

    pub fn snapshot(&self) -> V {
        self.lock().view.clone()
    }

    pub fn phase(&self) -> Phase {
        self.lock().phase
    }

    fn lock(&self) -> MutexGuard<'_, RegionState<V>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
