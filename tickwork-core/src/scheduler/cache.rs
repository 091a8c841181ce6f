//! Deferred one-shot actions
//!
//! The action cache holds actions bound to absolute fire times, ordered by
//! fire time with ties kept in insertion order. It is drained once per tick:
//! everything due fires exactly once, in order, and nothing fires early.
//! Clearing the cache is the only form of cancellation.

use core::fmt;

use heapless::Vec;

use crate::actions::{ActionId, ActionTable};
use crate::traits::Millis;

/// Maximum number of pending actions
pub const ACTION_CACHE_CAPACITY: usize = 16;

/// A one-shot action waiting for its fire time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PendingAction {
    action: ActionId,
    fire_at_ms: Millis,
}

impl PendingAction {
    /// Bind an action to an absolute fire time
    pub const fn new(action: ActionId, fire_at_ms: Millis) -> Self {
        Self { action, fire_at_ms }
    }

    /// The deferred action
    pub fn action(&self) -> ActionId {
        self.action
    }

    /// Absolute fire time
    pub fn fire_at_ms(&self) -> Millis {
        self.fire_at_ms
    }

    /// Check whether the action may fire at `now_ms`
    pub fn is_due(&self, now_ms: Millis) -> bool {
        self.fire_at_ms <= now_ms
    }
}

/// Errors that can occur when deferring an action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActionCacheError {
    /// Every slot is occupied
    Full,
}

impl fmt::Display for ActionCacheError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionCacheError::Full => write!(f, "action cache full ({ACTION_CACHE_CAPACITY} slots)"),
        }
    }
}

/// Time-ordered queue of deferred one-shot actions
#[derive(Debug, Clone, Default)]
pub struct ActionCache {
    /// Sorted by fire time, stable for ties
    entries: Vec<PendingAction, ACTION_CACHE_CAPACITY>,
}

impl ActionCache {
    /// Create an empty cache
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Defer `action` to `offset_ms` after `now_ms`
    ///
    /// Negative offsets are accepted and make the action due on the next
    /// drain. Returns the absolute fire time.
    pub fn enqueue(
        &mut self,
        action: ActionId,
        now_ms: Millis,
        offset_ms: i64,
    ) -> Result<Millis, ActionCacheError> {
        let fire_at_ms = now_ms.saturating_add_signed(offset_ms);
        self.insert(PendingAction::new(action, fire_at_ms))?;
        Ok(fire_at_ms)
    }

    /// Insert an already-timed action
    pub fn insert(&mut self, pending: PendingAction) -> Result<(), ActionCacheError> {
        // After every entry with the same fire time, so ties keep insertion order
        let index = self
            .entries
            .iter()
            .position(|entry| entry.fire_at_ms > pending.fire_at_ms)
            .unwrap_or(self.entries.len());

        self.entries.insert(index, pending).map_err(|_| {
            warn!("action cache full, dropping {}", pending.action.name());
            ActionCacheError::Full
        })?;

        trace!(
            "deferred {} to {} ms",
            pending.action.name(),
            pending.fire_at_ms
        );
        Ok(())
    }

    /// Discard every pending action
    ///
    /// Returns the number of actions discarded. They will never fire.
    pub fn clear(&mut self) -> usize {
        let discarded = self.entries.len();
        self.entries.clear();
        if discarded > 0 {
            debug!("cleared {} pending actions", discarded);
        }
        discarded
    }

    /// Remove every action due at `now_ms`, in order, handing each to `fire`
    ///
    /// Each action is handed over before the next is examined. Returns the
    /// number of actions removed.
    pub fn drain_due<F>(&mut self, now_ms: Millis, mut fire: F) -> usize
    where
        F: FnMut(PendingAction),
    {
        let mut fired = 0;
        while self
            .entries
            .first()
            .is_some_and(|entry| entry.is_due(now_ms))
        {
            let pending = self.entries.remove(0);
            fire(pending);
            fired += 1;
        }
        fired
    }

    /// Run every action due at `now_ms` against `robot`
    ///
    /// Safe to call every tick, including when empty. Returns the number of
    /// actions run.
    pub fn tick<R: ?Sized>(
        &mut self,
        now_ms: Millis,
        actions: &ActionTable<'_, R>,
        robot: &mut R,
    ) -> usize {
        self.drain_due(now_ms, |pending| {
            debug!(
                "firing {} (due {} ms, now {} ms)",
                pending.action.name(),
                pending.fire_at_ms,
                now_ms
            );
            actions.run(pending.action, robot);
        })
    }

    /// Number of pending actions
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing is pending
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check if no more actions can be deferred
    pub fn is_full(&self) -> bool {
        self.entries.is_full()
    }

    /// Fire time of the earliest pending action
    pub fn next_fire_time(&self) -> Option<Millis> {
        self.entries.first().map(PendingAction::fire_at_ms)
    }

    /// Pending actions in firing order
    pub fn iter(&self) -> core::slice::Iter<'_, PendingAction> {
        self.entries.iter()
    }
}
