//! Time source
//!
//! All scheduling decisions compare stored absolute times against the value
//! sampled from a [`Clock`] once per tick.

use core::cell::Cell;

/// Milliseconds on the monotonic clock
pub type Millis = u64;

/// Monotonic millisecond clock
pub trait Clock {
    /// Current time in milliseconds
    ///
    /// Successive calls must never go backwards.
    fn now_ms(&self) -> Millis;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> Millis {
        (**self).now_ms()
    }
}

/// Clock advanced explicitly by its owner
///
/// Used by simulators and tests to drive time without real delays. Shared
/// by reference, so the loop owner can advance it while the scheduler reads
/// it.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Millis>,
}

impl ManualClock {
    /// Create a clock starting at `start_ms`
    pub const fn new(start_ms: Millis) -> Self {
        Self {
            now: Cell::new(start_ms),
        }
    }

    /// Move time forward by `delta_ms`
    pub fn advance(&self, delta_ms: Millis) {
        self.now.set(self.now.get().saturating_add(delta_ms));
    }

    /// Jump to an absolute time
    ///
    /// Times earlier than the current value are ignored.
    pub fn set(&self, now_ms: Millis) {
        if now_ms > self.now.get() {
            self.now.set(now_ms);
        }
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> Millis {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_advance() {
        let clock = ManualClock::new(100);
        assert_eq!(clock.now_ms(), 100);
        clock.advance(25);
        assert_eq!(clock.now_ms(), 125);
    }

    #[test]
    fn test_manual_clock_never_goes_back() {
        let clock = ManualClock::new(500);
        clock.set(200);
        assert_eq!(clock.now_ms(), 500);
        clock.set(800);
        assert_eq!(clock.now_ms(), 800);
    }

    #[test]
    fn test_clock_by_reference() {
        let clock = ManualClock::new(0);
        let shared = &clock;
        clock.advance(10);
        assert_eq!(shared.now_ms(), 10);
    }
}
