//! State shared between the phase sequencer (thread mode) and the request
//! latch (EXTI interrupt).
//!
//! The target is a single-core Cortex-M3 with one interrupt source touching
//! these fields, so relaxed atomics are enough: every access is a single
//! atomic operation that cannot tear, and the compiler may not cache it across
//! the preemption point. The latch always runs to completion, which
//! means the sequencer has to tolerate any field changing between two of its
//! statements.

use core::sync::atomic::{AtomicBool, AtomicU8, Ordering};

/// Resolution of the pedestrian request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum RequestOutcome {
    Denied = 0,
    Pending = 1,
    Granted = 2,
}

impl RequestOutcome {
    const fn from_bits(bits: u8) -> Self {
        match bits {
            0 => RequestOutcome::Denied,
            2 => RequestOutcome::Granted,
            _ => RequestOutcome::Pending,
        }
    }
}

pub struct SharedFlags {
    crossing_permitted: AtomicU8,
    alert_mode: AtomicBool,
    crossing_active: AtomicBool,
}

impl SharedFlags {
    pub const fn new() -> Self {
        Self {
            crossing_permitted: AtomicU8::new(RequestOutcome::Pending as u8),
            alert_mode: AtomicBool::new(true),
            crossing_active: AtomicBool::new(false),
        }
    }

    pub fn crossing_permitted(&self) -> RequestOutcome {
        RequestOutcome::from_bits(self.crossing_permitted.load(Ordering::Relaxed))
    }

    pub fn set_crossing_permitted(&self, outcome: RequestOutcome) {
        self.crossing_permitted
            .store(outcome as u8, Ordering::Relaxed);
    }

    /// Turns a `Granted` outcome into `Denied` in one step. Returns `true` if
    /// the outcome was `Granted`, otherwise leaves it untouched.
    pub fn consume_grant(&self) -> bool {
        self.crossing_permitted
            .compare_exchange(
                RequestOutcome::Granted as u8,
                RequestOutcome::Denied as u8,
                Ordering::Relaxed,
                Ordering::Relaxed,
            )
            .is_ok()
    }

    /// `false` selects the flash-alert ending of the current cycle.
    pub fn alert_mode(&self) -> bool {
        self.alert_mode.load(Ordering::Relaxed)
    }

    pub fn set_alert_mode(&self, alert_mode: bool) {
        self.alert_mode.store(alert_mode, Ordering::Relaxed);
    }

    /// Only while this is set does a button edge count as a live request.
    pub fn crossing_active(&self) -> bool {
        self.crossing_active.load(Ordering::Relaxed)
    }

    pub fn set_crossing_active(&self, active: bool) {
        self.crossing_active.store(active, Ordering::Relaxed);
    }

    /// Countdown continuation: the crossing is in progress and the request
    /// re-armed at the start of the tick is still unresolved.
    pub fn window_open(&self) -> bool {
        self.crossing_active() && self.crossing_permitted() == RequestOutcome::Pending
    }
}

impl Default for SharedFlags {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_pending_with_alert_mode_set_and_no_crossing() {
        let flags = SharedFlags::new();
        assert_eq!(flags.crossing_permitted(), RequestOutcome::Pending);
        assert!(flags.alert_mode());
        assert!(!flags.crossing_active());
        assert!(!flags.window_open());
    }

    #[test]
    fn outcome_keeps_its_wire_values() {
        assert_eq!(RequestOutcome::Denied as u8, 0);
        assert_eq!(RequestOutcome::Pending as u8, 1);
        assert_eq!(RequestOutcome::Granted as u8, 2);
        for outcome in [
            RequestOutcome::Denied,
            RequestOutcome::Pending,
            RequestOutcome::Granted,
        ] {
            let flags = SharedFlags::new();
            flags.set_crossing_permitted(outcome);
            assert_eq!(flags.crossing_permitted(), outcome);
        }
    }

    #[test]
    fn consume_grant_only_fires_once() {
        let flags = SharedFlags::new();
        assert!(!flags.consume_grant());
        assert_eq!(flags.crossing_permitted(), RequestOutcome::Pending);

        flags.set_crossing_permitted(RequestOutcome::Granted);
        assert!(flags.consume_grant());
        assert_eq!(flags.crossing_permitted(), RequestOutcome::Denied);
        assert!(!flags.consume_grant());
        assert_eq!(flags.crossing_permitted(), RequestOutcome::Denied);
    }

    #[test]
    fn window_needs_active_crossing_and_pending_request() {
        let flags = SharedFlags::new();
        flags.set_crossing_active(true);
        assert!(flags.window_open());

        flags.set_crossing_permitted(RequestOutcome::Granted);
        assert!(!flags.window_open());
        flags.set_crossing_permitted(RequestOutcome::Denied);
        assert!(!flags.window_open());

        flags.set_crossing_permitted(RequestOutcome::Pending);
        flags.set_crossing_active(false);
        assert!(!flags.window_open());
    }
}
