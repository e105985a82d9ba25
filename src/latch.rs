//! The pedestrian request latch, run from the button's EXTI interrupt.
//!
//! A button edge only counts while a crossing is in progress. The latch then
//! polls the button pin in a tight loop: seeing the pin low within the poll
//! confirms the request, a pin held high for the whole poll withdraws it.
//! The levels are taken as read from the pin, with the board's pull-down
//! wiring, and are not inverted.

use crate::config::CONFIRM_POLL_LIMIT;
use crate::error::Error;
use crate::flags::{RequestOutcome, SharedFlags};
use embedded_hal::digital::InputPin;

/// What a single latch invocation did to the shared flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LatchOutcome {
    /// The request was already granted in this window; it is now denied.
    Consumed,
    /// No crossing in progress, nothing changed.
    Idle,
    /// The pin went low within the poll.
    Granted,
    /// The pin stayed high for every read; the crossing is no longer active.
    Withdrawn,
}

/// Reads `button` up to `limit` times and stops at the first low level.
/// Returns how many reads that took, or `None` if every read was high.
pub fn poll_for_low<B: InputPin>(button: &mut B, limit: u32) -> Result<Option<u32>, B::Error> {
    for read in 1..=limit {
        if button.is_low()? {
            return Ok(Some(read));
        }
    }
    Ok(None)
}

pub fn on_request_edge<B: InputPin>(
    flags: &SharedFlags,
    button: &mut B,
) -> Result<LatchOutcome, Error<B::Error>> {
    if flags.consume_grant() {
        debug!("latch: grant already consumed, request denied");
        return Ok(LatchOutcome::Consumed);
    }
    if !flags.crossing_active() {
        trace!("latch: no crossing in progress");
        return Ok(LatchOutcome::Idle);
    }

    // Denied until the poll says otherwise
    flags.set_alert_mode(false);

    match poll_for_low(button, CONFIRM_POLL_LIMIT).map_err(Error::Button)? {
        Some(reads) => {
            flags.set_alert_mode(true);
            flags.set_crossing_permitted(RequestOutcome::Granted);
            debug!("latch: request granted after {} reads", reads);
            Ok(LatchOutcome::Granted)
        }
        None => {
            flags.set_crossing_active(false);
            warn!(
                "latch: button held for {} reads, request withdrawn",
                CONFIRM_POLL_LIMIT
            );
            Ok(LatchOutcome::Withdrawn)
        }
    }
}
