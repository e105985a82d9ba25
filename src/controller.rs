use crate::error::Error;
use crate::flags::SharedFlags;
use crate::hardware::traits::{Led, RequestEdgeHandler};
use crate::lamps::Lamps;
use crate::latch::{self, LatchOutcome};
use crate::sequencer::Sequencer;
use core::cell::RefCell;
use embassy_sync::blocking_mutex::{Mutex, raw::CriticalSectionRawMutex};
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::InputPin;

/// Owns the state shared by the phase sequencer and the request latch, plus
/// the button pin the latch polls.
///
/// The firmware places one controller in a `static`, hands it to the EXTI
/// binding as its [`RequestEdgeHandler`] and runs a [`Sequencer`] borrowing
/// the same flags from thread mode.
pub struct Controller<B> {
    flags: SharedFlags,
    button: Mutex<CriticalSectionRawMutex, RefCell<B>>,
}

impl<B> Controller<B> {
    pub const fn new(button: B) -> Self {
        Self {
            flags: SharedFlags::new(),
            button: Mutex::new(RefCell::new(button)),
        }
    }

    pub fn flags(&self) -> &SharedFlags {
        &self.flags
    }

    pub fn sequencer<L: Led, D: DelayNs>(&self, lamps: Lamps<L>, delay: D) -> Sequencer<'_, L, D> {
        Sequencer::new(&self.flags, lamps, delay)
    }
}

impl<B: InputPin> Controller<B> {
    /// Runs the request latch once.
    pub fn handle_edge(&self) -> Result<LatchOutcome, Error<B::Error>> {
        self.button
            .lock(|button| latch::on_request_edge(&self.flags, &mut *button.borrow_mut()))
    }
}

impl<B: InputPin> RequestEdgeHandler for Controller<B> {
    fn on_request_edge(&self) {
        // No caller to report to from interrupt context
        if let Err(err) = self.handle_edge() {
            panic!("request latch: {}", err);
        }
    }
}
