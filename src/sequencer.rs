//! The phase sequencer: the main loop of the controller.
//!
//! One cycle runs these phases:
//!
//! 1. Vehicle green and pedestrian red, held for [`GREEN_HOLD_MS`].
//! 2. Vehicle and pedestrian yellow flashing. A button edge here denies the
//!    request and cuts the flashing short.
//! 3. Pedestrian-green countdown. This is the request window in which the
//!    latch grants or withdraws the request.
//! 4. The window closes.
//! 5. Flash alert after a denied or withdrawn request, trailing yellow
//!    otherwise.
//!
//! All waits are blocking. The latch interrupt keeps firing during them and
//! the sequencer only observes its effect through [`SharedFlags`] between
//! statements.

use crate::config::*;
use crate::error::{Error, LampId};
use crate::flags::{RequestOutcome, SharedFlags};
use crate::hardware::traits::Led;
use crate::lamps::Lamps;
use core::convert::Infallible;
use embedded_hal::delay::DelayNs;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CycleEnding {
    FlashAlert,
    TrailingYellow,
}

/// What happened during one full cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CycleReport {
    /// Yellow flashes shown in phase 2.
    pub flashes: u32,
    /// A button edge denied the request during phase 2.
    pub flash_denied: bool,
    /// Countdown ticks run in phase 3.
    pub countdown_ticks: u32,
    pub ending: CycleEnding,
}

pub struct Sequencer<'a, L, D> {
    flags: &'a SharedFlags,
    lamps: Lamps<L>,
    delay: D,
}

impl<'a, L: Led, D: DelayNs> Sequencer<'a, L, D> {
    pub fn new(flags: &'a SharedFlags, lamps: Lamps<L>, delay: D) -> Self {
        Self {
            flags,
            lamps,
            delay,
        }
    }

    pub fn flags(&self) -> &'a SharedFlags {
        self.flags
    }

    /// Runs cycles until a lamp fails.
    pub fn run(&mut self) -> Result<Infallible, Error<L::Error>> {
        info!("sequencer: running");
        loop {
            self.run_cycle()?;
        }
    }

    pub fn run_cycle(&mut self) -> Result<CycleReport, Error<L::Error>> {
        self.vehicle_green()?;

        let (flashes, flash_denied) = if self.flags.crossing_permitted() != RequestOutcome::Denied {
            self.vehicle_yellow_flash()?
        } else {
            (0, false)
        };

        let countdown_ticks = self.pedestrian_countdown()?;
        self.close_window();

        let ending = if self.flags.alert_mode() {
            self.trailing_yellow()?;
            CycleEnding::TrailingYellow
        } else {
            self.flash_alert()?;
            self.flags.set_alert_mode(true);
            CycleEnding::FlashAlert
        };

        let report = CycleReport {
            flashes,
            flash_denied,
            countdown_ticks,
            ending,
        };
        info!(
            "cycle: {} flashes, {} countdown ticks, ending {}",
            report.flashes, report.countdown_ticks, report.ending
        );
        Ok(report)
    }

    /// Phase 1. Leaves the request pending.
    pub fn vehicle_green(&mut self) -> Result<(), Error<L::Error>> {
        debug!("phase: vehicle green");
        self.lamps
            .set_pair(LampId::VehicleGreen, LampId::PedestrianRed, true)?;
        self.delay.delay_ms(GREEN_HOLD_MS);
        self.lamps
            .set_pair(LampId::PedestrianRed, LampId::VehicleGreen, false)?;

        self.flags.set_crossing_permitted(RequestOutcome::Pending);
        Ok(())
    }

    /// Phase 2. Vehicles hold the right of way while it runs, so the request
    /// is armed as granted and the latch consumes any edge into a denial.
    ///
    /// Returns the number of flashes shown and whether a denial stopped them.
    pub fn vehicle_yellow_flash(&mut self) -> Result<(u32, bool), Error<L::Error>> {
        debug!("phase: vehicle yellow flash");
        self.flags.set_crossing_permitted(RequestOutcome::Granted);

        let mut flashes = 0;
        while flashes < YELLOW_FLASH_COUNT {
            self.lamps
                .set_pair(LampId::VehicleYellow, LampId::PedestrianYellow, true)?;
            self.delay.delay_ms(YELLOW_FLASH_ON_MS);
            self.lamps
                .set_pair(LampId::VehicleYellow, LampId::PedestrianYellow, false)?;
            flashes += 1;

            if self.flags.crossing_permitted() == RequestOutcome::Denied {
                self.flags.set_alert_mode(false);
                info!("phase: request denied after {} flashes", flashes);
                return Ok((flashes, true));
            }
        }
        Ok((flashes, false))
    }

    /// Phase 3. Skipped when phase 2 denied the request. Every tick re-arms the
    /// request and the countdown stops as soon as the latch resolves it or the
    /// crossing is withdrawn.
    ///
    /// Returns the number of ticks run.
    pub fn pedestrian_countdown(&mut self) -> Result<u32, Error<L::Error>> {
        self.flags.set_crossing_active(true);
        if self.flags.crossing_permitted() == RequestOutcome::Denied {
            return Ok(0);
        }

        debug!("phase: pedestrian countdown");
        let mut ticks = 0;
        loop {
            self.flags.set_crossing_permitted(RequestOutcome::Pending);
            self.lamps
                .set_pair(LampId::PedestrianGreen, LampId::VehicleRed, true)?;
            self.delay.delay_ms(COUNTDOWN_TICK_MS);
            self.lamps
                .set_pair(LampId::PedestrianGreen, LampId::VehicleRed, false)?;
            ticks += 1;

            if ticks >= COUNTDOWN_MAX_TICKS || !self.flags.window_open() {
                break;
            }
        }
        Ok(ticks)
    }

    /// Phase 4. After this the latch ignores edges until the next countdown,
    /// except for consuming a grant left over from the window.
    pub fn close_window(&mut self) {
        self.flags.set_crossing_active(false);
        self.flags.set_crossing_permitted(RequestOutcome::Pending);
    }

    /// Phase 5 after a denied or withdrawn request.
    pub fn flash_alert(&mut self) -> Result<(), Error<L::Error>> {
        debug!("phase: flash alert");
        for _ in 0..ALERT_BLINK_COUNT {
            self.lamps
                .blink_once(LampId::PedestrianYellow, &mut self.delay, ALERT_BLINK_MS)?;
            self.lamps
                .blink_once(LampId::VehicleYellow, &mut self.delay, ALERT_BLINK_MS)?;
        }
        Ok(())
    }

    /// Phase 5 on the normal path.
    pub fn trailing_yellow(&mut self) -> Result<(), Error<L::Error>> {
        debug!("phase: trailing yellow");
        self.lamps
            .set_pair(LampId::PedestrianYellow, LampId::VehicleYellow, true)?;
        self.delay.delay_ms(TRAILING_YELLOW_MS);
        self.lamps
            .set_pair(LampId::PedestrianYellow, LampId::VehicleYellow, false)
    }

    pub fn release(self) -> (Lamps<L>, D) {
        (self.lamps, self.delay)
    }
}
