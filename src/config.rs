//! Phase timing of the crossing.
//!
//! The iteration counts are calibrated against the blocking millisecond delay,
//! so they stay fixed at build time.

/// Vehicle-green / pedestrian-red hold.
pub const GREEN_HOLD_MS: u32 = 5000;

/// Number of vehicle-yellow flashes before the pedestrian window opens.
pub const YELLOW_FLASH_COUNT: u32 = 10;
/// On-period of each flash. There is no off-period.
pub const YELLOW_FLASH_ON_MS: u32 = 500;

/// Upper bound on pedestrian-green countdown ticks.
pub const COUNTDOWN_MAX_TICKS: u32 = 20;
pub const COUNTDOWN_TICK_MS: u32 = 250;

/// Number of alert rounds after a denied request. Each round blinks the
/// pedestrian-yellow lamp, then the vehicle-yellow lamp.
pub const ALERT_BLINK_COUNT: u32 = 50;
pub const ALERT_BLINK_MS: u32 = 100;

/// Trailing yellow hold on the normal path.
pub const TRAILING_YELLOW_MS: u32 = 5000;

/// Button reads taken by the request latch before giving up on a low level.
pub const CONFIRM_POLL_LIMIT: u32 = 5000;
