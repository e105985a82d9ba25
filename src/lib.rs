//! Pedestrian crossing controller for the STM32F103C8 "Blue Pill".
//!
//! Six LEDs (vehicle and pedestrian red/yellow/green) run a fixed cycle from
//! the thread-mode [`Sequencer`]. A pushbutton on EXTI line 4 drives the
//! request latch from interrupt context. The two only talk through
//! [`SharedFlags`].
//!
//! Everything except `hardware::exti` is hardware-agnostic and built on
//! `embedded-hal` traits, so the state machine runs on the host under test.

#![cfg_attr(not(test), no_std)]

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

pub mod config;
pub mod controller;
pub mod error;
pub mod flags;
pub mod hardware;
pub mod lamps;
pub mod latch;
pub mod sequencer;

pub use controller::Controller;
pub use error::{Error, LampId};
pub use flags::{RequestOutcome, SharedFlags};
pub use lamps::{Lamps, Signal};
pub use latch::LatchOutcome;
pub use sequencer::{CycleEnding, CycleReport, Sequencer};
