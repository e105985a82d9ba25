#![allow(dead_code)]

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorKind, ErrorType, InputPin, OutputPin};
use pedestrian_crossing::hardware::gpio_led::GpioLed;
use pedestrian_crossing::hardware::traits::RequestEdgeHandler;
use pedestrian_crossing::{Lamps, Signal};

/// Output pin that counts how often it was driven high.
#[derive(Default)]
pub struct FakePin {
    pub high: bool,
    pub rises: u32,
    pub fail: bool,
}

impl FakePin {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
}

impl ErrorType for FakePin {
    type Error = ErrorKind;
}

impl OutputPin for FakePin {
    fn set_low(&mut self) -> Result<(), ErrorKind> {
        if self.fail {
            return Err(ErrorKind::Other);
        }
        self.high = false;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), ErrorKind> {
        if self.fail {
            return Err(ErrorKind::Other);
        }
        if !self.high {
            self.rises += 1;
        }
        self.high = true;
        Ok(())
    }
}

pub type FakeLamps = Lamps<GpioLed<FakePin>>;

pub fn lamps() -> FakeLamps {
    Lamps::new(
        Signal::new(led(), led(), led()),
        Signal::new(led(), led(), led()),
    )
}

fn led() -> GpioLed<FakePin> {
    GpioLed::new(FakePin::default())
}

/// Pin states of every lamp after a run, for assertions.
pub struct LampLog {
    pub vehicle: [FakePin; 3],
    pub pedestrian: [FakePin; 3],
}

impl LampLog {
    pub fn from(lamps: FakeLamps) -> Self {
        let (vehicle, pedestrian) = lamps.release();
        Self {
            vehicle: pins(vehicle),
            pedestrian: pins(pedestrian),
        }
    }

    pub fn vehicle_yellow(&self) -> &FakePin {
        &self.vehicle[1]
    }

    pub fn pedestrian_yellow(&self) -> &FakePin {
        &self.pedestrian[1]
    }

    pub fn pedestrian_green(&self) -> &FakePin {
        &self.pedestrian[2]
    }

    pub fn vehicle_red(&self) -> &FakePin {
        &self.vehicle[0]
    }

    pub fn all_off(&self) -> bool {
        self.vehicle
            .iter()
            .chain(self.pedestrian.iter())
            .all(|pin| !pin.high)
    }
}

fn pins(signal: Signal<GpioLed<FakePin>>) -> [FakePin; 3] {
    [
        signal.red.release(),
        signal.yellow.release(),
        signal.green.release(),
    ]
}

/// Button pin frozen at one level.
pub struct FakeButton {
    pub high: bool,
    pub reads: u32,
    pub fail: bool,
}

impl FakeButton {
    /// Reads low on the first poll.
    pub fn released() -> Self {
        Self {
            high: false,
            reads: 0,
            fail: false,
        }
    }

    /// Reads high on every poll.
    pub fn held() -> Self {
        Self {
            high: true,
            reads: 0,
            fail: false,
        }
    }

    pub fn broken() -> Self {
        Self {
            high: true,
            reads: 0,
            fail: true,
        }
    }
}

impl ErrorType for FakeButton {
    type Error = ErrorKind;
}

impl InputPin for FakeButton {
    fn is_high(&mut self) -> Result<bool, ErrorKind> {
        if self.fail {
            return Err(ErrorKind::Other);
        }
        self.reads += 1;
        Ok(self.high)
    }

    fn is_low(&mut self) -> Result<bool, ErrorKind> {
        self.is_high().map(|high| !high)
    }
}

/// Millisecond clock that only advances when delayed, and raises the button
/// interrupt at scheduled instants. An edge scheduled at `t` fires at the
/// start of the delay covering `t`.
pub struct FakeDelay<'a> {
    pub elapsed_ms: u32,
    pub waits: Vec<u32>,
    edges: Vec<u32>,
    handler: Option<&'a dyn RequestEdgeHandler>,
}

impl<'a> FakeDelay<'a> {
    pub fn new() -> Self {
        Self {
            elapsed_ms: 0,
            waits: Vec::new(),
            edges: Vec::new(),
            handler: None,
        }
    }

    pub fn with_edges(handler: &'a dyn RequestEdgeHandler, edges: &[u32]) -> Self {
        let mut edges = edges.to_vec();
        edges.sort_unstable();
        Self {
            handler: Some(handler),
            edges,
            ..Self::new()
        }
    }

    pub fn pending_edges(&self) -> usize {
        self.edges.len()
    }
}

impl DelayNs for FakeDelay<'_> {
    fn delay_ns(&mut self, ns: u32) {
        self.delay_ms(ns / 1_000_000);
    }

    fn delay_ms(&mut self, ms: u32) {
        let end = self.elapsed_ms + ms;
        while let Some(&at) = self.edges.first() {
            if at >= end {
                break;
            }
            self.edges.remove(0);
            if let Some(handler) = self.handler {
                handler.on_request_edge();
            }
        }
        self.waits.push(ms);
        self.elapsed_ms = end;
    }
}
