use crate::error::{Error, LampId};
use crate::hardware::traits::Led;
use embedded_hal::delay::DelayNs;

/// One red/yellow/green signal head.
pub struct Signal<L> {
    pub red: L,
    pub yellow: L,
    pub green: L,
}

impl<L> Signal<L> {
    pub fn new(red: L, yellow: L, green: L) -> Self {
        Self { red, yellow, green }
    }
}

/// The vehicle and pedestrian signal heads of the crossing.
pub struct Lamps<L> {
    vehicle: Signal<L>,
    pedestrian: Signal<L>,
}

impl<L: Led> Lamps<L> {
    pub fn new(vehicle: Signal<L>, pedestrian: Signal<L>) -> Self {
        Self { vehicle, pedestrian }
    }

    fn lamp(&mut self, lamp: LampId) -> &mut L {
        match lamp {
            LampId::VehicleRed => &mut self.vehicle.red,
            LampId::VehicleYellow => &mut self.vehicle.yellow,
            LampId::VehicleGreen => &mut self.vehicle.green,
            LampId::PedestrianRed => &mut self.pedestrian.red,
            LampId::PedestrianYellow => &mut self.pedestrian.yellow,
            LampId::PedestrianGreen => &mut self.pedestrian.green,
        }
    }

    pub fn set(&mut self, lamp: LampId, on: bool) -> Result<(), Error<L::Error>> {
        let led = self.lamp(lamp);
        let result = if on { led.on() } else { led.off() };
        result.map_err(|source| Error::Lamp { lamp, source })
    }

    /// Switches two lamps, `first` then `second`.
    pub fn set_pair(
        &mut self,
        first: LampId,
        second: LampId,
        on: bool,
    ) -> Result<(), Error<L::Error>> {
        self.set(first, on)?;
        self.set(second, on)
    }

    pub fn blink_once<D: DelayNs>(
        &mut self,
        lamp: LampId,
        delay: &mut D,
        duration_ms: u32,
    ) -> Result<(), Error<L::Error>> {
        self.lamp(lamp)
            .blink_once(delay, duration_ms)
            .map_err(|source| Error::Lamp { lamp, source })
    }

    /// Returns the vehicle and pedestrian heads.
    pub fn release(self) -> (Signal<L>, Signal<L>) {
        (self.vehicle, self.pedestrian)
    }
}
