use super::traits::Led;
use embedded_hal::digital::OutputPin;

/// LED wired to a push-pull output.
pub struct GpioLed<P> {
    pin: P,
    active_low: bool,
}

impl<P: OutputPin> GpioLed<P> {
    /// LED lit while the pin is high.
    pub fn new(pin: P) -> Self {
        Self {
            pin,
            active_low: false,
        }
    }

    /// LED lit while the pin is low (common anode).
    pub fn new_active_low(pin: P) -> Self {
        Self {
            pin,
            active_low: true,
        }
    }

    pub fn release(self) -> P {
        self.pin
    }
}

impl<P: OutputPin> Led for GpioLed<P> {
    type Error = P::Error;

    fn on(&mut self) -> Result<(), Self::Error> {
        if self.active_low {
            self.pin.set_low()
        } else {
            self.pin.set_high()
        }
    }

    fn off(&mut self) -> Result<(), Self::Error> {
        if self.active_low {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        }
    }
}
