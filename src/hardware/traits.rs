use embedded_hal::delay::DelayNs;

pub trait Led {
    type Error;

    fn on(&mut self) -> Result<(), Self::Error>;
    fn off(&mut self) -> Result<(), Self::Error>;

    /// Lights the LED for `duration_ms`, then turns it off.
    fn blink_once<D: DelayNs>(
        &mut self,
        delay: &mut D,
        duration_ms: u32,
    ) -> Result<(), Self::Error> {
        self.on()?;
        delay.delay_ms(duration_ms);
        self.off()
    }
}

/// Receives the pedestrian button edge from the EXTI interrupt.
pub trait RequestEdgeHandler {
    fn on_request_edge(&self);
}
