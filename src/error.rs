use core::fmt;

/// Identifies one of the six lamps of the crossing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LampId {
    VehicleRed,
    VehicleYellow,
    VehicleGreen,
    PedestrianRed,
    PedestrianYellow,
    PedestrianGreen,
}

/// A GPIO failure. On the target this means the pin wiring does not match the
/// board, so callers treat it as fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Driving a lamp failed.
    Lamp { lamp: LampId, source: E },
    /// Reading the pedestrian button failed.
    Button(E),
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Lamp { lamp, source } => write!(f, "lamp {lamp:?} failed: {source:?}"),
            Error::Button(source) => write!(f, "button read failed: {source:?}"),
        }
    }
}
