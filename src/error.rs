use core::convert::Infallible;

/// Hardware failure while sampling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<A, P = Infallible> {
    /// The ADC rejected a conversion.
    Adc(A),
    /// A digital input could not be read.
    Pin(P),
}

impl<A> Error<A, Infallible> {
    /// Lifts an ADC-only error into one that may also carry a pin error.
    pub(crate) fn widen<P>(self) -> Error<A, P> {
        match self {
            Error::Adc(e) => Error::Adc(e),
            Error::Pin(never) => match never {},
        }
    }
}

/// Arithmetic failure while normalizing a joystick axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ArithmeticError {
    /// Calibrated extreme equals the center on the side being read.
    DivisionByZero,
}
