use crate::{
    error::ArithmeticError,
    hal::{Instant, NORMALIZED_MAX},
};

/// Observed center and extremes of one joystick axis, in normalized counts.
///
/// Calibration runs seed the range at the center and only widen it, so they
/// always produce `min <= center <= max`. The fields are public; bounds set
/// directly are taken as given, and [`AxisCalibration::new`] checks them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisCalibration {
    pub center: u16,
    pub min: u16,
    pub max: u16,
}

impl AxisCalibration {
    /// Uncalibrated range: center 512 over the full 0..=1023 span.
    pub const fn full_scale() -> Self {
        Self {
            center: 512,
            min: 0,
            max: NORMALIZED_MAX,
        }
    }

    /// Zero-width range around `center`, the starting point of a calibration run.
    pub const fn at(center: u16) -> Self {
        Self {
            center,
            min: center,
            max: center,
        }
    }

    /// Builds a range from explicit bounds, or `None` unless `min <= center <= max`.
    pub const fn new(center: u16, min: u16, max: u16) -> Option<Self> {
        if min <= center && center <= max {
            Some(Self { center, min, max })
        } else {
            None
        }
    }

    /// Widens the range so it contains `reading`.
    pub fn expand(&mut self, reading: u16) {
        if reading > self.max {
            self.max = reading;
        }
        if reading < self.min {
            self.min = reading;
        }
    }

    /// True when either side of the center has zero width.
    pub fn is_degenerate(&self) -> bool {
        self.min == self.center || self.max == self.center
    }

    /// Maps a normalized reading onto the calibrated range.
    ///
    /// Above the center this is `(reading - center) / (max - center)`, at or
    /// below it `(center - reading) / (min - center)`, so readings below the
    /// center come out negative. A zero-width side yields
    /// [`ArithmeticError::DivisionByZero`].
    pub fn normalize(&self, reading: u16) -> Result<f32, ArithmeticError> {
        let reading = i32::from(reading);
        let center = i32::from(self.center);
        let (distance, span) = if reading > center {
            (reading - center, i32::from(self.max) - center)
        } else {
            (center - reading, i32::from(self.min) - center)
        };
        if span == 0 {
            return Err(ArithmeticError::DivisionByZero);
        }
        Ok(distance as f32 / span as f32)
    }
}

impl Default for AxisCalibration {
    fn default() -> Self {
        Self::full_scale()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct JoystickCalibration {
    pub x: AxisCalibration,
    pub y: AxisCalibration,
}

impl JoystickCalibration {
    pub const fn full_scale() -> Self {
        Self {
            x: AxisCalibration::full_scale(),
            y: AxisCalibration::full_scale(),
        }
    }

    pub const fn centered_at(x: u16, y: u16) -> Self {
        Self {
            x: AxisCalibration::at(x),
            y: AxisCalibration::at(y),
        }
    }
}

/// Idle -> Calibrating -> Idle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CalibrationState {
    Idle,
    Calibrating { started: Instant },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CalibrationStatus {
    InProgress,
    Done,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range() -> AxisCalibration {
        AxisCalibration::new(500, 300, 700).unwrap()
    }

    #[test]
    fn above_center_scales_against_max() {
        assert_eq!(range().normalize(600), Ok(0.5));
        assert_eq!(range().normalize(700), Ok(1.0));
    }

    #[test]
    fn below_center_scales_against_min() {
        assert_eq!(range().normalize(400), Ok(-0.5));
        assert_eq!(range().normalize(300), Ok(-1.0));
    }

    #[test]
    fn center_reads_zero() {
        assert_eq!(range().normalize(500), Ok(0.0));
    }

    #[test]
    fn zero_width_side_is_a_division_by_zero() {
        let axis = AxisCalibration::at(512);
        assert!(axis.is_degenerate());
        assert_eq!(axis.normalize(600), Err(ArithmeticError::DivisionByZero));
        assert_eq!(axis.normalize(400), Err(ArithmeticError::DivisionByZero));

        let lopsided = AxisCalibration::new(512, 100, 512).unwrap();
        assert_eq!(lopsided.normalize(300), Ok(212.0 / -412.0));
        assert_eq!(lopsided.normalize(513), Err(ArithmeticError::DivisionByZero));
    }

    #[test]
    fn expand_only_widens() {
        let mut axis = AxisCalibration::at(500);
        axis.expand(520);
        axis.expand(480);
        axis.expand(505);
        assert_eq!(axis, AxisCalibration { center: 500, min: 480, max: 520 });
        assert!(!axis.is_degenerate());
    }

    #[test]
    fn bounds_must_bracket_center() {
        assert_eq!(AxisCalibration::new(10, 20, 30), None);
        assert_eq!(AxisCalibration::new(40, 20, 30), None);
    }

    #[test]
    fn bounds_set_directly_are_taken_as_given() {
        // swapped extremes flip the sign instead of failing
        let axis = AxisCalibration {
            center: 500,
            min: 600,
            max: 400,
        };
        assert_eq!(axis.normalize(550), Ok(-0.5));
        assert_eq!(axis.normalize(450), Ok(0.5));
        assert!(!axis.is_degenerate());
    }
}
