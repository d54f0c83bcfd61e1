// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Pause between two animation steps.

use std::fmt;
use std::time::Duration;

use crate::error::ValueError;

use super::whole_number;

/// Delay between two slide steps in milliseconds (10-500).
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use wled_slide::types::StepDelay;
///
/// let delay = StepDelay::new(40).unwrap();
/// assert_eq!(delay.as_duration(), Duration::from_millis(40));
///
/// assert!(StepDelay::new(5).is_err());
/// assert_eq!(StepDelay::clamped(5).millis(), 10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct StepDelay(u16);

impl StepDelay {
    /// Fastest allowed step.
    pub const MIN: Self = Self(10);

    /// Slowest allowed step.
    pub const MAX: Self = Self(500);

    /// Delay used when no setting has been stored.
    pub const DEFAULT: Self = Self(50);

    const FIELD: &'static str = "slide_speed_ms";

    /// Creates a new step delay.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if `millis` is outside `[10, 500]`.
    pub fn new(millis: u16) -> Result<Self, ValueError> {
        if !(Self::MIN.0..=Self::MAX.0).contains(&millis) {
            return Err(Self::out_of_range(i64::from(millis)));
        }
        Ok(Self(millis))
    }

    /// Creates a step delay, saturating at the valid range.
    #[must_use]
    pub fn clamped(millis: i64) -> Self {
        // Safe: clamped to [10, 500]
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let millis = millis.clamp(i64::from(Self::MIN.0), i64::from(Self::MAX.0)) as u16;
        Self(millis)
    }

    /// Rounds and clamps an arbitrary number, as flow actions do.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::NotFinite` for NaN or infinite input.
    #[allow(clippy::cast_possible_truncation)]
    pub fn rounded(millis: f64) -> Result<Self, ValueError> {
        if !millis.is_finite() {
            return Err(ValueError::NotFinite(Self::FIELD));
        }
        // Safe: saturating float-to-int cast, clamped right after
        Ok(Self::clamped(millis.round() as i64))
    }

    /// Validates a raw settings value without rounding or clamping.
    ///
    /// # Errors
    ///
    /// Returns `ValueError` describing the first violated constraint.
    pub fn from_setting(millis: f64) -> Result<Self, ValueError> {
        let whole = whole_number(Self::FIELD, millis)?;
        if !(i64::from(Self::MIN.0)..=i64::from(Self::MAX.0)).contains(&whole) {
            return Err(Self::out_of_range(whole));
        }
        Ok(Self::clamped(whole))
    }

    /// Returns the delay in milliseconds.
    #[must_use]
    pub const fn millis(&self) -> u16 {
        self.0
    }

    /// Returns the delay as a [`Duration`].
    #[must_use]
    pub fn as_duration(&self) -> Duration {
        Duration::from_millis(u64::from(self.0))
    }

    fn out_of_range(actual: i64) -> ValueError {
        ValueError::OutOfRange {
            field: Self::FIELD,
            min: i64::from(Self::MIN.0),
            max: i64::from(Self::MAX.0),
            actual,
        }
    }
}

impl Default for StepDelay {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for StepDelay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ms", self.0)
    }
}

impl TryFrom<u16> for StepDelay {
    type Error = ValueError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<StepDelay> for u16 {
    fn from(delay: StepDelay) -> Self {
        delay.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_are_inclusive() {
        assert_eq!(StepDelay::new(10).unwrap(), StepDelay::MIN);
        assert_eq!(StepDelay::new(500).unwrap(), StepDelay::MAX);
        assert!(StepDelay::new(9).is_err());
        assert!(StepDelay::new(501).is_err());
    }

    #[test]
    fn rounded_clamps_like_flow_action() {
        assert_eq!(StepDelay::rounded(3.0).unwrap().millis(), 10);
        assert_eq!(StepDelay::rounded(74.6).unwrap().millis(), 75);
        assert_eq!(StepDelay::rounded(9000.0).unwrap().millis(), 500);
        assert_eq!(
            StepDelay::rounded(f64::INFINITY),
            Err(ValueError::NotFinite("slide_speed_ms"))
        );
    }

    #[test]
    fn from_setting_rejects_out_of_range() {
        assert!(matches!(
            StepDelay::from_setting(600.0),
            Err(ValueError::OutOfRange { actual: 600, .. })
        ));
        assert_eq!(StepDelay::from_setting(120.0).unwrap().millis(), 120);
    }

    #[test]
    fn default_is_fifty_millis() {
        assert_eq!(StepDelay::default().as_duration(), Duration::from_millis(50));
    }

    #[test]
    fn display() {
        assert_eq!(StepDelay::new(25).unwrap().to_string(), "25 ms");
    }
}
