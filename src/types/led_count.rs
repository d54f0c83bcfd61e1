// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Number of addressable LEDs on a strip.

use std::fmt;

use crate::error::ValueError;

use super::whole_number;

/// Number of LEDs the slide animation covers (1-1024).
///
/// The upper bound keeps a single animation from turning into thousands of
/// remote updates.
///
/// # Examples
///
/// ```
/// use wled_slide::types::LedCount;
///
/// let leds = LedCount::new(60).unwrap();
/// assert_eq!(leds.get(), 60);
///
/// assert!(LedCount::new(0).is_err());
/// assert!(LedCount::new(2000).is_err());
/// assert_eq!(LedCount::clamped(2000).get(), 1024);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct LedCount(u16);

impl LedCount {
    /// Smallest supported strip.
    pub const MIN: Self = Self(1);

    /// Largest supported strip.
    pub const MAX: Self = Self(1024);

    /// Count used before the device has reported its own.
    pub const DEFAULT: Self = Self(20);

    const FIELD: &'static str = "num_leds";

    /// Creates a new LED count.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if `count` is outside `[1, 1024]`.
    pub fn new(count: u16) -> Result<Self, ValueError> {
        if !(Self::MIN.0..=Self::MAX.0).contains(&count) {
            return Err(Self::out_of_range(i64::from(count)));
        }
        Ok(Self(count))
    }

    /// Creates an LED count, saturating at the valid range.
    #[must_use]
    pub fn clamped(count: i64) -> Self {
        // Safe: clamped to [1, 1024]
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let count = count.clamp(i64::from(Self::MIN.0), i64::from(Self::MAX.0)) as u16;
        Self(count)
    }

    /// Validates a raw settings value.
    ///
    /// The value must be finite, whole and within range; nothing is rounded
    /// or clamped.
    ///
    /// # Errors
    ///
    /// Returns `ValueError` describing the first violated constraint.
    pub fn from_setting(value: f64) -> Result<Self, ValueError> {
        let whole = whole_number(Self::FIELD, value)?;
        if !(i64::from(Self::MIN.0)..=i64::from(Self::MAX.0)).contains(&whole) {
            return Err(Self::out_of_range(whole));
        }
        Ok(Self::clamped(whole))
    }

    /// Returns the number of LEDs.
    #[must_use]
    pub const fn get(&self) -> u16 {
        self.0
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

impl Default for LedCount {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for LedCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} LEDs", self.0)
    }
}

impl TryFrom<u16> for LedCount {
    type Error = ValueError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<LedCount> for u16 {
    fn from(count: LedCount) -> Self {
        count.0
    }
}
