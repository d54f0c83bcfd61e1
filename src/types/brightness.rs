// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Global strip brightness as WLED reports it.

use std::fmt;

use serde_json::Value;

/// Global brightness on the device scale (0-255).
///
/// Locally brightness is a `[0.0, 1.0]` fraction; this type converts between
/// the two and sanitizes values read back from the device.
///
/// # Examples
///
/// ```
/// use wled_slide::types::Brightness;
///
/// let bri = Brightness::from_fraction(0.5);
/// assert_eq!(bri.value(), 128);
///
/// let full = Brightness::new(255);
/// assert!((full.as_fraction() - 1.0).abs() < f64::EPSILON);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Brightness(u8);

impl Brightness {
    /// Fully dark.
    pub const MIN: Self = Self(0);

    /// Full brightness.
    pub const MAX: Self = Self(255);

    /// Value assumed when the device reports something unusable.
    pub const FALLBACK: Self = Self(128);

    /// Creates a brightness from a raw device value.
    #[must_use]
    pub const fn new(value: u8) -> Self {
        Self(value)
    }

    /// Converts a `[0.0, 1.0]` fraction, rounding to the nearest step.
    ///
    /// Out-of-range fractions saturate; NaN maps to full brightness.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_fraction(fraction: f64) -> Self {
        if fraction.is_nan() {
            return Self::MAX;
        }
        // Safe: clamped to [0, 255] before the cast
        Self((fraction * 255.0).round().clamp(0.0, 255.0) as u8)
    }

    /// Reads `bri` from an untrusted device document.
    ///
    /// Numbers (and numeric strings) are rounded and clamped to `[0, 255]`.
    /// Absent or non-numeric values fall back to [`Brightness::FALLBACK`].
    ///
    /// ```
    /// use serde_json::json;
    /// use wled_slide::types::Brightness;
    ///
    /// assert_eq!(Brightness::from_remote(Some(&json!(300))).value(), 255);
    /// assert_eq!(Brightness::from_remote(Some(&json!("bright"))).value(), 128);
    /// assert_eq!(Brightness::from_remote(None).value(), 128);
    /// ```
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_remote(value: Option<&Value>) -> Self {
        let number = match value {
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
            _ => None,
        };

        match number {
            // Safe: clamped to [0, 255] before the cast
            Some(n) if n.is_finite() => Self(n.round().clamp(0.0, 255.0) as u8),
            _ => Self::FALLBACK,
        }
    }

    /// Returns the raw device value.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }

    /// Returns the brightness as a `[0.0, 1.0]` fraction.
    #[must_use]
    pub fn as_fraction(&self) -> f64 {
        f64::from(self.0) / 255.0
    }
}

impl fmt::Display for Brightness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/255", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn fraction_round_trip_endpoints() {
        assert_eq!(Brightness::from_fraction(0.0), Brightness::MIN);
        assert_eq!(Brightness::from_fraction(1.0), Brightness::MAX);
        assert!((Brightness::MAX.as_fraction() - 1.0).abs() < f64::EPSILON);
        assert!(Brightness::MIN.as_fraction().abs() < f64::EPSILON);
    }

    #[test]
    fn from_fraction_saturates() {
        assert_eq!(Brightness::from_fraction(-0.2), Brightness::MIN);
        assert_eq!(Brightness::from_fraction(1.7), Brightness::MAX);
        assert_eq!(Brightness::from_fraction(f64::NAN), Brightness::MAX);
    }

    #[test]
    fn from_remote_clamps_numbers() {
        assert_eq!(Brightness::from_remote(Some(&json!(-10))).value(), 0);
        assert_eq!(Brightness::from_remote(Some(&json!(0))).value(), 0);
        assert_eq!(Brightness::from_remote(Some(&json!(200))).value(), 200);
        assert_eq!(Brightness::from_remote(Some(&json!(999))).value(), 255);
        assert_eq!(Brightness::from_remote(Some(&json!(99.6))).value(), 100);
    }

    #[test]
    fn from_remote_accepts_numeric_strings() {
        assert_eq!(Brightness::from_remote(Some(&json!(" 64 "))).value(), 64);
    }

    #[test]
    fn from_remote_falls_back() {
        assert_eq!(Brightness::from_remote(None), Brightness::FALLBACK);
        assert_eq!(
            Brightness::from_remote(Some(&Value::Null)),
            Brightness::FALLBACK
        );
        assert_eq!(
            Brightness::from_remote(Some(&json!({"bri": 3}))),
            Brightness::FALLBACK
        );
        assert_eq!(
            Brightness::from_remote(Some(&json!(true))),
            Brightness::FALLBACK
        );
    }
}
