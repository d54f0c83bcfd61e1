// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! RGB color type used in segment color slots.

use std::fmt;

/// RGB color with 8-bit channels (0-255).
///
/// Serializes as the `[r, g, b]` triple WLED expects inside a segment's
/// `col` array.
///
/// # Examples
///
/// ```
/// use wled_slide::types::RgbColor;
///
/// let color = RgbColor::new(255, 128, 0);
/// assert_eq!(color.red(), 255);
/// assert_eq!(color.to_array(), [255, 128, 0]);
///
/// let json = serde_json::to_string(&color).unwrap();
/// assert_eq!(json, "[255,128,0]");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct RgbColor {
    red: u8,
    green: u8,
    blue: u8,
}

impl RgbColor {
    /// All channels off. Used for the unused secondary color slots.
    pub const BLACK: Self = Self::new(0, 0, 0);

    /// Creates a new RGB color.
    #[must_use]
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Returns the red component.
    #[must_use]
    pub const fn red(&self) -> u8 {
        self.red
    }

    /// Returns the green component.
    #[must_use]
    pub const fn green(&self) -> u8 {
        self.green
    }

    /// Returns the blue component.
    #[must_use]
    pub const fn blue(&self) -> u8 {
        self.blue
    }

    /// Returns the channels as an `[r, g, b]` array.
    #[must_use]
    pub const fn to_array(self) -> [u8; 3] {
        [self.red, self.green, self.blue]
    }

    /// Scales every channel by `fraction`, rounding each to the nearest integer.
    ///
    /// The fraction is clamped to `[0.0, 1.0]`.
    ///
    /// # Examples
    ///
    /// ```
    /// use wled_slide::types::RgbColor;
    ///
    /// let tail = RgbColor::new(255, 100, 20).scaled(0.35);
    /// assert_eq!(tail, RgbColor::new(89, 35, 7));
    /// ```
    #[must_use]
    pub fn scaled(self, fraction: f64) -> Self {
        let fraction = fraction.clamp(0.0, 1.0);
        let scale = |channel: u8| round_channel(f64::from(channel) * fraction);
        Self::new(scale(self.red), scale(self.green), scale(self.blue))
    }
}

/// Rounds a channel value to the nearest integer, saturating at `[0, 255]`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn round_channel(value: f64) -> u8 {
    // Safe: clamped to [0, 255] before the cast
    value.round().clamp(0.0, 255.0) as u8
}

impl From<[u8; 3]> for RgbColor {
    fn from([red, green, blue]: [u8; 3]) -> Self {
        Self::new(red, green, blue)
    }
}

impl From<RgbColor> for [u8; 3] {
    fn from(color: RgbColor) -> Self {
        color.to_array()
    }
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}]", self.red, self.green, self.blue)
    }
}
