// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Color resolution from light capabilities to segment RGB.
//!
//! Brightness is never encoded in the RGB value: colors are resolved at full
//! value and the strip's global brightness (`bri`) scales them on the device.

use std::fmt;
use std::str::FromStr;

use super::RgbColor;
use super::rgb_color::round_channel;

/// Cold-white end of the temperature scale (about 6500 K).
pub const COLD_WHITE: RgbColor = RgbColor::new(200, 220, 255);

/// Warm-white end of the temperature scale (about 2700 K).
pub const WARM_WHITE: RgbColor = RgbColor::new(255, 147, 41);

/// Which capability drives the strip color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Hue and saturation.
    #[default]
    Color,
    /// White color temperature.
    Temperature,
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Color => f.write_str("color"),
            Self::Temperature => f.write_str("temperature"),
        }
    }
}

impl FromStr for ColorMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "color" => Ok(Self::Color),
            "temperature" => Ok(Self::Temperature),
            other => Err(format!("unknown color mode: {other}")),
        }
    }
}

/// Converts hue, saturation and value (all `0.0..=1.0`) into RGB.
///
/// Out-of-range inputs are clamped. A hue of `1.0` wraps to red.
///
/// # Examples
///
/// ```
/// use wled_slide::types::{hsv_to_rgb, RgbColor};
///
/// assert_eq!(hsv_to_rgb(0.0, 1.0, 1.0), RgbColor::new(255, 0, 0));
/// assert_eq!(hsv_to_rgb(1.0 / 3.0, 1.0, 1.0), RgbColor::new(0, 255, 0));
/// ```
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn hsv_to_rgb(hue: f64, saturation: f64, value: f64) -> RgbColor {
    let h = clamp_unit(hue);
    let s = clamp_unit(saturation);
    let v = clamp_unit(value);

    let sector = (h * 6.0).floor();
    let f = h * 6.0 - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - f * s);
    let t = v * (1.0 - (1.0 - f) * s);

    // Safe: sector is in [0, 6]
    let (r, g, b) = match (sector as u8) % 6 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };

    RgbColor::new(
        round_channel(r * 255.0),
        round_channel(g * 255.0),
        round_channel(b * 255.0),
    )
}

/// Converts a color temperature fraction (`0.0` cold, `1.0` warm) into RGB.
///
/// Linear interpolation between [`COLD_WHITE`] and [`WARM_WHITE`]. Exact
/// midpoints between two integers resolve to the lower one.
///
/// # Examples
///
/// ```
/// use wled_slide::types::{ct_to_rgb, RgbColor};
///
/// assert_eq!(ct_to_rgb(0.0), RgbColor::new(200, 220, 255));
/// assert_eq!(ct_to_rgb(1.0), RgbColor::new(255, 147, 41));
/// assert_eq!(ct_to_rgb(0.5), RgbColor::new(227, 183, 148));
/// ```
#[must_use]
pub fn ct_to_rgb(temperature: f64) -> RgbColor {
    let ct = clamp_unit(temperature);
    let lerp = |cold: u8, warm: u8| {
        let cold = f64::from(cold);
        let exact = cold + (f64::from(warm) - cold) * ct;
        round_channel((exact - 0.5).ceil())
    };

    RgbColor::new(
        lerp(COLD_WHITE.red(), WARM_WHITE.red()),
        lerp(COLD_WHITE.green(), WARM_WHITE.green()),
        lerp(COLD_WHITE.blue(), WARM_WHITE.blue()),
    )
}

fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hsv_primary_colors() {
        assert_eq!(hsv_to_rgb(0.0, 1.0, 1.0), RgbColor::new(255, 0, 0));
        assert_eq!(hsv_to_rgb(1.0 / 3.0, 1.0, 1.0), RgbColor::new(0, 255, 0));
        assert_eq!(hsv_to_rgb(2.0 / 3.0, 1.0, 1.0), RgbColor::new(0, 0, 255));
    }

    #[test]
    fn hsv_full_hue_wraps_to_red() {
        assert_eq!(hsv_to_rgb(1.0, 1.0, 1.0), RgbColor::new(255, 0, 0));
    }

    #[test]
    fn hsv_zero_saturation_is_white() {
        assert_eq!(hsv_to_rgb(0.42, 0.0, 1.0), RgbColor::new(255, 255, 255));
    }

    #[test]
    fn hsv_value_scales_output() {
        assert_eq!(hsv_to_rgb(0.0, 1.0, 0.0), RgbColor::BLACK);
        assert_eq!(hsv_to_rgb(0.0, 1.0, 0.5), RgbColor::new(128, 0, 0));
    }

    #[test]
    fn hsv_clamps_out_of_range_input() {
        assert_eq!(hsv_to_rgb(-0.5, 2.0, 1.0), RgbColor::new(255, 0, 0));
        assert_eq!(hsv_to_rgb(f64::NAN, 1.0, 1.0), RgbColor::new(255, 0, 0));
    }

    #[test]
    fn ct_endpoints_and_midpoint() {
        assert_eq!(ct_to_rgb(0.0), COLD_WHITE);
        assert_eq!(ct_to_rgb(1.0), WARM_WHITE);
        assert_eq!(ct_to_rgb(0.5), RgbColor::new(227, 183, 148));
    }

    #[test]
    fn ct_clamps_out_of_range_input() {
        assert_eq!(ct_to_rgb(-3.0), COLD_WHITE);
        assert_eq!(ct_to_rgb(7.0), WARM_WHITE);
    }

    #[test]
    fn color_mode_parse_and_display() {
        assert_eq!("temperature".parse::<ColorMode>(), Ok(ColorMode::Temperature));
        assert_eq!("Color".parse::<ColorMode>(), Ok(ColorMode::Color));
        assert!("rainbow".parse::<ColorMode>().is_err());
        assert_eq!(ColorMode::Temperature.to_string(), "temperature");
    }

    #[test]
    fn color_mode_serde() {
        let json = serde_json::to_string(&ColorMode::Temperature).unwrap();
        assert_eq!(json, "\"temperature\"");
    }
}
