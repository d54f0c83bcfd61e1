// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for strip control.
//!
//! Each type ensures values are within their valid ranges at construction
//! time, so untrusted input never reaches the animation engine unvalidated.
//!
//! # Types
//!
//! - [`RgbColor`] - Segment color (`[r, g, b]` on the wire)
//! - [`ColorMode`] - Whether hue/saturation or temperature drives the color
//! - [`LedCount`] - Strip length (1-1024)
//! - [`StepDelay`] - Pause between slide steps (10-500 ms)
//! - [`Brightness`] - Global brightness (0-255)
//!
//! The color resolver functions [`hsv_to_rgb`] and [`ct_to_rgb`] live here
//! as well.

mod brightness;
mod color;
mod led_count;
mod rgb_color;
mod step_delay;

pub use brightness::Brightness;
pub use color::{COLD_WHITE, ColorMode, WARM_WHITE, ct_to_rgb, hsv_to_rgb};
pub use led_count::LedCount;
pub use rgb_color::RgbColor;
pub use step_delay::StepDelay;

use crate::error::ValueError;

/// Checks that a settings number is finite and has no fractional part.
#[allow(clippy::cast_possible_truncation, clippy::float_cmp)]
pub(crate) fn whole_number(field: &'static str, value: f64) -> Result<i64, ValueError> {
    if !value.is_finite() {
        return Err(ValueError::NotFinite(field));
    }
    if value.trunc() != value {
        return Err(ValueError::NotAnInteger { field, value });
    }
    // Saturating cast; callers range-check the result
    Ok(value as i64)
}
