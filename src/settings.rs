// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-strip animation settings.
//!
//! Settings arrive from user interfaces and flows as loosely typed numbers.
//! [`SettingsUpdate`] is validated as a whole before anything is applied, so
//! a rejected update leaves the previous [`DeviceSettings`] untouched.

use serde::{Deserialize, Serialize};

use crate::error::ValueError;
use crate::types::{LedCount, StepDelay};

/// Validated animation parameters of a strip.
///
/// # Examples
///
/// ```
/// use wled_slide::settings::DeviceSettings;
///
/// let settings = DeviceSettings::default();
/// assert_eq!(settings.led_count.get(), 20);
/// assert_eq!(settings.step_delay.millis(), 50);
/// assert!(!settings.reverse);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceSettings {
    /// Number of LEDs the animation covers.
    #[serde(rename = "num_leds", default)]
    pub led_count: LedCount,
    /// Pause between steps.
    #[serde(rename = "slide_speed_ms", default)]
    pub step_delay: StepDelay,
    /// Slide from the far end of the strip.
    #[serde(default)]
    pub reverse: bool,
}

impl DeviceSettings {
    /// Sets the LED count.
    #[must_use]
    pub fn with_led_count(mut self, led_count: LedCount) -> Self {
        self.led_count = led_count;
        self
    }

    /// Sets the step delay.
    #[must_use]
    pub fn with_step_delay(mut self, step_delay: StepDelay) -> Self {
        self.step_delay = step_delay;
        self
    }

    /// Sets the slide direction.
    #[must_use]
    pub fn with_reverse(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }

    /// Returns settings with `update` applied.
    ///
    /// # Errors
    ///
    /// Returns the first `ValueError` found; `self` is not modified in any
    /// case.
    pub fn updated(&self, update: &SettingsUpdate) -> Result<Self, ValueError> {
        let led_count = update
            .num_leds
            .map(LedCount::from_setting)
            .transpose()?
            .unwrap_or(self.led_count);
        let step_delay = update
            .slide_speed_ms
            .map(StepDelay::from_setting)
            .transpose()?
            .unwrap_or(self.step_delay);

        Ok(Self {
            led_count,
            step_delay,
            reverse: update.reverse.unwrap_or(self.reverse),
        })
    }
}

/// A partial, unvalidated settings change.
///
/// Keys use the names settings are stored under.
///
/// # Examples
///
/// ```
/// use wled_slide::settings::{DeviceSettings, SettingsUpdate};
///
/// let update: SettingsUpdate = serde_json::from_str(r#"{"num_leds": 2000}"#).unwrap();
/// assert!(DeviceSettings::default().updated(&update).is_err());
///
/// let update = SettingsUpdate::new().num_leds(144.0).reverse(true);
/// let settings = DeviceSettings::default().updated(&update).unwrap();
/// assert_eq!(settings.led_count.get(), 144);
/// assert!(settings.reverse);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SettingsUpdate {
    /// New LED count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_leds: Option<f64>,
    /// New step delay in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slide_speed_ms: Option<f64>,
    /// New direction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reverse: Option<bool>,
}

impl SettingsUpdate {
    /// Creates an empty update.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the LED count.
    #[must_use]
    pub fn num_leds(mut self, value: f64) -> Self {
        self.num_leds = Some(value);
        self
    }

    /// Sets the step delay.
    #[must_use]
    pub fn slide_speed_ms(mut self, value: f64) -> Self {
        self.slide_speed_ms = Some(value);
        self
    }

    /// Sets the direction.
    #[must_use]
    pub fn reverse(mut self, value: bool) -> Self {
        self.reverse = Some(value);
        self
    }

    /// Returns the names of the keys present in this update.
    #[must_use]
    pub fn changed_keys(&self) -> Vec<&'static str> {
        let mut keys = Vec::new();
        if self.num_leds.is_some() {
            keys.push("num_leds");
        }
        if self.slide_speed_ms.is_some() {
            keys.push("slide_speed_ms");
        }
        if self.reverse.is_some() {
            keys.push("reverse");
        }
        keys
    }
}
