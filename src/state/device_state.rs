// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Local mirror of the strip's capabilities.

use crate::types::{ColorMode, RgbColor, ct_to_rgb, hsv_to_rgb};

use super::StateChange;

/// Brightness assumed before the device has reported one.
pub const DEFAULT_BRIGHTNESS: f64 = 1.0;
/// Hue assumed before one has been set.
pub const DEFAULT_HUE: f64 = 0.0;
/// Saturation assumed before one has been set.
pub const DEFAULT_SATURATION: f64 = 1.0;
/// Temperature assumed before one has been set.
pub const DEFAULT_TEMPERATURE: f64 = 0.5;

/// Whether the device answered the last time it was contacted.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Availability {
    /// Last communication succeeded.
    #[default]
    Available,
    /// Last communication failed; carries the reason.
    Unavailable(String),
}

impl Availability {
    /// Returns `true` if the device is available.
    #[must_use]
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available)
    }

    /// Returns the failure reason, if unavailable.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Available => None,
            Self::Unavailable(reason) => Some(reason),
        }
    }
}

/// Tracked capability state of a strip.
///
/// All capability fields are optional because nothing is known until the
/// user or the device reports it. Use [`DeviceState::light`] to read them
/// with defaults applied.
///
/// # Examples
///
/// ```
/// use wled_slide::state::{DeviceState, StateChange};
///
/// let mut state = DeviceState::new();
/// assert_eq!(state.on(), None);
///
/// state.apply(&StateChange::Brightness(0.25));
/// assert_eq!(state.brightness(), Some(0.25));
/// ```
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DeviceState {
    on: Option<bool>,
    brightness: Option<f64>,
    hue: Option<f64>,
    saturation: Option<f64>,
    temperature: Option<f64>,
    mode: Option<ColorMode>,
    availability: Availability,
}

impl DeviceState {
    /// Creates a new empty device state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the mirrored power state.
    #[must_use]
    pub fn on(&self) -> Option<bool> {
        self.on
    }

    /// Returns the mirrored brightness fraction.
    #[must_use]
    pub fn brightness(&self) -> Option<f64> {
        self.brightness
    }

    /// Returns the hue fraction.
    #[must_use]
    pub fn hue(&self) -> Option<f64> {
        self.hue
    }

    /// Returns the saturation fraction.
    #[must_use]
    pub fn saturation(&self) -> Option<f64> {
        self.saturation
    }

    /// Returns the color temperature fraction.
    #[must_use]
    pub fn temperature(&self) -> Option<f64> {
        self.temperature
    }

    /// Returns the color mode.
    #[must_use]
    pub fn mode(&self) -> Option<ColorMode> {
        self.mode
    }

    /// Returns the availability.
    #[must_use]
    pub fn availability(&self) -> &Availability {
        &self.availability
    }

    /// Applies a change, returning `true` if anything changed.
    pub fn apply(&mut self, change: &StateChange) -> bool {
        fn set<T: PartialEq>(slot: &mut Option<T>, value: T) -> bool {
            if slot.as_ref() == Some(&value) {
                false
            } else {
                *slot = Some(value);
                true
            }
        }

        match *change {
            StateChange::Power(on) => set(&mut self.on, on),
            StateChange::Brightness(v) => set(&mut self.brightness, unit(v)),
            StateChange::Hue(v) => set(&mut self.hue, unit(v)),
            StateChange::Saturation(v) => set(&mut self.saturation, unit(v)),
            StateChange::Temperature(v) => set(&mut self.temperature, unit(v)),
            StateChange::Mode(mode) => set(&mut self.mode, mode),
        }
    }

    /// Replaces the availability, returning `true` if it changed.
    pub fn set_availability(&mut self, availability: Availability) -> bool {
        if self.availability == availability {
            return false;
        }
        self.availability = availability;
        true
    }

    /// Reads the light capabilities with defaults filled in.
    #[must_use]
    pub fn light(&self) -> LightSnapshot {
        LightSnapshot {
            brightness: self.brightness.unwrap_or(DEFAULT_BRIGHTNESS),
            hue: self.hue.unwrap_or(DEFAULT_HUE),
            saturation: self.saturation.unwrap_or(DEFAULT_SATURATION),
            temperature: self.temperature.unwrap_or(DEFAULT_TEMPERATURE),
            mode: self.mode.unwrap_or_default(),
        }
    }
}

fn unit(value: f64) -> f64 {
    if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) }
}

/// Light capabilities at one instant, with defaults applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightSnapshot {
    /// Brightness fraction.
    pub brightness: f64,
    /// Hue fraction.
    pub hue: f64,
    /// Saturation fraction.
    pub saturation: f64,
    /// Temperature fraction.
    pub temperature: f64,
    /// Color mode.
    pub mode: ColorMode,
}

impl LightSnapshot {
    /// Resolves the strip color at full value.
    #[must_use]
    pub fn color(&self) -> RgbColor {
        match self.mode {
            ColorMode::Temperature => ct_to_rgb(self.temperature),
            ColorMode::Color => hsv_to_rgb(self.hue, self.saturation, 1.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_is_unknown_and_available() {
        let state = DeviceState::new();
        assert_eq!(state.on(), None);
        assert_eq!(state.brightness(), None);
        assert!(state.availability().is_available());
    }

    #[test]
    fn apply_reports_changes() {
        let mut state = DeviceState::new();
        assert!(state.apply(&StateChange::Hue(0.5)));
        assert!(!state.apply(&StateChange::Hue(0.5)));
        assert!(state.apply(&StateChange::Hue(0.6)));
    }

    #[test]
    fn apply_clamps_fractions() {
        let mut state = DeviceState::new();
        state.apply(&StateChange::Brightness(3.0));
        assert_eq!(state.brightness(), Some(1.0));
        state.apply(&StateChange::Saturation(f64::NAN));
        assert_eq!(state.saturation(), Some(0.0));
    }

    #[test]
    fn light_snapshot_defaults() {
        let light = DeviceState::new().light();
        assert!((light.brightness - 1.0).abs() < f64::EPSILON);
        assert!(light.hue.abs() < f64::EPSILON);
        assert!((light.saturation - 1.0).abs() < f64::EPSILON);
        assert!((light.temperature - 0.5).abs() < f64::EPSILON);
        assert_eq!(light.mode, ColorMode::Color);
        assert_eq!(light.color(), RgbColor::new(255, 0, 0));
    }

    #[test]
    fn temperature_mode_resolves_white() {
        let mut state = DeviceState::new();
        state.apply(&StateChange::Mode(ColorMode::Temperature));
        state.apply(&StateChange::Temperature(1.0));
        assert_eq!(state.light().color(), RgbColor::new(255, 147, 41));
    }

    #[test]
    fn availability_transitions() {
        let mut state = DeviceState::new();
        assert!(!state.set_availability(Availability::Available));
        assert!(state.set_availability(Availability::Unavailable("timeout".into())));
        assert_eq!(state.availability().reason(), Some("timeout"));
        assert!(state.set_availability(Availability::Available));
    }
}
