// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Coalescing of color capability changes.
//!
//! Color pickers emit hue, saturation and temperature in quick bursts. The
//! debounce task collects everything that arrives within one window after
//! the first change and sends a single merged update.

use std::sync::Weak;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::protocol::StateClient;
use crate::state::{LightSnapshot, StateChange};
use crate::types::ColorMode;

use super::session::Session;

/// Default coalescing window.
///
/// The window opens with the first change of a burst and is not extended by
/// later ones; changes still arriving after it closes start the next update.
pub const DEFAULT_COLOR_DEBOUNCE: Duration = Duration::from_millis(300);

/// A set of changed color keys.
///
/// Absent keys keep their mirrored value.
///
/// # Examples
///
/// ```
/// use wled_slide::device::ColorChange;
/// use wled_slide::types::ColorMode;
///
/// let mut batch = ColorChange::new().with_hue(0.1).with_saturation(0.5);
/// batch.merge(ColorChange::new().with_hue(0.6).with_mode(ColorMode::Color));
///
/// assert_eq!(batch.hue, Some(0.6));
/// assert_eq!(batch.saturation, Some(0.5));
/// assert_eq!(batch.mode, Some(ColorMode::Color));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ColorChange {
    /// Hue fraction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hue: Option<f64>,
    /// Saturation fraction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saturation: Option<f64>,
    /// Temperature fraction, 0 is cold.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Color mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<ColorMode>,
}

impl ColorChange {
    /// Creates an empty change.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the hue.
    #[must_use]
    pub fn with_hue(mut self, hue: f64) -> Self {
        self.hue = Some(hue);
        self
    }

    /// Sets the saturation.
    #[must_use]
    pub fn with_saturation(mut self, saturation: f64) -> Self {
        self.saturation = Some(saturation);
        self
    }

    /// Sets the temperature.
    #[must_use]
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Sets the mode.
    #[must_use]
    pub fn with_mode(mut self, mode: ColorMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Converts a color capability change; other changes yield `None`.
    #[must_use]
    pub fn from_state_change(change: StateChange) -> Option<Self> {
        match change {
            StateChange::Hue(v) => Some(Self::new().with_hue(v)),
            StateChange::Saturation(v) => Some(Self::new().with_saturation(v)),
            StateChange::Temperature(v) => Some(Self::new().with_temperature(v)),
            StateChange::Mode(mode) => Some(Self::new().with_mode(mode)),
            StateChange::Power(_) | StateChange::Brightness(_) => None,
        }
    }

    /// Returns `true` if no key is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hue.is_none()
            && self.saturation.is_none()
            && self.temperature.is_none()
            && self.mode.is_none()
    }

    /// Folds a later change into this one; keys set in `later` win.
    pub fn merge(&mut self, later: Self) {
        self.hue = later.hue.or(self.hue);
        self.saturation = later.saturation.or(self.saturation);
        self.temperature = later.temperature.or(self.temperature);
        self.mode = later.mode.or(self.mode);
    }

    /// Returns `light` with the set keys replaced.
    #[must_use]
    pub fn overlay(&self, light: LightSnapshot) -> LightSnapshot {
        LightSnapshot {
            hue: self.hue.unwrap_or(light.hue),
            saturation: self.saturation.unwrap_or(light.saturation),
            temperature: self.temperature.unwrap_or(light.temperature),
            mode: self.mode.unwrap_or(light.mode),
            ..light
        }
    }

    /// Splits into individual mirror updates.
    #[must_use]
    pub fn changes(&self) -> Vec<StateChange> {
        [
            self.hue.map(StateChange::Hue),
            self.saturation.map(StateChange::Saturation),
            self.temperature.map(StateChange::Temperature),
            self.mode.map(StateChange::Mode),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

/// Spawns the task that drains `rx` in windows of `window`.
///
/// The task exits when the channel closes or the session is gone.
pub(crate) fn spawn<C: StateClient>(
    session: Weak<Session<C>>,
    mut rx: mpsc::UnboundedReceiver<ColorChange>,
    window: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(first) = rx.recv().await {
            let mut pending = first;
            let mut merged = 1_usize;
            let deadline = tokio::time::sleep(window);
            tokio::pin!(deadline);

            let open = loop {
                tokio::select! {
                    maybe_change = rx.recv() => match maybe_change {
                        Some(change) => {
                            pending.merge(change);
                            merged += 1;
                        }
                        None => break false,
                    },
                    () = &mut deadline => break true,
                }
            };

            let Some(session) = session.upgrade() else {
                return;
            };
            tracing::debug!(device = %session.id, merged, "Flushing color changes");
            if let Err(err) = session.apply_color(pending).await {
                tracing::warn!(device = %session.id, error = %err, "Color update failed");
            }
            if !open {
                return;
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> LightSnapshot {
        LightSnapshot {
            brightness: 0.5,
            hue: 0.2,
            saturation: 0.3,
            temperature: 0.4,
            mode: ColorMode::Temperature,
        }
    }

    #[test]
    fn later_keys_win() {
        let mut batch = ColorChange::new().with_hue(0.1).with_temperature(0.9);
        batch.merge(ColorChange::new().with_hue(0.7));
        assert_eq!(
            batch,
            ColorChange::new().with_hue(0.7).with_temperature(0.9)
        );
    }

    #[test]
    fn overlay_keeps_unset_keys() {
        let light = ColorChange::new().with_mode(ColorMode::Color).overlay(snapshot());
        assert_eq!(light.mode, ColorMode::Color);
        assert!((light.hue - 0.2).abs() < f64::EPSILON);
        assert!((light.brightness - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn changes_in_key_order() {
        let change = ColorChange::new()
            .with_mode(ColorMode::Temperature)
            .with_hue(0.5);
        assert_eq!(
            change.changes(),
            vec![
                StateChange::Hue(0.5),
                StateChange::Mode(ColorMode::Temperature)
            ]
        );
    }

    #[test]
    fn only_color_changes_convert() {
        assert!(ColorChange::from_state_change(StateChange::Power(true)).is_none());
        assert!(ColorChange::from_state_change(StateChange::Brightness(0.5)).is_none());
        let change = ColorChange::from_state_change(StateChange::Saturation(0.25)).unwrap();
        assert_eq!(change.saturation, Some(0.25));
        assert!(ColorChange::new().is_empty());
        assert!(!change.is_empty());
    }
}
