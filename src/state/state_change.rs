// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! State change representation.
//!
//! State changes are discrete updates to the local capability mirror. They
//! come from user commands (dim, color), finished animations (power) and
//! the poller (power, brightness).
//!
//! # Examples
//!
//! ```
//! use wled_slide::state::{DeviceState, StateChange};
//!
//! let mut state = DeviceState::new();
//!
//! // Apply returns true if state actually changed
//! assert!(state.apply(&StateChange::Power(true)));
//! assert!(!state.apply(&StateChange::Power(true)));
//! ```

use crate::types::ColorMode;

/// A change to one mirrored capability.
///
/// Fractions are in `[0.0, 1.0]`; [`DeviceState::apply`](super::DeviceState::apply)
/// clamps anything outside.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum StateChange {
    /// Strip power.
    Power(bool),
    /// Global brightness fraction.
    Brightness(f64),
    /// Hue fraction.
    Hue(f64),
    /// Saturation fraction.
    Saturation(f64),
    /// Color temperature fraction (`0.0` cold, `1.0` warm).
    Temperature(f64),
    /// Color mode.
    Mode(ColorMode),
}

impl StateChange {
    /// Returns `true` for changes that affect the resolved strip color.
    #[must_use]
    pub fn is_color(&self) -> bool {
        matches!(
            self,
            Self::Hue(_) | Self::Saturation(_) | Self::Temperature(_) | Self::Mode(_)
        )
    }
}
