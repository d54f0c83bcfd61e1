// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device state management types.
//!
//! The [`DeviceState`] struct mirrors the strip's capabilities locally,
//! while [`StateChange`] represents individual updates to it.
//!
//! # Examples
//!
//! ```
//! use wled_slide::state::{DeviceState, StateChange};
//!
//! let mut state = DeviceState::new();
//! state.apply(&StateChange::Power(true));
//!
//! assert_eq!(state.on(), Some(true));
//! ```

mod device_state;
mod state_change;

pub use device_state::{
    Availability, DEFAULT_BRIGHTNESS, DEFAULT_HUE, DEFAULT_SATURATION, DEFAULT_TEMPERATURE,
    DeviceState, LightSnapshot,
};
pub use state_change::StateChange;
