// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! High-level strip device.
//!
//! A [`StripDevice`] is the session for one physical strip. It owns the
//! mirrored capability state, the animation generation, and two background
//! tasks: the poller and the color debounce.
//!
//! # Concurrency
//!
//! Handles are cheap to clone and share one session. Slides are plain
//! futures; to switch the strip while a slide is running, call again from
//! another task. The newer slide takes over and the older one returns
//! [`SlideOutcome::Superseded`] at its next step.
//!
//! ```no_run
//! use wled_slide::device::StripDeviceBuilder;
//!
//! # async fn example() -> wled_slide::Result<()> {
//! let device = StripDeviceBuilder::new("a0b1c2d3e4f5", "192.168.1.50".parse()?).build_http()?;
//!
//! let background = device.clone();
//! tokio::spawn(async move { background.slide_on().await });
//!
//! // Takes over from the slide above if it is still running
//! device.slide_off().await?;
//! # Ok(())
//! # }
//! ```

mod builder;
mod color_batch;
mod pairing;
pub(crate) mod session;

pub use builder::StripDeviceBuilder;
pub use color_batch::{ColorChange, DEFAULT_COLOR_DEBOUNCE};
pub use pairing::{PairedDevice, pair, pair_all};

use std::sync::Arc;

use tokio::sync::broadcast;

use crate::animation::{SlideDirection, SlideOutcome};
use crate::error::Result;
use crate::event::{DeviceEvent, DeviceId};
use crate::poller::{self, PollOutcome};
use crate::protocol::{DeviceAddress, StateClient};
use crate::settings::{DeviceSettings, SettingsUpdate};
use crate::state::{DeviceState, StateChange};
use crate::types::{Brightness, StepDelay};

use session::Session;

/// A capability change requested by a user or flow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CapabilityChange {
    /// Switch with a slide animation.
    OnOff(bool),
    /// Set the global brightness fraction.
    Dim(f64),
    /// Change hue, saturation, temperature or mode.
    Color(ColorChange),
}

impl From<StateChange> for CapabilityChange {
    fn from(change: StateChange) -> Self {
        match change {
            StateChange::Power(on) => Self::OnOff(on),
            StateChange::Brightness(fraction) => Self::Dim(fraction),
            StateChange::Hue(v) => Self::Color(ColorChange::new().with_hue(v)),
            StateChange::Saturation(v) => Self::Color(ColorChange::new().with_saturation(v)),
            StateChange::Temperature(v) => Self::Color(ColorChange::new().with_temperature(v)),
            StateChange::Mode(mode) => Self::Color(ColorChange::new().with_mode(mode)),
        }
    }
}

/// One WLED strip with slide animations.
///
/// The type parameter `C` is the transport; [`HttpClient`](crate::protocol::HttpClient)
/// in production.
#[derive(Debug)]
pub struct StripDevice<C> {
    session: Arc<Session<C>>,
}

impl<C> Clone for StripDevice<C> {
    fn clone(&self) -> Self {
        Self {
            session: Arc::clone(&self.session),
        }
    }
}

impl<C: StateClient> StripDevice<C> {
    /// Returns the device identifier.
    #[must_use]
    pub fn id(&self) -> &DeviceId {
        &self.session.id
    }

    /// Returns the current network address.
    #[must_use]
    pub fn address(&self) -> DeviceAddress {
        self.session.address()
    }

    // ========== Animations ==========

    /// Slides the strip on.
    ///
    /// # Errors
    ///
    /// Returns the remote error if this slide still owned the device when
    /// it failed; the device is then marked unavailable.
    pub async fn slide_on(&self) -> Result<SlideOutcome> {
        self.session.slide(SlideDirection::On).await
    }

    /// Slides the strip off.
    ///
    /// # Errors
    ///
    /// Returns the remote error if this slide still owned the device when
    /// it failed; the device is then marked unavailable.
    pub async fn slide_off(&self) -> Result<SlideOutcome> {
        self.session.slide(SlideDirection::Off).await
    }

    /// Switches the strip with the matching slide.
    ///
    /// # Errors
    ///
    /// See [`slide_on`](Self::slide_on).
    pub async fn set_on_off(&self, on: bool) -> Result<SlideOutcome> {
        self.session.slide(SlideDirection::from_power(on)).await
    }

    // ========== Light ==========

    /// Sets the global brightness without a device-side transition.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::NotFinite` for NaN or infinite input, or the
    /// remote error.
    pub async fn set_dim(&self, fraction: f64) -> Result<Brightness> {
        self.session.set_dim(fraction).await
    }

    /// Queues a color change.
    ///
    /// Changes arriving within the debounce window are merged and sent as
    /// one update. Failures of that update are logged, not returned.
    ///
    /// # Errors
    ///
    /// Returns `Error::Unavailable` once the device has been removed.
    pub fn set_color(&self, change: ColorChange) -> Result<()> {
        self.session.queue_color(change)
    }

    /// Dispatches a capability change.
    ///
    /// # Errors
    ///
    /// Returns the error of the underlying operation.
    pub async fn handle(&self, change: CapabilityChange) -> Result<()> {
        match change {
            CapabilityChange::OnOff(on) => self.set_on_off(on).await.map(drop),
            CapabilityChange::Dim(fraction) => self.set_dim(fraction).await.map(drop),
            CapabilityChange::Color(color) => self.set_color(color),
        }
    }

    // ========== Settings ==========

    /// Validates and applies a settings change.
    ///
    /// A slide already running keeps the settings it started with.
    ///
    /// # Errors
    ///
    /// Returns `ValueError` if any key is invalid; nothing is applied then.
    pub fn update_settings(&self, update: &SettingsUpdate) -> Result<DeviceSettings> {
        self.session.update_settings(update)
    }

    /// Sets the step delay from a flow argument, rounding and clamping it
    /// into range.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::NotFinite` for NaN or infinite input.
    pub fn set_slide_speed(&self, millis: f64) -> Result<StepDelay> {
        self.session.set_step_delay(millis)
    }

    /// Returns the current settings.
    #[must_use]
    pub fn settings(&self) -> DeviceSettings {
        self.session.settings()
    }

    // ========== Discovery ==========

    /// Follows an address change reported by discovery.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::InvalidAddress` and keeps the old address if
    /// `address` is malformed or reserved.
    pub fn set_address(&self, address: &str) -> Result<DeviceAddress> {
        self.session.set_address(address)
    }

    /// Records that discovery has seen the device, marking it available.
    pub fn mark_seen(&self) {
        if !self.session.is_removed() {
            self.session.mark_available();
        }
    }

    // ========== State ==========

    /// Runs one poll immediately.
    pub async fn poll_once(&self) -> PollOutcome {
        if self.session.is_removed() {
            return PollOutcome::Skipped;
        }
        poller::poll_once(&self.session).await
    }

    /// Returns a snapshot of the mirrored state.
    #[must_use]
    pub fn state(&self) -> DeviceState {
        self.session.state()
    }

    /// Returns `true` while a slide owns the device.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.session.generation.is_animating()
    }

    /// Returns the latest animation generation.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.session.generation.current()
    }

    /// Subscribes to events of this device.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<DeviceEvent> {
        self.session.subscribe()
    }

    // ========== Lifecycle ==========

    /// Retires the device.
    ///
    /// Stops polling and color updates and orphans any slide in flight,
    /// which exits at its next step without writing. Later commands fail
    /// with `Error::Unavailable`.
    pub fn remove(&self) {
        self.session.remove();
    }

    /// Returns `true` once [`remove`](Self::remove) was called.
    #[must_use]
    pub fn is_removed(&self) -> bool {
        self.session.is_removed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ColorMode;

    #[test]
    fn capability_change_from_state_change() {
        assert_eq!(
            CapabilityChange::from(StateChange::Power(true)),
            CapabilityChange::OnOff(true)
        );
        assert_eq!(
            CapabilityChange::from(StateChange::Brightness(0.5)),
            CapabilityChange::Dim(0.5)
        );
        assert_eq!(
            CapabilityChange::from(StateChange::Mode(ColorMode::Temperature)),
            CapabilityChange::Color(ColorChange::new().with_mode(ColorMode::Temperature))
        );
    }
}
