// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device event types.

use crate::animation::SlideDirection;
use crate::state::StateChange;

use super::DeviceId;

/// Events emitted by a strip session.
///
/// # Examples
///
/// ```
/// use wled_slide::animation::SlideDirection;
/// use wled_slide::event::{DeviceEvent, DeviceId};
///
/// let event = DeviceEvent::slide_completed(DeviceId::new("a0b1c2"), SlideDirection::On);
/// assert!(event.is_slide_completed());
/// ```
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum DeviceEvent {
    /// A slide animation ran to completion.
    ///
    /// Fired exactly once per completed animation; superseded or failed runs
    /// do not fire it.
    SlideCompleted {
        /// The strip.
        device_id: DeviceId,
        /// Which slide finished.
        direction: SlideDirection,
    },

    /// The outcome of the last communication changed.
    AvailabilityChanged {
        /// The strip.
        device_id: DeviceId,
        /// Whether the device is reachable.
        available: bool,
        /// Failure reason when unavailable.
        reason: Option<String>,
    },

    /// A mirrored capability changed.
    StateChanged {
        /// The strip.
        device_id: DeviceId,
        /// The change that was applied.
        change: StateChange,
    },
}

impl DeviceEvent {
    /// Returns the device ID associated with this event.
    #[must_use]
    pub fn device_id(&self) -> &DeviceId {
        match self {
            Self::SlideCompleted { device_id, .. }
            | Self::AvailabilityChanged { device_id, .. }
            | Self::StateChanged { device_id, .. } => device_id,
        }
    }

    /// Returns `true` if this is a slide completion.
    #[must_use]
    pub fn is_slide_completed(&self) -> bool {
        matches!(self, Self::SlideCompleted { .. })
    }

    /// Returns `true` if this is an availability event.
    #[must_use]
    pub fn is_availability(&self) -> bool {
        matches!(self, Self::AvailabilityChanged { .. })
    }

    /// Short name of the variant, for logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::SlideCompleted { .. } => "slide_completed",
            Self::AvailabilityChanged { .. } => "availability_changed",
            Self::StateChanged { .. } => "state_changed",
        }
    }

    /// Creates a slide completion event.
    #[must_use]
    pub fn slide_completed(device_id: DeviceId, direction: SlideDirection) -> Self {
        Self::SlideCompleted {
            device_id,
            direction,
        }
    }

    /// Creates an available event.
    #[must_use]
    pub fn available(device_id: DeviceId) -> Self {
        Self::AvailabilityChanged {
            device_id,
            available: true,
            reason: None,
        }
    }

    /// Creates an unavailable event with a reason.
    #[must_use]
    pub fn unavailable(device_id: DeviceId, reason: impl Into<String>) -> Self {
        Self::AvailabilityChanged {
            device_id,
            available: false,
            reason: Some(reason.into()),
        }
    }

    /// Creates a state changed event.
    #[must_use]
    pub fn state_changed(device_id: DeviceId, change: StateChange) -> Self {
        Self::StateChanged { device_id, change }
    }
}
