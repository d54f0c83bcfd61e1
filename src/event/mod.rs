// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Event system for strip sessions.
//!
//! Each session publishes [`DeviceEvent`]s on an [`EventBus`] built on
//! tokio's broadcast channel, so flows, UIs and tests can all observe slide
//! completions, availability changes and mirrored state updates.
//!
//! # Examples
//!
//! ```
//! use wled_slide::event::{DeviceEvent, DeviceId, EventBus};
//!
//! let bus = EventBus::new();
//! let mut rx = bus.subscribe();
//!
//! bus.publish(DeviceEvent::available(DeviceId::new("a0b1")));
//! ```

mod device_event;
mod device_id;
mod event_bus;

pub use device_event::DeviceEvent;
pub use device_id::DeviceId;
pub use event_bus::EventBus;
