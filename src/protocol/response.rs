// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Documents returned by the device.
//!
//! Every field is optional: the device is untrusted, and callers sanitize
//! what they read instead of rejecting the whole response.

use serde::Deserialize;
use serde_json::Value;

use crate::types::Brightness;

/// Response of `GET /json/info`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DeviceInfo {
    /// User-assigned device name.
    #[serde(default)]
    pub name: Option<String>,
    /// MAC address without separators.
    #[serde(default)]
    pub mac: Option<String>,
    /// Firmware version.
    #[serde(default)]
    pub ver: Option<String>,
    /// LED configuration.
    #[serde(default)]
    pub leds: Option<LedsInfo>,
}

impl DeviceInfo {
    /// Returns the configured LED count, if reported.
    #[must_use]
    pub fn led_count(&self) -> Option<u64> {
        self.leds.as_ref().and_then(|l| l.count)
    }
}

/// The `leds` object of `/json/info`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LedsInfo {
    /// Total number of LEDs.
    #[serde(default)]
    pub count: Option<u64>,
}

/// Response of `GET /json/state`.
///
/// Only the fields mirrored locally are kept; `bri` stays raw so it can be
/// sanitized by [`RemoteState::brightness`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RemoteState {
    #[serde(default)]
    on: Value,
    #[serde(default)]
    bri: Option<Value>,
}

impl RemoteState {
    /// Creates a state document, mainly for tests and mock clients.
    #[must_use]
    pub fn new(on: bool, bri: u8) -> Self {
        Self {
            on: Value::Bool(on),
            bri: Some(Value::from(bri)),
        }
    }

    /// Returns whether the strip is powered.
    ///
    /// Anything other than a boolean is read by truthiness; a missing field
    /// means off.
    #[must_use]
    pub fn is_on(&self) -> bool {
        match &self.on {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
            Value::String(s) => !s.is_empty(),
            Value::Array(_) | Value::Object(_) => true,
        }
    }

    /// Returns the sanitized global brightness.
    #[must_use]
    pub fn brightness(&self) -> Brightness {
        Brightness::from_remote(self.bri.as_ref())
    }
}
