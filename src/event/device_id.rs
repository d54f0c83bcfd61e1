// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device identifier type.

use std::fmt;

/// Stable identifier of a strip.
///
/// Derived from the controller's MAC address at pairing time, which stays
/// the same across reboots and DHCP changes. Identifiers are lower-cased
/// and capped at 64 characters.
///
/// # Examples
///
/// ```
/// use wled_slide::event::DeviceId;
///
/// let id = DeviceId::new("A0B1C2D3E4F5");
/// assert_eq!(id.as_str(), "a0b1c2d3e4f5");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct DeviceId(String);

impl DeviceId {
    /// Maximum identifier length in characters.
    pub const MAX_LEN: usize = 64;

    /// Creates a normalized identifier.
    #[must_use]
    pub fn new(raw: &str) -> Self {
        Self(raw.to_lowercase().chars().take(Self::MAX_LEN).collect())
    }

    /// Returns the identifier string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DeviceId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}
