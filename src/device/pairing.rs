// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Pairing: turning `/json/info` into a device record.
//!
//! Everything read from the controller is untrusted. Display strings are
//! truncated and stripped of markup characters, and the LED count is
//! clamped before it can reach the animation engine.

use crate::error::Result;
use crate::event::DeviceId;
use crate::protocol::{DeviceAddress, DeviceInfo, StateClient};
use crate::settings::DeviceSettings;
use crate::types::LedCount;

const NAME_MAX_CHARS: usize = 64;
const FIRMWARE_MAX_CHARS: usize = 32;
const MARKUP: [char; 5] = ['<', '>', '&', '"', '\''];

/// A strip ready to be added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairedDevice {
    /// Stable identifier, from the MAC address when reported.
    pub id: DeviceId,
    /// Display name.
    pub name: String,
    /// Network address used for pairing.
    pub address: DeviceAddress,
    /// Firmware version string.
    pub firmware: String,
    /// Initial animation settings.
    pub settings: DeviceSettings,
}

impl PairedDevice {
    /// Builds the record from an info document fetched from `address`.
    ///
    /// # Examples
    ///
    /// ```
    /// use wled_slide::device::PairedDevice;
    /// use wled_slide::protocol::DeviceInfo;
    ///
    /// let info: DeviceInfo = serde_json::from_str(
    ///     r#"{"name": "<b>Desk</b>", "mac": "A0B1C2D3E4F5", "ver": "0.14.4", "leds": {"count": 0}}"#,
    /// ).unwrap();
    /// let paired = PairedDevice::from_info("192.168.1.50".parse().unwrap(), &info);
    ///
    /// assert_eq!(paired.name, "bDesk/b");
    /// assert_eq!(paired.id.as_str(), "a0b1c2d3e4f5");
    /// assert_eq!(paired.settings.led_count.get(), 20);
    /// ```
    #[must_use]
    pub fn from_info(address: DeviceAddress, info: &DeviceInfo) -> Self {
        let name = sanitize(info.name.as_deref().unwrap_or("WLED"), NAME_MAX_CHARS);
        let name = if name.is_empty() {
            "WLED Strip".to_string()
        } else {
            name
        };

        let id = match &info.mac {
            Some(mac) => DeviceId::new(mac),
            None => DeviceId::new(&address.to_string()),
        };

        let led_count = match info.led_count() {
            None | Some(0) => LedCount::DEFAULT,
            Some(count) => LedCount::clamped(i64::try_from(count).unwrap_or(i64::MAX)),
        };

        Self {
            id,
            name,
            address,
            firmware: sanitize(info.ver.as_deref().unwrap_or("unknown"), FIRMWARE_MAX_CHARS),
            settings: DeviceSettings::default().with_led_count(led_count),
        }
    }
}

/// Truncates to `max_chars` characters, then drops markup characters.
fn sanitize(raw: &str, max_chars: usize) -> String {
    raw.chars()
        .take(max_chars)
        .filter(|c| !MARKUP.contains(c))
        .collect()
}

/// Fetches `/json/info` from `address` and builds a [`PairedDevice`].
///
/// # Errors
///
/// Returns the client error if the device cannot be reached or answers with
/// something other than an info document.
pub async fn pair<C: StateClient>(client: &C, address: DeviceAddress) -> Result<PairedDevice> {
    let info = client.get_info(address).await?;
    let paired = PairedDevice::from_info(address, &info);
    tracing::info!(
        device = %paired.id,
        %address,
        name = %paired.name,
        firmware = %paired.firmware,
        leds = paired.settings.led_count.get(),
        "Paired WLED strip"
    );
    Ok(paired)
}

/// Pairs every address that answers, skipping the ones that fail.
///
/// Used for addresses found by discovery, where one unreachable candidate
/// must not hide the others.
pub async fn pair_all<C: StateClient>(
    client: &C,
    addresses: impl IntoIterator<Item = DeviceAddress>,
) -> Vec<PairedDevice> {
    let mut paired = Vec::new();
    for address in addresses {
        match pair(client, address).await {
            Ok(device) => paired.push(device),
            Err(err) => {
                tracing::warn!(%address, error = %err, "Failed to query discovered device");
            }
        }
    }
    paired
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::LedsInfo;

    fn lan() -> DeviceAddress {
        "192.168.1.50".parse().unwrap()
    }

    fn info(name: Option<&str>, mac: Option<&str>, count: Option<u64>) -> DeviceInfo {
        DeviceInfo {
            name: name.map(str::to_string),
            mac: mac.map(str::to_string),
            ver: None,
            leds: count.map(|count| LedsInfo { count: Some(count) }),
        }
    }

    #[test]
    fn name_is_truncated_before_stripping() {
        let raw = format!("{}<>", "a".repeat(63));
        let paired = PairedDevice::from_info(lan(), &info(Some(&raw), None, None));
        assert_eq!(paired.name, "a".repeat(63));
    }

    #[test]
    fn markup_only_name_falls_back() {
        let paired = PairedDevice::from_info(lan(), &info(Some("<&>"), None, None));
        assert_eq!(paired.name, "WLED Strip");
    }

    #[test]
    fn missing_name_defaults_to_wled() {
        let paired = PairedDevice::from_info(lan(), &DeviceInfo::default());
        assert_eq!(paired.name, "WLED");
        assert_eq!(paired.firmware, "unknown");
    }

    #[test]
    fn id_falls_back_to_address() {
        let paired = PairedDevice::from_info(lan(), &info(None, None, None));
        assert_eq!(paired.id.as_str(), "192.168.1.50");

        let paired = PairedDevice::from_info(lan(), &info(None, Some("AABBCC"), None));
        assert_eq!(paired.id.as_str(), "aabbcc");
    }

    #[test]
    fn led_count_is_clamped() {
        let count = |c| {
            PairedDevice::from_info(lan(), &info(None, None, c))
                .settings
                .led_count
                .get()
        };
        assert_eq!(count(None), 20);
        assert_eq!(count(Some(0)), 20);
        assert_eq!(count(Some(144)), 144);
        assert_eq!(count(Some(5000)), 1024);
        assert_eq!(count(Some(u64::MAX)), 1024);
    }

    #[test]
    fn firmware_is_sanitized() {
        let mut raw = info(None, None, None);
        raw.ver = Some(format!("0.15.0\"{}", "x".repeat(40)));
        let paired = PairedDevice::from_info(lan(), &raw);
        assert_eq!(paired.firmware.chars().count(), 31);
        assert!(paired.firmware.starts_with("0.15.0x"));
    }

    #[test]
    fn pairing_keeps_default_pacing() {
        let paired = PairedDevice::from_info(lan(), &info(None, None, Some(60)));
        assert_eq!(paired.settings.step_delay.millis(), 50);
        assert!(!paired.settings.reverse);
        assert_eq!(paired.address, lan());
    }
}
