// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Validated device addresses.
//!
//! Addresses come from discovery results and user input, so every request
//! target is checked before any socket is opened: only dotted-quad IPv4
//! unicast addresses outside the loopback, unspecified, link-local and
//! multicast/reserved ranges are accepted.

use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

use crate::error::ProtocolError;

/// IPv4 address of a WLED controller that passed request-target validation.
///
/// # Examples
///
/// ```
/// use wled_slide::protocol::DeviceAddress;
///
/// let address: DeviceAddress = "192.168.1.50".parse().unwrap();
/// assert_eq!(address.to_string(), "192.168.1.50");
///
/// assert!("127.0.0.1".parse::<DeviceAddress>().is_err());
/// assert!("wled.local".parse::<DeviceAddress>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceAddress(Ipv4Addr);

impl DeviceAddress {
    /// Parses and validates an address string.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::InvalidAddress` if the string is not a dotted
    /// quad or falls in a blocked range.
    pub fn parse(address: &str) -> Result<Self, ProtocolError> {
        let ip = Ipv4Addr::from_str(address)
            .map_err(|_| ProtocolError::InvalidAddress(format!("not an IPv4 address: {address:?}")))?;
        Self::from_ip(ip)
    }

    /// Validates an already parsed address.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::InvalidAddress` for blocked ranges.
    pub fn from_ip(ip: Ipv4Addr) -> Result<Self, ProtocolError> {
        let [a, b, ..] = ip.octets();
        let blocked = a == 0 // 0.0.0.0/8 unspecified
            || a == 127 // 127.0.0.0/8 loopback
            || (a == 169 && b == 254) // 169.254.0.0/16 link-local
            || a >= 224; // 224.0.0.0/4 multicast and everything above

        if blocked {
            return Err(ProtocolError::InvalidAddress(format!(
                "reserved address blocked: {ip}"
            )));
        }
        Ok(Self(ip))
    }

    /// Returns the underlying IP address.
    #[must_use]
    pub const fn ip(&self) -> Ipv4Addr {
        self.0
    }
}

impl FromStr for DeviceAddress {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for DeviceAddress {
    type Error = ProtocolError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl fmt::Display for DeviceAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_private_lan_addresses() {
        for ok in ["192.168.1.50", "10.0.0.7", "172.16.4.20", "8.8.8.8"] {
            assert!(DeviceAddress::parse(ok).is_ok(), "{ok} should be accepted");
        }
    }

    #[test]
    fn rejects_reserved_ranges() {
        for blocked in [
            "127.0.0.1",
            "127.255.0.9",
            "0.0.0.0",
            "0.1.2.3",
            "169.254.1.1",
            "224.0.0.1",
            "239.255.255.250",
            "240.0.0.1",
            "255.255.255.255",
        ] {
            let err = DeviceAddress::parse(blocked).unwrap_err();
            assert!(
                matches!(err, ProtocolError::InvalidAddress(_)),
                "{blocked} should be rejected"
            );
        }
    }

    #[test]
    fn link_local_check_is_limited_to_169_254() {
        assert!(DeviceAddress::parse("169.253.1.1").is_ok());
        assert!(DeviceAddress::parse("168.254.1.1").is_ok());
    }

    #[test]
    fn rejects_non_dotted_quads() {
        for bad in [
            "",
            "wled.local",
            "192.168.1",
            "192.168.1.256",
            "192.168.01.5",
            "192.168.1.5:80",
            " 192.168.1.5",
            "http://192.168.1.5",
            "::1",
        ] {
            assert!(DeviceAddress::parse(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn display_round_trips() {
        let address: DeviceAddress = "10.1.2.3".parse().unwrap();
        assert_eq!(address.to_string(), "10.1.2.3");
        assert_eq!(address.ip(), Ipv4Addr::new(10, 1, 2, 3));
    }
}
