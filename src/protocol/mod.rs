// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Remote state client for WLED controllers.
//!
//! The device exposes three JSON endpoints used by this crate:
//!
//! - `GET /json/info` - identity and LED configuration ([`DeviceInfo`])
//! - `GET /json/state` - power and brightness ([`RemoteState`])
//! - `POST /json/state` - partial state merge ([`StatePayload`])
//!
//! [`StateClient`] is the seam between the animation engine and the
//! transport. [`HttpClient`] is the production implementation; tests plug in
//! recording clients.

mod address;
#[cfg(feature = "http")]
mod http;
mod payload;
mod response;

pub use address::DeviceAddress;
#[cfg(feature = "http")]
pub use http::{HttpClient, HttpConfig};
pub use payload::{SOLID_EFFECT, SegmentUpdate, StatePayload};
pub use response::{DeviceInfo, LedsInfo, RemoteState};

use std::future::Future;

use crate::error::Result;

/// Request/response access to a single WLED controller.
///
/// Implementations must fail with
/// [`ProtocolError::Timeout`](crate::error::ProtocolError::Timeout) when the
/// device does not answer in time, and with a distinguishable error for
/// non-success responses. Addresses are validated by construction of
/// [`DeviceAddress`], so no request can target a reserved range.
pub trait StateClient: Send + Sync + 'static {
    /// Fetches `/json/info`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, timeout, non-success status or
    /// an unparseable body.
    fn get_info(&self, address: DeviceAddress) -> impl Future<Output = Result<DeviceInfo>> + Send;

    /// Fetches `/json/state`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, timeout, non-success status or
    /// an unparseable body.
    fn get_state(&self, address: DeviceAddress)
    -> impl Future<Output = Result<RemoteState>> + Send;

    /// Posts a partial document to `/json/state`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, timeout or non-success status.
    fn set_state(
        &self,
        address: DeviceAddress,
        payload: &StatePayload,
    ) -> impl Future<Output = Result<()>> + Send;
}
