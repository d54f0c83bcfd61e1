// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `wled_slide` library.
//!
//! This module provides the error hierarchy for handling failures across the
//! library: settings validation, remote device communication, JSON parsing,
//! and device availability.

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// A configuration or input value failed validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Communication with the remote device failed.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// The device answered with a document that could not be understood.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// The device session was removed and no longer accepts commands.
    #[error("device unavailable: {0}")]
    Unavailable(String),
}

impl Error {
    /// Returns `true` if this error was caused by a request timing out.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Protocol(ProtocolError::Timeout(_)))
    }

    /// Returns `true` if this error was raised before any network call was made
    /// because the device address was rejected.
    #[must_use]
    pub fn is_invalid_address(&self) -> bool {
        matches!(self, Self::Protocol(ProtocolError::InvalidAddress(_)))
    }
}

/// Errors related to value validation.
///
/// Settings are validated at the boundary; these errors are returned
/// synchronously and the offending change is rejected as a whole.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValueError {
    /// A numeric value is outside the allowed range.
    #[error("{field} value {actual} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Name of the rejected setting.
        field: &'static str,
        /// Minimum allowed value.
        min: i64,
        /// Maximum allowed value.
        max: i64,
        /// The actual value that was provided.
        actual: i64,
    },

    /// A numeric value is NaN or infinite.
    #[error("{0} must be a finite number")]
    NotFinite(&'static str),

    /// A numeric value that must be whole has a fractional part.
    #[error("{field} must be a whole number (got {value})")]
    NotAnInteger {
        /// Name of the rejected setting.
        field: &'static str,
        /// The value that was provided.
        value: f64,
    },
}

/// Errors related to HTTP communication with the remote device.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// HTTP request failed.
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The device answered with a non-success status.
    #[error("device returned HTTP {status} for {path}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Request path.
        path: String,
    },

    /// Connection to the device failed.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Request timed out.
    #[error("request timed out after {0} ms")]
    Timeout(u64),

    /// Malformed or reserved-range address.
    #[error("invalid address: {0}")]
    InvalidAddress(String),
}

/// Errors related to parsing device responses.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Unexpected response format.
    #[error("unexpected response format: {0}")]
    UnexpectedFormat(String),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
