// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Slide ("worm") animation engine.
//!
//! A slide moves the edge of a lit region one LED per step using two WLED
//! segments: segment 0 is the body in full color, segment 1 a single dim LED
//! next to the moving edge. Every step is one combined state update with
//! device-side transitions disabled.
//!
//! Runs are cancelled cooperatively. Each run takes a [`Lease`] from the
//! session's [`GenerationCounter`]; a newer run bumps the generation and the
//! older loop stops at its next checkpoint without writing to the device.
//!
//! - [`SlidePlan`] computes the exact updates of each of the four sequences
//! - [`run_slide`] drives a plan against a [`StateClient`](crate::protocol::StateClient)

mod engine;
mod generation;
mod geometry;

pub use engine::run_slide;
pub use generation::{GenerationCounter, Lease};
pub use geometry::{SlidePlan, TAIL_BRIGHTNESS};

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which way the strip is switched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlideDirection {
    /// Grow the lit region until the strip is fully on.
    On,
    /// Shrink the lit region until the strip is off.
    Off,
}

impl SlideDirection {
    /// Returns the direction that switches the strip to `on`.
    #[must_use]
    pub fn from_power(on: bool) -> Self {
        if on { Self::On } else { Self::Off }
    }

    /// Returns the power state the strip ends in.
    #[must_use]
    pub fn target_power(self) -> bool {
        matches!(self, Self::On)
    }
}

impl fmt::Display for SlideDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::On => write!(f, "on"),
            Self::Off => write!(f, "off"),
        }
    }
}

/// How a slide run ended without error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideOutcome {
    /// Every step and the final cleanup were sent.
    Completed,
    /// A newer run took over the device.
    Superseded,
}

impl SlideOutcome {
    /// Returns `true` if the run finished.
    #[must_use]
    pub fn is_completed(self) -> bool {
        matches!(self, Self::Completed)
    }
}
