// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Partial state documents posted to `/json/state`.
//!
//! WLED merges posted documents into its current state, so only the fields
//! that change are serialized. Absent fields are left untouched on the
//! device.

use serde::{Deserialize, Serialize};

use crate::types::{Brightness, RgbColor};

/// Effect id of WLED's "Solid" effect.
pub const SOLID_EFFECT: u8 = 0;

/// A partial `/json/state` document.
///
/// # Examples
///
/// ```
/// use wled_slide::protocol::{SegmentUpdate, StatePayload};
/// use wled_slide::types::{Brightness, RgbColor};
///
/// let payload = StatePayload::new()
///     .with_on(true)
///     .with_brightness(Brightness::MAX)
///     .instant()
///     .with_segment(SegmentUpdate::new(0).with_range(0, 1).with_color(RgbColor::new(255, 0, 0)))
///     .with_segment(SegmentUpdate::cleared(1));
///
/// assert_eq!(
///     serde_json::to_value(&payload).unwrap(),
///     serde_json::json!({
///         "on": true,
///         "bri": 255,
///         "transition": 0,
///         "seg": [
///             {"id": 0, "start": 0, "stop": 1, "col": [[255, 0, 0], [0, 0, 0], [0, 0, 0]], "fx": 0},
///             {"id": 1, "start": 0, "stop": 0}
///         ]
///     })
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatePayload {
    /// Power state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on: Option<bool>,
    /// Global brightness.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bri: Option<Brightness>,
    /// Device-side crossfade time in 100 ms ticks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition: Option<u16>,
    /// Segment updates, merged by `id`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub seg: Vec<SegmentUpdate>,
}

impl StatePayload {
    /// Creates an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the power state.
    #[must_use]
    pub fn with_on(mut self, on: bool) -> Self {
        self.on = Some(on);
        self
    }

    /// Sets the global brightness.
    #[must_use]
    pub fn with_brightness(mut self, brightness: Brightness) -> Self {
        self.bri = Some(brightness);
        self
    }

    /// Disables device-side interpolation for this update.
    #[must_use]
    pub fn instant(mut self) -> Self {
        self.transition = Some(0);
        self
    }

    /// Appends a segment update.
    #[must_use]
    pub fn with_segment(mut self, segment: SegmentUpdate) -> Self {
        self.seg.push(segment);
        self
    }

    /// Returns the update for segment `id`, if present.
    #[must_use]
    pub fn segment(&self, id: u8) -> Option<&SegmentUpdate> {
        self.seg.iter().find(|s| s.id == id)
    }
}

/// A partial segment document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentUpdate {
    /// Segment id.
    pub id: u8,
    /// First LED (inclusive).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<u16>,
    /// Last LED (exclusive).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop: Option<u16>,
    /// Primary, secondary and tertiary colors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub col: Option<[RgbColor; 3]>,
    /// Effect id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fx: Option<u8>,
}

impl SegmentUpdate {
    /// Creates an update that only addresses segment `id`.
    #[must_use]
    pub fn new(id: u8) -> Self {
        Self {
            id,
            start: None,
            stop: None,
            col: None,
            fx: None,
        }
    }

    /// An empty `[0, 0)` range, which hides the segment.
    #[must_use]
    pub fn cleared(id: u8) -> Self {
        Self::new(id).with_range(0, 0)
    }

    /// Sets both boundaries.
    #[must_use]
    pub fn with_range(mut self, start: u16, stop: u16) -> Self {
        self.start = Some(start);
        self.stop = Some(stop);
        self
    }

    /// Sets the first LED.
    #[must_use]
    pub fn with_start(mut self, start: u16) -> Self {
        self.start = Some(start);
        self
    }

    /// Sets the end LED (exclusive).
    #[must_use]
    pub fn with_stop(mut self, stop: u16) -> Self {
        self.stop = Some(stop);
        self
    }

    /// Paints the segment a solid color; secondary slots are black.
    #[must_use]
    pub fn with_color(mut self, color: RgbColor) -> Self {
        self.col = Some([color, RgbColor::BLACK, RgbColor::BLACK]);
        self.fx = Some(SOLID_EFFECT);
        self
    }

    /// Returns `true` if this update hides the segment.
    #[must_use]
    pub fn is_cleared(&self) -> bool {
        self.start == Some(0) && self.stop == Some(0)
    }
}
