// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Segment geometry of the four slide sequences.
//!
//! For a strip of `N` LEDs every sequence is `N` updates long: one initial
//! update followed by `N - 1` edge moves, plus a final cleanup.
//!
//! | sequence       | initial body | moving edge             | tail            |
//! |----------------|--------------|-------------------------|-----------------|
//! | on, forward    | `[0, 1)`     | stop `2 ..= N`          | `[i, min(N, i+1))` |
//! | off, forward   | `[0, N)`     | stop `N-1 ..= 1`        | `[i, i+1)`      |
//! | on, reverse    | `[N-1, N)`   | start `N-2 ..= 0`       | `[s-1, s)` or cleared at 0 |
//! | off, reverse   | `[0, N)`     | start `1 ..= N-1`       | `[s-1, s)`      |

use crate::protocol::{SegmentUpdate, StatePayload};
use crate::types::{Brightness, LedCount, RgbColor};

use super::SlideDirection;

/// Tail brightness as a fraction of the body color.
pub const TAIL_BRIGHTNESS: f64 = 0.35;

const BODY: u8 = 0;
const TAIL: u8 = 1;

/// The complete update sequence of one slide.
///
/// # Examples
///
/// ```
/// use wled_slide::animation::{SlideDirection, SlidePlan};
/// use wled_slide::types::{Brightness, LedCount, RgbColor};
///
/// let plan = SlidePlan::new(
///     SlideDirection::On,
///     LedCount::new(5).unwrap(),
///     false,
///     RgbColor::new(255, 0, 0),
///     Brightness::MAX,
/// );
///
/// let stops: Vec<u16> = std::iter::once(plan.initial())
///     .chain(plan.steps())
///     .filter_map(|update| update.segment(0).and_then(|s| s.stop))
///     .collect();
/// assert_eq!(stops, [1, 2, 3, 4, 5]);
/// assert_eq!(plan.tail_color(), RgbColor::new(89, 0, 0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlidePlan {
    direction: SlideDirection,
    leds: u16,
    reverse: bool,
    color: RgbColor,
    tail: RgbColor,
    brightness: Brightness,
}

impl SlidePlan {
    /// Plans a slide of `led_count` LEDs painted `color`.
    #[must_use]
    pub fn new(
        direction: SlideDirection,
        led_count: LedCount,
        reverse: bool,
        color: RgbColor,
        brightness: Brightness,
    ) -> Self {
        Self {
            direction,
            leds: led_count.get(),
            reverse,
            color,
            tail: color.scaled(TAIL_BRIGHTNESS),
            brightness,
        }
    }

    /// Returns the direction of the slide.
    #[must_use]
    pub fn direction(&self) -> SlideDirection {
        self.direction
    }

    /// Returns the body color.
    #[must_use]
    pub fn color(&self) -> RgbColor {
        self.color
    }

    /// Returns the dimmed color of the tail LED.
    #[must_use]
    pub fn tail_color(&self) -> RgbColor {
        self.tail
    }

    /// Returns the number of updates before the cleanup, initial included.
    #[must_use]
    pub fn update_count(&self) -> usize {
        usize::from(self.leds)
    }

    /// The update establishing the starting extent.
    ///
    /// Powers the strip on, sets the brightness, paints the body and hides
    /// any tail left over from an earlier run.
    #[must_use]
    pub fn initial(&self) -> StatePayload {
        let n = self.leds;
        let (start, stop) = match (self.direction, self.reverse) {
            (SlideDirection::On, false) => (0, 1),
            (SlideDirection::On, true) => (n - 1, n),
            (SlideDirection::Off, _) => (0, n),
        };

        StatePayload::new()
            .with_on(true)
            .with_brightness(self.brightness)
            .instant()
            .with_segment(
                SegmentUpdate::new(BODY)
                    .with_range(start, stop)
                    .with_color(self.color),
            )
            .with_segment(SegmentUpdate::cleared(TAIL))
    }

    /// Edge positions visited after the initial update, in order.
    #[must_use]
    pub fn edges(&self) -> Vec<u16> {
        let n = self.leds;
        match (self.direction, self.reverse) {
            (SlideDirection::On, false) => (2..=n).collect(),
            (SlideDirection::Off, false) => (1..n).rev().collect(),
            (SlideDirection::On, true) => (0..n.saturating_sub(1)).rev().collect(),
            (SlideDirection::Off, true) => (1..n).collect(),
        }
    }

    /// The update that moves the body edge to `edge`.
    #[must_use]
    pub fn step(&self, edge: u16) -> StatePayload {
        let n = self.leds;
        let (body, tail) = match (self.direction, self.reverse) {
            (SlideDirection::On, false) => (
                SegmentUpdate::new(BODY).with_stop(edge),
                self.tail_segment(edge, n.min(edge + 1)),
            ),
            (SlideDirection::Off, false) => (
                SegmentUpdate::new(BODY).with_stop(edge),
                self.tail_segment(edge, edge + 1),
            ),
            (_, true) if edge == 0 => (
                SegmentUpdate::new(BODY).with_start(edge),
                SegmentUpdate::cleared(TAIL),
            ),
            (_, true) => (
                SegmentUpdate::new(BODY).with_start(edge),
                self.tail_segment(edge - 1, edge),
            ),
        };

        StatePayload::new()
            .instant()
            .with_segment(body)
            .with_segment(tail)
    }

    /// All edge updates in order.
    pub fn steps(&self) -> impl Iterator<Item = StatePayload> + '_ {
        self.edges().into_iter().map(|edge| self.step(edge))
    }

    /// The cleanup sent after the last step.
    ///
    /// Hides the tail; a slide-off also powers the strip down.
    #[must_use]
    pub fn finish(&self) -> StatePayload {
        let payload = match self.direction {
            SlideDirection::On => StatePayload::new(),
            SlideDirection::Off => StatePayload::new().with_on(false),
        };
        payload.instant().with_segment(SegmentUpdate::cleared(TAIL))
    }

    fn tail_segment(&self, start: u16, stop: u16) -> SegmentUpdate {
        SegmentUpdate::new(TAIL)
            .with_range(start, stop)
            .with_color(self.tail)
    }
}
