// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Shared test infrastructure for integration tests.

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use parking_lot::Mutex;
use wled_slide::animation::SlideDirection;
use wled_slide::device::{StripDevice, StripDeviceBuilder};
use wled_slide::protocol::{DeviceAddress, DeviceInfo, RemoteState, StateClient, StatePayload};
use wled_slide::settings::DeviceSettings;
use wled_slide::types::{LedCount, StepDelay};
use wled_slide::{DeviceEvent, Error, ProtocolError, Result};

// ============================================================================
// Recording client
// ============================================================================

/// How a scripted `set_state` call behaves.
#[derive(Debug, Clone, Copy, Default)]
struct Script {
    delay: Duration,
    fail: bool,
}

#[derive(Debug, Default)]
struct Inner {
    posted: Mutex<Vec<(DeviceAddress, StatePayload)>>,
    set_calls: AtomicUsize,
    scripts: Mutex<HashMap<usize, Script>>,
    get_state_calls: AtomicUsize,
    fail_get_state: AtomicBool,
    get_state_delay: Mutex<Duration>,
    remote: Mutex<RemoteState>,
    info: Mutex<DeviceInfo>,
}

/// In-memory `StateClient` that records every posted document.
///
/// `set_state` calls are numbered from 1 across the client's lifetime and can
/// be scripted to stall (in tokio time) or fail with a timeout.
#[derive(Debug, Clone, Default)]
pub struct RecordingClient {
    inner: Arc<Inner>,
}

impl RecordingClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the `call`-th `set_state` fail with a timeout.
    pub fn fail_set_state_call(&self, call: usize) {
        self.inner.scripts.lock().entry(call).or_default().fail = true;
    }

    /// Makes the `call`-th `set_state` wait `delay` before answering.
    pub fn delay_set_state_call(&self, call: usize, delay: Duration) {
        self.inner.scripts.lock().entry(call).or_default().delay = delay;
    }

    pub fn fail_get_state(&self, fail: bool) {
        self.inner.fail_get_state.store(fail, Ordering::SeqCst);
    }

    /// Makes every `get_state` wait `delay` before answering.
    pub fn delay_get_state(&self, delay: Duration) {
        *self.inner.get_state_delay.lock() = delay;
    }

    pub fn set_remote(&self, state: RemoteState) {
        *self.inner.remote.lock() = state;
    }

    pub fn set_info(&self, info: DeviceInfo) {
        *self.inner.info.lock() = info;
    }

    /// Every posted document, in order.
    pub fn posted(&self) -> Vec<StatePayload> {
        self.inner
            .posted
            .lock()
            .iter()
            .map(|(_, payload)| payload.clone())
            .collect()
    }

    /// Every address a document was posted to, in order.
    pub fn posted_addresses(&self) -> Vec<DeviceAddress> {
        self.inner
            .posted
            .lock()
            .iter()
            .map(|(address, _)| *address)
            .collect()
    }

    pub fn post_count(&self) -> usize {
        self.inner.posted.lock().len()
    }

    pub fn get_state_calls(&self) -> usize {
        self.inner.get_state_calls.load(Ordering::SeqCst)
    }
}

impl StateClient for RecordingClient {
    async fn get_info(&self, _address: DeviceAddress) -> Result<DeviceInfo> {
        Ok(self.inner.info.lock().clone())
    }

    async fn get_state(&self, _address: DeviceAddress) -> Result<RemoteState> {
        self.inner.get_state_calls.fetch_add(1, Ordering::SeqCst);
        let delay = *self.inner.get_state_delay.lock();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        if self.inner.fail_get_state.load(Ordering::SeqCst) {
            return Err(ProtocolError::ConnectionFailed("host unreachable".to_string()).into());
        }
        Ok(self.inner.remote.lock().clone())
    }

    async fn set_state(&self, address: DeviceAddress, payload: &StatePayload) -> Result<()> {
        let call = self.inner.set_calls.fetch_add(1, Ordering::SeqCst) + 1;
        let script = self
            .inner
            .scripts
            .lock()
            .get(&call)
            .copied()
            .unwrap_or_default();

        if !script.delay.is_zero() {
            tokio::time::sleep(script.delay).await;
        }
        if script.fail {
            return Err(Error::Protocol(ProtocolError::Timeout(5000)));
        }
        self.inner.posted.lock().push((address, payload.clone()));
        Ok(())
    }
}

// ============================================================================
// Fixtures
// ============================================================================

pub const DEVICE_ID: &str = "a0b1c2d3e4f5";

pub fn lan() -> DeviceAddress {
    "192.168.1.50".parse().unwrap()
}

pub fn settings(leds: u16, step_ms: u16, reverse: bool) -> DeviceSettings {
    DeviceSettings::default()
        .with_led_count(LedCount::new(leds).unwrap())
        .with_step_delay(StepDelay::new(step_ms).unwrap())
        .with_reverse(reverse)
}

/// A device without background polling.
pub fn device(client: &RecordingClient, settings: DeviceSettings) -> StripDevice<RecordingClient> {
    StripDeviceBuilder::new(DEVICE_ID, lan())
        .with_settings(settings)
        .without_polling()
        .build(client.clone())
}

/// Stop of segment 0, if the document moves it.
pub fn body_stop(payload: &StatePayload) -> Option<u16> {
    payload.segment(0).and_then(|s| s.stop)
}

/// Start of segment 0, if the document moves it.
pub fn body_start(payload: &StatePayload) -> Option<u16> {
    payload.segment(0).and_then(|s| s.start)
}

/// Range of segment 1, if present.
pub fn tail(payload: &StatePayload) -> Option<(u16, u16)> {
    let segment = payload.segment(1)?;
    Some((segment.start?, segment.stop?))
}

/// Drains all events received so far.
pub fn drain(rx: &mut tokio::sync::broadcast::Receiver<DeviceEvent>) -> Vec<DeviceEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

/// Directions of the slide completions among `events`.
pub fn completions(events: &[DeviceEvent]) -> Vec<SlideDirection> {
    events
        .iter()
        .filter_map(|event| match event {
            DeviceEvent::SlideCompleted { direction, .. } => Some(*direction),
            _ => None,
        })
        .collect()
}
