// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Shared per-strip session state.

use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::{Mutex, RwLock};
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

use crate::animation::{GenerationCounter, SlideDirection, SlideOutcome, SlidePlan, run_slide};
use crate::error::{Error, Result, ValueError};
use crate::event::{DeviceEvent, DeviceId, EventBus};
use crate::protocol::{DeviceAddress, SegmentUpdate, StateClient, StatePayload};
use crate::settings::{DeviceSettings, SettingsUpdate};
use crate::state::{Availability, DeviceState, StateChange};
use crate::types::{Brightness, StepDelay};

use super::ColorChange;

/// Everything known about one strip.
///
/// Locks are only held for snapshot reads and writes, never across an
/// await. Background tasks hold a weak reference, so dropping the last
/// handle drops the session and aborts them.
#[derive(Debug)]
pub(crate) struct Session<C> {
    pub(crate) id: DeviceId,
    pub(crate) client: C,
    pub(crate) generation: GenerationCounter,
    address: RwLock<DeviceAddress>,
    settings: RwLock<DeviceSettings>,
    state: RwLock<DeviceState>,
    events: EventBus,
    colors: mpsc::UnboundedSender<ColorChange>,
    tasks: Mutex<Vec<JoinHandle<()>>>,
    removed: AtomicBool,
}

impl<C: StateClient> Session<C> {
    pub(crate) fn new(
        id: DeviceId,
        client: C,
        address: DeviceAddress,
        settings: DeviceSettings,
        events: EventBus,
        colors: mpsc::UnboundedSender<ColorChange>,
    ) -> Self {
        Self {
            id,
            client,
            generation: GenerationCounter::new(),
            address: RwLock::new(address),
            settings: RwLock::new(settings),
            state: RwLock::new(DeviceState::new()),
            events,
            colors,
            tasks: Mutex::new(Vec::new()),
            removed: AtomicBool::new(false),
        }
    }

    // ========== Snapshots ==========

    pub(crate) fn address(&self) -> DeviceAddress {
        *self.address.read()
    }

    pub(crate) fn settings(&self) -> DeviceSettings {
        *self.settings.read()
    }

    pub(crate) fn state(&self) -> DeviceState {
        self.state.read().clone()
    }

    pub(crate) fn subscribe(&self) -> broadcast::Receiver<DeviceEvent> {
        self.events.subscribe()
    }

    // ========== Mirror ==========

    /// Applies `change` to the mirror and publishes it if anything changed.
    pub(crate) fn apply(&self, change: StateChange) -> bool {
        let changed = self.state.write().apply(&change);
        if changed {
            self.events
                .publish(DeviceEvent::state_changed(self.id.clone(), change));
        }
        changed
    }

    pub(crate) fn mark_available(&self) {
        if self.state.write().set_availability(Availability::Available) {
            tracing::info!(device = %self.id, "Device available");
            self.events.publish(DeviceEvent::available(self.id.clone()));
        }
    }

    pub(crate) fn mark_unavailable(&self, reason: impl Into<String>) {
        let reason = reason.into();
        let changed = self
            .state
            .write()
            .set_availability(Availability::Unavailable(reason.clone()));
        if changed {
            tracing::warn!(device = %self.id, %reason, "Device unavailable");
            self.events
                .publish(DeviceEvent::unavailable(self.id.clone(), reason));
        }
    }

    // ========== Configuration ==========

    pub(crate) fn set_address(&self, raw: &str) -> Result<DeviceAddress> {
        let address = DeviceAddress::parse(raw).inspect_err(|err| {
            tracing::warn!(device = %self.id, address = raw, error = %err, "Ignoring invalid address change");
        })?;
        *self.address.write() = address;
        tracing::info!(device = %self.id, %address, "Address changed");
        Ok(address)
    }

    pub(crate) fn update_settings(&self, update: &SettingsUpdate) -> Result<DeviceSettings> {
        let mut settings = self.settings.write();
        let updated = settings.updated(update)?;
        *settings = updated;
        tracing::info!(device = %self.id, keys = ?update.changed_keys(), "Settings updated");
        Ok(updated)
    }

    pub(crate) fn set_step_delay(&self, millis: f64) -> Result<StepDelay> {
        let step_delay = StepDelay::rounded(millis)?;
        self.settings.write().step_delay = step_delay;
        tracing::debug!(device = %self.id, %step_delay, "Slide speed changed");
        Ok(step_delay)
    }

    // ========== Remote updates ==========

    fn ensure_active(&self) -> Result<()> {
        if self.is_removed() {
            return Err(Error::Unavailable(format!("device {} was removed", self.id)));
        }
        Ok(())
    }

    /// Runs one slide to completion, supersession or failure.
    pub(crate) async fn slide(&self, direction: SlideDirection) -> Result<SlideOutcome> {
        self.ensure_active()?;
        let lease = self.generation.begin();

        let settings = self.settings();
        let light = self.state.read().light();
        let plan = SlidePlan::new(
            direction,
            settings.led_count,
            settings.reverse,
            light.color(),
            Brightness::from_fraction(light.brightness),
        );
        let address = self.address();

        match run_slide(
            &self.client,
            address,
            &lease,
            &plan,
            settings.step_delay.as_duration(),
        )
        .await
        {
            Ok(SlideOutcome::Completed) => {
                self.apply(StateChange::Power(direction.target_power()));
                self.events
                    .publish(DeviceEvent::slide_completed(self.id.clone(), direction));
                Ok(SlideOutcome::Completed)
            }
            Ok(SlideOutcome::Superseded) => Ok(SlideOutcome::Superseded),
            Err(err) => {
                self.mark_unavailable(err.to_string());
                Err(err)
            }
        }
    }

    pub(crate) async fn set_dim(&self, fraction: f64) -> Result<Brightness> {
        self.ensure_active()?;
        if !fraction.is_finite() {
            return Err(ValueError::NotFinite("dim").into());
        }
        let brightness = Brightness::from_fraction(fraction);
        tracing::debug!(device = %self.id, fraction, bri = brightness.value(), "Setting brightness");

        let payload = StatePayload::new().with_brightness(brightness).instant();
        self.client.set_state(self.address(), &payload).await?;
        self.apply(StateChange::Brightness(fraction));
        Ok(brightness)
    }

    pub(crate) fn queue_color(&self, change: ColorChange) -> Result<()> {
        self.ensure_active()?;
        self.colors
            .send(change)
            .map_err(|_| Error::Unavailable(format!("color updates for {} stopped", self.id)))
    }

    /// Sends one merged color change.
    ///
    /// Resets the body to the full strip and hides the tail, undoing what a
    /// cancelled slide may have left behind.
    pub(crate) async fn apply_color(&self, change: ColorChange) -> Result<()> {
        let light = change.overlay(self.state.read().light());
        let leds = self.settings().led_count;
        let color = light.color();
        tracing::debug!(device = %self.id, %color, mode = %light.mode, "Applying color");

        let payload = StatePayload::new()
            .with_brightness(Brightness::from_fraction(light.brightness))
            .instant()
            .with_segment(
                SegmentUpdate::new(0)
                    .with_range(0, leds.get())
                    .with_color(color),
            )
            .with_segment(SegmentUpdate::cleared(1));
        self.client.set_state(self.address(), &payload).await?;

        for change in change.changes() {
            self.apply(change);
        }
        Ok(())
    }

    // ========== Lifecycle ==========

    pub(crate) fn track(&self, task: JoinHandle<()>) {
        self.tasks.lock().push(task);
    }

    pub(crate) fn is_removed(&self) -> bool {
        self.removed.load(Ordering::SeqCst)
    }

    /// Stops background tasks and orphans any slide in flight.
    pub(crate) fn remove(&self) {
        if self.removed.swap(true, Ordering::SeqCst) {
            return;
        }
        let generation = self.generation.retire();
        for task in self.tasks.lock().drain(..) {
            task.abort();
        }
        tracing::info!(device = %self.id, generation, "Device removed");
    }
}

impl<C> Drop for Session<C> {
    fn drop(&mut self) {
        for task in self.tasks.get_mut().drain(..) {
            task.abort();
        }
    }
}
