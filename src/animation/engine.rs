// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Drives a [`SlidePlan`] against a device.

use std::time::Duration;

use crate::error::Result;
use crate::protocol::{DeviceAddress, StateClient};

use super::{Lease, SlideOutcome, SlidePlan};

/// Sends the updates of `plan` one at a time, pausing `step_delay` after each
/// edge move.
///
/// The lease is checked before every edge move and before the cleanup. A
/// stale lease stops the run without further writes. Updates are awaited in
/// order, so at most one request per run is in flight.
///
/// # Errors
///
/// Returns the client error if the run still owns the device when it fails.
/// Errors of a run that was superseded in the meantime are swallowed and
/// reported as [`SlideOutcome::Superseded`].
pub async fn run_slide<C: StateClient>(
    client: &C,
    address: DeviceAddress,
    lease: &Lease<'_>,
    plan: &SlidePlan,
    step_delay: Duration,
) -> Result<SlideOutcome> {
    let generation = lease.generation();
    let direction = plan.direction();
    tracing::debug!(%address, generation, %direction, updates = plan.update_count(), "Slide starting");

    match drive(client, address, lease, plan, step_delay).await {
        Ok(SlideOutcome::Superseded) => {
            tracing::debug!(%address, generation, %direction, "Slide superseded by newer animation");
            Ok(SlideOutcome::Superseded)
        }
        Ok(SlideOutcome::Completed) => {
            tracing::info!(%address, generation, %direction, "Slide complete");
            Ok(SlideOutcome::Completed)
        }
        Err(err) if !lease.is_current() => {
            tracing::debug!(%address, generation, error = %err, "Ignoring failure of stale slide");
            Ok(SlideOutcome::Superseded)
        }
        Err(err) => {
            tracing::warn!(%address, generation, %direction, error = %err, "Slide failed");
            Err(err)
        }
    }
}

async fn drive<C: StateClient>(
    client: &C,
    address: DeviceAddress,
    lease: &Lease<'_>,
    plan: &SlidePlan,
    step_delay: Duration,
) -> Result<SlideOutcome> {
    client.set_state(address, &plan.initial()).await?;

    for step in plan.steps() {
        if !lease.is_current() {
            return Ok(SlideOutcome::Superseded);
        }
        client.set_state(address, &step).await?;
        tokio::time::sleep(step_delay).await;
    }

    if !lease.is_current() {
        return Ok(SlideOutcome::Superseded);
    }
    client.set_state(address, &plan.finish()).await?;
    Ok(SlideOutcome::Completed)
}
