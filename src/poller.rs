// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Periodic refresh of the mirrored power and brightness.
//!
//! Each tick fetches `/json/state` unless an animation owns the device, in
//! which case the tick does nothing at all. Failures mark the device
//! unavailable and are retried by the next tick.

use std::sync::Weak;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::device::session::Session;
use crate::protocol::StateClient;
use crate::state::StateChange;

/// Default time between polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Result of one poll tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// An animation owned the device before or during the fetch; nothing
    /// was written.
    Skipped,
    /// The mirror was refreshed and the device marked available.
    Updated,
    /// The fetch failed and the device was marked unavailable.
    Failed,
}

pub(crate) async fn poll_once<C: StateClient>(session: &Session<C>) -> PollOutcome {
    if session.generation.is_animating() {
        tracing::trace!(device = %session.id, "Animation running, skipping poll");
        return PollOutcome::Skipped;
    }

    let generation = session.generation.current();
    let address = session.address();
    match session.client.get_state(address).await {
        Ok(remote) => {
            // A slide started, and maybe finished, while the request was in flight
            if session.generation.is_animating() || session.generation.current() != generation {
                tracing::trace!(device = %session.id, generation, "Animation ran during poll, discarding");
                return PollOutcome::Skipped;
            }
            session.apply(StateChange::Power(remote.is_on()));
            session.apply(StateChange::Brightness(remote.brightness().as_fraction()));
            session.mark_available();
            PollOutcome::Updated
        }
        Err(err) => {
            tracing::warn!(device = %session.id, %address, error = %err, "Poll failed");
            session.mark_unavailable(format!("Offline: {err}"));
            PollOutcome::Failed
        }
    }
}

/// Spawns the poll loop; the first tick happens one `period` after start.
pub(crate) fn spawn<C: StateClient>(session: Weak<Session<C>>, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            let Some(session) = session.upgrade() else {
                break;
            };
            poll_once(&session).await;
        }
    })
}
