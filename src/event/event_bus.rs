// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-strip event fan-out.

use tokio::sync::broadcast;

use super::DeviceEvent;

const DEFAULT_CHANNEL_CAPACITY: usize = 256;

/// Fan-out of one strip's events to any number of listeners.
///
/// Every session owns one bus. Events published while nobody listens are
/// dropped; a listener that falls more than the capacity behind gets
/// `RecvError::Lagged` and skips ahead.
///
/// # Examples
///
/// ```
/// use wled_slide::animation::SlideDirection;
/// use wled_slide::event::{DeviceEvent, DeviceId, EventBus};
///
/// let bus = EventBus::with_capacity(16);
/// let mut rx = bus.subscribe();
///
/// let reached = bus.publish(DeviceEvent::slide_completed(DeviceId::new("a0b1"), SlideDirection::On));
/// assert_eq!(reached, 1);
/// assert!(rx.try_recv().unwrap().is_slide_completed());
/// ```
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<DeviceEvent>,
}

impl EventBus {
    /// Creates a bus buffering up to 256 events per listener.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Creates a bus buffering up to `capacity` events per listener.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Registers a listener for events published from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<DeviceEvent> {
        self.sender.subscribe()
    }

    /// Sends `event` to every current listener and returns how many there
    /// were.
    pub fn publish(&self, event: DeviceEvent) -> usize {
        let kind = event.kind();
        let device = event.device_id().clone();
        let receivers = self.sender.send(event).unwrap_or(0);
        tracing::trace!(%device, event = kind, receivers, "Published device event");
        receivers
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::SlideDirection;
    use crate::event::DeviceId;
    use crate::state::StateChange;
    use tokio::sync::broadcast::error::{RecvError, TryRecvError};

    fn completed(direction: SlideDirection) -> DeviceEvent {
        DeviceEvent::slide_completed(DeviceId::new("a0b1"), direction)
    }

    #[test]
    fn publish_counts_listeners() {
        let bus = EventBus::new();
        assert_eq!(bus.publish(completed(SlideDirection::On)), 0);

        let rx1 = bus.subscribe();
        let _rx2 = bus.subscribe();
        assert_eq!(bus.publish(completed(SlideDirection::On)), 2);

        drop(rx1);
        assert_eq!(bus.publish(completed(SlideDirection::Off)), 1);
    }

    #[test]
    fn listener_only_sees_later_events() {
        let bus = EventBus::new();
        bus.publish(completed(SlideDirection::On));

        let mut rx = bus.subscribe();
        assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));

        bus.publish(completed(SlideDirection::Off));
        assert_eq!(rx.try_recv().unwrap(), completed(SlideDirection::Off));
    }

    #[tokio::test]
    async fn clones_share_listeners() {
        let bus = EventBus::new();
        let publisher = bus.clone();
        let mut rx = bus.subscribe();

        let change = DeviceEvent::state_changed(DeviceId::new("a0b1"), StateChange::Power(true));
        assert_eq!(publisher.publish(change.clone()), 1);
        assert_eq!(rx.recv().await.unwrap(), change);
    }

    #[tokio::test]
    async fn slow_listener_lags() {
        let bus = EventBus::with_capacity(2);
        let mut rx = bus.subscribe();

        for _ in 0..3 {
            bus.publish(completed(SlideDirection::On));
        }
        assert!(matches!(rx.recv().await, Err(RecvError::Lagged(1))));
        assert_eq!(rx.recv().await.unwrap(), completed(SlideDirection::On));
    }
}
