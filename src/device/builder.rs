// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Strip device builder.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use crate::event::{DeviceId, EventBus};
use crate::poller::{self, DEFAULT_POLL_INTERVAL};
use crate::protocol::{DeviceAddress, StateClient};
#[cfg(feature = "http")]
use crate::protocol::{HttpClient, HttpConfig};
use crate::settings::DeviceSettings;

use super::color_batch::{self, DEFAULT_COLOR_DEBOUNCE};
use super::session::Session;
use super::{PairedDevice, StripDevice};

/// Builder for [`StripDevice`].
///
/// # Examples
///
/// ```no_run
/// use std::time::Duration;
/// use wled_slide::device::StripDeviceBuilder;
/// use wled_slide::settings::DeviceSettings;
///
/// # async fn example() -> wled_slide::Result<()> {
/// let device = StripDeviceBuilder::new("a0b1c2d3e4f5", "192.168.1.50".parse()?)
///     .with_settings(DeviceSettings::default().with_reverse(true))
///     .with_poll_interval(Duration::from_secs(10))
///     .build_http()?;
///
/// device.slide_on().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct StripDeviceBuilder {
    id: DeviceId,
    address: DeviceAddress,
    settings: DeviceSettings,
    poll_interval: Option<Duration>,
    color_debounce: Duration,
    event_capacity: Option<usize>,
    #[cfg(feature = "http")]
    http: HttpConfig,
}

impl StripDeviceBuilder {
    /// Creates a builder with default settings and timings.
    #[must_use]
    pub fn new(id: impl Into<DeviceId>, address: DeviceAddress) -> Self {
        Self {
            id: id.into(),
            address,
            settings: DeviceSettings::default(),
            poll_interval: Some(DEFAULT_POLL_INTERVAL),
            color_debounce: DEFAULT_COLOR_DEBOUNCE,
            event_capacity: None,
            #[cfg(feature = "http")]
            http: HttpConfig::default(),
        }
    }

    /// Creates a builder for a freshly paired strip.
    #[must_use]
    pub fn from_paired(paired: &PairedDevice) -> Self {
        Self::new(paired.id.clone(), paired.address).with_settings(paired.settings)
    }

    /// Sets the initial animation settings.
    #[must_use]
    pub fn with_settings(mut self, settings: DeviceSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Sets the poll period; a zero period disables polling.
    #[must_use]
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = (!interval.is_zero()).then_some(interval);
        self
    }

    /// Disables background polling.
    #[must_use]
    pub fn without_polling(mut self) -> Self {
        self.poll_interval = None;
        self
    }

    /// Sets the color coalescing window.
    #[must_use]
    pub fn with_color_debounce(mut self, window: Duration) -> Self {
        self.color_debounce = window;
        self
    }

    /// Sets the event channel capacity, at least 1.
    #[must_use]
    pub fn with_event_capacity(mut self, capacity: usize) -> Self {
        self.event_capacity = Some(capacity.max(1));
        self
    }

    /// Sets the HTTP configuration used by [`build_http`](Self::build_http).
    #[cfg(feature = "http")]
    #[must_use]
    pub fn with_http_config(mut self, config: HttpConfig) -> Self {
        self.http = config;
        self
    }

    /// Creates the device and starts its background tasks.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    #[must_use]
    pub fn build<C: StateClient>(self, client: C) -> StripDevice<C> {
        let events = self
            .event_capacity
            .map_or_else(EventBus::new, EventBus::with_capacity);
        let (colors_tx, colors_rx) = mpsc::unbounded_channel();

        let session = Arc::new(Session::new(
            self.id,
            client,
            self.address,
            self.settings,
            events,
            colors_tx,
        ));

        session.track(color_batch::spawn(
            Arc::downgrade(&session),
            colors_rx,
            self.color_debounce,
        ));
        if let Some(period) = self.poll_interval {
            session.track(poller::spawn(Arc::downgrade(&session), period));
        }

        tracing::debug!(
            device = %session.id,
            address = %self.address,
            leds = self.settings.led_count.get(),
            polling = self.poll_interval.is_some(),
            "Strip device created"
        );
        StripDevice { session }
    }

    /// Creates the device with an [`HttpClient`].
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    #[cfg(feature = "http")]
    pub fn build_http(self) -> crate::Result<StripDevice<HttpClient>> {
        let client = self.http.clone().into_client()?;
        Ok(self.build(client))
    }
}
