// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `wled_slide` - slide ("worm") on/off animations for WLED LED strips.
//!
//! Instead of fading, a strip is switched by moving the edge of the lit
//! region one LED per step, with a dim tail LED next to the moving edge.
//! The animation is produced entirely by segment updates sent to WLED's
//! JSON API; the controller itself never interpolates.
//!
//! # Supported Features
//!
//! - **Slides**: on and off, forward or reverse, with cooperative
//!   cancellation when a newer slide takes over
//! - **Light control**: brightness, hue/saturation and color temperature,
//!   with bursts of color changes coalesced into one update
//! - **State mirroring**: periodic polling of power and brightness, paused
//!   while an animation owns the strip
//! - **Pairing**: sanitized device records built from `/json/info`
//! - **Events**: slide completion, availability and state changes over a
//!   broadcast channel
//!
//! # Quick Start
//!
//! ```no_run
//! use wled_slide::device::{StripDeviceBuilder, pair};
//! use wled_slide::protocol::HttpClient;
//!
//! #[tokio::main]
//! async fn main() -> wled_slide::Result<()> {
//!     let client = HttpClient::new()?;
//!     let paired = pair(&client, "192.168.1.50".parse()?).await?;
//!
//!     let device = StripDeviceBuilder::from_paired(&paired).build(client);
//!     let mut events = device.subscribe();
//!
//!     device.slide_on().await?;
//!     println!("{:?}", events.recv().await);
//!     Ok(())
//! }
//! ```
//!
//! ## Settings
//!
//! ```no_run
//! use wled_slide::device::StripDeviceBuilder;
//! use wled_slide::settings::SettingsUpdate;
//!
//! # async fn example() -> wled_slide::Result<()> {
//! let device = StripDeviceBuilder::new("a0b1c2d3e4f5", "192.168.1.50".parse()?).build_http()?;
//!
//! device.update_settings(&SettingsUpdate::new().num_leds(144.0).reverse(true))?;
//! device.set_slide_speed(25.0)?;
//! device.slide_off().await?;
//! # Ok(())
//! # }
//! ```

pub mod animation;
pub mod device;
pub mod error;
pub mod event;
pub mod poller;
pub mod protocol;
pub mod settings;
pub mod state;
pub mod types;

pub use animation::{SlideDirection, SlideOutcome};
pub use device::{CapabilityChange, ColorChange, PairedDevice, StripDevice, StripDeviceBuilder};
pub use error::{Error, ParseError, ProtocolError, Result, ValueError};
pub use event::{DeviceEvent, DeviceId, EventBus};
pub use poller::PollOutcome;
#[cfg(feature = "http")]
pub use protocol::{HttpClient, HttpConfig};
pub use protocol::{DeviceAddress, StateClient};
pub use settings::{DeviceSettings, SettingsUpdate};
pub use types::{Brightness, ColorMode, LedCount, RgbColor, StepDelay};
