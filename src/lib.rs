//! DOS-styled watch face for the PineTime.
//!
//! The watch face logic (formatting, connectivity indicator, layer lifecycle and
//! rendering) lives here and only talks to the device through the host-service
//! traits in [`system`] and [`ui::resources`], so it can be tested on the host.
//!
//! The firmware in `main.rs` (feature `embedded`) supplies the device
//! implementations and drives the watch face from embassy tasks.

#![cfg_attr(not(test), no_std)]

// This must go first so the logging macros are visible to the other modules
#[macro_use]
mod fmt;

pub mod config;
pub mod error;
pub mod system;
pub mod ui;

#[cfg(feature = "embedded")]
pub mod peripherals;

pub use config::WatchFaceConfig;
pub use error::Error;
pub use ui::{default_watchface::DefaultWatchface, Event, WatchFace};
