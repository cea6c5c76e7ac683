//! Host services the watch face depends on.
//!
//! The watch face never touches hardware directly: it reads the clock, peeks at
//! the Bluetooth link and asks for vibration through the traits defined here,
//! and loads its images and fonts through [`ResourceStore`].

use crate::ui::resources::ResourceStore;

pub mod time;

#[cfg(feature = "embedded")]
pub mod bluetooth;
#[cfg(feature = "embedded")]
pub mod config;

pub use time::Clock;

/// Current state of the Bluetooth link to the companion phone
pub trait Connectivity {
    /// Whether a phone is connected right now
    fn is_connected(&self) -> bool;
}

/// Haptic feedback
pub trait Haptics {
    /// Fire a single long vibration pulse
    fn long_pulse(&mut self);
}

/// Everything the watch face needs from the device
pub trait Platform: Clock + Connectivity + Haptics + ResourceStore {}

impl<T> Platform for T where T: Clock + Connectivity + Haptics + ResourceStore {}
