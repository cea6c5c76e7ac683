//! Watch face configuration and compile-time constants.
//!
//! Device constants are tuned here in one place; the runtime knobs of the
//! watch face itself are collected in [`WatchFaceConfig`].

use crate::{
    system::time::{HourFormat, TickUnit},
    ui::{indicator::DisconnectPulse, layout::DisplayProfile},
};

// Bluetooth

/// Name advertised over BLE and stored in the GAP device name.
pub const DEVICE_NAME: &str = "PineTime";

/// Pause before advertising again after the SoftDevice refused to start.
pub const ADVERTISE_RETRY_MS: u64 = 1_000;

// Time keeping

/// Offset of local time to UTC in seconds.
pub const TIMEZONE_OFFSET_SECS: i32 = 1 * 3_600;

/// Hour format used when the system has no stored preference.
pub const DEFAULT_HOUR_FORMAT: HourFormat = HourFormat::TwentyFour;

// Peripherals

/// Length of a long vibration pulse in milliseconds.
pub const LONG_PULSE_MS: u64 = 400;

/// Backlight level (0-7) applied after the display is initialised.
pub const BACKLIGHT_LEVEL: u8 = 2;

/// Depth of the event queue between the event sources and the watch face.
pub const EVENT_QUEUE_DEPTH: usize = 4;

/// Runtime configuration of the watch face
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WatchFaceConfig {
    /// Screen class the layer geometry is taken from
    pub profile: DisplayProfile,
    /// Granularity of the tick subscription
    pub tick_unit: TickUnit,
    /// When to pulse the vibration motor on disconnect
    pub disconnect_pulse: DisconnectPulse,
}

impl Default for WatchFaceConfig {
    fn default() -> Self {
        Self {
            profile: DisplayProfile::TARGET,
            tick_unit: TickUnit::Minute,
            disconnect_pulse: DisconnectPulse::EveryCallback,
        }
    }
}
