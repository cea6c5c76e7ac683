//! Control the vibration motor
//!
//! Implementation based upon https://github.com/tstellanova/cst816s/blob/master/examples/touchpad.rs
//! and https://wiki.pine64.org/wiki/PineTime.

use embassy_nrf::{gpio::Output, peripherals::P0_16};
use embassy_sync::{blocking_mutex::raw::ThreadModeRawMutex, signal::Signal};
use embassy_time::Timer;

use crate::{config::LONG_PULSE_MS, system::Haptics};

pub struct Vibrator {
    /// Motor enable pin (inverted)
    pin_enable: Output<'static, P0_16>,
}

impl Vibrator {
    /// Configure vibrator on boot, motor off
    pub fn init(mut enable_pin: Output<'static, P0_16>) -> Self {
        enable_pin.set_high();
        Self {
            pin_enable: enable_pin,
        }
    }

    /// Run the motor once for `millis` milliseconds
    async fn pulse(&mut self, millis: u64) {
        self.pin_enable.set_low();
        Timer::after_millis(millis).await;
        self.pin_enable.set_high();
    }

    pub async fn long_pulse(&mut self) {
        self.pulse(LONG_PULSE_MS).await;
    }
}

/// Requests pulses from the task owning the [`Vibrator`].
///
/// Requests raised before the motor task picks up the previous one collapse
/// into a single pulse.
pub struct SignalHaptics {
    signal: &'static Signal<ThreadModeRawMutex, ()>,
}

impl SignalHaptics {
    pub fn new(signal: &'static Signal<ThreadModeRawMutex, ()>) -> Self {
        Self { signal }
    }
}

impl Haptics for SignalHaptics {
    fn long_pulse(&mut self) {
        self.signal.signal(());
    }
}
