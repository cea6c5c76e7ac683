//! PineTime peripherals driven by the firmware

pub mod display;
pub mod vibrator;
