//! UI definitions module
//! Based on: https://github.com/lupyuen/pinetime-watchface/blob/master/src/lib.rs

use chrono::NaiveDateTime;
use embedded_graphics::{draw_target::DrawTarget, pixelcolor::Rgb565};

use crate::{config::WatchFaceConfig, system::Platform};

pub mod default_watchface;
pub mod format;
pub mod indicator;
pub mod layer;
pub mod layout;
pub mod resources;

/// Events delivered by the host event loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A subscribed time unit elapsed
    Tick(NaiveDateTime),
    /// The Bluetooth link went up (`true`) or down (`false`)
    Bluetooth(bool),
}

/// Lifecycle state of the watch face window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WindowState {
    /// No layers or resources exist
    Unloaded,
    /// Layers are created and events are handled
    Loaded,
}

pub trait WatchFace {
    /// Create new watchface, initially unloaded
    fn new(config: WatchFaceConfig) -> Self
    where
        Self: Sized;

    /// Create the layers and show the current state
    fn load<P: Platform>(&mut self, platform: &mut P);

    /// Release everything acquired by `load`
    fn unload<P: Platform>(&mut self, platform: &mut P);

    /// Handle an event, returns whether the face needs to be redrawn
    fn handle_event<P: Platform>(&mut self, event: Event, platform: &mut P) -> bool;

    /// Draw the watchface
    fn draw<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>;
}
