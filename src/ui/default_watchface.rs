//! Default watchface

use chrono::NaiveDateTime;
use embedded_graphics::{draw_target::DrawTarget, pixelcolor::Rgb565, text::Alignment};

use super::{
    format::{write_clock, write_date, DATE_BUF_LEN, TIME_BUF_LEN},
    indicator::ConnectionIndicator,
    layer::{BitmapLayer, TextLayer},
    resources::{FontId, ImageId},
    Event, WatchFace, WindowState,
};
use crate::{
    config::WatchFaceConfig,
    system::{time::HourFormat, time::TickUnit, Haptics, Platform},
};

/// Event sources the watch face listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Subscriptions {
    pub tick: Option<TickUnit>,
    pub bluetooth: bool,
}

impl Subscriptions {
    pub const NONE: Subscriptions = Subscriptions {
        tick: None,
        bluetooth: false,
    };
}

/// Layers of the loaded window, in drawing order
struct Layers {
    background: BitmapLayer,
    time: TextLayer<TIME_BUF_LEN>,
    date: TextLayer<DATE_BUF_LEN>,
    bt_icon: BitmapLayer,
}

/// Background image, large clock, date and Bluetooth status icon
pub struct DefaultWatchface {
    config: WatchFaceConfig,
    /// Present while loaded
    layers: Option<Layers>,
    indicator: ConnectionIndicator,
    subscriptions: Subscriptions,
}

impl DefaultWatchface {
    pub fn config(&self) -> &WatchFaceConfig {
        &self.config
    }

    pub fn state(&self) -> WindowState {
        match self.layers {
            Some(_) => WindowState::Loaded,
            None => WindowState::Unloaded,
        }
    }

    pub fn subscriptions(&self) -> Subscriptions {
        self.subscriptions
    }

    pub fn time_text(&self) -> Option<&str> {
        self.layers.as_ref().map(|layers| layers.time.text())
    }

    pub fn date_text(&self) -> Option<&str> {
        self.layers.as_ref().map(|layers| layers.date.text())
    }

    pub fn bt_icon_hidden(&self) -> Option<bool> {
        self.layers.as_ref().map(|layers| layers.bt_icon.is_hidden())
    }

    fn update_time(&mut self, time: &NaiveDateTime, format: HourFormat) {
        let Some(layers) = self.layers.as_mut() else {
            return;
        };

        if let Err(e) = write_clock(layers.time.label_mut(), time, format) {
            warn!("Clock label not updated: {}", e);
        }
        if let Err(e) = write_date(layers.date.label_mut(), time) {
            warn!("Date label not updated: {}", e);
        }
        debug!("Time updated: {=str} {=str}", layers.time.text(), layers.date.text());
    }

    fn update_connection<H: Haptics>(&mut self, connected: bool, haptics: &mut H) {
        let Some(layers) = self.layers.as_mut() else {
            return;
        };
        self.indicator.update(connected, &mut layers.bt_icon, haptics);
    }
}

impl WatchFace for DefaultWatchface {
    fn new(config: WatchFaceConfig) -> Self {
        Self {
            config,
            layers: None,
            indicator: ConnectionIndicator::new(config.disconnect_pulse),
            subscriptions: Subscriptions::NONE,
        }
    }

    fn load<P: Platform>(&mut self, platform: &mut P) {
        if self.layers.is_some() {
            warn!("Watch face already loaded");
            return;
        }
        info!("Loading watch face for {}", self.config.profile);
        let layout = self.config.profile.layout();

        let background = BitmapLayer::new(layout.background, platform.load_bitmap(ImageId::Background));

        let time_font = platform.load_font(FontId::Time);
        let date_font = platform.load_font(FontId::Date);

        let mut time = TextLayer::new(layout.time, time_font, layout.time_color, Alignment::Center);
        if let Err(e) = time.label_mut().set_text("00:00") {
            warn!("Clock label not initialised: {}", e);
        }
        let date = TextLayer::new(layout.date, date_font, layout.date_color, Alignment::Center);

        let bt_icon = BitmapLayer::new(layout.bt_icon, platform.load_bitmap(ImageId::BluetoothIcon));

        self.layers = Some(Layers {
            background,
            time,
            date,
            bt_icon,
        });

        // Register with event sources
        self.subscriptions = Subscriptions {
            tick: Some(self.config.tick_unit),
            bluetooth: true,
        };
        self.indicator.reset();

        // Initialize the display
        let now = platform.now();
        self.update_time(&now, platform.hour_format());
        let connected = platform.is_connected();
        self.update_connection(connected, platform);
    }

    fn unload<P: Platform>(&mut self, platform: &mut P) {
        let Some(layers) = self.layers.take() else {
            debug!("Watch face not loaded");
            return;
        };
        info!("Unloading watch face");
        self.subscriptions = Subscriptions::NONE;

        // Release in reverse order of acquisition
        let Layers {
            background,
            time,
            date,
            bt_icon,
        } = layers;
        platform.destroy_bitmap(bt_icon.into_bitmap());
        platform.unload_font(date.into_font());
        platform.unload_font(time.into_font());
        platform.destroy_bitmap(background.into_bitmap());
    }

    fn handle_event<P: Platform>(&mut self, event: Event, platform: &mut P) -> bool {
        if self.layers.is_none() {
            trace!("Event ignored, watch face not loaded");
            return false;
        }

        match event {
            Event::Tick(time) if self.subscriptions.tick.is_some() => {
                let format = platform.hour_format();
                self.update_time(&time, format);
                true
            }
            Event::Bluetooth(connected) if self.subscriptions.bluetooth => {
                self.update_connection(connected, platform);
                true
            }
            _ => false,
        }
    }

    fn draw<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let Some(layers) = self.layers.as_ref() else {
            return Ok(());
        };

        layers.background.draw(target)?;
        layers.time.draw(target)?;
        layers.date.draw(target)?;
        layers.bt_icon.draw(target)
    }
}
