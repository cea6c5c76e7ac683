//! Lifecycle and event handling of the default watch face on a mock device.

use chrono::{NaiveDate, NaiveDateTime};
use embedded_graphics::{
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Point, Size},
    pixelcolor::{Rgb565, RgbColor},
    primitives::{PointsIter, Rectangle},
    Pixel,
};

use pinetime_watchface::{
    system::{time::HourFormat, Clock, Connectivity, Haptics},
    ui::{
        default_watchface::Subscriptions,
        indicator::DisconnectPulse,
        layout::DisplayProfile,
        resources::{Bitmap, FlashResources, Font, FontId, ImageId, ResourceStore},
        WindowState,
    },
    DefaultWatchface, Event, WatchFace, WatchFaceConfig,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    LoadBitmap(ImageId),
    DestroyBitmap(ImageId),
    LoadFont(FontId),
    UnloadFont(FontId),
    Pulse,
}

struct MockPlatform {
    resources: FlashResources,
    now: NaiveDateTime,
    hour_format: HourFormat,
    connected: bool,
    ops: Vec<Op>,
}

impl MockPlatform {
    fn new(now: NaiveDateTime, connected: bool) -> Self {
        Self {
            resources: FlashResources::new(DisplayProfile::PineTime240),
            now,
            hour_format: HourFormat::TwentyFour,
            connected,
            ops: Vec::new(),
        }
    }

    fn pulses(&self) -> usize {
        self.ops.iter().filter(|op| **op == Op::Pulse).count()
    }

    fn resource_ops(&self) -> Vec<Op> {
        self.ops.iter().copied().filter(|op| *op != Op::Pulse).collect()
    }
}

impl Clock for MockPlatform {
    fn now(&self) -> NaiveDateTime {
        self.now
    }

    fn hour_format(&self) -> HourFormat {
        self.hour_format
    }
}

impl Connectivity for MockPlatform {
    fn is_connected(&self) -> bool {
        self.connected
    }
}

impl Haptics for MockPlatform {
    fn long_pulse(&mut self) {
        self.ops.push(Op::Pulse);
    }
}

impl ResourceStore for MockPlatform {
    fn load_bitmap(&mut self, id: ImageId) -> Bitmap {
        self.ops.push(Op::LoadBitmap(id));
        self.resources.load_bitmap(id)
    }

    fn destroy_bitmap(&mut self, bitmap: Bitmap) {
        self.ops.push(Op::DestroyBitmap(bitmap.id()));
        self.resources.destroy_bitmap(bitmap);
    }

    fn load_font(&mut self, id: FontId) -> Font {
        self.ops.push(Op::LoadFont(id));
        self.resources.load_font(id)
    }

    fn unload_font(&mut self, font: Font) {
        self.ops.push(Op::UnloadFont(font.id()));
        self.resources.unload_font(font);
    }
}

/// In-memory 240x240 screen
struct FrameBuffer {
    pixels: Vec<Rgb565>,
}

impl FrameBuffer {
    fn new() -> Self {
        Self {
            pixels: vec![Rgb565::RED; 240 * 240],
        }
    }

    fn count_in(&self, area: Rectangle, color: Rgb565) -> usize {
        area.points()
            .filter(|p| self.pixels[(p.y * 240 + p.x) as usize] == color)
            .count()
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(240, 240)
    }
}

impl DrawTarget for FrameBuffer {
    type Color = Rgb565;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(Point { x, y }, color) in pixels {
            if (0..240).contains(&x) && (0..240).contains(&y) {
                self.pixels[(y * 240 + x) as usize] = color;
            }
        }
        Ok(())
    }
}

fn at(h: u32, m: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 9, 23)
        .unwrap()
        .and_hms_opt(h, m, 0)
        .unwrap()
}

fn config(disconnect_pulse: DisconnectPulse) -> WatchFaceConfig {
    WatchFaceConfig {
        profile: DisplayProfile::PineTime240,
        disconnect_pulse,
        ..WatchFaceConfig::default()
    }
}

#[test]
fn load_shows_current_state() {
    let mut platform = MockPlatform::new(at(13, 5), true);
    let mut face = DefaultWatchface::new(config(DisconnectPulse::EveryCallback));
    assert_eq!(face.state(), WindowState::Unloaded);
    assert_eq!(face.time_text(), None);

    face.load(&mut platform);

    assert_eq!(face.state(), WindowState::Loaded);
    assert_eq!(face.time_text(), Some("13:05"));
    assert_eq!(face.date_text(), Some("Tue 23 Sep"));
    assert_eq!(face.bt_icon_hidden(), Some(true));
    assert_eq!(platform.pulses(), 0);
}

#[test]
fn load_while_disconnected_pulses() {
    let mut platform = MockPlatform::new(at(13, 5), false);
    let mut face = DefaultWatchface::new(config(DisconnectPulse::OnTransition));

    face.load(&mut platform);

    assert_eq!(face.bt_icon_hidden(), Some(false));
    assert_eq!(platform.pulses(), 1);
}

#[test]
fn resources_are_released_in_reverse_order() {
    let mut platform = MockPlatform::new(at(8, 0), true);
    let mut face = DefaultWatchface::new(WatchFaceConfig::default());

    face.load(&mut platform);
    let loaded = platform.resource_ops();
    assert_eq!(
        loaded,
        [
            Op::LoadBitmap(ImageId::Background),
            Op::LoadFont(FontId::Time),
            Op::LoadFont(FontId::Date),
            Op::LoadBitmap(ImageId::BluetoothIcon),
        ]
    );

    face.unload(&mut platform);
    assert_eq!(face.state(), WindowState::Unloaded);
    assert_eq!(face.subscriptions(), Subscriptions::NONE);
    assert_eq!(
        platform.resource_ops()[loaded.len()..],
        [
            Op::DestroyBitmap(ImageId::BluetoothIcon),
            Op::UnloadFont(FontId::Date),
            Op::UnloadFont(FontId::Time),
            Op::DestroyBitmap(ImageId::Background),
        ]
    );

    // A second unload releases nothing
    face.unload(&mut platform);
    assert_eq!(platform.resource_ops().len(), 8);
}

#[test]
fn reload_acquires_fresh_resources() {
    let mut platform = MockPlatform::new(at(8, 0), true);
    let mut face = DefaultWatchface::new(WatchFaceConfig::default());

    face.load(&mut platform);
    // Loading twice does not leak a second set
    face.load(&mut platform);
    assert_eq!(platform.resource_ops().len(), 4);

    face.unload(&mut platform);
    face.load(&mut platform);
    assert_eq!(platform.resource_ops().len(), 12);
    assert_eq!(face.time_text(), Some("08:00"));
}

#[test]
fn events_are_ignored_while_unloaded() {
    let mut platform = MockPlatform::new(at(8, 0), true);
    let mut face = DefaultWatchface::new(WatchFaceConfig::default());

    assert!(!face.handle_event(Event::Tick(at(9, 0)), &mut platform));
    assert!(!face.handle_event(Event::Bluetooth(false), &mut platform));
    assert_eq!(platform.pulses(), 0);
    assert!(platform.ops.is_empty());

    face.load(&mut platform);
    face.unload(&mut platform);
    assert!(!face.handle_event(Event::Bluetooth(false), &mut platform));
    assert_eq!(platform.pulses(), 0);
}

#[test]
fn tick_updates_labels_with_current_preference() {
    let mut platform = MockPlatform::new(at(8, 0), true);
    let mut face = DefaultWatchface::new(WatchFaceConfig::default());
    face.load(&mut platform);
    assert_eq!(
        face.subscriptions(),
        Subscriptions {
            tick: Some(face.config().tick_unit),
            bluetooth: true,
        }
    );

    assert!(face.handle_event(Event::Tick(at(13, 5)), &mut platform));
    assert_eq!(face.time_text(), Some("13:05"));

    // Preference is read on every tick
    platform.hour_format = HourFormat::Twelve;
    assert!(face.handle_event(Event::Tick(at(13, 6)), &mut platform));
    assert_eq!(face.time_text(), Some("01:06"));
    assert_eq!(face.date_text(), Some("Tue 23 Sep"));
}

#[test]
fn repeated_disconnects_follow_pulse_policy() {
    let mut every = MockPlatform::new(at(8, 0), true);
    let mut face = DefaultWatchface::new(config(DisconnectPulse::EveryCallback));
    face.load(&mut every);
    face.handle_event(Event::Bluetooth(false), &mut every);
    face.handle_event(Event::Bluetooth(false), &mut every);
    assert_eq!(every.pulses(), 2);
    assert_eq!(face.bt_icon_hidden(), Some(false));

    let mut once = MockPlatform::new(at(8, 0), true);
    let mut face = DefaultWatchface::new(config(DisconnectPulse::OnTransition));
    face.load(&mut once);
    face.handle_event(Event::Bluetooth(false), &mut once);
    face.handle_event(Event::Bluetooth(false), &mut once);
    assert_eq!(once.pulses(), 1);

    face.handle_event(Event::Bluetooth(true), &mut once);
    assert_eq!(face.bt_icon_hidden(), Some(true));
    face.handle_event(Event::Bluetooth(false), &mut once);
    assert_eq!(once.pulses(), 2);
}

#[test]
fn draw_shows_icon_only_when_disconnected() {
    let mut platform = MockPlatform::new(at(13, 5), true);
    let mut face = DefaultWatchface::new(config(DisconnectPulse::EveryCallback));
    let icon = DisplayProfile::PineTime240.layout().bt_icon;
    let time = DisplayProfile::PineTime240.layout().time;

    // Nothing is drawn before load
    let mut screen = FrameBuffer::new();
    face.draw(&mut screen).unwrap();
    assert_eq!(screen.count_in(icon, Rgb565::RED), 30 * 30);

    face.load(&mut platform);
    let mut screen = FrameBuffer::new();
    face.draw(&mut screen).unwrap();
    assert_eq!(screen.count_in(icon, Rgb565::BLACK), 0);
    assert!(screen.count_in(time, Rgb565::BLACK) > 0);
    assert_eq!(screen.count_in(Rectangle::new(Point::zero(), Size::new(240, 240)), Rgb565::RED), 0);

    face.handle_event(Event::Bluetooth(false), &mut platform);
    let mut screen = FrameBuffer::new();
    face.draw(&mut screen).unwrap();
    assert!(screen.count_in(icon, Rgb565::BLACK) > 0);
}
