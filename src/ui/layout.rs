//! Layer geometry per display profile
//!
//! Each supported screen class gets one row in [`LAYOUTS`]. The profile the
//! firmware is built for is picked with a cargo feature and exposed as
//! [`DisplayProfile::TARGET`].

use embedded_graphics::{
    geometry::{Point, Size},
    pixelcolor::{Rgb565, RgbColor},
    primitives::Rectangle,
};

/// Screen class of the target device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayProfile {
    /// 144x168 rectangular screen
    Rect144x168 = 0,
    /// 180x180 round screen
    Round180 = 1,
    /// 200x228 rectangular screen
    Rect200x228 = 2,
    /// PineTime 240x240 screen
    PineTime240 = 3,
}

impl DisplayProfile {
    #[cfg(feature = "profile-rect144")]
    pub const TARGET: DisplayProfile = DisplayProfile::Rect144x168;
    #[cfg(all(feature = "profile-round180", not(feature = "profile-rect144")))]
    pub const TARGET: DisplayProfile = DisplayProfile::Round180;
    #[cfg(all(
        feature = "profile-rect200",
        not(any(feature = "profile-rect144", feature = "profile-round180"))
    ))]
    pub const TARGET: DisplayProfile = DisplayProfile::Rect200x228;
    #[cfg(not(any(
        feature = "profile-rect144",
        feature = "profile-round180",
        feature = "profile-rect200"
    )))]
    pub const TARGET: DisplayProfile = DisplayProfile::PineTime240;

    pub const ALL: [DisplayProfile; 4] = [
        DisplayProfile::Rect144x168,
        DisplayProfile::Round180,
        DisplayProfile::Rect200x228,
        DisplayProfile::PineTime240,
    ];

    /// Layer geometry for this profile
    pub fn layout(self) -> &'static Layout {
        &LAYOUTS[self as usize]
    }

    /// Screen size in pixels
    pub fn screen_size(self) -> Size {
        self.layout().background.size
    }
}

/// Frames and colours of the watch face layers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub background: Rectangle,
    pub time: Rectangle,
    pub date: Rectangle,
    pub bt_icon: Rectangle,
    pub time_color: Rgb565,
    pub date_color: Rgb565,
}

const fn frame(x: i32, y: i32, w: u32, h: u32) -> Rectangle {
    Rectangle::new(Point::new(x, y), Size::new(w, h))
}

/// Layouts indexed by `DisplayProfile as usize`
pub static LAYOUTS: [Layout; 4] = [
    // Rect144x168
    Layout {
        background: frame(0, 0, 144, 168),
        time: frame(0, 115, 144, 50),
        date: frame(0, 25, 144, 30),
        bt_icon: frame(56, 65, 30, 30),
        time_color: Rgb565::BLACK,
        date_color: Rgb565::BLACK,
    },
    // Round180
    Layout {
        background: frame(0, 0, 180, 180),
        time: frame(0, 115, 180, 50),
        date: frame(0, 35, 180, 30),
        bt_icon: frame(56, 65, 60, 30),
        time_color: Rgb565::BLACK,
        date_color: Rgb565::BLACK,
    },
    // Rect200x228
    Layout {
        background: frame(0, 0, 200, 228),
        time: frame(0, 150, 200, 60),
        date: frame(0, 45, 200, 30),
        bt_icon: frame(85, 90, 30, 30),
        time_color: Rgb565::BLACK,
        date_color: Rgb565::BLACK,
    },
    // PineTime240
    Layout {
        background: frame(0, 0, 240, 240),
        time: frame(0, 160, 240, 50),
        date: frame(0, 45, 240, 30),
        bt_icon: frame(105, 95, 30, 30),
        time_color: Rgb565::BLACK,
        date_color: Rgb565::BLACK,
    },
];
