//! Images and fonts used by the watch face
//!
//! Resources are handed out as move-only handles. A handle has to be given back
//! to the store it came from to release it, and since it cannot be cloned it
//! can only be released once.

use embedded_graphics::{
    geometry::{OriginDimensions, Size},
    image::ImageRaw,
    mono_font::MonoFont,
    pixelcolor::BinaryColor,
};
use profont::{PROFONT_14_POINT, PROFONT_18_POINT, PROFONT_24_POINT};

use super::layout::DisplayProfile;

/// Bitmap resources
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ImageId {
    Background,
    BluetoothIcon,
}

/// Font resources
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FontId {
    /// Large font of the clock label
    Time,
    /// Font of the date label
    Date,
}

/// Decoded 1 bit per pixel image, `On` pixels are drawn white
pub struct Bitmap {
    id: ImageId,
    image: ImageRaw<'static, BinaryColor>,
}

impl Bitmap {
    pub fn new(id: ImageId, image: ImageRaw<'static, BinaryColor>) -> Self {
        Self { id, image }
    }

    pub fn id(&self) -> ImageId {
        self.id
    }

    pub fn image(&self) -> &ImageRaw<'static, BinaryColor> {
        &self.image
    }

    pub fn size(&self) -> Size {
        self.image.size()
    }
}

/// Loaded font
pub struct Font {
    id: FontId,
    font: &'static MonoFont<'static>,
}

impl Font {
    pub fn new(id: FontId, font: &'static MonoFont<'static>) -> Self {
        Self { id, font }
    }

    pub fn id(&self) -> FontId {
        self.id
    }

    pub fn mono_font(&self) -> &'static MonoFont<'static> {
        self.font
    }
}

/// Loader for bitmaps and fonts
pub trait ResourceStore {
    fn load_bitmap(&mut self, id: ImageId) -> Bitmap;

    fn destroy_bitmap(&mut self, bitmap: Bitmap);

    fn load_font(&mut self, id: FontId) -> Font;

    fn unload_font(&mut self, font: Font);
}

static BACKGROUND_144X168: &[u8] = include_bytes!("../../resources/images/background_144x168.raw");
static BACKGROUND_180X180: &[u8] = include_bytes!("../../resources/images/background_180x180.raw");
static BACKGROUND_200X228: &[u8] = include_bytes!("../../resources/images/background_200x228.raw");
static BACKGROUND_240X240: &[u8] = include_bytes!("../../resources/images/background_240x240.raw");
static BT_ICON: &[u8] = include_bytes!("../../resources/images/bt_icon_30x30.raw");

const BT_ICON_WIDTH: u32 = 30;

/// Resources linked into the firmware image
///
/// Loading only wraps the static data, releasing drops the handle.
pub struct FlashResources {
    profile: DisplayProfile,
}

impl FlashResources {
    pub fn new(profile: DisplayProfile) -> Self {
        Self { profile }
    }

    fn background(&self) -> ImageRaw<'static, BinaryColor> {
        let width = self.profile.screen_size().width;
        let data = match self.profile {
            DisplayProfile::Rect144x168 => BACKGROUND_144X168,
            DisplayProfile::Round180 => BACKGROUND_180X180,
            DisplayProfile::Rect200x228 => BACKGROUND_200X228,
            DisplayProfile::PineTime240 => BACKGROUND_240X240,
        };
        ImageRaw::new(data, width)
    }
}

impl ResourceStore for FlashResources {
    fn load_bitmap(&mut self, id: ImageId) -> Bitmap {
        debug!("Loading bitmap {}", id);
        let image = match id {
            ImageId::Background => self.background(),
            ImageId::BluetoothIcon => ImageRaw::new(BT_ICON, BT_ICON_WIDTH),
        };
        Bitmap::new(id, image)
    }

    fn destroy_bitmap(&mut self, bitmap: Bitmap) {
        debug!("Destroying bitmap {}", bitmap.id());
    }

    fn load_font(&mut self, id: FontId) -> Font {
        debug!("Loading font {}", id);
        let font = match (id, self.profile) {
            (FontId::Time, _) => &PROFONT_24_POINT,
            (FontId::Date, DisplayProfile::Rect144x168 | DisplayProfile::Round180) => {
                &PROFONT_14_POINT
            }
            (FontId::Date, _) => &PROFONT_18_POINT,
        };
        Font::new(id, font)
    }

    fn unload_font(&mut self, font: Font) {
        debug!("Unloading font {}", font.id());
    }
}
