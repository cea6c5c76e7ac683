//! Text and image layers

use core::fmt;

use embedded_graphics::{
    draw_target::{DrawTarget, DrawTargetExt},
    geometry::{AnchorPoint, Point},
    image::Image,
    mono_font::MonoTextStyle,
    pixelcolor::{BinaryColor, Rgb565},
    primitives::Rectangle,
    text::{Alignment, Baseline, Text, TextStyleBuilder},
    Drawable,
};

use super::resources::{Bitmap, Font};
use crate::Error;

/// Fixed size text buffer, rewritten in place
pub struct Label<const N: usize> {
    str_buf: [u8; N],
    len: usize,
}

impl<const N: usize> Default for Label<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Label<N> {
    /// Size of the buffer in bytes
    pub const CAPACITY: usize = N;

    /// Create new empty label
    pub const fn new() -> Self {
        Self {
            str_buf: [0; N],
            len: 0,
        }
    }

    /// Replace the label text with formatted output.
    ///
    /// If the output does not fit the previous text is kept.
    pub fn format(&mut self, args: fmt::Arguments) -> Result<(), Error> {
        let mut scratch = [0u8; N];
        let len = format_no_std::show(&mut scratch, args)
            .map_err(|_| Error::TextOverflow)?
            .len();
        self.str_buf = scratch;
        self.len = len;
        Ok(())
    }

    pub fn set_text(&mut self, text: &str) -> Result<(), Error> {
        self.format(format_args!("{}", text))
    }

    pub fn as_str(&self) -> &str {
        // Only ever filled from `str` data
        core::str::from_utf8(&self.str_buf[..self.len]).unwrap_or("")
    }

    /// Raw buffer contents, including the unused tail
    pub fn as_bytes(&self) -> &[u8; N] {
        &self.str_buf
    }
}

/// Single line of text drawn inside a frame
pub struct TextLayer<const N: usize> {
    frame: Rectangle,
    label: Label<N>,
    font: Font,
    color: Rgb565,
    alignment: Alignment,
}

impl<const N: usize> TextLayer<N> {
    pub fn new(frame: Rectangle, font: Font, color: Rgb565, alignment: Alignment) -> Self {
        Self {
            frame,
            label: Label::new(),
            font,
            color,
            alignment,
        }
    }

    pub fn frame(&self) -> Rectangle {
        self.frame
    }

    pub fn text(&self) -> &str {
        self.label.as_str()
    }

    pub fn label(&self) -> &Label<N> {
        &self.label
    }

    pub fn label_mut(&mut self) -> &mut Label<N> {
        &mut self.label
    }

    /// Tear down the layer, handing back its font
    pub fn into_font(self) -> Font {
        self.font
    }

    pub fn draw<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let character_style = MonoTextStyle::new(self.font.mono_font(), self.color);
        let text_style = TextStyleBuilder::new()
            .alignment(self.alignment)
            .baseline(Baseline::Top)
            .build();

        let x = match self.alignment {
            Alignment::Left => self.frame.top_left.x,
            Alignment::Center => self.frame.center().x,
            Alignment::Right => self.frame.top_left.x + self.frame.size.width as i32 - 1,
        };
        let position = Point::new(x, self.frame.top_left.y);

        Text::with_text_style(self.label.as_str(), position, character_style, text_style)
            .draw(&mut target.clipped(&self.frame))?;
        Ok(())
    }
}

/// Bitmap drawn centred in a frame
pub struct BitmapLayer {
    frame: Rectangle,
    bitmap: Bitmap,
    hidden: bool,
}

impl BitmapLayer {
    pub fn new(frame: Rectangle, bitmap: Bitmap) -> Self {
        Self {
            frame,
            bitmap,
            hidden: false,
        }
    }

    pub fn frame(&self) -> Rectangle {
        self.frame
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }

    /// Tear down the layer, handing back its bitmap
    pub fn into_bitmap(self) -> Bitmap {
        self.bitmap
    }

    pub fn draw<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        if self.hidden {
            return Ok(());
        }

        let position = self
            .frame
            .resized(self.bitmap.size(), AnchorPoint::Center)
            .top_left;

        let mut clipped = target.clipped(&self.frame);
        let mut converted = clipped.color_converted::<BinaryColor>();
        Image::new(self.bitmap.image(), position).draw(&mut converted)
    }
}
