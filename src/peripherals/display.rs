//! Display control module for PineTime

use display_interface_spi::SPIInterface;
use embassy_nrf::{
    gpio::Output,
    peripherals::{P0_14, P0_18, P0_22, P0_23, P0_25, P0_26},
    spim::{self, Spim},
};
use embassy_time::Delay;
use embedded_graphics::{draw_target::DrawTarget, pixelcolor::Rgb565, pixelcolor::RgbColor};
use mipidsi::{models::ST7789, Builder, Orientation};

use crate::{ui::WatchFace, Error};

const LCD_W: u16 = 240;
const LCD_H: u16 = 240;

/// Highest backlight level
pub const MAX_BRIGHTNESS: u8 = 7;

/// Backlight control pins.
///
/// There are three active-low backlight pins, each connected to a FET that
/// toggles backlight power through a resistor.
///
/// - Low: 2.2 kΩ
/// - Mid: 100 Ω
/// - High: 30 Ω
///
/// Through combinations of these pins, 7 brightness levels (+ off) can be
/// configured.
pub struct BacklightPins<'a> {
    low: Output<'a, P0_14>,
    mid: Output<'a, P0_22>,
    high: Output<'a, P0_23>,
}

impl BacklightPins<'static> {
    /// Configure backlight pins on boot
    pub fn init(
        low: Output<'static, P0_14>,
        mid: Output<'static, P0_22>,
        high: Output<'static, P0_23>,
    ) -> Self {
        Self { low, mid, high }
    }
}

type Lcd<'a, SPI> = mipidsi::Display<
    SPIInterface<Spim<'a, SPI>, Output<'a, P0_18>, Output<'a, P0_25>>,
    ST7789,
    Output<'a, P0_26>,
>;

pub struct Display<SPI>
where
    SPI: spim::Instance,
{
    /// Display instance
    lcd: Lcd<'static, SPI>,
    /// Backlight pins
    backlight: BacklightPins<'static>,
}

impl<SPI> Display<SPI>
where
    SPI: spim::Instance,
{
    /// Configure display settings on boot, backlight off
    pub fn init(
        spim: Spim<'static, SPI>,
        cs_pin: Output<'static, P0_25>,
        dc_pin: Output<'static, P0_18>,
        rst_pin: Output<'static, P0_26>,
        backlight: BacklightPins<'static>,
    ) -> Result<Self, Error> {
        let lcd = Builder::st7789(SPIInterface::new(spim, dc_pin, cs_pin))
            .with_display_size(LCD_W, LCD_H)
            .with_orientation(Orientation::Portrait(false))
            .init(&mut Delay, Some(rst_pin))
            .map_err(|_| Error::Display)?;

        let mut display = Self { lcd, backlight };
        display.set_brightness(0)?;
        display.clear(Rgb565::BLACK)?;
        Ok(display)
    }

    /// Clear the display
    pub fn clear(&mut self, color: Rgb565) -> Result<(), Error> {
        self.lcd.clear(color).map_err(|_| Error::Display)
    }

    /// Draw the watch face onto the panel
    pub fn render<W: WatchFace>(&mut self, face: &W) -> Result<(), Error> {
        face.draw(&mut self.lcd).map_err(|_| Error::Display)
    }

    /// Set the brightness level between 0 (off) and 7 (max brightness).
    pub fn set_brightness(&mut self, level: u8) -> Result<(), Error> {
        if level > MAX_BRIGHTNESS {
            return Err(Error::Display);
        }
        defmt::debug!("Setting backlight brightness to {}", level);

        let pins = &mut self.backlight;
        if level & 0x01 > 0 {
            pins.low.set_low();
        } else {
            pins.low.set_high();
        }
        if level & 0x02 > 0 {
            pins.mid.set_low();
        } else {
            pins.mid.set_high();
        }
        if level & 0x04 > 0 {
            pins.high.set_low();
        } else {
            pins.high.set_high();
        }

        Ok(())
    }
}
