//! LCD Display driver for HD44780-compatible displays with PCF8574 I2C backpack

use embassy_rp::Peri;
use embassy_rp::i2c::{self, Config as I2cConfig, Instance as I2cInstance};
use embassy_time::Timer;

use crate::CharDisplay;
use crate::char_display::ddram_address;

/// Character LCD Display with I2C interface (HD44780 + PCF8574 backpack)
///
/// Bus errors are ignored: a disconnected panel shows nothing, the rest of the program
/// carries on.
pub struct CharLcdI2c<'d, T: I2cInstance> {
    i2c: i2c::I2c<'d, T, i2c::Blocking>,
    address: u8,
    rows: u8,
    cols: u8,
    // False after a `set_cursor` off the panel; prints are dropped until the cursor is back
    on_panel: bool,
}

// PCF8574 pin mapping: P0=RS, P1=RW, P2=E, P3=Backlight, P4-P7=Data
const LCD_BACKLIGHT: u8 = 0x08;
const LCD_ENABLE: u8 = 0x04;
const LCD_RS: u8 = 0x01;

/// Most common PCF8574 address. Some backpacks use 0x3F.
pub const DEFAULT_LCD_ADDRESS: u8 = 0x27;

impl<'d, T: I2cInstance> CharLcdI2c<'d, T> {
    /// Create a new LCD with the default I2C address (0x27). The panel is not touched until
    /// [`CharDisplay::begin`].
    ///
    /// # Arguments
    /// * `i2c_peripheral` - I2C peripheral (I2C0 or I2C1)
    /// * `scl` - Clock pin (any valid I2C SCL pin for this peripheral)
    /// * `sda` - Data pin (any valid I2C SDA pin for this peripheral)
    #[must_use]
    pub fn new(
        i2c_peripheral: Peri<'d, T>,
        scl: Peri<'d, impl i2c::SclPin<T>>,
        sda: Peri<'d, impl i2c::SdaPin<T>>,
    ) -> Self {
        Self::new_with_address(i2c_peripheral, scl, sda, DEFAULT_LCD_ADDRESS)
    }

    /// Create a new LCD with a custom I2C address (typically 0x27 or 0x3F).
    #[must_use]
    pub fn new_with_address(
        i2c_peripheral: Peri<'d, T>,
        scl: Peri<'d, impl i2c::SclPin<T>>,
        sda: Peri<'d, impl i2c::SdaPin<T>>,
        i2c_address: u8,
    ) -> Self {
        Self {
            i2c: i2c::I2c::new_blocking(i2c_peripheral, scl, sda, I2cConfig::default()),
            address: i2c_address,
            rows: 2,
            cols: 16,
            on_panel: true,
        }
    }

    #[expect(clippy::arithmetic_side_effects, reason = "Bit operations")]
    async fn write_nibble(&mut self, nibble: u8, rs: bool) {
        let rs_bit = if rs { LCD_RS } else { 0 };
        let data = (nibble << 4) | LCD_BACKLIGHT | rs_bit;

        // Write with enable high
        let _ = self.i2c.blocking_write(self.address, &[data | LCD_ENABLE]);
        Timer::after_micros(1).await;

        // Write with enable low
        let _ = self.i2c.blocking_write(self.address, &[data]);
        Timer::after_micros(50).await;
    }

    async fn write_byte_internal(&mut self, byte: u8, rs: bool) {
        self.write_nibble((byte >> 4) & 0x0F, rs).await;
        self.write_nibble(byte & 0x0F, rs).await;
    }
}

impl<T: I2cInstance> CharDisplay for CharLcdI2c<'_, T> {
    async fn begin(&mut self, rows: u8, cols: u8) {
        self.rows = rows;
        self.cols = cols;

        Timer::after_millis(50).await;

        // Initialize in 4-bit mode
        self.write_nibble(0x03, false).await;
        Timer::after_millis(5).await;
        self.write_nibble(0x03, false).await;
        Timer::after_micros(150).await;
        self.write_nibble(0x03, false).await;
        self.write_nibble(0x02, false).await;

        // Function set: 4-bit, 1 or 2 lines, 5x8 font
        let lines = if rows > 1 { 0x08 } else { 0x00 };
        self.write_byte_internal(0x20 | lines, false).await;
        // Display control: display on, cursor off, blink off
        self.write_byte_internal(0x0C, false).await;
        self.clear().await;
        // Entry mode: increment cursor, no shift
        self.write_byte_internal(0x06, false).await;
    }

    async fn clear(&mut self) {
        self.write_byte_internal(0x01, false).await;
        Timer::after_millis(2).await;
        self.on_panel = true;
    }

    async fn set_cursor(&mut self, row: u8, col: u8) {
        let Some(address) = ddram_address(self.rows, self.cols, row, col) else {
            self.on_panel = false;
            return;
        };
        self.on_panel = true;
        self.write_byte_internal(0x80 | address, false).await;
    }

    async fn print(&mut self, text: &str) {
        if !self.on_panel {
            return;
        }
        for ch in text.bytes() {
            self.write_byte_internal(ch, true).await;
        }
    }
}
