//! The display side of the poll loop: a character display addressed by row and column.

/// A character display such as an HD44780 16x2 panel.
///
/// Writes are fire-and-forget. A panel that stops responding simply shows nothing new.
#[expect(async_fn_in_trait, reason = "Single-threaded executor; futures need not be Send")]
pub trait CharDisplay {
    /// Configure the panel geometry and power it up.
    async fn begin(&mut self, rows: u8, cols: u8);

    /// Blank the panel and home the cursor.
    async fn clear(&mut self);

    /// Move the cursor. Rows and columns are zero based.
    async fn set_cursor(&mut self, row: u8, col: u8);

    /// Print text at the cursor, advancing it.
    async fn print(&mut self, text: &str);
}

impl<T: CharDisplay + ?Sized> CharDisplay for &mut T {
    async fn begin(&mut self, rows: u8, cols: u8) {
        (**self).begin(rows, cols).await;
    }

    async fn clear(&mut self) {
        (**self).clear().await;
    }

    async fn set_cursor(&mut self, row: u8, col: u8) {
        (**self).set_cursor(row, col).await;
    }

    async fn print(&mut self, text: &str) {
        (**self).print(text).await;
    }
}

/// HD44780 DDRAM address of `(row, col)` on a `rows` x `cols` panel, or `None` when off the panel.
#[cfg_attr(
    not(any(test, feature = "pico1", feature = "pico2")),
    expect(dead_code, reason = "Only the I2C panel driver addresses DDRAM")
)]
pub(crate) const fn ddram_address(rows: u8, cols: u8, row: u8, col: u8) -> Option<u8> {
    if row >= rows || col >= cols {
        return None;
    }
    let base: u8 = match row {
        0 => 0x00, // Line 1
        1 => 0x40, // Line 2
        2 => 0x14, // Line 3 (20x4 displays)
        3 => 0x54, // Line 4 (20x4 displays)
        _ => return None,
    };
    base.checked_add(col)
}
