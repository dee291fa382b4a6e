//! An in-memory character display that mirrors what a physical panel would show.
//!
//! See [`VirtualLcd`] for usage examples.

use crate::CharDisplay;

/// An in-memory stand-in for an HD44780 panel of up to `ROWS` x `COLS` characters.
///
/// `begin` picks the active geometry (clamped to the capacity). Text printed past the last
/// active column is dropped, and non-ASCII characters show as `?`.
///
/// # Examples
/// ```
/// use embassy_futures::block_on;
/// use ir_display::{CharDisplay, VirtualLcd};
///
/// let mut lcd = VirtualLcd::<2, 16>::new();
/// block_on(async {
///     lcd.begin(2, 16).await;
///     lcd.print("Hello").await;
///     lcd.set_cursor(1, 2).await;
///     lcd.print("world").await;
/// });
/// assert_eq!(lcd.row(0), "Hello");
/// assert_eq!(lcd.row(1), "  world");
/// ```
#[derive(Clone, Debug)]
pub struct VirtualLcd<const ROWS: usize, const COLS: usize> {
    cells: [[u8; COLS]; ROWS],
    rows: usize,
    cols: usize,
    cursor: (usize, usize),
    clear_count: usize,
}

impl<const ROWS: usize, const COLS: usize> Default for VirtualLcd<ROWS, COLS> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const ROWS: usize, const COLS: usize> VirtualLcd<ROWS, COLS> {
    /// A blank panel using its full capacity until `begin` says otherwise.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cells: [[b' '; COLS]; ROWS],
            rows: ROWS,
            cols: COLS,
            cursor: (0, 0),
            clear_count: 0,
        }
    }

    /// The text shown on `row`, without trailing blanks. Rows outside the panel read as empty.
    #[must_use]
    pub fn row(&self, row: usize) -> &str {
        if row >= self.rows {
            return "";
        }
        let Some(cells) = self.cells.get(row).and_then(|line| line.get(..self.cols)) else {
            return "";
        };
        // Every stored byte is ASCII, so this never falls back.
        core::str::from_utf8(cells).unwrap_or("").trim_end()
    }

    /// True when every active row is blank.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        (0..self.rows).all(|row| self.row(row).is_empty())
    }

    /// Current cursor as `(row, col)`.
    #[must_use]
    pub const fn cursor(&self) -> (usize, usize) {
        self.cursor
    }

    /// Active geometry as `(rows, cols)`.
    #[must_use]
    pub const fn geometry(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// How many times the panel has been cleared.
    #[must_use]
    pub const fn clear_count(&self) -> usize {
        self.clear_count
    }

    fn blank(&mut self) {
        for line in &mut self.cells {
            line.fill(b' ');
        }
        self.cursor = (0, 0);
    }
}

impl<const ROWS: usize, const COLS: usize> CharDisplay for VirtualLcd<ROWS, COLS> {
    async fn begin(&mut self, rows: u8, cols: u8) {
        self.rows = usize::from(rows).min(ROWS);
        self.cols = usize::from(cols).min(COLS);
        self.blank();
    }

    async fn clear(&mut self) {
        self.blank();
        self.clear_count = self.clear_count.saturating_add(1);
    }

    async fn set_cursor(&mut self, row: u8, col: u8) {
        self.cursor = (usize::from(row), usize::from(col));
    }

    async fn print(&mut self, text: &str) {
        let (row, mut col) = self.cursor;
        for ch in text.chars() {
            let byte = u8::try_from(ch)
                .ok()
                .filter(|byte| byte.is_ascii_graphic() || *byte == b' ')
                .unwrap_or(b'?');
            if row < self.rows && col < self.cols {
                if let Some(cell) = self.cells.get_mut(row).and_then(|line| line.get_mut(col)) {
                    *cell = byte;
                }
            }
            col = col.saturating_add(1);
        }
        self.cursor = (row, col);
    }
}

#[cfg(test)]
mod tests {
    use embassy_futures::block_on;

    use super::VirtualLcd;
    use crate::CharDisplay;

    #[test]
    fn text_past_last_column_is_dropped() {
        let mut lcd = VirtualLcd::<2, 16>::new();
        block_on(async {
            lcd.begin(2, 16).await;
            lcd.set_cursor(0, 12).await;
            lcd.print("overflow").await;
        });
        assert_eq!(lcd.row(0), "            over");
        assert_eq!(lcd.row(1), "");
        assert_eq!(lcd.cursor(), (0, 20));
    }

    #[test]
    fn begin_clamps_geometry_to_capacity() {
        let mut lcd = VirtualLcd::<2, 16>::new();
        block_on(lcd.begin(4, 20));
        assert_eq!(lcd.geometry(), (2, 16));

        block_on(lcd.begin(1, 8));
        assert_eq!(lcd.geometry(), (1, 8));
        block_on(async {
            lcd.set_cursor(1, 0).await;
            lcd.print("hidden").await;
        });
        assert!(lcd.is_blank());
    }

    #[test]
    fn clear_blanks_and_homes() {
        let mut lcd = VirtualLcd::<2, 16>::new();
        block_on(async {
            lcd.begin(2, 16).await;
            lcd.set_cursor(1, 3).await;
            lcd.print("abc").await;
            lcd.clear().await;
        });
        assert!(lcd.is_blank());
        assert_eq!(lcd.cursor(), (0, 0));
        assert_eq!(lcd.clear_count(), 1);
    }

    #[test]
    fn non_ascii_shows_as_question_mark() {
        let mut lcd = VirtualLcd::<2, 16>::new();
        block_on(lcd.print("µs"));
        assert_eq!(lcd.row(0), "?s");
    }
}
