use embassy_time::Duration;

// The panel is a 16x2 HD44780
pub const LCD_ROWS: u8 = 2;
pub const LCD_COLS: u8 = 16;

// Startup and post-hold idle texts differ on purpose; see `PollLoopConfig`.
pub const STARTUP_TEXT: &str = "Waiting for IR!";
pub const IDLE_TEXT: &str = "Waiting for IR";
pub const CODE_LABEL: &str = "IR Code:";
pub const LOG_PREFIX: &str = "Received IR code: 0x";

pub const HOLD_DURATION: Duration = Duration::from_millis(1000);
pub const POLL_INTERVAL: Duration = Duration::from_millis(10);

pub const SERIAL_BAUD: u32 = 9600;

/// Code reported for an NEC repeat frame (button held down).
pub const NEC_REPEAT_CODE: u32 = 0xFFFF_FFFF;
