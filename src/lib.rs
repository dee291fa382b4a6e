//! Shared items for the IR code display.
//!
//! The application itself is [`PollLoop`]; the rest are the peripherals it is wired to.
#![cfg_attr(not(test), no_std)]

mod char_display;
mod code_log;
mod decode;
mod error;
mod ir_nec_static;
pub mod nec;
mod never;
mod poll_loop;
mod shared_constants;
mod virtual_lcd;

#[cfg(any(feature = "pico1", feature = "pico2"))]
mod char_lcd_i2c;
#[cfg(any(feature = "pico1", feature = "pico2"))]
mod ir_nec;
#[cfg(any(feature = "pico1", feature = "pico2"))]
mod uart_log;

// Re-export commonly used items
pub use char_display::CharDisplay;
#[cfg(feature = "defmt")]
pub use code_log::DefmtLog;
pub use code_log::CodeLog;
pub use decode::{DecodeResult, IrReceiver};
pub use error::{Error, Result};
pub use ir_nec_static::IrNecStatic;
pub use never::Never;
pub use poll_loop::{LoopState, PollLoop, PollLoopConfig, TickOutcome, hex_text};
pub use shared_constants::*;
pub use virtual_lcd::VirtualLcd;

#[cfg(any(feature = "pico1", feature = "pico2"))]
pub use char_lcd_i2c::{CharLcdI2c, DEFAULT_LCD_ADDRESS};
#[cfg(any(feature = "pico1", feature = "pico2"))]
pub use ir_nec::IrNec;
#[cfg(any(feature = "pico1", feature = "pico2"))]
pub use uart_log::UartLog;
