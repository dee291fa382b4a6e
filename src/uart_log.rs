//! A [`CodeLog`] on a UART transmit pin, for a serial console on a USB-UART adapter.

use embassy_rp::Peri;
use embassy_rp::uart::{self, Blocking, UartTx};

use crate::CodeLog;

/// Serial console log. Lines end with `\r\n`. Write errors are ignored.
pub struct UartLog<'d> {
    tx: UartTx<'d, Blocking>,
}

impl<'d> UartLog<'d> {
    /// Open `uart` for transmit only on `tx` at `baudrate` (8N1).
    #[must_use]
    pub fn new<T: uart::Instance>(
        uart: Peri<'d, T>,
        tx: Peri<'d, impl uart::TxPin<T>>,
        baudrate: u32,
    ) -> Self {
        let mut config = uart::Config::default();
        config.baudrate = baudrate;
        Self {
            tx: UartTx::new_blocking(uart, tx, config),
        }
    }
}

impl CodeLog for UartLog<'_> {
    fn print(&mut self, text: &str) {
        let _ = self.tx.blocking_write(text.as_bytes());
    }

    fn println(&mut self, text: &str) {
        let _ = self.tx.blocking_write(text.as_bytes());
        let _ = self.tx.blocking_write(b"\r\n");
    }
}
