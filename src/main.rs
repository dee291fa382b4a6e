//! Shows "IR Code:" on a 16x2 LCD whenever an IR remote button is pressed and logs the code.
//!
//! Runs on a Raspberry Pi Pico. Wiring: IR receiver on GP2, LCD backpack on I2C0
//! (SCL = GP5, SDA = GP4), serial console TX on GP0 at 9600 baud.
#![no_std]
#![no_main]
#![allow(clippy::future_not_send, reason = "Single-threaded")]

use defmt::info;
use defmt_rtt as _;
use embassy_executor::Spawner;
use ir_display::{
    CharLcdI2c, DefmtLog, IrNec, IrNecStatic, Never, PollLoop, PollLoopConfig, Result,
    SERIAL_BAUD, UartLog,
};
use panic_probe as _;

#[embassy_executor::main]
pub async fn main(spawner: Spawner) -> ! {
    // If it returns, something went wrong.
    let err = inner_main(spawner).await.unwrap_err();
    panic!("{err}");
}

async fn inner_main(spawner: Spawner) -> Result<Never> {
    info!("IR display starting");
    let p = embassy_rp::init(Default::default());

    static IR_NEC_STATIC: IrNecStatic = IrNec::new_static();
    let ir = IrNec::new(p.PIN_2, &IR_NEC_STATIC, spawner)?;

    let lcd = CharLcdI2c::new(p.I2C0, p.PIN_5, p.PIN_4);
    let serial = UartLog::new(p.UART0, p.PIN_0, SERIAL_BAUD);

    PollLoop::new(ir, lcd, (DefmtLog::new(), serial), PollLoopConfig::default())
        .run()
        .await
}
