//! A device abstraction for infrared receivers using the NEC protocol.
//!
//! See [`IrNec`] for usage examples.
use defmt::{info, warn};
use embassy_executor::Spawner;
use embassy_rp::Peri;
use embassy_rp::gpio::{AnyPin, Input, Pin, Pull};
use embassy_time::Instant;

use crate::nec::NecDecoder;
use crate::{DecodeResult, Error, IrNecStatic, IrReceiver, Result};

// ===== Public API ===========================================================

/// A device abstraction for an infrared receiver using the NEC protocol.
///
/// # Examples
/// ```no_run
/// # #![no_std]
/// # #![no_main]
/// # use panic_probe as _;
/// # use embassy_executor::Spawner;
/// # use ir_display::{DecodeResult, IrNec, IrNecStatic, IrReceiver};
/// # async fn example(p: embassy_rp::Peripherals, spawner: Spawner) -> ir_display::Result<()> {
/// static IR_NEC_STATIC: IrNecStatic = IrNec::new_static();
/// let mut ir = IrNec::new(p.PIN_2, &IR_NEC_STATIC, spawner)?;
/// ir.start_listening();
///
/// loop {
///     if let DecodeResult::Value(code) = ir.try_decode() {
///         defmt::info!("IR: 0x{:X}", code);
///         ir.resume_listening();
///     }
///     embassy_time::Timer::after_millis(10).await;
/// }
/// # }
/// ```
pub struct IrNec<'a> {
    ir_nec_static: &'a IrNecStatic,
}

impl IrNec<'_> {
    /// Create static resources for the receiver.
    ///
    /// See [`IrNec`] for usage examples.
    #[must_use]
    pub const fn new_static() -> IrNecStatic {
        IrNecStatic::new()
    }

    /// Create a new IR receiver on the specified pin. Nothing is reported until
    /// [`IrReceiver::start_listening`].
    ///
    /// See [`IrNec`] for usage examples.
    ///
    /// # Errors
    /// Returns an error if the background task cannot be spawned.
    pub fn new<P: Pin>(
        pin: Peri<'static, P>,
        ir_nec_static: &'static IrNecStatic,
        spawner: Spawner,
    ) -> Result<Self> {
        // Type erase to Peri<'static, AnyPin> (keep the Peri wrapper!)
        let any: Peri<'static, AnyPin> = pin.into();
        // Use Pull::Up for typical IR receivers (they idle HIGH with active-low modules)
        let token =
            ir_nec_task(Input::new(any, Pull::Up), ir_nec_static).map_err(Error::TaskSpawn)?;
        spawner.spawn(token);
        Ok(Self { ir_nec_static })
    }
}

impl IrReceiver for IrNec<'_> {
    fn start_listening(&mut self) {
        self.ir_nec_static.start_listening();
        info!("IR receiver listening");
    }

    fn try_decode(&mut self) -> DecodeResult {
        self.ir_nec_static.try_decode()
    }

    fn resume_listening(&mut self) {
        self.ir_nec_static.resume_listening();
    }
}

#[embassy_executor::task]
async fn ir_nec_task(mut pin: Input<'static>, ir_nec_static: &'static IrNecStatic) -> ! {
    let mut decoder = NecDecoder::new();
    let mut level_low: bool = pin.is_low(); // Initialize from pin state
    let mut last_edge: Instant = Instant::now();

    info!("NEC IR task started");
    loop {
        pin.wait_for_any_edge().await;

        let now = Instant::now();
        let dt = u32::try_from(now.duration_since(last_edge).as_micros()).unwrap_or(u32::MAX);
        last_edge = now;

        // Active-low receiver: every edge toggles the level.
        // Toggle instead of reading pin to avoid race conditions and glitches
        level_low = !level_low;

        // Sanity check: verify our toggle matches the actual pin state
        let actual_level_low = pin.is_low();
        if level_low != actual_level_low {
            warn!(
                "IR: Pin state mismatch! Expected {}, got {} (missed edge?)",
                level_low, actual_level_low
            );
            level_low = actual_level_low;
            // Partial frame is corrupt
            decoder.reset();
            continue;
        }

        if let Some(nec_event) = decoder.feed(level_low, dt) {
            info!("IR: {}", nec_event);
            ir_nec_static.publish(nec_event);
        }
    }
}
