//! The one-slot hand-off between an NEC edge decoder and the poll loop.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel as EmbassyChannel;
use portable_atomic::{AtomicBool, Ordering};

use crate::DecodeResult;
use crate::nec::NecEvent;

/// Static resources shared between an IR receiver and its background decoder.
///
/// Holds at most one decoded code. Events are only published while armed, and publishing a
/// code disarms, so a code stays put until [`IrNecStatic::resume_listening`].
pub struct IrNecStatic {
    decoded: EmbassyChannel<CriticalSectionRawMutex, u32, 1>,
    armed: AtomicBool,
    fault: AtomicBool,
}

impl IrNecStatic {
    /// Disarmed and empty.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            decoded: EmbassyChannel::new(),
            armed: AtomicBool::new(false),
            fault: AtomicBool::new(false),
        }
    }

    /// Arm for the first time, forgetting any earlier fault.
    pub fn start_listening(&self) {
        self.fault.store(false, Ordering::Release);
        self.armed.store(true, Ordering::Release);
    }

    /// Hand a decoder event over. Ignored while disarmed.
    pub fn publish(&self, nec_event: NecEvent) {
        match nec_event.code() {
            Some(code) => {
                // RP2040 has no compare-and-swap; portable-atomic falls back to a critical section
                if self.armed.swap(false, Ordering::AcqRel) && self.decoded.try_send(code).is_err()
                {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("IR: decoded code dropped (slot full)");
                }
            }
            None => {
                if self.armed.load(Ordering::Acquire) {
                    self.fault.store(true, Ordering::Release);
                }
            }
        }
    }

    /// Take the held code, else a pending fault (reported once), else nothing.
    pub fn try_decode(&self) -> DecodeResult {
        if let Ok(code) = self.decoded.try_receive() {
            return DecodeResult::Value(code);
        }
        if self.fault.swap(false, Ordering::AcqRel) {
            return DecodeResult::Fault;
        }
        DecodeResult::NoSignal
    }

    /// Discard anything left over, then re-arm.
    pub fn resume_listening(&self) {
        self.decoded.clear();
        self.fault.store(false, Ordering::Release);
        self.armed.store(true, Ordering::Release);
    }
}

impl Default for IrNecStatic {
    fn default() -> Self {
        Self::new()
    }
}
