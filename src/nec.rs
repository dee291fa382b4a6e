//! Edge-timing decoder for the NEC infrared protocol.
//!
//! The decoder is fed one edge at a time: the new level of an active-low receiver output and
//! the time in µs the previous level lasted. It does no checksum validation. All 32 data bits
//! are reported as-is, first bit on the air in bit 31.

use crate::NEC_REPEAT_CODE;

/// What a completed NEC transmission decoded to.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NecEvent {
    /// A full 32-bit frame.
    Code(u32),
    /// The short frame a remote sends while a button is held.
    Repeat,
    /// A leader was recognized but the rest of the transmission was malformed.
    Fault,
}

impl NecEvent {
    /// The code value this event stands for. Repeats map to [`NEC_REPEAT_CODE`].
    #[must_use]
    pub const fn code(self) -> Option<u32> {
        match self {
            Self::Code(code) => Some(code),
            Self::Repeat => Some(NEC_REPEAT_CODE),
            Self::Fault => None,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
enum DecoderState {
    #[default]
    Idle,
    LdrLow,
    LdrHigh,
    BitLow { n: u8, v: u32 },
    BitHigh { n: u8, v: u32 },
    StopBit { v: u32 }, // Waiting for final stop bit after 32 bits
    RepeatTail,
}

// µs windows
const GLITCH: u32 = 120;
const MIN_IDLE: u32 = 5_000; // Require 5ms of idle before starting decode (filters crosstalk)
const LDR_LOW: (u32, u32) = (7_000, 11_000);
const LDR_HIGH: (u32, u32) = (3_500, 5_500);
const REP_HIGH: (u32, u32) = (1_500, 3_000);
const BIT_LOW: (u32, u32) = (300, 900);
const BIT0_HIGH: (u32, u32) = (250, 900);
const BIT1_HIGH: (u32, u32) = (1_000, 2_400);

const FRAME_BITS: u8 = 32;

#[inline]
const fn inr(x: u32, r: (u32, u32)) -> bool {
    x >= r.0 && x <= r.1
}

/// NEC decoder state machine.
///
/// # Examples
/// ```
/// use ir_display::nec::{NecDecoder, NecEvent};
///
/// let mut decoder = NecDecoder::new();
/// // Leader: idle gap, 9 ms mark, 2.25 ms space, then a 562 µs mark.
/// assert_eq!(decoder.feed(true, 40_000), None);
/// assert_eq!(decoder.feed(false, 9_000), None);
/// assert_eq!(decoder.feed(true, 2_250), None);
/// assert_eq!(decoder.feed(false, 562), Some(NecEvent::Repeat));
/// ```
#[derive(Clone, Debug, Default)]
pub struct NecDecoder {
    state: DecoderState,
}

impl NecDecoder {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: DecoderState::Idle,
        }
    }

    /// Drop any partial frame.
    pub fn reset(&mut self) {
        self.state = DecoderState::Idle;
    }

    /// True while no transmission is in progress.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.state == DecoderState::Idle
    }

    /// Feed one edge. `level_low` is the level after the edge, `dt` the µs since the previous edge.
    #[expect(clippy::arithmetic_side_effects, reason = "Bit operations")]
    pub fn feed(&mut self, level_low: bool, dt: u32) -> Option<NecEvent> {
        if dt < GLITCH {
            return None;
        }
        let (next, event) = match self.state {
            DecoderState::Idle => {
                // Only start decoding after the line has been HIGH for at least MIN_IDLE
                if level_low && dt >= MIN_IDLE {
                    (DecoderState::LdrLow, None)
                } else {
                    (DecoderState::Idle, None)
                }
            }
            DecoderState::LdrLow => {
                if !level_low && inr(dt, LDR_LOW) {
                    (DecoderState::LdrHigh, None)
                } else {
                    // Not a leader, just noise. Nothing was started, so no fault.
                    (DecoderState::Idle, None)
                }
            }
            DecoderState::LdrHigh => {
                if level_low && inr(dt, LDR_HIGH) {
                    (DecoderState::BitLow { n: 0, v: 0 }, None)
                } else if level_low && inr(dt, REP_HIGH) {
                    (DecoderState::RepeatTail, None)
                } else {
                    Self::fault("bad LDR_HIGH/REP_HIGH timing", dt)
                }
            }
            DecoderState::RepeatTail => {
                if !level_low && inr(dt, BIT_LOW) {
                    (DecoderState::Idle, Some(NecEvent::Repeat))
                } else {
                    Self::fault("bad RepeatTail timing", dt)
                }
            }
            DecoderState::BitLow { n, v } => {
                if !level_low && inr(dt, BIT_LOW) {
                    (DecoderState::BitHigh { n, v }, None)
                } else {
                    Self::fault("bad BIT_LOW timing", dt)
                }
            }
            DecoderState::BitHigh { n, v } => {
                let bit = if level_low && inr(dt, BIT1_HIGH) {
                    Some(1)
                } else if level_low && inr(dt, BIT0_HIGH) {
                    Some(0)
                } else {
                    None
                };
                match bit {
                    Some(bit) => {
                        let v = (v << 1) | bit;
                        let n = n + 1;
                        if n == FRAME_BITS {
                            // Don't emit the frame yet - wait for stop bit validation
                            (DecoderState::StopBit { v }, None)
                        } else {
                            (DecoderState::BitLow { n, v }, None)
                        }
                    }
                    None => Self::fault("bad BIT_HIGH timing", dt),
                }
            }
            DecoderState::StopBit { v } => {
                // NEC stop bit: short low pulse (~562µs)
                if !level_low && inr(dt, BIT_LOW) {
                    (DecoderState::Idle, Some(NecEvent::Code(v)))
                } else {
                    Self::fault("missing or bad stop bit", dt)
                }
            }
        };
        self.state = next;
        event
    }

    #[cfg_attr(not(feature = "defmt"), expect(unused_variables, reason = "Only logged"))]
    fn fault(reason: &'static str, dt: u32) -> (DecoderState, Option<NecEvent>) {
        #[cfg(feature = "defmt")]
        defmt::debug!("IR: Decode failed ({}, dt={}µs)", reason, dt);
        (DecoderState::Idle, Some(NecEvent::Fault))
    }
}
