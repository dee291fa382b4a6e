//! The receiver side of the poll loop: what one poll of an IR receiver can yield.

use crate::NEC_REPEAT_CODE;

/// Outcome of asking an IR receiver for a decoded code.
///
/// The poll loop treats [`DecodeResult::Fault`] exactly like [`DecodeResult::NoSignal`];
/// the distinction only exists so it can be logged.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeResult {
    #[default]
    NoSignal,
    Value(u32),
    Fault,
}

impl DecodeResult {
    /// The decoded code, if any.
    #[must_use]
    pub const fn code(self) -> Option<u32> {
        match self {
            Self::Value(code) => Some(code),
            Self::NoSignal | Self::Fault => None,
        }
    }

    /// True when this result carries the NEC repeat sentinel.
    #[must_use]
    pub const fn is_repeat(self) -> bool {
        matches!(self, Self::Value(NEC_REPEAT_CODE))
    }
}

/// An infrared receiver that decodes frames in the background and hands them out one at a time.
///
/// After a [`DecodeResult::Value`] is returned, the receiver holds off until
/// [`IrReceiver::resume_listening`] re-arms it.
pub trait IrReceiver {
    /// Arm the receiver for the first time.
    fn start_listening(&mut self);

    /// Non-blocking check for a decoded code.
    fn try_decode(&mut self) -> DecodeResult;

    /// Discard the code just read and re-arm for the next one.
    fn resume_listening(&mut self);
}

impl<T: IrReceiver + ?Sized> IrReceiver for &mut T {
    fn start_listening(&mut self) {
        (**self).start_listening();
    }

    fn try_decode(&mut self) -> DecodeResult {
        (**self).try_decode()
    }

    fn resume_listening(&mut self) {
        (**self).resume_listening();
    }
}
