//! Receive Engine
//!
//! Recovers byte values from a clock-less serial line by oversampling.
//! The receiver resynchronizes to the sender's clock purely from the
//! leading edge of each start bit, re-checks the start condition at the
//! midpoint of the bit period to reject glitches shorter than half a bit,
//! then samples every subsequent bit at its computed midpoint. A start
//! condition that does not survive to its midpoint is noise, silently
//! absorbed by returning to idle; it is not a fault.

use crate::config::DATA_BITS;
use crate::types::{LineLevel, OversampleRatio};

/// Receive frame state
///
/// Undefined encodings are unrepresentable, so no trap state exists for
/// them. `Done` persists for exactly one tick before returning to `Idle`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RxState {
    /// Waiting for a start condition (line sampled low)
    #[default]
    Idle,
    /// Start edge seen; confirming the level holds to the bit midpoint
    StartBit,
    /// Sampling the eight data bits at their midpoints
    DataBits,
    /// Timing wait through the stop bit; no sampling
    StopBit,
    /// Decoded byte exposed for this single tick
    Done,
}

/// Oversampling UART receiver
///
/// A small `Copy` value advanced once per reference tick. [`Receiver::step`]
/// is the pure transition function; [`Receiver::tick`] is the mutating
/// wrapper. All next-tick values are computed from the consumed snapshot
/// and committed wholesale, so no partially updated state is observable.
#[derive(Clone, Copy, Debug)]
pub struct Receiver {
    /// Ticks per bit period
    ratio: OversampleRatio,
    /// Current frame state
    state: RxState,
    /// Reference ticks elapsed since the last sampling point
    ticks: u32,
    /// Data bits collected within the current frame
    bits: u8,
    /// Accumulates samples; bits arrive LSB-first and are shifted in at
    /// the top, so bit 0 of the finished register is the first bit sent
    shift: u8,
    /// Byte from the most recently completed frame
    byte: u8,
}

impl Receiver {
    /// Create a receiver in the idle state
    #[must_use]
    pub const fn new(ratio: OversampleRatio) -> Self {
        Self {
            ratio,
            state: RxState::Idle,
            ticks: 0,
            bits: 0,
            shift: 0,
            byte: 0,
        }
    }

    /// Advance one reference tick, consuming the current line sample
    ///
    /// Returns the replacement engine value and the decoded byte on the
    /// single tick a frame completes.
    #[must_use]
    pub fn step(self, line: LineLevel) -> (Self, Option<u8>) {
        let mut next = self;
        let mut decoded = None;

        match self.state {
            RxState::Idle => {
                // Counter held at zero until a start condition arrives
                if line.is_low() {
                    next.state = RxState::StartBit;
                    next.ticks = 0;
                }
            }
            RxState::StartBit => {
                next.ticks += 1;
                if line.is_high() {
                    // Too short to be a start bit: resynchronize silently
                    next.state = RxState::Idle;
                    next.ticks = 0;
                } else if next.ticks == self.ratio.midpoint() {
                    next.state = RxState::DataBits;
                    next.ticks = 0;
                    next.bits = 0;
                    next.shift = 0;
                }
            }
            RxState::DataBits => {
                next.ticks += 1;
                // One full bit period past the previous midpoint is the
                // midpoint of the current bit
                if next.ticks == self.ratio.ticks_per_bit() {
                    next.ticks = 0;
                    next.shift = (self.shift >> 1) | (line.as_bit() << 7);
                    next.bits += 1;
                    if next.bits == DATA_BITS {
                        next.state = RxState::StopBit;
                    }
                }
            }
            RxState::StopBit => {
                next.ticks += 1;
                if next.ticks == self.ratio.ticks_per_bit() {
                    next.ticks = 0;
                    next.state = RxState::Done;
                    next.byte = self.shift;
                    decoded = Some(self.shift);
                }
            }
            RxState::Done => {
                // Transient: back to idle on the following tick
                next.state = RxState::Idle;
                next.ticks = 0;
            }
        }

        (next, decoded)
    }

    /// Advance one reference tick in place
    pub fn tick(&mut self, line: LineLevel) -> Option<u8> {
        let (next, decoded) = self.step(line);
        *self = next;
        decoded
    }

    /// Synchronous reset: force idle and zero every counter
    ///
    /// A reset mid-frame silently discards the partial byte; the protocol
    /// carries no session state across frames.
    pub fn reset(&mut self) {
        *self = Self::new(self.ratio);
    }

    /// Current frame state
    #[must_use]
    pub const fn state(&self) -> RxState {
        self.state
    }

    /// Check whether the receiver is between frames
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        matches!(self.state, RxState::Idle)
    }

    /// Byte of the most recently completed frame
    ///
    /// Retains its previous value outside the one-tick valid window; the
    /// decode pulse itself is the `Some` returned by [`Receiver::tick`].
    #[must_use]
    pub const fn last_byte(&self) -> u8 {
        self.byte
    }

    /// Configured oversampling ratio
    #[must_use]
    pub const fn ratio(&self) -> OversampleRatio {
        self.ratio
    }
}
