//! Transmit Engine
//!
//! Emits a byte as start bit, eight data bits LSB-first, and a stop bit,
//! each held for exactly one full bit period. Timing is generated rather
//! than recovered, so the shift register moves at bit-period boundaries
//! and no midpoint logic exists on this side. The engine never enters a
//! fault state.

use crate::config::DATA_BITS;
use crate::types::{LineLevel, OversampleRatio};

/// Transmit frame state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TxState {
    /// Line held high; a send request is accepted here
    #[default]
    Idle,
    /// Line held low for one bit period
    StartBit,
    /// Shift-register bit 0 on the line, one period per bit
    DataBits,
    /// Line held high for one bit period
    StopBit,
}

/// Per-tick transmit engine output
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TxOutput {
    /// Level to drive onto the serial line this tick
    pub line: LineLevel,
    /// High for the entire frame, including the acceptance tick
    pub busy: bool,
}

/// Bit-period-timed UART transmitter
///
/// A `Copy` value advanced once per reference tick, mirroring the
/// receiver's pure-transition discipline. A byte offered while busy is
/// dropped by contract; the caller waits for `busy` to fall.
#[derive(Clone, Copy, Debug)]
pub struct Transmitter {
    /// Ticks per bit period
    ratio: OversampleRatio,
    /// Current frame state
    state: TxState,
    /// Reference ticks elapsed within the current bit period
    ticks: u32,
    /// Data bits already held for a full period
    bits: u8,
    /// Byte being emitted, shifted right as bit periods complete; latched
    /// once at acceptance and otherwise immutable for the frame
    shift: u8,
}

impl Transmitter {
    /// Create a transmitter in the idle state
    #[must_use]
    pub const fn new(ratio: OversampleRatio) -> Self {
        Self {
            ratio,
            state: TxState::Idle,
            ticks: 0,
            bits: 0,
            shift: 0,
        }
    }

    /// Advance one reference tick, optionally offering a byte to send
    ///
    /// The byte is latched only on a tick where the engine is idle,
    /// including the tick a previous frame completes (back-to-back
    /// frames; the stop bit has already been held a full period).
    #[must_use]
    pub fn step(self, request: Option<u8>) -> (Self, TxOutput) {
        let mut next = self;

        match self.state {
            TxState::Idle => {}
            TxState::StartBit => {
                next.ticks += 1;
                if next.ticks == self.ratio.ticks_per_bit() {
                    next.state = TxState::DataBits;
                    next.ticks = 0;
                    next.bits = 0;
                }
            }
            TxState::DataBits => {
                next.ticks += 1;
                if next.ticks == self.ratio.ticks_per_bit() {
                    next.ticks = 0;
                    next.shift = self.shift >> 1;
                    next.bits += 1;
                    if next.bits == DATA_BITS {
                        next.state = TxState::StopBit;
                    }
                }
            }
            TxState::StopBit => {
                next.ticks += 1;
                if next.ticks == self.ratio.ticks_per_bit() {
                    next.state = TxState::Idle;
                    next.ticks = 0;
                }
            }
        }

        if matches!(next.state, TxState::Idle) {
            if let Some(byte) = request {
                next.shift = byte;
                next.state = TxState::StartBit;
                next.ticks = 0;
                next.bits = 0;
            }
        }

        let out = TxOutput {
            line: next.line_level(),
            busy: next.is_busy(),
        };
        (next, out)
    }

    /// Advance one reference tick in place
    pub fn tick(&mut self, request: Option<u8>) -> TxOutput {
        let (next, out) = self.step(request);
        *self = next;
        out
    }

    /// Synchronous reset: force idle and zero every counter
    ///
    /// A reset mid-frame abandons the partial waveform; the line returns
    /// to its idle-high level on the next tick.
    pub fn reset(&mut self) {
        *self = Self::new(self.ratio);
    }

    /// Current frame state
    #[must_use]
    pub const fn state(&self) -> TxState {
        self.state
    }

    /// Check whether a frame is in flight
    #[must_use]
    pub const fn is_busy(&self) -> bool {
        !matches!(self.state, TxState::Idle)
    }

    /// Configured oversampling ratio
    #[must_use]
    pub const fn ratio(&self) -> OversampleRatio {
        self.ratio
    }

    /// Line level as a pure function of state
    const fn line_level(&self) -> LineLevel {
        match self.state {
            TxState::Idle | TxState::StopBit => LineLevel::High,
            TxState::StartBit => LineLevel::Low,
            TxState::DataBits => LineLevel::from_bit(self.shift),
        }
    }
}
