//! Timing constants and defaults
//!
//! Compile-time constants for the soft-UART core. Frame geometry and the
//! default reference clock are centralized here.

use crate::types::{ConfigError, OversampleRatio};

/// Data bits per frame (fixed 8N1 framing)
pub const DATA_BITS: u8 = 8;

/// Bits per frame: one start, eight data, one stop
pub const FRAME_BITS: u32 = 10;

/// Default reference-tick frequency (classic 1.8432 MHz UART clock)
pub const DEFAULT_TICK_HZ: u32 = 1_843_200;

/// Default data rate
pub const DEFAULT_BAUD: u32 = 115_200;

/// Decode buffer capacity of the loopback harness
pub const LOOPBACK_DEPTH: usize = 16;

/// Build the default oversampling ratio (16 ticks per bit)
///
/// # Errors
///
/// Never fails for the built-in defaults; the `Result` mirrors
/// [`OversampleRatio::from_clock`] so callers can substitute their own
/// clock pair.
pub const fn default_ratio() -> Result<OversampleRatio, ConfigError> {
    OversampleRatio::from_clock(DEFAULT_TICK_HZ, DEFAULT_BAUD)
}
