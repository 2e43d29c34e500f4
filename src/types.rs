//! Shared types used across the soft-UART core
//!
//! This module defines domain-specific types that enforce invariants
//! at compile time and provide type safety throughout the codebase.

use core::fmt;

use crate::config::FRAME_BITS;

/// Instantaneous logic level of the serial line
///
/// An idle UART line rests high; a start bit pulls it low.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineLevel {
    /// Logic 0 (start bit, or a 0 data bit)
    Low,
    /// Logic 1 (idle line, stop bit, or a 1 data bit)
    #[default]
    High,
}

impl LineLevel {
    /// Check whether the line reads logic 1
    #[must_use]
    pub const fn is_high(self) -> bool {
        matches!(self, Self::High)
    }

    /// Check whether the line reads logic 0
    #[must_use]
    pub const fn is_low(self) -> bool {
        matches!(self, Self::Low)
    }

    /// The level carrying a data bit value (LSB of `bit` is used)
    #[must_use]
    pub const fn from_bit(bit: u8) -> Self {
        if bit & 1 == 1 {
            Self::High
        } else {
            Self::Low
        }
    }

    /// The data bit value this level carries
    #[must_use]
    pub const fn as_bit(self) -> u8 {
        match self {
            Self::Low => 0,
            Self::High => 1,
        }
    }
}

impl From<bool> for LineLevel {
    fn from(high: bool) -> Self {
        if high {
            Self::High
        } else {
            Self::Low
        }
    }
}

impl From<LineLevel> for bool {
    fn from(level: LineLevel) -> Self {
        level.is_high()
    }
}

#[cfg(feature = "embedded")]
impl From<LineLevel> for embedded_hal::digital::PinState {
    fn from(level: LineLevel) -> Self {
        match level {
            LineLevel::Low => Self::Low,
            LineLevel::High => Self::High,
        }
    }
}

/// Oversampling ratio with validation
///
/// The number of reference ticks per bit period, equal to the
/// reference-tick frequency divided by the data rate. A midpoint sample
/// only exists for ratios of at least two; in practice tens of ticks per
/// bit keep the decode error low (clock mismatch tolerance is roughly
/// ±100/(2·N) percent).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OversampleRatio(u32);

impl OversampleRatio {
    /// Minimum supported ratio (a midpoint must exist)
    pub const MIN_TICKS: u32 = 2;

    /// Create a ratio from a tick count, rejecting ratios below two
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::RatioTooSmall`] if `ticks < 2`.
    pub const fn from_ticks(ticks: u32) -> Result<Self, ConfigError> {
        if ticks >= Self::MIN_TICKS {
            Ok(Self(ticks))
        } else {
            Err(ConfigError::RatioTooSmall { ticks })
        }
    }

    /// Derive the ratio from a reference-tick frequency and a data rate
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroBaudRate`] for a zero data rate,
    /// [`ConfigError::InexactDivision`] when the tick frequency is not an
    /// integer multiple of the data rate, and
    /// [`ConfigError::RatioTooSmall`] when the quotient is below two.
    pub const fn from_clock(tick_hz: u32, baud: u32) -> Result<Self, ConfigError> {
        if baud == 0 {
            return Err(ConfigError::ZeroBaudRate);
        }
        if tick_hz % baud != 0 {
            return Err(ConfigError::InexactDivision { tick_hz, baud });
        }
        Self::from_ticks(tick_hz / baud)
    }

    /// Reference ticks per bit period (the N of the oversampling scheme)
    #[must_use]
    pub const fn ticks_per_bit(self) -> u32 {
        self.0
    }

    /// Tick offset of the midpoint sample within a bit period (N/2)
    #[must_use]
    pub const fn midpoint(self) -> u32 {
        self.0 / 2
    }

    /// Ticks spanned by one complete frame (10·N)
    #[must_use]
    pub const fn frame_ticks(self) -> u32 {
        self.0 * FRAME_BITS
    }
}

impl fmt::Debug for OversampleRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OversampleRatio({} ticks/bit)", self.0)
    }
}

/// Rejected transceiver configuration
///
/// The protocol itself has no recoverable-error taxonomy (a short start
/// bit is noise, silently absorbed), so configuration validation is the
/// crate's only fallible surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Data rate of zero
    ZeroBaudRate,
    /// Tick frequency is not an integer multiple of the data rate
    InexactDivision {
        /// Offered reference-tick frequency
        tick_hz: u32,
        /// Offered data rate
        baud: u32,
    },
    /// Oversampling ratio below the minimum of two
    RatioTooSmall {
        /// Offered tick count
        ticks: u32,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroBaudRate => write!(f, "data rate must be non-zero"),
            Self::InexactDivision { tick_hz, baud } => write!(
                f,
                "tick frequency {tick_hz} Hz is not an integer multiple of {baud} baud"
            ),
            Self::RatioTooSmall { ticks } => write!(
                f,
                "oversampling ratio {ticks} is below the minimum of {}",
                OversampleRatio::MIN_TICKS
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_level_default_is_idle() {
        assert_eq!(LineLevel::default(), LineLevel::High);
    }

    #[test]
    fn line_level_bit_round_trip() {
        assert_eq!(LineLevel::from_bit(0), LineLevel::Low);
        assert_eq!(LineLevel::from_bit(1), LineLevel::High);
        assert_eq!(LineLevel::from_bit(0b1110), LineLevel::Low);
        assert_eq!(LineLevel::Low.as_bit(), 0);
        assert_eq!(LineLevel::High.as_bit(), 1);
    }

    #[test]
    fn ratio_from_ticks_validates_minimum() {
        assert!(OversampleRatio::from_ticks(2).is_ok());
        assert_eq!(
            OversampleRatio::from_ticks(1),
            Err(ConfigError::RatioTooSmall { ticks: 1 })
        );
        assert_eq!(
            OversampleRatio::from_ticks(0),
            Err(ConfigError::RatioTooSmall { ticks: 0 })
        );
    }

    #[test]
    fn ratio_from_clock_exact() {
        let ratio = OversampleRatio::from_clock(1_843_200, 115_200).unwrap();
        assert_eq!(ratio.ticks_per_bit(), 16);
        assert_eq!(ratio.midpoint(), 8);
        assert_eq!(ratio.frame_ticks(), 160);
    }

    #[test]
    fn ratio_from_clock_rejects_inexact() {
        assert_eq!(
            OversampleRatio::from_clock(1_000_000, 115_200),
            Err(ConfigError::InexactDivision {
                tick_hz: 1_000_000,
                baud: 115_200
            })
        );
    }

    #[test]
    fn ratio_from_clock_rejects_zero_baud() {
        assert_eq!(
            OversampleRatio::from_clock(1_843_200, 0),
            Err(ConfigError::ZeroBaudRate)
        );
    }

    #[test]
    fn odd_ratio_midpoint_floors() {
        let ratio = OversampleRatio::from_ticks(5).unwrap();
        assert_eq!(ratio.midpoint(), 2);
    }
}
