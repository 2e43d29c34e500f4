//! Async Pin Shells
//!
//! The imperative shell around the pure engines: each engine maps to a
//! task woken by the same periodic event, communicating nothing between
//! them. These helpers drive `embedded-hal` pins from an
//! `embassy_time::Ticker`; pin configuration stays with the caller.

use embassy_time::{Duration, Ticker};
use embedded_hal::digital::{InputPin, OutputPin};

use crate::engine::receiver::Receiver;
use crate::engine::transmitter::Transmitter;
use crate::types::LineLevel;

/// Ticker period for a reference-tick rate
#[must_use]
pub fn tick_duration(tick_hz: u32) -> Duration {
    Duration::from_hz(u64::from(tick_hz))
}

/// Emit one byte on an output pin
///
/// Runs the transmitter one tick per ticker wakeup until the frame
/// completes and the line has returned to idle.
///
/// # Errors
///
/// Propagates the pin's error type.
pub async fn send_byte<P: OutputPin>(
    tx: &mut Transmitter,
    pin: &mut P,
    ticker: &mut Ticker,
    byte: u8,
) -> Result<(), P::Error> {
    let mut request = Some(byte);
    loop {
        ticker.next().await;
        let out = tx.tick(request.take());
        pin.set_state(out.line.into())?;
        if !out.busy {
            defmt::trace!("uart tx done {=u8:x}", byte);
            return Ok(());
        }
    }
}

/// Decode one byte from an input pin
///
/// Samples the pin once per ticker wakeup and returns the first byte the
/// receiver completes. Pends indefinitely on a silent line; wrap in a
/// timeout if the caller needs one.
///
/// # Errors
///
/// Propagates the pin's error type.
pub async fn recv_byte<P: InputPin>(
    rx: &mut Receiver,
    pin: &mut P,
    ticker: &mut Ticker,
) -> Result<u8, P::Error> {
    loop {
        ticker.next().await;
        let line = LineLevel::from(pin.is_high()?);
        if let Some(byte) = rx.tick(line) {
            defmt::trace!("uart rx byte {=u8:x}", byte);
            return Ok(byte);
        }
    }
}
