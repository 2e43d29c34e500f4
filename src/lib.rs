//! Soft-UART Transceiver Core
//!
//! This library implements the bit-level core of an asynchronous serial
//! (UART) transceiver: a receive engine that recovers bytes from a noisy,
//! clock-less line by oversampling, and a transmit engine that emits a byte
//! as a correctly timed sequence of line-level transitions.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     ASYNC SHELL (optional)                   │
//! │  GPIO pin drivers woken by an embassy ticker    [io]         │
//! ├─────────────────────────────────────────────────────────────┤
//! │                      ENGINE LAYER                            │
//! │  Receiver (oversampling)  │  Transmitter (timed)  [engine]   │
//! ├─────────────────────────────────────────────────────────────┤
//! │                   TYPES / CONFIGURATION                      │
//! │  LineLevel  │  OversampleRatio  │  constants  [types,config] │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both engines are synchronous state machines advanced once per reference
//! tick. They share no state: a receiver resynchronizes to the remote
//! clock from the leading edge of each start bit and samples every bit at
//! its midpoint, while a transmitter holds each line level for exactly one
//! full bit period. The reference tick runs at `OversampleRatio` times the
//! data rate.
//!
//! # Design Principles
//!
//! - **Immutable-by-default**: each engine is a small `Copy` value with a
//!   pure `step` transition; the next state is computed from a consistent
//!   snapshot and committed wholesale
//! - **Type-driven design**: undefined state encodings are unrepresentable,
//!   so no runtime trap state is needed
//! - **No unsafe**: the whole crate is `deny(unsafe_code)`
//! - **Functional core, imperative shell**: pin I/O and tick scheduling
//!   live in [`io`], behind the `embedded` feature
//!
//! # Example
//!
//! ```
//! use softuart::engine::receiver::Receiver;
//! use softuart::engine::transmitter::Transmitter;
//! use softuart::types::OversampleRatio;
//!
//! let ratio = OversampleRatio::from_clock(1_843_200, 115_200).unwrap();
//! let mut tx = Transmitter::new(ratio);
//! let mut rx = Receiver::new(ratio);
//!
//! let mut decoded = None;
//! let mut request = Some(0x5A);
//! for _ in 0..ratio.frame_ticks() + ratio.ticks_per_bit() {
//!     let out = tx.tick(request.take());
//!     if let Some(byte) = rx.tick(out.line) {
//!         decoded = Some(byte);
//!     }
//! }
//! assert_eq!(decoded, Some(0x5A));
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Transceiver Engines
///
/// The receive and transmit state machines.
pub mod engine;

/// Loopback Simulation
///
/// Host-testable harness wiring a transmitter's line to a receiver.
pub mod sim;

/// Async Pin Shells
///
/// Drives the engines over `embedded-hal` pins from an embassy ticker.
#[cfg(feature = "embedded")]
pub mod io;

/// Shared types used across modules
pub mod types;

/// Timing constants and defaults
pub mod config;
