//! Transceiver Engines
//!
//! Two independent synchronous state machines advanced by a shared
//! reference tick: an oversampling receiver and a bit-period-timed
//! transmitter. They share no state and may be ticked in any relative
//! order, interleaved or as separate tasks.

pub mod receiver;
pub mod transmitter;
