//! Loopback Tests
//!
//! End-to-end round trips through a transmitter/receiver pair sharing one
//! reference tick, and independence of the two engines under interleaving.

use proptest::prelude::*;

use softuart::engine::receiver::Receiver;
use softuart::engine::transmitter::Transmitter;
use softuart::sim::Loopback;
use softuart::types::{LineLevel, OversampleRatio};

fn ratio(n: u32) -> OversampleRatio {
    OversampleRatio::from_ticks(n).unwrap()
}

// ============================================================================
// Round Trip
// ============================================================================

#[test]
fn test_round_trip_all_bytes_all_ratios() {
    for n in [2, 3, 4, 5, 8, 16, 32] {
        let mut link = Loopback::new(ratio(n));
        for byte in 0..=255u8 {
            assert_eq!(link.transfer(byte), Some(byte), "ratio {n} byte {byte:#04x}");
            link.clear();
        }
    }
}

#[test]
fn test_exactly_one_valid_pulse_per_frame() {
    let mut link = Loopback::new(ratio(16));
    link.transfer(0x42);
    // A long idle tail must not produce further decodes
    link.run_idle(5000);
    assert_eq!(link.decoded(), &[0x42]);
}

#[test]
fn test_sequential_transfers() {
    let mut link = Loopback::new(ratio(8));
    let message = [0x48, 0x65, 0x6C, 0x6C, 0x6F]; // "Hello"
    for byte in message {
        link.transfer(byte);
    }
    assert_eq!(link.decoded(), &message);
}

#[test]
fn test_reset_both_mid_frame_then_reuse() {
    let ratio = ratio(16);
    let mut tx = Transmitter::new(ratio);
    let mut rx = Receiver::new(ratio);

    let mut request = Some(0xE7);
    for _ in 0..40 {
        let out = tx.tick(request.take());
        rx.tick(out.line);
    }
    assert!(tx.is_busy());
    assert!(!rx.is_idle());

    tx.reset();
    rx.reset();
    assert!(!tx.is_busy());
    assert!(rx.is_idle());

    // The pair works again from the clean state
    let mut request = Some(0x18);
    let mut decoded = None;
    for _ in 0..ratio.frame_ticks() + ratio.ticks_per_bit() {
        let out = tx.tick(request.take());
        if let Some(byte) = rx.tick(out.line) {
            decoded = Some(byte);
        }
    }
    assert_eq!(decoded, Some(0x18));
}

// ============================================================================
// Concurrent Independence
// ============================================================================

#[test]
fn test_interleaving_order_is_irrelevant() {
    let ratio = ratio(8);
    let ticks = ratio.frame_ticks() + ratio.ticks_per_bit();

    // Reference: transmitter ticked alone
    let mut tx = Transmitter::new(ratio);
    let mut request = Some(0xB4);
    let reference: Vec<_> = (0..ticks).map(|_| tx.tick(request.take())).collect();

    // Reference: receiver ticked alone on that waveform
    let mut rx = Receiver::new(ratio);
    let rx_reference: Vec<_> = reference.iter().map(|out| rx.tick(out.line)).collect();

    // Interleaved run: the receiver samples the level the transmitter
    // drove on the previous tick, so neither engine can observe the
    // other's intra-tick ordering
    let mut tx = Transmitter::new(ratio);
    let mut rx = Receiver::new(ratio);
    let mut request = Some(0xB4);
    let mut line = LineLevel::High;
    let mut tx_outputs = Vec::new();
    let mut rx_outputs = Vec::new();
    for _ in 0..ticks {
        let out = tx.tick(request.take());
        rx_outputs.push(rx.tick(line));
        tx_outputs.push(out);
        line = out.line;
    }

    assert_eq!(tx_outputs, reference);
    // The receiver saw the same waveform one tick later; its decode stream
    // is a one-tick delay of the reference, nothing more
    assert_eq!(rx_outputs[1..], rx_reference[..rx_reference.len() - 1]);
}

#[test]
fn test_two_links_do_not_interfere() {
    // Two complete transceiver pairs advanced in lockstep decode their own
    // bytes regardless of the other pair's traffic
    let mut a = Loopback::new(ratio(8));
    let mut b = Loopback::new(ratio(8));
    let mut req_a = Some(0x11);
    let mut req_b = Some(0xEE);
    for _ in 0..100 {
        a.tick(req_a.take());
        b.tick(req_b.take());
    }
    let ticks = ratio(8).frame_ticks();
    for _ in 0..ticks {
        a.tick(None);
        b.tick(None);
    }
    assert_eq!(a.decoded(), &[0x11]);
    assert_eq!(b.decoded(), &[0xEE]);
}

// ============================================================================
// Property: round trip for arbitrary ratio, byte, and idle lead-in
// ============================================================================

proptest! {
    #[test]
    fn prop_round_trip(n in 2u32..=64, byte: u8, idle_lead in 0u32..100) {
        let ratio = OversampleRatio::from_ticks(n).unwrap();
        let mut tx = Transmitter::new(ratio);
        let mut rx = Receiver::new(ratio);

        for _ in 0..idle_lead {
            let out = tx.tick(None);
            rx.tick(out.line);
        }

        let mut request = Some(byte);
        let mut decoded = Vec::new();
        for _ in 0..ratio.frame_ticks() + ratio.ticks_per_bit() {
            let out = tx.tick(request.take());
            if let Some(value) = rx.tick(out.line) {
                decoded.push(value);
            }
        }
        prop_assert_eq!(decoded, vec![byte]);
    }
}
