// Orca Testkit - Bare-Metal Test Image Support
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use crate::{ByteSink, TxPort};
use core::fmt;
use core::hint::spin_loop;
use orca_csr::{Csr, CsrAccess};

// Longest stretch measured against a single base sample. Keeps the wrapping
// difference unambiguous even if the counter is polled slowly.
const MAX_WINDOW: u32 = u32::MAX / 2;

/// A UART plus the cycle counter used to pace it.
#[derive(Debug)]
pub struct Transport<P, C> {
    port: P,
    csrs: C,
    clock_hz: u32,
}

impl<P: TxPort, C: CsrAccess> Transport<P, C> {
    pub fn new(port: P, csrs: C, clock_hz: u32) -> Self {
        Self {
            port,
            csrs,
            clock_hz,
        }
    }

    pub fn clock_hz(&self) -> u32 {
        self.clock_hz
    }

    /// Zero for clocks below 1 MHz, in which case delays return at once.
    pub fn cycles_per_us(&self) -> u32 {
        self.clock_hz / 1_000_000
    }

    /// Spins until the port is ready, then writes `byte` once.
    pub fn send_byte(&mut self, byte: u8) {
        while self.port.tx_busy() {
            spin_loop();
        }
        self.port.write_data(byte);
    }

    pub fn send_str(&mut self, s: &str) {
        for byte in s.bytes() {
            self.send_byte(byte);
        }
    }

    pub fn cycles(&self) -> u32 {
        self.csrs.read(Csr::Time)
    }

    pub fn delay_us(&self, us: u32) {
        self.delay_cycles(u64::from(us) * u64::from(self.cycles_per_us()));
    }

    /// Busy-waits until at least `cycles` ticks of the counter have elapsed.
    ///
    /// The counter is sampled once up front; longer waits advance that base
    /// sample window by window instead of re-sampling.
    pub fn delay_cycles(&self, cycles: u64) {
        let mut base = self.cycles();
        let mut remaining = cycles;
        while remaining > 0 {
            let window = remaining.min(u64::from(MAX_WINDOW)) as u32;
            while self.cycles().wrapping_sub(base) < window {
                spin_loop();
            }
            base = base.wrapping_add(window);
            remaining -= u64::from(window);
        }
    }

    pub fn port(&self) -> &P {
        &self.port
    }

    pub fn port_mut(&mut self) -> &mut P {
        &mut self.port
    }

    pub fn csrs(&self) -> &C {
        &self.csrs
    }

    pub fn csrs_mut(&mut self) -> &mut C {
        &mut self.csrs
    }

    pub fn into_parts(self) -> (P, C) {
        (self.port, self.csrs)
    }
}

impl<P: TxPort, C: CsrAccess> ByteSink for Transport<P, C> {
    fn send_byte(&mut self, byte: u8) {
        Transport::send_byte(self, byte)
    }

    fn send_str(&mut self, s: &str) {
        Transport::send_str(self, s)
    }
}

impl<P: TxPort, C: CsrAccess> fmt::Write for Transport<P, C> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.send_str(s);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::fmt::Write;
    use orca_csr::WritableCsr;
    use std::cell::Cell;

    #[derive(Default)]
    struct ScriptedPort {
        busy_polls: u32,
        polls: Cell<u32>,
        busy_remaining: Cell<u32>,
        written: Vec<u8>,
        polls_at_write: Vec<u32>,
    }

    impl ScriptedPort {
        fn busy_for(busy_polls: u32) -> Self {
            Self {
                busy_polls,
                busy_remaining: Cell::new(busy_polls),
                ..Self::default()
            }
        }
    }

    impl TxPort for ScriptedPort {
        fn tx_busy(&self) -> bool {
            self.polls.set(self.polls.get() + 1);
            let remaining = self.busy_remaining.get();
            if remaining > 0 {
                self.busy_remaining.set(remaining - 1);
                true
            } else {
                false
            }
        }

        fn write_data(&mut self, byte: u8) {
            assert_eq!(self.busy_remaining.get(), 0, "write while busy");
            self.written.push(byte);
            self.polls_at_write.push(self.polls.get());
            self.busy_remaining.set(self.busy_polls);
        }
    }

    /// Counter that advances `step` ticks on every read.
    struct SteppingCounter {
        now: Cell<u32>,
        step: u32,
        reads: Cell<u32>,
    }

    impl SteppingCounter {
        fn starting_at(now: u32, step: u32) -> Self {
            Self {
                now: Cell::new(now),
                step,
                reads: Cell::new(0),
            }
        }
    }

    impl CsrAccess for SteppingCounter {
        fn read(&self, csr: Csr) -> u32 {
            assert_eq!(csr, Csr::Time);
            self.reads.set(self.reads.get() + 1);
            let value = self.now.get();
            self.now.set(value.wrapping_add(self.step));
            value
        }

        fn write(&mut self, _csr: WritableCsr, _value: u32) {
            panic!("cycle counter is never written");
        }
    }

    fn transport(busy_polls: u32, clock_hz: u32) -> Transport<ScriptedPort, SteppingCounter> {
        Transport::new(
            ScriptedPort::busy_for(busy_polls),
            SteppingCounter::starting_at(0, 1),
            clock_hz,
        )
    }

    #[test]
    fn test_send_byte_waits_out_busy_polls() {
        let mut t = transport(3, 50_000_000);
        t.send_byte(b'A');

        // Three busy polls, then the ready poll, then exactly one write.
        assert_eq!(t.port().polls.get(), 4);
        assert_eq!(t.port().written, vec![b'A']);
    }

    #[test]
    fn test_send_byte_ready_port_polls_once() {
        let mut t = transport(0, 50_000_000);
        t.send_byte(0x04);
        assert_eq!(t.port().polls.get(), 1);
        assert_eq!(t.port().written, vec![0x04]);
    }

    #[test]
    fn test_send_str_preserves_order() {
        let mut t = transport(2, 50_000_000);
        t.send_str("AB");
        assert_eq!(t.port().written, vec![b'A', b'B']);
        assert_eq!(t.port().polls_at_write, vec![3, 6]);
    }

    #[test]
    fn test_send_str_includes_control_characters() {
        let mut t = transport(0, 50_000_000);
        t.send_str("\r\nok\t\r\n");
        assert_eq!(t.port().written, b"\r\nok\t\r\n".to_vec());
    }

    #[test]
    fn test_fmt_write_goes_through_send_byte() {
        let mut t = transport(1, 50_000_000);
        write!(t, "n={}", 42).unwrap();
        assert_eq!(t.port().written, b"n=42".to_vec());
        assert_eq!(t.port().polls.get(), 8);
    }

    #[test]
    fn test_delay_waits_for_target_cycles() {
        let t = Transport::new(
            ScriptedPort::default(),
            SteppingCounter::starting_at(1_000, 7),
            50_000_000,
        );
        t.delay_us(3);

        // Target is 150 cycles; the last sample must be at least that far out.
        let last_sample = t.csrs().now.get().wrapping_sub(7);
        let elapsed = last_sample.wrapping_sub(1_000);
        assert!(elapsed >= 150, "elapsed {elapsed}");
        assert!(elapsed < 150 + 7);
    }

    #[test]
    fn test_delay_across_counter_wrap() {
        let start = u32::MAX - 20;
        let t = Transport::new(
            ScriptedPort::default(),
            SteppingCounter::starting_at(start, 5),
            25_000_000,
        );
        t.delay_us(4);

        let last_sample = t.csrs().now.get().wrapping_sub(5);
        assert!(last_sample < start, "counter should have wrapped");
        let elapsed = last_sample.wrapping_sub(start);
        assert!(elapsed >= 100, "elapsed {elapsed}");
        // Naive `now - start` would have returned on the first post-wrap sample.
        assert!(t.csrs().reads.get() > 5);
    }

    #[test]
    fn test_delay_zero_samples_once() {
        let t = transport(0, 50_000_000);
        t.delay_us(0);
        assert_eq!(t.csrs().reads.get(), 1);
    }

    #[test]
    fn test_sub_megahertz_clock_has_no_cycles_per_us() {
        let t = transport(0, 999_999);
        assert_eq!(t.cycles_per_us(), 0);
        t.delay_us(1_000);
        assert_eq!(t.csrs().reads.get(), 1);
    }

    #[test]
    fn test_delay_longer_than_one_window() {
        let t = Transport::new(
            ScriptedPort::default(),
            SteppingCounter::starting_at(0, 1 << 28),
            50_000_000,
        );
        let target = u64::from(u32::MAX) + 1_000;
        t.delay_cycles(target);

        let reads = u64::from(t.csrs().reads.get());
        // First sample, then each further read is worth 2^28 cycles.
        assert!((reads - 1) * (1u64 << 28) >= target);
    }
}
