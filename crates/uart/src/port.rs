// Orca Testkit - Bare-Metal Test Image Support
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use crate::TxPort;
use core::ptr::{read_volatile, write_volatile};

/// One 32-bit memory-mapped register.
#[derive(Debug, Clone, Copy)]
struct Reg(usize);

impl Reg {
    fn read(self) -> u32 {
        // SAFETY: `Reg` values are only built by the `unsafe` port
        // constructors, whose callers vouch for the address.
        unsafe { read_volatile(self.0 as *const u32) }
    }

    fn write(self, value: u32) {
        // SAFETY: see `read`.
        unsafe { write_volatile(self.0 as *mut u32, value) }
    }

    fn write_u8(self, value: u8) {
        // SAFETY: see `read`.
        unsafe { write_volatile(self.0 as *mut u8, value) }
    }
}

/// Altera JTAG UART.
#[derive(Debug)]
pub struct AlteraJtagUart {
    data: Reg,
    control: Reg,
}

impl AlteraJtagUart {
    pub const BASE: usize = 0x0100_0070;

    const DATA: usize = 0x00;
    const CONTROL: usize = 0x04;
    // WSPACE: free slots in the write FIFO.
    const WSPACE_MASK: u32 = 0xFFFF_0000;

    /// # Safety
    ///
    /// `base` must be the register block of a JTAG UART, valid for volatile
    /// access for the rest of the program, and not driven by anything else.
    pub const unsafe fn new(base: usize) -> Self {
        Self {
            data: Reg(base + Self::DATA),
            control: Reg(base + Self::CONTROL),
        }
    }
}

impl TxPort for AlteraJtagUart {
    fn tx_busy(&self) -> bool {
        self.control.read() & Self::WSPACE_MASK == 0
    }

    fn write_data(&mut self, byte: u8) {
        self.data.write_u8(byte);
    }
}

/// Zynq processing-system UART, as wired on the Zedboard.
#[derive(Debug)]
pub struct XilinxPsUart {
    status: Reg,
    fifo: Reg,
}

impl XilinxPsUart {
    pub const BASE: usize = 0xE000_1000;

    const CHANNEL_STATUS: usize = 0x2C;
    const TX_RX_FIFO: usize = 0x30;
    const STATUS_TXFULL: u32 = 0x10;

    /// # Safety
    ///
    /// Same contract as [`AlteraJtagUart::new`].
    pub const unsafe fn new(base: usize) -> Self {
        Self {
            status: Reg(base + Self::CHANNEL_STATUS),
            fifo: Reg(base + Self::TX_RX_FIFO),
        }
    }
}

impl TxPort for XilinxPsUart {
    fn tx_busy(&self) -> bool {
        self.status.read() & Self::STATUS_TXFULL != 0
    }

    fn write_data(&mut self, byte: u8) {
        self.fifo.write(u32::from(byte));
    }
}

/// Microsemi CoreUART.
#[derive(Debug)]
pub struct MicrosemiUart {
    data: Reg,
    lsr: Reg,
}

impl MicrosemiUart {
    pub const BASE: usize = 0x3000_0000;

    const DATA: usize = 0x00;
    const LSR: usize = 0x10;
    const LSR_TX_READY: u32 = 0x01;

    /// # Safety
    ///
    /// Same contract as [`AlteraJtagUart::new`].
    pub const unsafe fn new(base: usize) -> Self {
        Self {
            data: Reg(base + Self::DATA),
            lsr: Reg(base + Self::LSR),
        }
    }
}

impl TxPort for MicrosemiUart {
    fn tx_busy(&self) -> bool {
        self.lsr.read() & Self::LSR_TX_READY == 0
    }

    fn write_data(&mut self, byte: u8) {
        self.data.write(u32::from(byte));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Register blocks backed by plain memory so the volatile accesses land
    // somewhere observable.
    fn block(words: usize) -> Box<[u32]> {
        vec![0u32; words].into_boxed_slice()
    }

    #[test]
    fn test_altera_busy_tracks_wspace() {
        let mut regs = block(2);
        let base = regs.as_mut_ptr() as usize;
        let mut uart = unsafe { AlteraJtagUart::new(base) };

        assert!(uart.tx_busy());
        unsafe { write_volatile((base + 4) as *mut u32, 0x0040_0000) };
        assert!(!uart.tx_busy());

        uart.write_data(b'Z');
        drop(uart);
        assert_eq!(regs[0] & 0xFF, u32::from(b'Z'));
    }

    #[test]
    fn test_xilinx_busy_tracks_txfull() {
        let mut regs = block(13);
        let base = regs.as_mut_ptr() as usize;
        let mut uart = unsafe { XilinxPsUart::new(base) };

        assert!(!uart.tx_busy());
        unsafe { write_volatile((base + 0x2C) as *mut u32, 0x10) };
        assert!(uart.tx_busy());

        uart.write_data(b'x');
        drop(uart);
        assert_eq!(regs[0x30 / 4], u32::from(b'x'));
    }

    #[test]
    fn test_microsemi_busy_until_tx_ready() {
        let mut regs = block(5);
        let base = regs.as_mut_ptr() as usize;
        let mut uart = unsafe { MicrosemiUart::new(base) };

        assert!(uart.tx_busy());
        unsafe { write_volatile((base + 0x10) as *mut u32, 0x01) };
        assert!(!uart.tx_busy());

        uart.write_data(b'\n');
        drop(uart);
        assert_eq!(regs[0], u32::from(b'\n'));
    }
}
