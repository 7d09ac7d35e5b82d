// Orca Testkit - Bare-Metal Test Image Support
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use crate::port::{AlteraJtagUart, MicrosemiUart, XilinxPsUart};

/// FPGA families with UART wiring for the test image.
///
/// Lattice boards carry the core but no UART wiring, so there is no variant
/// for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    Altera,
    Xilinx,
    Microsemi,
}

impl Family {
    pub const ALL: [Family; 3] = [Family::Altera, Family::Xilinx, Family::Microsemi];

    pub const fn name(self) -> &'static str {
        match self {
            Family::Altera => "altera",
            Family::Xilinx => "xilinx",
            Family::Microsemi => "microsemi",
        }
    }

    /// Core clock of the reference system, in Hz.
    pub const fn sys_clk_hz(self) -> u32 {
        match self {
            Family::Altera => 50_000_000,
            Family::Xilinx => 25_000_000,
            Family::Microsemi => 20_000_000,
        }
    }

    /// Base address of the UART in the reference system.
    pub const fn uart_base(self) -> usize {
        match self {
            Family::Altera => AlteraJtagUart::BASE,
            Family::Xilinx => XilinxPsUart::BASE,
            Family::Microsemi => MicrosemiUart::BASE,
        }
    }
}

impl core::fmt::Display for Family {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}
