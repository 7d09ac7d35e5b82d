// Orca Testkit - Bare-Metal Test Image Support
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

//! UART wiring for the board family selected by cargo feature.

use orca_uart::Family;

#[cfg(feature = "lattice")]
compile_error!("The lattice family has no UART wiring for the test image");

#[cfg(any(
    all(feature = "altera", feature = "xilinx"),
    all(feature = "altera", feature = "microsemi"),
    all(feature = "xilinx", feature = "microsemi"),
))]
compile_error!("Select exactly one board family feature (use --no-default-features)");

#[cfg(not(any(feature = "altera", feature = "xilinx", feature = "microsemi", feature = "lattice")))]
compile_error!("No board family feature selected");

#[cfg(feature = "altera")]
pub type Port = orca_uart::AlteraJtagUart;
#[cfg(feature = "altera")]
pub const FAMILY: Family = Family::Altera;

#[cfg(feature = "xilinx")]
pub type Port = orca_uart::XilinxPsUart;
#[cfg(feature = "xilinx")]
pub const FAMILY: Family = Family::Xilinx;

#[cfg(feature = "microsemi")]
pub type Port = orca_uart::MicrosemiUart;
#[cfg(feature = "microsemi")]
pub const FAMILY: Family = Family::Microsemi;

/// # Safety
/// At most one port may exist for the board's UART.
pub unsafe fn port() -> Port {
    Port::new(Port::BASE)
}
