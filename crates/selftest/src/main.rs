// Orca Testkit - Bare-Metal Test Image Support
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

#![no_std]
#![no_main]

mod board;

use orca_csr::MachineCsrs;
use orca_harness::{conclude, selftest, Spin};
use orca_uart::Transport;
use panic_halt as _;
use riscv_rt::entry;

#[entry]
fn main() -> ! {
    // The self-test opens MEIMASK to every source.
    unsafe { riscv::interrupt::disable() };

    // Sole owner of the UART and the CSRs for the life of the image.
    let (port, csrs) = unsafe { (board::port(), MachineCsrs::steal()) };
    let mut transport = Transport::new(port, csrs, board::FAMILY.sys_clk_hz());

    // Let the host attach to the UART before the banner.
    transport.delay_us(100_000);

    let verdict = selftest::run(&mut transport);
    conclude(&mut transport, verdict, &mut Spin)
}
