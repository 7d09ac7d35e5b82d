// Orca Testkit - Bare-Metal Test Image Support
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

//! Polling UART transport.
//!
//! Output only: every byte waits for the peripheral to report not-busy and is
//! then written exactly once. There is no queue, no interrupt and no timeout.

#![cfg_attr(not(test), no_std)]

mod family;
mod port;
mod transport;

pub use family::Family;
pub use port::{AlteraJtagUart, MicrosemiUart, XilinxPsUart};
pub use transport::Transport;

/// Transmit side of one UART peripheral.
pub trait TxPort {
    /// True while the peripheral cannot accept another byte.
    fn tx_busy(&self) -> bool;

    /// Writes one byte to the data register. Callers check [`TxPort::tx_busy`] first.
    fn write_data(&mut self, byte: u8);
}

impl<T: TxPort + ?Sized> TxPort for &mut T {
    fn tx_busy(&self) -> bool {
        (**self).tx_busy()
    }

    fn write_data(&mut self, byte: u8) {
        (**self).write_data(byte)
    }
}

/// Blocking byte output.
pub trait ByteSink {
    fn send_byte(&mut self, byte: u8);

    /// Sends every byte of `s` in order, control characters included.
    fn send_str(&mut self, s: &str) {
        for byte in s.bytes() {
            self.send_byte(byte);
        }
    }
}
