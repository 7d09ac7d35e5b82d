// Orca Testkit - Bare-Metal Test Image Support
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

pub mod board;
pub mod collector;
pub mod csr_file;
pub mod uart;

pub use board::{SimBoard, SimTransport};
pub use collector::{CollectError, Collector, Outcome, Report};
pub use csr_file::SimCsrFile;
pub use uart::SimUart;

#[derive(Debug, thiserror::Error)]
pub enum SimError {
    #[error(transparent)]
    Config(#[from] orca_config::ConfigError),
    #[error("UART capture lock poisoned")]
    CapturePoisoned,
}

pub type SimResult<T> = Result<T, SimError>;
