// Orca Testkit - Bare-Metal Test Image Support
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

//! Register bank model for the ORCA core.
//!
//! CSRs are core-internal registers reached with `csrr`/`csrw`, not memory
//! mapped addresses. Every register the test image touches is a variant of
//! [`Csr`]; the ones that accept writes are also variants of [`WritableCsr`],
//! so writing a read-only register does not compile.

#![cfg_attr(not(test), no_std)]

mod cache;
#[cfg(target_arch = "riscv32")]
mod machine;
mod map;
mod region;

pub use cache::{cache_existence, CacheExistence};
#[cfg(target_arch = "riscv32")]
pub use machine::MachineCsrs;
pub use map::{Csr, WritableCsr};
pub use region::{read_region, region_csrs, write_region, MemoryRegion, RegionBank, RegionSpace};

/// Primitive CSR access.
///
/// Implementations must perform each call as a single indivisible access. The
/// hardware implementation issues exactly one `csrr` or `csrw`.
pub trait CsrAccess {
    fn read(&self, csr: Csr) -> u32;
    fn write(&mut self, csr: WritableCsr, value: u32);
}

impl<A: CsrAccess + ?Sized> CsrAccess for &mut A {
    fn read(&self, csr: Csr) -> u32 {
        (**self).read(csr)
    }

    fn write(&mut self, csr: WritableCsr, value: u32) {
        (**self).write(csr, value)
    }
}
