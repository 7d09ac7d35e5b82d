// Orca Testkit - Bare-Metal Test Image Support
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use crate::{Csr, CsrAccess, WritableCsr};

/// The running hart's own CSRs.
#[derive(Debug)]
pub struct MachineCsrs {
    _private: (),
}

impl MachineCsrs {
    /// # Safety
    ///
    /// The caller must be the only owner of the CSR space for the rest of the
    /// program. Call this once, from `main`.
    pub const unsafe fn steal() -> Self {
        Self { _private: () }
    }
}

impl CsrAccess for MachineCsrs {
    #[inline(always)]
    fn read(&self, csr: Csr) -> u32 {
        Self::csrr(csr)
    }

    #[inline(always)]
    fn write(&mut self, csr: WritableCsr, value: u32) {
        Self::csrw(csr, value)
    }
}
