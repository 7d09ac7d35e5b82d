// Orca Testkit - Bare-Metal Test Image Support
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use crate::{Csr, CsrAccess};
use bitflags::bitflags;

bitflags! {
    /// Contents of `mcache`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CacheExistence: u32 {
        const ICACHE = 0x0000_0001;
        const DCACHE = 0x0000_0002;
    }
}

impl CacheExistence {
    pub const fn has_icache(self) -> bool {
        self.contains(Self::ICACHE)
    }

    pub const fn has_dcache(self) -> bool {
        self.contains(Self::DCACHE)
    }

    /// Bits of a raw `mcache` value outside the two defined flags. Always zero
    /// on conforming hardware.
    pub const fn reserved_bits(raw: u32) -> u32 {
        raw & !Self::all().bits()
    }
}

/// Reads `mcache`. Reserved bits are dropped.
pub fn cache_existence<A: CsrAccess + ?Sized>(csrs: &A) -> CacheExistence {
    CacheExistence::from_bits_truncate(csrs.read(Csr::Mcache))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WritableCsr;

    struct FixedMcache(u32);

    impl CsrAccess for FixedMcache {
        fn read(&self, csr: Csr) -> u32 {
            match csr {
                Csr::Mcache => self.0,
                _ => 0,
            }
        }

        fn write(&mut self, _csr: WritableCsr, _value: u32) {}
    }

    #[test]
    fn test_cache_existence_combinations() {
        let cases = [
            (0b00, false, false),
            (0b01, true, false),
            (0b10, false, true),
            (0b11, true, true),
        ];
        for (raw, icache, dcache) in cases {
            let flags = cache_existence(&FixedMcache(raw));
            assert_eq!(flags.has_icache(), icache, "raw={raw:#b}");
            assert_eq!(flags.has_dcache(), dcache, "raw={raw:#b}");
            assert_eq!(raw & 0x1 != 0, icache);
            assert_eq!(raw & 0x2 != 0, dcache);
        }
    }

    #[test]
    fn test_reserved_bits_are_ignored() {
        let flags = cache_existence(&FixedMcache(0xFFFF_FFFC | 0b01));
        assert_eq!(flags, CacheExistence::ICACHE);
        assert_eq!(CacheExistence::reserved_bits(0x8000_0003), 0x8000_0000);
        assert_eq!(CacheExistence::reserved_bits(0b11), 0);
    }
}
