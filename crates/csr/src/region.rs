// Orca Testkit - Bare-Metal Test Image Support
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

//! Memory-attribute region banks.
//!
//! Each space has four banks and each bank is a `BASE`/`LAST` pair of CSRs
//! eight numbers apart. The pairs come from a fixed table; bank and space are
//! never turned into a register number by arithmetic.

use crate::{CsrAccess, WritableCsr};

/// Which family of region registers a bank belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegionSpace {
    /// `mamrN`: auxiliary memory regions.
    Auxiliary,
    /// `mumrN`: uncached memory regions.
    Uncached,
}

impl RegionSpace {
    pub const ALL: [RegionSpace; 2] = [RegionSpace::Auxiliary, RegionSpace::Uncached];

    pub const fn name(self) -> &'static str {
        match self {
            RegionSpace::Auxiliary => "mamr",
            RegionSpace::Uncached => "mumr",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegionBank {
    Bank0,
    Bank1,
    Bank2,
    Bank3,
}

impl RegionBank {
    pub const ALL: [RegionBank; 4] = [
        RegionBank::Bank0,
        RegionBank::Bank1,
        RegionBank::Bank2,
        RegionBank::Bank3,
    ];

    pub const fn index(self) -> u8 {
        match self {
            RegionBank::Bank0 => 0,
            RegionBank::Bank1 => 1,
            RegionBank::Bank2 => 2,
            RegionBank::Bank3 => 3,
        }
    }
}

/// `(base, last)` registers of one bank.
pub const fn region_csrs(space: RegionSpace, bank: RegionBank) -> (WritableCsr, WritableCsr) {
    use RegionBank::*;
    use RegionSpace::*;
    use WritableCsr::*;

    match (space, bank) {
        (Auxiliary, Bank0) => (Mamr0Base, Mamr0Last),
        (Auxiliary, Bank1) => (Mamr1Base, Mamr1Last),
        (Auxiliary, Bank2) => (Mamr2Base, Mamr2Last),
        (Auxiliary, Bank3) => (Mamr3Base, Mamr3Last),
        (Uncached, Bank0) => (Mumr0Base, Mumr0Last),
        (Uncached, Bank1) => (Mumr1Base, Mumr1Last),
        (Uncached, Bank2) => (Mumr2Base, Mumr2Last),
        (Uncached, Bank3) => (Mumr3Base, Mumr3Last),
    }
}

/// Address range held by one bank. Both bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MemoryRegion {
    pub base: u32,
    pub last: u32,
}

impl MemoryRegion {
    pub const fn new(base: u32, last: u32) -> Self {
        Self { base, last }
    }

    pub const fn contains(&self, addr: u32) -> bool {
        self.base <= addr && addr <= self.last
    }
}

pub fn read_region<A: CsrAccess + ?Sized>(
    csrs: &A,
    space: RegionSpace,
    bank: RegionBank,
) -> MemoryRegion {
    let (base, last) = region_csrs(space, bank);
    MemoryRegion {
        base: csrs.read(base.csr()),
        last: csrs.read(last.csr()),
    }
}

/// Writes `base` before `last`.
pub fn write_region<A: CsrAccess + ?Sized>(
    csrs: &mut A,
    space: RegionSpace,
    bank: RegionBank,
    region: MemoryRegion,
) {
    let (base, last) = region_csrs(space, bank);
    csrs.write(base, region.base);
    csrs.write(last, region.last);
}
