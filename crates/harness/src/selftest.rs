// Orca Testkit - Bare-Metal Test Image Support
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

//! CSR self-test run by the test image before it reports.

use crate::Verdict;
use core::fmt::Write;
use orca_csr::{
    cache_existence, read_region, write_region, CacheExistence, Csr, CsrAccess, RegionBank,
    RegionSpace, WritableCsr,
};
use orca_uart::{Transport, TxPort};

/// Probes every CSR group, printing one line per finding, and counts errors.
///
/// Machine interrupts must be disabled: the interrupt mask is briefly opened
/// to all sources.
pub fn run<P: TxPort, C: CsrAccess>(t: &mut Transport<P, C>) -> Verdict {
    let clock_hz = t.clock_hz();
    let _ = write!(t, "\r\nORCA self-test, {} Hz\r\n", clock_hz);

    let mut errors = 0;
    errors += check_cache_existence(t);
    errors += check_interrupt_mask(t);
    errors += check_regions(t);
    Verdict::from_errors(errors)
}

fn presence(present: bool) -> &'static str {
    if present {
        "present"
    } else {
        "absent"
    }
}

fn check_cache_existence<P: TxPort, C: CsrAccess>(t: &mut Transport<P, C>) -> u32 {
    let caches = cache_existence(t.csrs());
    let reserved = CacheExistence::reserved_bits(t.csrs().read(Csr::Mcache));

    let _ = write!(
        t,
        "icache: {}\r\ndcache: {}\r\n",
        presence(caches.has_icache()),
        presence(caches.has_dcache())
    );

    if reserved != 0 {
        let _ = write!(t, "mcache: reserved bits {:#010x}\r\n", reserved);
        1
    } else {
        0
    }
}

fn check_interrupt_mask<P: TxPort, C: CsrAccess>(t: &mut Transport<P, C>) -> u32 {
    let saved = t.csrs().read(Csr::Meimask);

    t.csrs_mut().write(WritableCsr::Meimask, u32::MAX);
    let implemented = t.csrs().read(Csr::Meimask);
    t.csrs_mut().write(WritableCsr::Meimask, 0);
    let cleared = t.csrs().read(Csr::Meimask);
    t.csrs_mut().write(WritableCsr::Meimask, saved);
    let restored = t.csrs().read(Csr::Meimask);

    let _ = write!(t, "meimask: {:#010x} implemented\r\n", implemented);

    let mut errors = 0;
    if cleared != 0 {
        let _ = write!(t, "meimask: stuck bits {:#010x}\r\n", cleared);
        errors += 1;
    }
    if restored != saved {
        let _ = write!(
            t,
            "meimask: restore {:#010x} != {:#010x}\r\n",
            restored, saved
        );
        errors += 1;
    }
    errors
}

/// Writes each bank's current value back and reads it again. Contents are
/// left as found.
fn check_regions<P: TxPort, C: CsrAccess>(t: &mut Transport<P, C>) -> u32 {
    let mut errors = 0;
    for space in RegionSpace::ALL {
        for bank in RegionBank::ALL {
            let region = read_region(t.csrs(), space, bank);
            write_region(t.csrs_mut(), space, bank, region);
            let readback = read_region(t.csrs(), space, bank);

            let _ = write!(
                t,
                "{}{}: {:#010x}..={:#010x}\r\n",
                space.name(),
                bank.index(),
                region.base,
                region.last
            );
            if readback != region {
                let _ = write!(t, "{}{}: readback mismatch\r\n", space.name(), bank.index());
                errors += 1;
            }
        }
    }
    errors
}
