// Orca Testkit - Bare-Metal Test Image Support
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use orca_csr::{Csr, CsrAccess, WritableCsr};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};

/// Simulated ORCA CSR space.
///
/// `time` advances by `time_step` on every read, so a polling loop makes
/// progress without a separate clock thread.
#[derive(Debug)]
pub struct SimCsrFile {
    mcache: u32,
    meimask_bits: u32,
    meipend: AtomicU32,
    time: AtomicU32,
    time_step: u32,
    time_reads: AtomicU64,
    regs: BTreeMap<WritableCsr, u32>,
    write_log: Vec<(WritableCsr, u32)>,
}

impl SimCsrFile {
    pub fn new(mcache: u32) -> Self {
        Self {
            mcache,
            meimask_bits: u32::MAX,
            meipend: AtomicU32::new(0),
            time: AtomicU32::new(0),
            time_step: 1,
            time_reads: AtomicU64::new(0),
            regs: BTreeMap::new(),
            write_log: Vec::new(),
        }
    }

    pub fn with_time(mut self, start: u32, step: u32) -> Self {
        self.time = AtomicU32::new(start);
        self.time_step = step;
        self
    }

    pub fn with_meimask_bits(mut self, bits: u32) -> Self {
        self.meimask_bits = bits;
        self
    }

    /// Sets a register without logging it as a write from the program.
    pub fn preload(&mut self, csr: WritableCsr, value: u32) {
        self.regs.insert(csr, self.mask(csr, value));
    }

    /// Current counter value, without advancing it.
    pub fn time(&self) -> u32 {
        self.time.load(Ordering::SeqCst)
    }

    pub fn advance_time(&self, cycles: u32) {
        self.time.fetch_add(cycles, Ordering::SeqCst);
    }

    pub fn time_reads(&self) -> u64 {
        self.time_reads.load(Ordering::Relaxed)
    }

    pub fn set_pending(&self, bits: u32) {
        self.meipend.store(bits, Ordering::SeqCst);
    }

    pub fn write_log(&self) -> &[(WritableCsr, u32)] {
        &self.write_log
    }

    fn mask(&self, csr: WritableCsr, value: u32) -> u32 {
        match csr {
            WritableCsr::Meimask => value & self.meimask_bits,
            _ => value,
        }
    }

    pub fn snapshot(&self) -> serde_json::Value {
        let regs: serde_json::Map<String, serde_json::Value> = self
            .regs
            .iter()
            .map(|(csr, value)| (csr.csr().name().to_string(), (*value).into()))
            .collect();
        serde_json::json!({
            "mcache": self.mcache,
            "meipend": self.meipend.load(Ordering::Relaxed),
            "time": self.time(),
            "time_step": self.time_step,
            "regs": regs,
        })
    }
}

impl CsrAccess for SimCsrFile {
    fn read(&self, csr: Csr) -> u32 {
        match csr {
            Csr::Mcache => self.mcache,
            Csr::Meipend => self.meipend.load(Ordering::SeqCst),
            Csr::Time => {
                self.time_reads.fetch_add(1, Ordering::Relaxed);
                // fetch_add wraps on overflow, like the hardware counter.
                self.time.fetch_add(self.time_step, Ordering::SeqCst)
            }
            other => other
                .writable()
                .and_then(|w| self.regs.get(&w).copied())
                .unwrap_or(0),
        }
    }

    fn write(&mut self, csr: WritableCsr, value: u32) {
        let stored = self.mask(csr, value);
        tracing::debug!(
            "CSR write {} ({:#05x}) = {:#010x}",
            csr.csr().name(),
            csr.number(),
            stored
        );
        self.regs.insert(csr, stored);
        self.write_log.push((csr, value));
    }
}
