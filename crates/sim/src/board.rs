// Orca Testkit - Bare-Metal Test Image Support
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use crate::{SimCsrFile, SimError, SimResult, SimUart};
use orca_config::BoardConfig;
use orca_csr::{region_csrs, RegionSpace};
use orca_harness::{report, selftest, Verdict};
use orca_uart::{Family, Transport};
use std::sync::{Arc, Mutex};
use tracing::info;

pub type SimTransport = Transport<SimUart, SimCsrFile>;

/// A board from a [`BoardConfig`] with the self-test image "loaded".
#[derive(Debug)]
pub struct SimBoard {
    name: String,
    family: Family,
    transport: SimTransport,
    capture: Arc<Mutex<Vec<u8>>>,
}

impl SimBoard {
    pub fn from_config(config: &BoardConfig) -> SimResult<Self> {
        config.validate()?;
        let family = config.family()?;
        let clock_hz = config.clock_hz()?;

        let mut csrs = SimCsrFile::new(config.caches.mcache_value())
            .with_time(config.time_start, config.time_step)
            .with_meimask_bits(config.meimask_bits);
        for region in &config.regions {
            let space = RegionSpace::from(region.space);
            let (base, last) = region_csrs(space, region.bank()?);
            let bounds = region.region();
            csrs.preload(base, bounds.base);
            csrs.preload(last, bounds.last);
        }

        let capture = Arc::new(Mutex::new(Vec::new()));
        let mut uart = SimUart::with_busy_polls(config.uart.busy_polls);
        uart.set_sink(Some(capture.clone()), false);

        Ok(Self {
            name: config.name.clone(),
            family,
            transport: Transport::new(uart, csrs, clock_hz),
            capture,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn family(&self) -> Family {
        self.family
    }

    pub fn set_echo_stdout(&mut self, echo: bool) {
        let sink = Some(self.capture.clone());
        self.transport.port_mut().set_sink(sink, echo);
    }

    pub fn transport(&self) -> &SimTransport {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut SimTransport {
        &mut self.transport
    }

    /// Runs the self-test and reports, stopping where the image would idle.
    pub fn run_selftest(&mut self) -> Verdict {
        info!(
            "Running self-test on '{}' ({}, {} Hz)",
            self.name,
            self.family,
            self.transport.clock_hz()
        );
        let verdict = selftest::run(&mut self.transport);
        report(&mut self.transport, verdict);
        info!(
            "Self-test finished: {:?}, {} UART bytes",
            verdict,
            self.transport.port().writes()
        );
        verdict
    }

    pub fn capture(&self) -> SimResult<Vec<u8>> {
        self.capture
            .lock()
            .map(|bytes| bytes.clone())
            .map_err(|_| SimError::CapturePoisoned)
    }

    pub fn snapshot(&self) -> serde_json::Value {
        serde_json::json!({
            "name": self.name,
            "family": self.family.name(),
            "clock_hz": self.transport.clock_hz(),
            "uart": self.transport.port().snapshot(),
            "csrs": self.transport.csrs().snapshot(),
        })
    }
}
