// Orca Testkit - Bare-Metal Test Image Support
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use anyhow::{Context, Result};
use orca_csr::{MemoryRegion, RegionBank, RegionSpace};
use orca_uart::Family;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default schema version for YAML configs
fn default_schema_version() -> String {
    "1.0".to_string()
}

fn default_time_step() -> u32 {
    1
}

fn default_meimask_bits() -> u32 {
    0x0000_0001
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Unsupported schema_version '{0}'. Supported versions: '1.0'")]
    SchemaVersion(String),
    #[error("Board 'name' cannot be empty")]
    EmptyName,
    #[error("Family '{0}' has no UART wiring for the test image")]
    UnwiredFamily(&'static str),
    #[error("Clock of {0} Hz is below 1 MHz; delays need at least one cycle per microsecond")]
    ClockTooSlow(u32),
    #[error("Region bank {0} does not exist (banks are 0-3)")]
    RegionBank(u8),
    #[error("Limit 'time_step' must be greater than zero")]
    ZeroTimeStep,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FamilyName {
    #[serde(alias = "intel")]
    Altera,
    #[serde(alias = "zynq", alias = "zedboard")]
    Xilinx,
    Microsemi,
    Lattice,
}

impl FamilyName {
    /// Resolves to a wired family. Lattice has none.
    pub fn resolve(self) -> Result<Family, ConfigError> {
        match self {
            FamilyName::Altera => Ok(Family::Altera),
            FamilyName::Xilinx => Ok(Family::Xilinx),
            FamilyName::Microsemi => Ok(Family::Microsemi),
            FamilyName::Lattice => Err(ConfigError::UnwiredFamily("lattice")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionSpaceName {
    #[serde(alias = "mamr")]
    Auxiliary,
    #[serde(alias = "mumr")]
    Uncached,
}

impl From<RegionSpaceName> for RegionSpace {
    fn from(name: RegionSpaceName) -> Self {
        match name {
            RegionSpaceName::Auxiliary => RegionSpace::Auxiliary,
            RegionSpaceName::Uncached => RegionSpace::Uncached,
        }
    }
}

/// Contents of `mcache` on the simulated core.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheConfig {
    #[serde(default)]
    pub icache: bool,
    #[serde(default)]
    pub dcache: bool,
    /// Extra bits to report in `mcache`. Non-zero models broken hardware.
    #[serde(default)]
    pub reserved_bits: u32,
}

impl CacheConfig {
    pub fn mcache_value(&self) -> u32 {
        u32::from(self.icache) | (u32::from(self.dcache) << 1) | self.reserved_bits
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
pub struct UartSimConfig {
    /// Busy polls the simulated UART reports before accepting each byte.
    #[serde(default)]
    pub busy_polls: u32,
}

/// Initial contents of one region bank.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct RegionConfig {
    pub space: RegionSpaceName,
    pub bank: u8,
    pub base: u32,
    pub last: u32,
}

impl RegionConfig {
    pub fn bank(&self) -> Result<RegionBank, ConfigError> {
        RegionBank::ALL
            .get(usize::from(self.bank))
            .copied()
            .ok_or(ConfigError::RegionBank(self.bank))
    }

    pub fn region(&self) -> MemoryRegion {
        MemoryRegion::new(self.base, self.last)
    }
}

/// A board running the test image, real or simulated.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct BoardConfig {
    #[serde(default = "default_schema_version")]
    pub schema_version: String,
    pub name: String,
    pub family: FamilyName,
    /// Overrides the family's reference clock.
    #[serde(default)]
    pub sys_clk_hz: Option<u32>,
    #[serde(default)]
    pub caches: CacheConfig,
    #[serde(default)]
    pub uart: UartSimConfig,
    /// Implemented bits of `meimask`.
    #[serde(default = "default_meimask_bits")]
    pub meimask_bits: u32,
    /// Initial value of the cycle counter.
    #[serde(default)]
    pub time_start: u32,
    /// Cycles the simulated counter advances per read.
    #[serde(default = "default_time_step")]
    pub time_step: u32,
    #[serde(default)]
    pub regions: Vec<RegionConfig>,
}

impl BoardConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read board config at {:?}", path.as_ref()))?;
        Self::from_yaml_str(&contents)
    }

    pub fn from_yaml_str(contents: &str) -> Result<Self> {
        let board: Self =
            serde_yaml::from_str(contents).context("Failed to parse Board Config YAML")?;
        board.validate()?;
        tracing::debug!("Loaded board '{}' ({:?})", board.name, board.family);
        Ok(board)
    }

    pub fn family(&self) -> Result<Family, ConfigError> {
        self.family.resolve()
    }

    pub fn clock_hz(&self) -> Result<u32, ConfigError> {
        let family = self.family()?;
        Ok(self.sys_clk_hz.unwrap_or(family.sys_clk_hz()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.schema_version != "1.0" {
            return Err(ConfigError::SchemaVersion(self.schema_version.clone()));
        }

        if self.name.trim().is_empty() {
            return Err(ConfigError::EmptyName);
        }

        let clock_hz = self.clock_hz()?;
        if clock_hz < 1_000_000 {
            return Err(ConfigError::ClockTooSlow(clock_hz));
        }

        if self.time_step == 0 {
            return Err(ConfigError::ZeroTimeStep);
        }

        for region in &self.regions {
            region.bank()?;
        }

        Ok(())
    }
}
