// Orca Testkit - Bare-Metal Test Image Support
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use orca_config::{BoardConfig, ConfigError, FamilyName, RegionSpaceName};
use orca_csr::{MemoryRegion, RegionBank};
use orca_uart::Family;

#[test]
fn test_minimal_board_uses_family_defaults() {
    let yaml = r#"
name: "de0-nano"
family: "altera"
"#;
    let board = BoardConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(board.schema_version, "1.0");
    assert_eq!(board.family().unwrap(), Family::Altera);
    assert_eq!(board.clock_hz().unwrap(), 50_000_000);
    assert_eq!(board.caches.mcache_value(), 0);
    assert_eq!(board.uart.busy_polls, 0);
    assert_eq!(board.meimask_bits, 1);
    assert_eq!(board.time_step, 1);
    assert!(board.regions.is_empty());
}

#[test]
fn test_full_board_parses() {
    let yaml = r#"
schema_version: "1.0"
name: "zedboard"
family: "zynq"
sys_clk_hz: 100000000
caches:
  icache: true
  dcache: true
uart:
  busy_polls: 4
meimask_bits: 0xFF
time_start: 0xFFFFFF00
time_step: 3
regions:
  - space: "mumr"
    bank: 1
    base: 0x80000000
    last: 0x8FFFFFFF
"#;
    let board = BoardConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(board.family, FamilyName::Xilinx);
    assert_eq!(board.clock_hz().unwrap(), 100_000_000);
    assert_eq!(board.caches.mcache_value(), 0b11);
    assert_eq!(board.uart.busy_polls, 4);
    assert_eq!(board.meimask_bits, 0xFF);
    assert_eq!(board.time_start, 0xFFFF_FF00);

    let region = &board.regions[0];
    assert_eq!(region.space, RegionSpaceName::Uncached);
    assert_eq!(region.bank().unwrap(), RegionBank::Bank1);
    assert_eq!(region.region(), MemoryRegion::new(0x8000_0000, 0x8FFF_FFFF));
}

#[test]
fn test_lattice_is_rejected() {
    let yaml = r#"
name: "ecp5"
family: "lattice"
"#;
    let err = BoardConfig::from_yaml_str(yaml).unwrap_err();
    assert_eq!(
        err.downcast_ref::<ConfigError>(),
        Some(&ConfigError::UnwiredFamily("lattice"))
    );
}

#[test]
fn test_sub_megahertz_clock_is_rejected() {
    let yaml = r#"
name: "slow"
family: "microsemi"
sys_clk_hz: 32768
"#;
    let err = BoardConfig::from_yaml_str(yaml).unwrap_err();
    assert_eq!(
        err.downcast_ref::<ConfigError>(),
        Some(&ConfigError::ClockTooSlow(32768))
    );
}

#[test]
fn test_bad_region_bank_is_rejected() {
    let yaml = r#"
name: "board"
family: "altera"
regions:
  - space: "auxiliary"
    bank: 4
    base: 0
    last: 0
"#;
    let err = BoardConfig::from_yaml_str(yaml).unwrap_err();
    assert_eq!(
        err.downcast_ref::<ConfigError>(),
        Some(&ConfigError::RegionBank(4))
    );
}

#[test]
fn test_unknown_schema_version_is_rejected() {
    let yaml = r#"
schema_version: "2.0"
name: "board"
family: "altera"
"#;
    let err = BoardConfig::from_yaml_str(yaml).unwrap_err();
    assert!(err.to_string().contains("2.0"));
}

#[test]
fn test_unknown_family_fails_to_parse() {
    let yaml = r#"
name: "board"
family: "gowin"
"#;
    assert!(BoardConfig::from_yaml_str(yaml).is_err());
}

#[test]
fn test_reserved_cache_bits_reach_mcache() {
    let yaml = r#"
name: "broken"
family: "altera"
caches:
  icache: true
  reserved_bits: 0x100
"#;
    let board = BoardConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(board.caches.mcache_value(), 0x101);
}

#[test]
fn test_from_file_reports_missing_path() {
    let err = BoardConfig::from_file("/nonexistent/orca-board.yaml").unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to read board config"));
}
