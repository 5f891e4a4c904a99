//! Motor driver register configuration from TOML.

use serde::Deserialize;

/// Known-good TMC5160 register values and health poll period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct DriverConfig {
    /// Period between DRV_STATUS polls.
    #[serde(default = "default_health_interval_ms")]
    pub health_interval_ms: u32,

    /// Value written to GSTAT to clear latched flags (write-1-to-clear).
    #[serde(default = "default_gstat_clear")]
    pub gstat_clear: u32,

    /// GLOBAL_SCALER motor current scaling.
    #[serde(default = "default_global_scaler")]
    pub global_scaler: u32,

    /// CHOPCONF chopper and microstep resolution.
    #[serde(default = "default_chopconf")]
    pub chopconf: u32,

    /// IHOLD_IRUN hold/run current and hold delay.
    #[serde(default = "default_ihold_irun")]
    pub ihold_irun: u32,
}

fn default_health_interval_ms() -> u32 {
    2000
}

fn default_gstat_clear() -> u32 {
    0x0000_0007
}

fn default_global_scaler() -> u32 {
    128
}

fn default_chopconf() -> u32 {
    0x1441_0153
}

fn default_ihold_irun() -> u32 {
    0x0002_100A
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            health_interval_ms: default_health_interval_ms(),
            gstat_clear: default_gstat_clear(),
            global_scaler: default_global_scaler(),
            chopconf: default_chopconf(),
            ihold_irun: default_ihold_irun(),
        }
    }
}
