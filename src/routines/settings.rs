use anyhow::Result;
use config::Config as eConfig;
use serde_derive::Deserialize;
use serde_derive::Serialize;

use crate::routines::coalescence::BlendMode;
use crate::routines::distribution::LogNormal;
use crate::routines::grid::{Grid, GridType};
use crate::routines::thermo::GasState;

/// Analysis configuration, read from a TOML file
///
/// Every optional knob carries a serde default, so a minimal file only needs
/// the grid bounds and the distribution parameters.
#[derive(Debug, Deserialize, Clone, Serialize)]
pub struct Settings {
    pub grid: GridSettings,
    pub distribution: DistributionSettings,
    #[serde(default)]
    pub gas: GasSettings,
    #[serde(default)]
    pub log: LogSettings,
}

#[derive(Debug, Deserialize, Clone, Serialize)]
pub struct GridSettings {
    pub y_min: f64,
    pub y_max: f64,
    pub sections: usize,
    #[serde(default = "default_grid_type")]
    pub grid_type: GridType,
}

#[derive(Debug, Deserialize, Clone, Serialize)]
pub struct DistributionSettings {
    /// Count median diameter [m]
    pub cmd: f64,
    /// Geometric standard deviation
    pub sigma: f64,
    /// Dispersed phase density [kg/m^3]
    #[serde(default = "default_rho_l")]
    pub rho_l: f64,
    /// Total moment distributed over the sections
    #[serde(default = "default_one")]
    pub total_moment: f64,
    /// Index of the first active section
    #[serde(default)]
    pub first_active: usize,
}

#[derive(Debug, Deserialize, Clone, Serialize)]
pub struct GasSettings {
    #[serde(default = "default_w_molar")]
    pub w_molar: f64,
    #[serde(default = "default_pressure")]
    pub pressure: f64,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default = "default_mu")]
    pub mu: f64,
    /// Slip correction coefficient of the continuum regime
    #[serde(default = "default_slip")]
    pub slip: f64,
    /// Correction coefficient of the free-molecular regime
    #[serde(default = "default_fm_coefficient")]
    pub fm_coefficient: f64,
    #[serde(default = "default_blend_mode")]
    pub blend_mode: BlendMode,
}

impl Default for GasSettings {
    fn default() -> GasSettings {
        GasSettings {
            w_molar: default_w_molar(),
            pressure: default_pressure(),
            temperature: default_temperature(),
            mu: default_mu(),
            slip: default_slip(),
            fm_coefficient: default_fm_coefficient(),
            blend_mode: default_blend_mode(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Serialize)]
pub struct LogSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    pub file: Option<String>,
}

impl Default for LogSettings {
    fn default() -> LogSettings {
        LogSettings {
            level: default_log_level(),
            file: None,
        }
    }
}

impl Settings {
    /// Build the sectional grid described by the `[grid]` section
    pub fn build_grid(&self) -> crate::error::Result<Grid> {
        Grid::build(
            self.grid.y_min,
            self.grid.y_max,
            self.grid.sections,
            self.grid.grid_type,
        )
    }

    /// Build the log-normal distribution described by `[distribution]`
    pub fn build_distribution(&self) -> crate::error::Result<LogNormal> {
        LogNormal::new(self.distribution.cmd, self.distribution.sigma)
    }

    /// Assemble the gas state consumed by the kernel routines
    pub fn gas_state(&self) -> GasState {
        GasState {
            w_molar: self.gas.w_molar,
            pressure: self.gas.pressure,
            temperature: self.gas.temperature,
            mu: self.gas.mu,
            rho_l: self.distribution.rho_l,
        }
    }
}

/// Read settings from a TOML file, layered with `AEROCORE_`-prefixed
/// environment variables
///
/// Variables use a double underscore between nesting levels so snake_case
/// keys stay addressable: `AEROCORE_GRID__Y_MIN` overrides `grid.y_min`,
/// `AEROCORE_GAS__W_MOLAR` overrides `gas.w_molar`.
pub fn read_settings(path: &str) -> Result<Settings> {
    let parsed = eConfig::builder()
        .add_source(config::File::with_name(path).format(config::FileFormat::Toml))
        .add_source(
            config::Environment::with_prefix("AEROCORE")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    let settings: Settings = parsed.try_deserialize()?;

    Ok(settings)
}

/// Write the parsed settings to a JSON file, as a record of the analysis
pub fn write_settings(settings: &Settings, path: &str) -> Result<()> {
    let serialized = serde_json::to_string_pretty(settings)?;
    std::fs::write(path, serialized)?;

    tracing::debug!("Wrote settings to {}", path);

    Ok(())
}

// *********************************
// Default values for deserializing
// *********************************

fn default_grid_type() -> GridType {
    GridType::Logarithmic
}

fn default_one() -> f64 {
    1.0
}

fn default_rho_l() -> f64 {
    1e3
}

fn default_w_molar() -> f64 {
    28.9596
}

fn default_pressure() -> f64 {
    1e5
}

fn default_temperature() -> f64 {
    293.15
}

fn default_mu() -> f64 {
    1.789e-5
}

fn default_slip() -> f64 {
    1.591
}

fn default_fm_coefficient() -> f64 {
    0.9
}

fn default_blend_mode() -> BlendMode {
    BlendMode::Harmonic
}

fn default_log_level() -> String {
    "info".to_string()
}
