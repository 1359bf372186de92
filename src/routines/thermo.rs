use serde_derive::Deserialize;
use serde_derive::Serialize;
use std::f64::consts::PI;

use crate::error::{Error, Result};

/// Universal constants used by the thermophysical routines
///
/// Carried as an explicit read-only value rather than module-level state, so
/// that every routine that needs a constant receives it from its caller.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Constants {
    /// Boltzmann constant [J/K]
    pub k_boltzmann: f64,
    /// Avogadro constant [1/mol]
    pub n_avogadro: f64,
    /// Universal gas constant [J/(mol K)]
    pub r_gas: f64,
}

impl Default for Constants {
    fn default() -> Constants {
        Constants {
            k_boltzmann: 1.38064852e-23,
            n_avogadro: 6.02214086e23,
            r_gas: 8.3144621,
        }
    }
}

/// State of the carrier gas and the dispersed liquid phase
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct GasState {
    /// Molar mass of the carrier gas [g/mol]
    pub w_molar: f64,
    /// Pressure [Pa]
    pub pressure: f64,
    /// Temperature [K]
    pub temperature: f64,
    /// Dynamic viscosity [Pa s]
    pub mu: f64,
    /// Density of the dispersed liquid [kg/m^3]
    pub rho_l: f64,
}

impl GasState {
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("w_molar", self.w_molar),
            ("pressure", self.pressure),
            ("temperature", self.temperature),
            ("mu", self.mu),
            ("rho_l", self.rho_l),
        ] {
            if value <= 0.0 || !value.is_finite() {
                return Err(Error::InvalidConfiguration(format!(
                    "gas state field {} must be positive and finite, got {}",
                    name, value
                )));
            }
        }

        Ok(())
    }
}

/// Mean free path of the carrier gas molecules [m]
pub fn mean_free_path(gas: &GasState, constants: &Constants) -> Result<f64> {
    gas.validate()?;

    let m = gas.w_molar * 1e-3 / constants.n_avogadro;

    Ok(gas.mu / gas.pressure
        * (PI * constants.k_boltzmann * gas.temperature / (2.0 * m)).sqrt())
}

/// Continuum coalescence prefactor `K = 2 k_B T / (3 mu)` [m^3/s]
pub fn continuum_prefactor(gas: &GasState, constants: &Constants) -> Result<f64> {
    gas.validate()?;

    Ok(2.0 * constants.k_boltzmann * gas.temperature / (3.0 * gas.mu))
}

/// Free-molecular coalescence prefactor
///
/// `Kt = 3 sqrt(3)/2 * sqrt(mu^2 / (rho_l k_B T)) * K`, carrying the
/// `d^(1/2)` size scaling of the free-molecular regime.
pub fn free_molecular_prefactor(gas: &GasState, constants: &Constants) -> Result<f64> {
    let k = continuum_prefactor(gas, constants)?;

    Ok(3.0 * 3.0_f64.sqrt() / 2.0
        * (gas.mu.powi(2) / (gas.rho_l * constants.k_boltzmann * gas.temperature)).sqrt()
        * k)
}

/// Species with tabulated property correlations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum Species {
    PropyleneGlycol,
    Glycerol,
    Water,
    Air,
}

impl Species {
    /// Molar mass [g/mol]
    pub fn molar_mass(&self) -> f64 {
        match self {
            Species::PropyleneGlycol => 76.094,
            Species::Glycerol => 92.09,
            Species::Water => 18.015,
            Species::Air => 28.810,
        }
    }

    /// Saturation vapor pressure [Pa]
    ///
    /// Exponential-log correlations, clamped to non-negative values. Air has
    /// no condensed phase and is rejected.
    pub fn saturation_pressure(&self, t: f64) -> Result<f64> {
        check_temperature(t)?;

        match self {
            Species::PropyleneGlycol => {
                Ok((212.8 - 15420.0 / t - 28.109 * t.ln() + 2.1564e-5 * t.powi(2))
                    .exp()
                    .max(0.0))
            }
            Species::Glycerol => {
                let tc = t.min(850.0);
                let tau = (1.0 - tc / 850.0).max(0.0);

                Ok(7.5e6
                    * ((850.0 / tc)
                        * (-6.94758 * tau
                            - 0.33345 * tau.powf(1.5)
                            - 5.98569 * tau.powf(2.5)
                            - 1.33011 * tau.powi(5)))
                        .exp())
            }
            Species::Water => {
                Ok((73.649 - 7258.2 / t - 7.3037 * t.ln() + 4.1653e-6 * t.powi(2))
                    .exp()
                    .max(0.0))
            }
            Species::Air => Err(Error::InvalidConfiguration(
                "air has no saturation pressure correlation".to_string(),
            )),
        }
    }

    /// Liquid density [kg/m^3]
    pub fn liquid_density(&self, t: f64) -> Result<f64> {
        check_temperature(t)?;

        match self {
            Species::PropyleneGlycol => {
                let tau = (1.0 - (t / 626.0).min(1.0)).clamp(1e-16, 1.0);

                Ok((83.11748 / 0.26106_f64.powf(1.0 + tau.powf(0.20459))).max(0.0))
            }
            Species::Glycerol => {
                let tau = (1.0 - t / 850.0).clamp(0.0, 1.0);

                Ok(349.0 + 1341.5932 * tau.powf(0.35) - 1168.205 * tau.powf(2.0 / 3.0)
                    + 1429.7634 * tau
                    - 527.771 * tau.powf(4.0 / 3.0))
            }
            Species::Water => {
                Ok((((3.280712e-5 * t - 0.03440865) * t + 11.53645) * t - 249.5258).max(0.0))
            }
            Species::Air => Err(Error::InvalidConfiguration(
                "air has no liquid density correlation".to_string(),
            )),
        }
    }

    /// Vapor density from the ideal gas law at 1 bar [kg/m^3]
    pub fn gas_density(&self, t: f64, constants: &Constants) -> Result<f64> {
        check_temperature(t)?;

        Ok(self.molar_mass() / constants.r_gas / t * 1e2)
    }

    /// Vapor dynamic viscosity from the Sutherland correlation [Pa s]
    ///
    /// The original model shares one set of Sutherland coefficients across
    /// all vapor species.
    pub fn vapor_viscosity(&self, t: f64) -> Result<f64> {
        check_temperature(t)?;

        let a_s = 1.67212e-6;
        let t_s = 170.672;

        Ok(a_s * t.sqrt() / (1.0 + t_s / t))
    }
}

fn check_temperature(t: f64) -> Result<()> {
    if t <= 0.0 || !t.is_finite() {
        return Err(Error::InvalidConfiguration(format!(
            "temperature must be positive and finite, got {}",
            t
        )));
    }

    Ok(())
}
