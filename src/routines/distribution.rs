use statrs::function::erf::erf;
use std::f64::consts::{PI, SQRT_2};

use crate::error::{Error, Result};

/// A log-normal particle size distribution in diameter space
///
/// Parameterized by the count median diameter (CMD) and the geometric
/// standard deviation, the multiplicative spread of the distribution. A
/// geometric standard deviation of exactly one is the Dirac limit and is
/// rejected as [`Error::DegenerateDistribution`] so that callers special-case
/// it as a point mass instead of dividing by a zero logarithm.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogNormal {
    cmd: f64,
    sigma_g: f64,
}

impl LogNormal {
    pub fn new(cmd: f64, sigma_g: f64) -> Result<LogNormal> {
        if cmd <= 0.0 {
            return Err(Error::InvalidConfiguration(format!(
                "count median diameter must be positive, got {}",
                cmd
            )));
        }

        if sigma_g < 1.0 {
            return Err(Error::InvalidConfiguration(format!(
                "geometric standard deviation must be at least 1, got {}",
                sigma_g
            )));
        }

        if sigma_g == 1.0 {
            return Err(Error::DegenerateDistribution);
        }

        Ok(LogNormal { cmd, sigma_g })
    }

    pub fn cmd(&self) -> f64 {
        self.cmd
    }

    pub fn sigma_g(&self) -> f64 {
        self.sigma_g
    }

    /// Value of df/dlogd at diameter `d`
    ///
    /// The density integrates to one over the natural logarithm of the
    /// diameter. Its peak, at `d == cmd`, equals
    /// `1/(sqrt(2 pi) ln sigma_g)`.
    pub fn density(&self, d: f64) -> Result<f64> {
        if d <= 0.0 {
            return Err(Error::InvalidConfiguration(format!(
                "diameter must be positive, got {}",
                d
            )));
        }

        let ln_sigma = self.sigma_g.ln();

        Ok(1.0 / ((2.0 * PI).sqrt() * ln_sigma)
            * (-(d / self.cmd).ln().powi(2) / (2.0 * ln_sigma.powi(2))).exp())
    }

    /// Fraction of the mass moment carried by particles in `[y0, y1]`
    ///
    /// `y0`, `y1` and `cmm` are particle masses; `cmm` is the count median
    /// mass. The factor 3 in the argument comes from the cubic diameter-mass
    /// relation for spherical particles of uniform density, which is an
    /// assumption of this closed form.
    pub fn fraction_in_mass_interval(&self, y0: f64, y1: f64, cmm: f64) -> Result<f64> {
        self.check_mass_interval(y0, y1, cmm)?;

        let s = 3.0 * SQRT_2 * self.sigma_g.ln();

        Ok(0.5 * (erf((y1 / cmm).ln() / s) - erf((y0 / cmm).ln() / s)))
    }

    /// Mean df/dlogd over the mass interval `[y0, y1]`
    ///
    /// The interval fraction divided by the natural-log diameter width
    /// `ln(y1/y0)/3` of the interval.
    pub fn density_over_mass_interval(&self, y0: f64, y1: f64, cmm: f64) -> Result<f64> {
        let fraction = self.fraction_in_mass_interval(y0, y1, cmm)?;

        Ok(fraction / ((y1 / y0).ln() / 3.0))
    }

    /// Count median mass for a dispersed phase of density `rho_l`
    pub fn count_median_mass(&self, rho_l: f64) -> Result<f64> {
        if rho_l <= 0.0 {
            return Err(Error::InvalidConfiguration(format!(
                "dispersed phase density must be positive, got {}",
                rho_l
            )));
        }

        Ok(PI / 6.0 * rho_l * self.cmd.powi(3))
    }

    /// Generalized moment diameter `d_{p,q} = cmd * exp(0.5 (p+q) ln^2 sigma_g)`
    pub fn moment_diameter(&self, p: f64, q: f64) -> f64 {
        self.cmd * (0.5 * (p + q) * self.sigma_g.ln().powi(2)).exp()
    }

    pub fn count_mean_diameter(&self) -> f64 {
        self.moment_diameter(1.0, 0.0)
    }

    /// Sauter mean diameter `d_{3,2}`
    pub fn sauter_mean_diameter(&self) -> f64 {
        self.moment_diameter(3.0, 2.0)
    }

    pub fn mass_median_diameter(&self) -> f64 {
        self.moment_diameter(3.0, 3.0)
    }

    pub fn mass_mean_diameter(&self) -> f64 {
        self.moment_diameter(4.0, 3.0)
    }

    fn check_mass_interval(&self, y0: f64, y1: f64, cmm: f64) -> Result<()> {
        if y0 <= 0.0 || y1 <= y0 {
            return Err(Error::InvalidConfiguration(format!(
                "mass interval requires 0 < y0 < y1, got [{}, {}]",
                y0, y1
            )));
        }

        if cmm <= 0.0 {
            return Err(Error::InvalidConfiguration(format!(
                "count median mass must be positive, got {}",
                cmm
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degenerate_sigma_is_rejected() {
        assert_eq!(
            LogNormal::new(1e-6, 1.0).unwrap_err(),
            Error::DegenerateDistribution
        );
    }

    #[test]
    fn test_moment_diameter_ordering() {
        // CMD < count mean < Sauter mean < mass median < mass mean
        let dist = LogNormal::new(1e-6, 1.8).unwrap();

        assert!(dist.cmd() < dist.count_mean_diameter());
        assert!(dist.count_mean_diameter() < dist.sauter_mean_diameter());
        assert!(dist.sauter_mean_diameter() < dist.mass_median_diameter());
        assert!(dist.mass_median_diameter() < dist.mass_mean_diameter());
    }

    #[test]
    fn test_symmetric_interval_fraction() {
        // For an interval [cmm/r, cmm*r] the two erf terms are opposite,
        // leaving erf(ln r / (3 sqrt(2) ln sigma_g))
        let dist = LogNormal::new(1e-6, 2.0).unwrap();
        let cmm = dist.count_median_mass(1000.0).unwrap();

        let r: f64 = 50.0;
        let fraction = dist
            .fraction_in_mass_interval(cmm / r, cmm * r, cmm)
            .unwrap();

        let expected = erf(r.ln() / (3.0 * SQRT_2 * 2.0_f64.ln()));
        assert!((fraction - expected).abs() < 1e-14);
    }
}
