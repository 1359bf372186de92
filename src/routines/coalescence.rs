use ndarray::Array1;
use rayon::prelude::*;
use serde_derive::Deserialize;
use serde_derive::Serialize;

use crate::error::{Error, Result};

/// One power-law term `weight * d^(p + q)` of an asymptotic kernel
///
/// `p` is the exponent carried by the particle diameter, `q` the exponent
/// contributed by the slip or mean-free-path correction; factors of the mean
/// free path itself are folded into the weight.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct PowerLawTerm {
    pub weight: f64,
    pub p: f64,
    pub q: f64,
}

/// A coalescence-kernel regime as a sum of power-law terms
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RegimeSpec {
    terms: Vec<PowerLawTerm>,
}

impl RegimeSpec {
    pub fn new(terms: Vec<PowerLawTerm>) -> Result<RegimeSpec> {
        if terms.is_empty() {
            return Err(Error::InvalidConfiguration(
                "a kernel regime requires at least one power-law term".to_string(),
            ));
        }

        Ok(RegimeSpec { terms })
    }

    /// The continuum (gas-kinetic) regime of the Lee-Chen kernel
    ///
    /// `k` is the continuum prefactor `2 k_B T / (3 mu)`, `a_slip` the slip
    /// correction coefficient and `lambda` the mean free path. For equal
    /// sizes this evaluates to `2 k (1 + a_slip Kn)`.
    pub fn continuum(k: f64, a_slip: f64, lambda: f64) -> Result<RegimeSpec> {
        RegimeSpec::new(vec![
            PowerLawTerm {
                weight: k,
                p: 0.0,
                q: 0.0,
            },
            PowerLawTerm {
                weight: k,
                p: 1.0,
                q: -1.0,
            },
            PowerLawTerm {
                weight: 2.0 * a_slip * lambda * k,
                p: 0.0,
                q: -1.0,
            },
            PowerLawTerm {
                weight: 2.0 * a_slip * lambda * k,
                p: 1.0,
                q: -2.0,
            },
        ])
    }

    /// The free-molecular regime of the Lee-Chen kernel
    ///
    /// `kt` is the free-molecular prefactor and `b` the correction
    /// coefficient. For equal sizes this evaluates to `4 b kt sqrt(d)`.
    pub fn free_molecular(kt: f64, b: f64) -> Result<RegimeSpec> {
        RegimeSpec::new(vec![
            PowerLawTerm {
                weight: b * kt,
                p: 0.5,
                q: 0.0,
            },
            PowerLawTerm {
                weight: b * kt,
                p: 2.0,
                q: -1.5,
            },
            PowerLawTerm {
                weight: 2.0 * b * kt,
                p: 1.0,
                q: -0.5,
            },
        ])
    }

    pub fn terms(&self) -> &[PowerLawTerm] {
        &self.terms
    }

    /// Evaluate the regime at particle diameter `d`
    pub fn evaluate(&self, d: f64) -> f64 {
        self.terms
            .iter()
            .map(|term| term.weight * d.powf(term.p + term.q))
            .sum()
    }
}

/// Rule for combining the two asymptotic regimes into one kernel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum BlendMode {
    /// `1 / (1/K_c + 1/K_fm)`
    Harmonic,
    /// `(1/K_c^2 + 1/K_fm^2)^(-1/2)`, after Kuczaj
    RootSumSquareInverse,
    /// `phi^2 K_fm + (1 - phi)^2 K_c` with `phi = K_c / (K_fm + K_c)`
    WeightedSquare,
}

/// Blend two asymptotic kernel values
///
/// All three modes agree with the dominant regime in the deep-continuum and
/// deep-free-molecular limits. Non-positive or non-finite inputs, and blends
/// that lose finiteness, fail with [`Error::NumericOverflow`] instead of
/// propagating `NaN` or `Inf`.
pub fn blend(k_continuum: f64, k_free_molecular: f64, mode: BlendMode) -> Result<f64> {
    for (name, k) in [
        ("continuum", k_continuum),
        ("free-molecular", k_free_molecular),
    ] {
        if !k.is_finite() || k <= 0.0 {
            return Err(Error::NumericOverflow(format!(
                "{} kernel evaluated to {}",
                name, k
            )));
        }
    }

    // The reciprocal forms can overflow on positive, finite, but subnormal
    // kernel values and would otherwise collapse to a silent zero rate
    let blended = match mode {
        BlendMode::Harmonic => {
            let denominator = 1.0 / k_continuum + 1.0 / k_free_molecular;
            if !denominator.is_finite() {
                return Err(Error::NumericOverflow(format!(
                    "harmonic blend of {} and {} overflowed",
                    k_continuum, k_free_molecular
                )));
            }
            1.0 / denominator
        }
        BlendMode::RootSumSquareInverse => {
            let denominator = 1.0 / k_continuum.powi(2) + 1.0 / k_free_molecular.powi(2);
            if !denominator.is_finite() {
                return Err(Error::NumericOverflow(format!(
                    "squared reciprocal blend of {} and {} overflowed",
                    k_continuum, k_free_molecular
                )));
            }
            1.0 / denominator.sqrt()
        }
        BlendMode::WeightedSquare => {
            let total = k_free_molecular + k_continuum;
            if !total.is_finite() {
                return Err(Error::NumericOverflow(format!(
                    "sum of {} and {} overflowed",
                    k_continuum, k_free_molecular
                )));
            }
            let phi = k_continuum / total;
            phi.powi(2) * k_free_molecular + (1.0 - phi).powi(2) * k_continuum
        }
    };

    if !blended.is_finite() {
        return Err(Error::NumericOverflow(format!(
            "blend of {} and {} is not finite",
            k_continuum, k_free_molecular
        )));
    }

    Ok(blended)
}

/// Evaluate the blended coalescence kernel at Knudsen number `kn`
///
/// The particle diameter follows from `d = 2 lambda / kn` with `lambda` the
/// mean free path.
pub fn kernel(
    kn: f64,
    continuum: &RegimeSpec,
    free_molecular: &RegimeSpec,
    lambda: f64,
    mode: BlendMode,
) -> Result<f64> {
    if kn <= 0.0 || !kn.is_finite() {
        return Err(Error::InvalidConfiguration(format!(
            "Knudsen number must be positive and finite, got {}",
            kn
        )));
    }

    if lambda <= 0.0 || !lambda.is_finite() {
        return Err(Error::InvalidConfiguration(format!(
            "mean free path must be positive and finite, got {}",
            lambda
        )));
    }

    let d = 2.0 * lambda / kn;

    blend(continuum.evaluate(d), free_molecular.evaluate(d), mode)
}

/// Evaluate the blended kernel over an array of Knudsen numbers
///
/// The per-element evaluations are independent and run in parallel; the
/// first failing element is reported.
pub fn kernel_curve(
    kns: &Array1<f64>,
    continuum: &RegimeSpec,
    free_molecular: &RegimeSpec,
    lambda: f64,
    mode: BlendMode,
) -> Result<Array1<f64>> {
    let values = kns
        .as_slice()
        .map(|slice| {
            slice
                .par_iter()
                .map(|&kn| kernel(kn, continuum, free_molecular, lambda, mode))
                .collect::<Result<Vec<f64>>>()
        })
        .unwrap_or_else(|| {
            kns.iter()
                .map(|&kn| kernel(kn, continuum, free_molecular, lambda, mode))
                .collect()
        })?;

    Ok(Array1::from_vec(values))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_harmonic_below_both_regimes() {
        let value = blend(2.0, 3.0, BlendMode::Harmonic).unwrap();
        assert!(value < 2.0);
        assert!((value - 1.2).abs() < 1e-12);
    }

    #[test]
    fn test_blend_rejects_zero_regime() {
        let err = blend(0.0, 1.0, BlendMode::Harmonic).unwrap_err();
        assert!(matches!(err, Error::NumericOverflow(_)));
    }

    #[test]
    fn test_continuum_regime_equal_sizes() {
        // K_c(d) = 2 k (1 + a_slip * 2 lambda / d)
        let lambda = 6.6e-8;
        let spec = RegimeSpec::continuum(1.0, 1.591, lambda).unwrap();

        let d = 1e-6;
        let kn = 2.0 * lambda / d;
        let expected = 2.0 * (1.0 + 1.591 * kn);

        assert!((spec.evaluate(d) - expected).abs() < 1e-12 * expected);
    }
}
