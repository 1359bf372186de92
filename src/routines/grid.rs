use ndarray::Array1;
use serde_derive::Deserialize;
use serde_derive::Serialize;

use crate::error::{Error, Result};

/// Spacing rule of a sectional grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GridType {
    Linear,
    Logarithmic,
}

/// A one-dimensional sectional discretization of particle mass space
///
/// The grid holds `n` cell centers `x` and `n + 1` cell edges `y`, both
/// strictly increasing, with `y[0]` and `y[n]` equal to the requested bounds
/// exactly. For the logarithmic type the centers are the geometric midpoints
/// of the edges, so that the centers remain log-uniformly spaced. The grid is
/// built once per analysis and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    grid_type: GridType,
    x: Array1<f64>,
    y: Array1<f64>,
}

impl Grid {
    /// Build a sectional grid over `[y_min, y_max]` with `n` sections
    ///
    /// Fails with [`Error::InvalidConfiguration`] unless `0 < y_min < y_max`
    /// and `n >= 1`.
    pub fn build(y_min: f64, y_max: f64, n: usize, grid_type: GridType) -> Result<Grid> {
        if n < 1 {
            return Err(Error::InvalidConfiguration(
                "minimum sectional grid size is 1".to_string(),
            ));
        }

        if y_min <= 0.0 {
            return Err(Error::InvalidConfiguration(format!(
                "sectional grid bounds must be positive, got y_min = {}",
                y_min
            )));
        }

        if y_min >= y_max {
            return Err(Error::InvalidConfiguration(format!(
                "sectional grid requires y_min < y_max, got [{}, {}]",
                y_min, y_max
            )));
        }

        let mut x = Array1::zeros(n);
        let mut y = Array1::zeros(n + 1);

        match grid_type {
            GridType::Logarithmic => {
                let a = (y_max / y_min).powf(1.0 / n as f64);

                for i in 0..n {
                    x[i] = y_min * a.powf(i as f64 + 0.5);
                    y[i] = y_min * a.powi(i as i32);
                }
            }
            GridType::Linear => {
                let a = (y_max - y_min) / n as f64;

                for i in 0..n {
                    x[i] = y_min + (i as f64 + 0.5) * a;
                    y[i] = y_min + i as f64 * a;
                }
            }
        }

        // The bounds are set exactly, not through the spacing rule
        y[0] = y_min;
        y[n] = y_max;

        Ok(Grid { grid_type, x, y })
    }

    /// Number of sections
    pub fn n(&self) -> usize {
        self.x.len()
    }

    pub fn grid_type(&self) -> GridType {
        self.grid_type
    }

    /// Section centers, length `n`
    pub fn x(&self) -> &Array1<f64> {
        &self.x
    }

    /// Section edges, length `n + 1`
    pub fn y(&self) -> &Array1<f64> {
        &self.y
    }

    pub fn y_min(&self) -> f64 {
        self.y[0]
    }

    pub fn y_max(&self) -> f64 {
        self.y[self.n()]
    }

    /// Smallest section center
    pub fn x_min(&self) -> f64 {
        self.x[0]
    }

    /// Largest section center
    pub fn x_max(&self) -> f64 {
        self.x[self.n() - 1]
    }

    /// Base-10 logarithmic width of section `i`
    pub fn section_log10_width(&self, i: usize) -> f64 {
        self.y[i + 1].log10() - self.y[i].log10()
    }

    /// Index of the last section center at or below `s`
    ///
    /// Returns `None` when `s` lies below the first center. The centers are
    /// strictly increasing, so a plain scan is exact for any spacing rule.
    pub fn find_lower(&self, s: f64) -> Option<usize> {
        if s < self.x[0] {
            return None;
        }

        let mut lower = 0;
        for i in 0..self.n() {
            if self.x[i] <= s {
                lower = i;
            } else {
                break;
            }
        }

        Some(lower)
    }

    /// Convert a mass-space grid to diameter space
    ///
    /// Returns `(centers, edges)` with `d = (6 x / (pi rho_l))^(1/3)`,
    /// assuming spherical particles of uniform density `rho_l`.
    pub fn to_diameters(&self, rho_l: f64) -> Result<(Array1<f64>, Array1<f64>)> {
        if rho_l <= 0.0 {
            return Err(Error::InvalidConfiguration(format!(
                "dispersed phase density must be positive, got {}",
                rho_l
            )));
        }

        let to_d = |m: f64| (6.0 * m / (std::f64::consts::PI * rho_l)).powf(1.0 / 3.0);

        let dx = self.x.mapv(to_d);
        let dy = self.y.mapv(to_d);

        Ok((dx, dy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_spacing() {
        let grid = Grid::build(1.0, 2.0, 4, GridType::Linear).unwrap();

        assert_eq!(grid.y()[0], 1.0);
        assert_eq!(grid.y()[4], 2.0);
        assert_eq!(grid.x()[0], 1.125);
        assert_eq!(grid.x()[3], 1.875);
    }

    #[test]
    fn test_find_lower() {
        let grid = Grid::build(1.0, 16.0, 4, GridType::Logarithmic).unwrap();

        assert_eq!(grid.find_lower(grid.x()[0]), Some(0));
        assert_eq!(grid.find_lower(grid.x()[2] * 1.01), Some(2));
        assert_eq!(grid.find_lower(grid.x()[0] * 0.99), None);
        assert_eq!(grid.find_lower(grid.x_max() * 2.0), Some(3));
    }

    #[test]
    fn test_rejects_bad_bounds() {
        assert!(Grid::build(2.0, 1.0, 4, GridType::Linear).is_err());
        assert!(Grid::build(0.0, 1.0, 4, GridType::Logarithmic).is_err());
        assert!(Grid::build(1.0, 2.0, 0, GridType::Linear).is_err());
    }
}
