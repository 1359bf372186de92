use ndarray::Array1;

use crate::error::{Error, Result};
use crate::routines::distribution::LogNormal;
use crate::routines::grid::Grid;

/// Per-section scalar moments aligned with the centers of a [`Grid`]
///
/// Sections below `first_active` are reserved and always hold zero. The
/// reserved prefix makes the legacy layout, in which section zero is kept
/// empty for bookkeeping, an explicit and testable parameter instead of an
/// undocumented convention.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionalField {
    values: Array1<f64>,
    first_active: usize,
}

impl SectionalField {
    pub fn zeros(n: usize, first_active: usize) -> SectionalField {
        SectionalField {
            values: Array1::zeros(n),
            first_active,
        }
    }

    pub fn values(&self) -> &Array1<f64> {
        &self.values
    }

    pub fn first_active(&self) -> usize {
        self.first_active
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Total moment held by the field
    pub fn sum(&self) -> f64 {
        self.values.sum()
    }
}

/// Projects continuous size distributions onto a sectional grid, and back
///
/// The projector borrows the grid; it owns no state beyond the index of the
/// first active section.
#[derive(Debug, Clone, Copy)]
pub struct Projector<'a> {
    grid: &'a Grid,
    first_active: usize,
}

impl<'a> Projector<'a> {
    pub fn new(grid: &'a Grid) -> Projector<'a> {
        Projector {
            grid,
            first_active: 0,
        }
    }

    /// A projector that leaves the first `first_active` sections empty
    pub fn with_first_active(grid: &'a Grid, first_active: usize) -> Result<Projector<'a>> {
        if first_active >= grid.n() {
            return Err(Error::InvalidConfiguration(format!(
                "first active section {} exceeds grid size {}",
                first_active,
                grid.n()
            )));
        }

        Ok(Projector { grid, first_active })
    }

    pub fn grid(&self) -> &Grid {
        self.grid
    }

    /// Project a log-normal distribution onto the grid
    ///
    /// Each active section receives the closed-form mass fraction of the
    /// distribution within its edges, scaled so that the section values sum
    /// to `total_moment` exactly. The rescaling also absorbs the part of the
    /// distribution truncated by the grid bounds, so conservation holds on
    /// any valid grid.
    pub fn project(
        &self,
        dist: &LogNormal,
        cmm: f64,
        total_moment: f64,
    ) -> Result<SectionalField> {
        if total_moment < 0.0 {
            return Err(Error::InvalidConfiguration(format!(
                "total moment must be non-negative, got {}",
                total_moment
            )));
        }

        let n = self.grid.n();
        let y = self.grid.y();

        let mut fractions = Array1::zeros(n);
        for i in self.first_active..n {
            fractions[i] = dist.fraction_in_mass_interval(y[i], y[i + 1], cmm)?;
        }

        let covered = fractions.sum();
        if covered <= 0.0 {
            return Err(Error::InvalidConfiguration(format!(
                "grid [{}, {}] does not overlap the distribution support",
                self.grid.y_min(),
                self.grid.y_max()
            )));
        }

        let values = fractions.mapv(|f| f / covered * total_moment);

        Ok(SectionalField {
            values,
            first_active: self.first_active,
        })
    }

    /// Place a single point source of `number` particles with mass `x0`
    ///
    /// The source is split over the two sections whose centers bracket `x0`,
    /// with the two-moment weights that conserve both the particle number
    /// and the total mass `number * x0`. The returned field holds section
    /// masses. A target exactly on a section center is assigned wholly to
    /// that section. Targets outside the active center range fail with
    /// [`Error::OutOfRange`]; there is no extrapolation.
    pub fn point_source(&self, x0: f64, number: f64) -> Result<SectionalField> {
        if number < 0.0 {
            return Err(Error::InvalidConfiguration(format!(
                "particle number must be non-negative, got {}",
                number
            )));
        }

        let x = self.grid.x();
        let min = x[self.first_active];
        let max = self.grid.x_max();

        if !(min..=max).contains(&x0) {
            return Err(Error::OutOfRange {
                value: x0,
                min,
                max,
            });
        }

        let lower = self.grid.find_lower(x0).unwrap_or(self.first_active);

        let mut field = SectionalField::zeros(self.grid.n(), self.first_active);

        if x0 == x[lower] {
            // On a center, the upper weight vanishes; skip the division so
            // that a center on the last section stays in range
            field.values[lower] = number * x0;
            return Ok(field);
        }

        let upper = lower + 1;
        let w_lower = (x[upper] - x0) / (x[upper] - x[lower]);

        field.values[lower] = number * w_lower * x[lower];
        field.values[upper] = number * (1.0 - w_lower) * x[upper];

        Ok(field)
    }

    /// Reconstruct the discrete dN/dlogd curve from a sectional field
    ///
    /// Each section value is divided by the base-10 logarithmic width of the
    /// section, the discrete analogue of dN/dlogd in the display convention.
    /// For a mass-space grid the natural-log diameter density is `3 / ln 10`
    /// times the returned values.
    pub fn reconstruct(&self, field: &SectionalField) -> Result<Array1<f64>> {
        if field.len() != self.grid.n() {
            return Err(Error::InvalidConfiguration(format!(
                "field of {} sections does not match grid of {}",
                field.len(),
                self.grid.n()
            )));
        }

        let mut curve = Array1::zeros(self.grid.n());
        for i in 0..self.grid.n() {
            curve[i] = field.values[i] / self.grid.section_log10_width(i);
        }

        Ok(curve)
    }
}
