use aerocore::prelude::*;
use anyhow::Result;

/// Edges and centers of a logarithmic grid follow the geometric spacing rule
#[test]
fn test_logarithmic_grid_spacing() -> Result<()> {
    let y_min = 1e-24;
    let y_max = 1e-7;
    let n = 16;

    let grid = Grid::build(y_min, y_max, n, GridType::Logarithmic)?;

    // Bounds are exact, not rounded through the spacing rule
    assert_eq!(grid.y()[0], y_min);
    assert_eq!(grid.y()[n], y_max);

    let a = (y_max / y_min).powf(1.0 / n as f64);

    for i in 0..n {
        let expected = y_min * a.powf(i as f64 + 0.5);
        let rel = (grid.x()[i] - expected).abs() / expected;
        assert!(rel < 1e-12, "center {} off by {}", i, rel);
    }

    // First center is the geometric midpoint of the first pair of edges
    let rel = (grid.x()[0] - 3.398e-24).abs() / 3.398e-24;
    assert!(rel < 0.01, "first center {} off by {}", grid.x()[0], rel);

    Ok(())
}

/// Centers sit strictly between their edges for both grid types
#[test]
fn test_grid_monotonicity() -> Result<()> {
    let cases = [
        (1e-24, 1e-7, 16, GridType::Logarithmic),
        (1e-24, 1e-7, 1, GridType::Logarithmic),
        (1.0, 100.0, 33, GridType::Linear),
        (0.5, 2.0, 7, GridType::Linear),
    ];

    for (y_min, y_max, n, grid_type) in cases {
        let grid = Grid::build(y_min, y_max, n, grid_type)?;

        assert_eq!(grid.n(), n);
        assert_eq!(grid.y()[0], y_min);
        assert_eq!(grid.y()[n], y_max);

        for i in 0..n {
            assert!(
                grid.y()[i] < grid.x()[i] && grid.x()[i] < grid.y()[i + 1],
                "section {} violates y[i] < x[i] < y[i+1] for {:?}",
                i,
                grid_type
            );
        }
    }

    Ok(())
}

/// Linear centers are the arithmetic midpoints of their edges
#[test]
fn test_linear_grid_centers() -> Result<()> {
    let grid = Grid::build(2.0, 12.0, 5, GridType::Linear)?;

    for i in 0..5 {
        let mid = 0.5 * (grid.y()[i] + grid.y()[i + 1]);
        assert!((grid.x()[i] - mid).abs() < 1e-14);
    }

    Ok(())
}

/// Bad bounds and empty grids are rejected, not clamped
#[test]
fn test_invalid_grid_configuration() {
    for (y_min, y_max, n) in [(1e-7, 1e-24, 16), (0.0, 1e-7, 16), (-1.0, 1.0, 4), (1e-24, 1e-7, 0)]
    {
        let result = Grid::build(y_min, y_max, n, GridType::Logarithmic);
        assert!(
            matches!(result, Err(Error::InvalidConfiguration(_))),
            "expected InvalidConfiguration for ({}, {}, {})",
            y_min,
            y_max,
            n
        );
    }
}

/// Mass-space grids convert to diameters via the spherical-particle relation
#[test]
fn test_grid_diameter_conversion() -> Result<()> {
    let rho_l = 1000.0;
    let grid = Grid::build(1e-24, 1e-7, 16, GridType::Logarithmic)?;

    let (dx, dy) = grid.to_diameters(rho_l)?;

    assert_eq!(dx.len(), 16);
    assert_eq!(dy.len(), 17);

    for i in 0..16 {
        let expected = (6.0 * grid.x()[i] / (std::f64::consts::PI * rho_l)).powf(1.0 / 3.0);
        assert!((dx[i] - expected).abs() < 1e-12 * expected);
        assert!(dy[i] < dx[i] && dx[i] < dy[i + 1]);
    }

    Ok(())
}
