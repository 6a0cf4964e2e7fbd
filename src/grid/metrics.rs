// src/grid/metrics.rs

use log::debug;
use nalgebra::DVector;

use crate::grid::{Direction, Geometry};
use crate::input::{AxisSettings, ConfigError, GridSettings};

/// Cell geometry along one coordinate direction, ghost cells included.
#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    pub x: DVector<f64>,       // cell centers
    pub xr: DVector<f64>,      // right interfaces
    pub dx: DVector<f64>,      // cell widths
    pub inv_dx: DVector<f64>,  // 1 / dx
    pub inv_dxi: DVector<f64>, // 1 / (x[i+1] - x[i])
    pub ghosts: usize,
}

impl Axis {
    /// Builds an axis from its interface positions (`n + 1` values for `n` cells,
    /// ghosts included).
    pub fn from_interfaces(interfaces: &[f64], ghosts: usize) -> Result<Self, ConfigError> {
        if interfaces.len() < 2 {
            return Err(ConfigError::InvalidGrid("an axis needs at least one cell".into()));
        }
        if interfaces.windows(2).any(|w| !(w[1] > w[0])) {
            return Err(ConfigError::InvalidGrid(
                "interface positions must be strictly increasing".into(),
            ));
        }
        let n = interfaces.len() - 1;
        if n <= 2 * ghosts {
            return Err(ConfigError::InvalidGrid(format!(
                "{} cells leave no interior with {} ghost cells per side",
                n, ghosts
            )));
        }

        let x = DVector::from_fn(n, |i, _| 0.5 * (interfaces[i] + interfaces[i + 1]));
        let xr = DVector::from_fn(n, |i, _| interfaces[i + 1]);
        let dx = DVector::from_fn(n, |i, _| interfaces[i + 1] - interfaces[i]);
        let inv_dx = dx.map(|d| 1.0 / d);
        let inv_dxi = if n == 1 {
            inv_dx.clone()
        } else {
            DVector::from_fn(n, |i, _| {
                let i = i.min(n - 2);
                1.0 / (x[i + 1] - x[i])
            })
        };

        Ok(Axis {
            x,
            xr,
            dx,
            inv_dx,
            inv_dxi,
            ghosts,
        })
    }

    /// Uniform axis of `n_cells` active cells on `[lower, upper]`, padded with ghosts.
    pub fn uniform(n_cells: usize, lower: f64, upper: f64, ghosts: usize) -> Result<Self, ConfigError> {
        if n_cells == 0 {
            return Err(ConfigError::InvalidGrid("an axis needs at least one cell".into()));
        }
        let dx = (upper - lower) / n_cells as f64;
        let total = n_cells + 2 * ghosts;
        let interfaces: Vec<f64> = (0..=total)
            .map(|m| lower + (m as f64 - ghosts as f64) * dx)
            .collect();
        Self::from_interfaces(&interfaces, ghosts)
    }

    pub fn from_settings(settings: &AxisSettings) -> Result<Self, ConfigError> {
        Self::uniform(settings.n_cells, settings.lower, settings.upper, settings.ghosts)
    }

    /// Number of cells, ghosts included.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// First interior cell.
    pub fn beg(&self) -> usize {
        self.ghosts
    }

    /// Last interior cell.
    pub fn end(&self) -> usize {
        self.len() - self.ghosts - 1
    }
}

/// Structured grid: one axis per direction plus the active geometry.
#[derive(Debug, Clone)]
pub struct Grid {
    axes: [Axis; 3],
    geometry: Geometry,
    dimensions: usize,
}

impl Grid {
    pub fn from_axes(axes: [Axis; 3], geometry: Geometry, dimensions: usize) -> Result<Self, ConfigError> {
        if !(1..=3).contains(&dimensions) {
            return Err(ConfigError::UnsupportedDimensions(dimensions));
        }
        if axes[dimensions..].iter().any(|a| a.len() != 1) {
            return Err(ConfigError::InvalidGrid(
                "switched-off directions must hold exactly one cell".into(),
            ));
        }
        if axes[..dimensions].iter().any(|a| a.ghosts == 0) {
            return Err(ConfigError::InvalidGrid(
                "enabled directions need at least one ghost cell".into(),
            ));
        }
        let grid = Grid {
            axes,
            geometry,
            dimensions,
        };
        debug!(
            "grid {:?} with {} x {} x {} cells",
            geometry,
            grid.axes[0].len(),
            grid.axes[1].len(),
            grid.axes[2].len()
        );
        Ok(grid)
    }

    /// Uniform grid from the deck's grid section.
    pub fn uniform(settings: &GridSettings, geometry: Geometry, dimensions: usize) -> Result<Self, ConfigError> {
        let [a1, a2, a3] = settings.axes(dimensions);
        let axes = [
            Axis::from_settings(&a1)?,
            collapsed_or(&a2, 2 <= dimensions)?,
            collapsed_or(&a3, 3 <= dimensions)?,
        ];
        Self::from_axes(axes, geometry, dimensions)
    }

    pub fn axis(&self, dir: Direction) -> &Axis {
        &self.axes[dir.index()]
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Cells per direction, ghosts included, as `[n1, n2, n3]`.
    pub fn shape(&self) -> [usize; 3] {
        [self.axes[0].len(), self.axes[1].len(), self.axes[2].len()]
    }

    /// Longest grid line over all directions.
    pub fn nmax_point(&self) -> usize {
        self.shape().into_iter().max().unwrap_or(0)
    }
}

fn collapsed_or(settings: &AxisSettings, enabled: bool) -> Result<Axis, ConfigError> {
    if enabled {
        Axis::from_settings(settings)
    } else {
        Axis::from_interfaces(&[0.0, 1.0], 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_uniform_axis() {
        let axis = Axis::uniform(4, 0.0, 1.0, 2).unwrap();
        assert_eq!(axis.len(), 8);
        assert_eq!(axis.beg(), 2);
        assert_eq!(axis.end(), 5);
        assert_relative_eq!(axis.x[2], 0.125, epsilon = 1e-12);
        assert_relative_eq!(axis.xr[5], 1.0, epsilon = 1e-12);
        for i in 0..axis.len() {
            assert_relative_eq!(axis.dx[i], 0.25, epsilon = 1e-12);
            assert_relative_eq!(axis.inv_dx[i], 4.0, epsilon = 1e-9);
            assert_relative_eq!(axis.inv_dxi[i], 4.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_non_uniform_interface_spacing() {
        let axis = Axis::from_interfaces(&[0.0, 1.0, 3.0, 4.0], 1).unwrap();
        assert_eq!(axis.x.as_slice(), &[0.5, 2.0, 3.5]);
        assert_relative_eq!(axis.inv_dxi[0], 1.0 / 1.5, epsilon = 1e-12);
        assert_relative_eq!(axis.inv_dxi[1], 1.0 / 1.5, epsilon = 1e-12);
        // last interface spacing repeats the previous one
        assert_eq!(axis.inv_dxi[2], axis.inv_dxi[1]);
    }

    #[test]
    fn test_rejects_decreasing_interfaces() {
        assert!(Axis::from_interfaces(&[0.0, 1.0, 0.5, 2.0], 1).is_err());
        assert!(Axis::from_interfaces(&[0.0, 1.0], 1).is_err());
    }

    #[test]
    fn test_grid_from_settings_collapses_unused_directions() {
        let settings = GridSettings {
            x1: AxisSettings::new(16, 0.0, 1.0),
            x2: Some(AxisSettings::new(32, 0.0, 2.0)),
            x3: Some(AxisSettings::new(8, 0.0, 1.0)),
        };
        let grid = Grid::uniform(&settings, Geometry::Cartesian, 2).unwrap();
        assert_eq!(grid.shape(), [20, 36, 1]);
        assert_eq!(grid.nmax_point(), 36);
        assert_eq!(grid.axis(Direction::K).inv_dx[0], 1.0);
    }

    #[test]
    fn test_grid_rejects_inconsistent_axes() {
        let x1 = Axis::uniform(4, 0.0, 1.0, 1).unwrap();
        let x2 = Axis::uniform(4, 0.0, 1.0, 1).unwrap();
        let flat = Axis::from_interfaces(&[0.0, 1.0], 0).unwrap();
        assert!(Grid::from_axes([x1.clone(), x2, flat.clone()], Geometry::Cartesian, 1).is_err());
        assert!(Grid::from_axes([x1, flat.clone(), flat], Geometry::Cartesian, 4).is_err());
    }
}
