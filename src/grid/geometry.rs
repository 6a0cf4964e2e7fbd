// src/grid/geometry.rs

use nalgebra::Vector3;
use serde::Deserialize;

use crate::grid::Grid;

/// Coordinate direction of a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    I,
    J,
    K,
}

impl Direction {
    pub const ALL: [Direction; 3] = [Direction::I, Direction::J, Direction::K];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Directions active in a run with the given number of dimensions.
    pub fn enabled(dimensions: usize) -> &'static [Direction] {
        static ALL: [Direction; 3] = Direction::ALL;
        &ALL[..dimensions.min(3)]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Geometry {
    Cartesian,
    Cylindrical,
    Polar,
    Spherical,
}

/// Inverse physical line elements `(1/dl1, 1/dl2, 1/dl3)` at the interface
/// `cell + 1/2` along `dir`. The component along `dir` uses the
/// center-to-center spacing, the transverse ones the cell widths.
pub type InverseLineElements = fn(&Grid, Direction, [usize; 3]) -> Vector3<f64>;

const LINE_ELEMENTS: [InverseLineElements; 4] = [
    coordinate_line_elements, // Cartesian: {dx, dy, dz}
    coordinate_line_elements, // Cylindrical: {dr, dz, -}
    polar_line_elements,      // {dr, r dphi, dz}
    spherical_line_elements,  // {dr, r dtheta, r sin(theta) dphi}
];

impl Geometry {
    /// Metric correction for this geometry, looked up once per kernel.
    pub fn inverse_line_elements(self) -> InverseLineElements {
        LINE_ELEMENTS[self as usize]
    }
}

fn coordinate_line_elements(grid: &Grid, dir: Direction, cell: [usize; 3]) -> Vector3<f64> {
    let [i, j, k] = cell;
    let mut inv = Vector3::new(
        grid.axis(Direction::I).inv_dx[i],
        grid.axis(Direction::J).inv_dx[j],
        grid.axis(Direction::K).inv_dx[k],
    );
    let d = dir.index();
    inv[d] = grid.axis(dir).inv_dxi[cell[d]];
    inv
}

/// Radius at the interface for radial sweeps, at the cell center otherwise.
fn radius(grid: &Grid, dir: Direction, i: usize) -> f64 {
    let r = grid.axis(Direction::I);
    match dir {
        Direction::I => r.xr[i],
        _ => r.x[i],
    }
}

fn polar_line_elements(grid: &Grid, dir: Direction, cell: [usize; 3]) -> Vector3<f64> {
    let mut inv = coordinate_line_elements(grid, dir, cell);
    let r = radius(grid, dir, cell[0]);
    match dir {
        Direction::I => inv[1] /= r,
        _ => inv[1] *= 1.0 / r,
    }
    inv
}

fn spherical_line_elements(grid: &Grid, dir: Direction, cell: [usize; 3]) -> Vector3<f64> {
    let [i, j, _] = cell;
    let mut inv = coordinate_line_elements(grid, dir, cell);
    let theta_axis = grid.axis(Direction::J);
    let r = radius(grid, dir, i);
    match dir {
        Direction::I => {
            let s_1 = 1.0 / theta_axis.x[j].sin();
            inv[1] /= r;
            inv[2] = inv[2] * s_1 / r;
        }
        Direction::J => {
            let r_1 = 1.0 / r;
            inv[1] *= r_1;
            inv[2] = inv[2] * r_1 / theta_axis.xr[j].sin();
        }
        Direction::K => {
            let r_1 = 1.0 / r;
            let s_1 = 1.0 / theta_axis.x[j].sin();
            inv[1] *= r_1;
            inv[2] *= r_1 * s_1;
        }
    }
    inv
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Axis;
    use approx::assert_relative_eq;

    fn grid(geometry: Geometry) -> Grid {
        let x1 = Axis::uniform(4, 1.0, 2.0, 1).unwrap();
        let x2 = Axis::uniform(4, 0.5, 1.5, 1).unwrap();
        let x3 = Axis::uniform(4, 0.0, 1.0, 1).unwrap();
        Grid::from_axes([x1, x2, x3], geometry, 3).unwrap()
    }

    #[test]
    fn test_enabled_directions() {
        assert_eq!(Direction::enabled(1), &[Direction::I]);
        assert_eq!(Direction::enabled(2), &[Direction::I, Direction::J]);
        assert_eq!(Direction::enabled(3).len(), 3);
    }

    #[test]
    fn test_cartesian_uses_interface_spacing_along_sweep() {
        let g = grid(Geometry::Cartesian);
        let f = Geometry::Cartesian.inverse_line_elements();
        let inv = f(&g, Direction::J, [2, 2, 2]);
        assert_relative_eq!(inv[0], 4.0, epsilon = 1e-12);
        assert_relative_eq!(inv[1], 4.0, epsilon = 1e-12);
        assert_relative_eq!(inv[2], 4.0, epsilon = 1e-12);
        assert_eq!(
            Geometry::Cylindrical.inverse_line_elements()(&g, Direction::J, [2, 2, 2]),
            inv
        );
    }

    #[test]
    fn test_polar_scales_azimuthal_spacing_by_radius() {
        let g = grid(Geometry::Polar);
        let f = Geometry::Polar.inverse_line_elements();
        let r_face = g.axis(Direction::I).xr[2];
        let r_center = g.axis(Direction::I).x[2];

        let inv = f(&g, Direction::I, [2, 2, 2]);
        assert_relative_eq!(inv[1], 4.0 / r_face, epsilon = 1e-12);
        assert_relative_eq!(inv[2], 4.0, epsilon = 1e-12);

        let inv = f(&g, Direction::K, [2, 2, 2]);
        assert_relative_eq!(inv[1], 4.0 / r_center, epsilon = 1e-12);
    }

    #[test]
    fn test_spherical_scales_by_radius_and_sine() {
        let g = grid(Geometry::Spherical);
        let f = Geometry::Spherical.inverse_line_elements();
        let r = g.axis(Direction::I).x[2];
        let theta = g.axis(Direction::J).x[2];
        let theta_face = g.axis(Direction::J).xr[2];

        let inv = f(&g, Direction::K, [2, 2, 2]);
        assert_relative_eq!(inv[1], 4.0 / r, epsilon = 1e-12);
        assert_relative_eq!(inv[2], 4.0 / (r * theta.sin()), epsilon = 1e-12);

        let inv = f(&g, Direction::J, [2, 2, 2]);
        assert_relative_eq!(inv[2], 4.0 / (r * theta_face.sin()), epsilon = 1e-12);
    }
}
