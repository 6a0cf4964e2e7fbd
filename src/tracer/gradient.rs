// src/tracer/gradient.rs

use nalgebra::Vector3;

use crate::grid::{Grid, InverseLineElements};
use crate::tracer::{ScalarField3, SweepLine};

/// Interface gradients of every tracer species along one grid line.
///
/// Sized once for the longest grid line and reused between sweeps. Entries
/// outside the range of the current sweep hold stale values and must not be read.
#[derive(Debug, Clone)]
pub struct GradientBuffer {
    species: Vec<Vec<Vector3<f64>>>,
}

impl GradientBuffer {
    pub fn new(ntracer: usize, npoints: usize) -> Self {
        GradientBuffer {
            species: vec![vec![Vector3::zeros(); npoints]; ntracer],
        }
    }

    pub fn for_grid(ntracer: usize, grid: &Grid) -> Self {
        Self::new(ntracer, grid.nmax_point())
    }

    pub fn ntracer(&self) -> usize {
        self.species.len()
    }

    pub fn npoints(&self) -> usize {
        self.species.first().map_or(0, Vec::len)
    }

    pub fn line(&self, n: usize) -> &[Vector3<f64>] {
        &self.species[n]
    }

    pub fn line_mut(&mut self, n: usize) -> &mut [Vector3<f64>] {
        &mut self.species[n]
    }
}

#[inline]
fn forward(mut cell: [usize; 3], axis: usize) -> [usize; 3] {
    cell[axis] += 1;
    cell
}

#[inline]
fn backward(mut cell: [usize; 3], axis: usize) -> [usize; 3] {
    cell[axis] -= 1;
    cell
}

/// Gradient `(dC/dl1, dC/dl2, dC/dl3)` of a cell-centered scalar at the
/// interfaces `n + 1/2`, `n` in `[beg, end]`, of the given grid line.
///
/// Along the sweep the derivative is the two-point difference across the
/// interface. Transverse components average the central differences of the
/// two cells sharing the interface. Components of switched-off directions
/// are set to zero, so `gradient[beg..=end]` is fully overwritten.
pub fn compute_scalar_gradient(
    field: &ScalarField3,
    gradient: &mut [Vector3<f64>],
    beg: usize,
    end: usize,
    grid: &Grid,
    line: SweepLine,
    inverse_line_elements: InverseLineElements,
) {
    let dir = line.direction;
    let d = dir.index();
    let dims = grid.dimensions();
    debug_assert!(d < dims, "sweep along a switched-off direction {:?}", dir);
    debug_assert!(beg <= end, "empty sweep range [{}, {}]", beg, end);
    debug_assert!(end + 1 < grid.axis(dir).len(), "interface {} + 1/2 outside the grid", end);
    debug_assert!(end < gradient.len());

    for n in beg..=end {
        let cell = line.at(n);
        let next = forward(cell, d);
        let inv_dl = inverse_line_elements(grid, dir, cell);
        let grad = &mut gradient[n];

        for a in 0..3 {
            grad[a] = if a == d {
                (field[next] - field[cell]) * inv_dl[a]
            } else if a < dims {
                0.25 * (field[forward(cell, a)] + field[forward(next, a)]
                    - field[backward(cell, a)]
                    - field[backward(next, a)])
                    * inv_dl[a]
            } else {
                0.0
            };
        }
    }
}
