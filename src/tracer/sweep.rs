// src/tracer/sweep.rs

use nalgebra::Vector3;

use crate::grid::Direction;
use crate::tracer::ScalarField3;
use crate::utils::interface_average;

/// Primitive hydrodynamic variables of one cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Primitive {
    pub rho: f64,
    pub velocity: Vector3<f64>,
    pub prs: f64,
}

impl Primitive {
    pub fn new(rho: f64, velocity: Vector3<f64>, prs: f64) -> Self {
        Primitive { rho, velocity, prs }
    }

    /// Fluid at rest with the given density and pressure.
    pub fn at_rest(rho: f64, prs: f64) -> Self {
        Primitive::new(rho, Vector3::zeros(), prs)
    }

    /// Interface state between `self` (left) and `right`, weighting each
    /// variable by the widths of the two cells.
    pub fn interface(&self, right: &Primitive, dx_left: f64, dx_right: f64) -> Primitive {
        let avg = |l: f64, r: f64| interface_average(l, r, dx_left, dx_right);
        Primitive {
            rho: avg(self.rho, right.rho),
            velocity: self.velocity.zip_map(&right.velocity, |l, r| avg(l, r)),
            prs: avg(self.prs, right.prs),
        }
    }
}

/// A grid line: the sweep direction and the fixed indices of the two
/// transverse directions. The entry along `direction` is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepLine {
    pub direction: Direction,
    pub cell: [usize; 3],
}

impl SweepLine {
    pub fn new(direction: Direction, i: usize, j: usize, k: usize) -> Self {
        SweepLine {
            direction,
            cell: [i, j, k],
        }
    }

    /// Cell at position `n` along the line.
    #[inline]
    pub fn at(&self, n: usize) -> [usize; 3] {
        let mut cell = self.cell;
        cell[self.direction.index()] = n;
        cell
    }
}

/// Primitive variables along the line being swept.
#[derive(Debug, Clone)]
pub struct SweepState {
    pub line: SweepLine,
    pub primitives: Vec<Primitive>,
}

impl SweepState {
    pub fn new(line: SweepLine, primitives: Vec<Primitive>) -> Self {
        SweepState { line, primitives }
    }

    pub fn direction(&self) -> Direction {
        self.line.direction
    }
}

/// Primitive variables over the whole grid.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowState {
    pub rho: ScalarField3,
    pub velocity: [ScalarField3; 3],
    pub prs: ScalarField3,
}

impl FlowState {
    pub fn from_fn<F: FnMut(usize, usize, usize) -> Primitive>(shape: [usize; 3], mut f: F) -> Self {
        let mut state = FlowState {
            rho: ScalarField3::new(shape, 0.0),
            velocity: [
                ScalarField3::new(shape, 0.0),
                ScalarField3::new(shape, 0.0),
                ScalarField3::new(shape, 0.0),
            ],
            prs: ScalarField3::new(shape, 0.0),
        };
        for k in 0..shape[2] {
            for j in 0..shape[1] {
                for i in 0..shape[0] {
                    let cell = [i, j, k];
                    let v = f(i, j, k);
                    state.rho[cell] = v.rho;
                    for (component, value) in state.velocity.iter_mut().zip(v.velocity.iter()) {
                        component[cell] = *value;
                    }
                    state.prs[cell] = v.prs;
                }
            }
        }
        state
    }

    pub fn shape(&self) -> [usize; 3] {
        self.rho.shape()
    }

    pub fn at(&self, cell: [usize; 3]) -> Primitive {
        Primitive {
            rho: self.rho[cell],
            velocity: Vector3::new(
                self.velocity[0][cell],
                self.velocity[1][cell],
                self.velocity[2][cell],
            ),
            prs: self.prs[cell],
        }
    }

    /// Gathers the primitives along a grid line into a sweep state.
    pub fn sweep(&self, line: SweepLine) -> SweepState {
        let n = self.shape()[line.direction.index()];
        let primitives = (0..n).map(|m| self.at(line.at(m))).collect();
        SweepState::new(line, primitives)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flow_state_sweep_gathers_line() {
        let state = FlowState::from_fn([4, 3, 1], |i, j, _| {
            Primitive::new(1.0 + i as f64, Vector3::new(j as f64, 0.0, 0.0), 5.0)
        });
        let sweep = state.sweep(SweepLine::new(Direction::J, 2, 0, 0));
        assert_eq!(sweep.primitives.len(), 3);
        assert_eq!(sweep.direction(), Direction::J);
        for (j, p) in sweep.primitives.iter().enumerate() {
            assert_eq!(p.rho, 3.0);
            assert_eq!(p.velocity[0], j as f64);
            assert_eq!(p.prs, 5.0);
        }
    }

    #[test]
    fn test_line_positions() {
        let line = SweepLine::new(Direction::J, 3, 99, 1);
        assert_eq!(line.at(5), [3, 5, 1]);
        let line = SweepLine::new(Direction::K, 3, 4, 99);
        assert_eq!(line.at(0), [3, 4, 0]);
    }

    #[test]
    fn test_interface_state() {
        let left = Primitive::new(1.0, Vector3::new(1.0, 0.0, -2.0), 10.0);
        let right = Primitive::new(3.0, Vector3::new(3.0, 2.0, 2.0), 20.0);
        let face = left.interface(&right, 1.0, 1.0);
        assert_eq!(face.rho, 2.0);
        assert_eq!(face.velocity, Vector3::new(2.0, 1.0, 0.0));
        assert_eq!(face.prs, 15.0);

        let face = left.interface(&right, 1.0, 3.0);
        assert_eq!(face.rho, 2.5);
    }
}
