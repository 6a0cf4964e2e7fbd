// src/problem/kelvin_helmholtz.rs

use std::f64::consts::PI;

use log::info;
use nalgebra::Vector3;

use crate::grid::{Direction, Grid};
use crate::input::ProblemParameters;
use crate::tracer::{FlowState, Primitive, ScalarField3, TracerField};

/// Nonlinear Kelvin-Helmholtz setup of Lecoanet et al. (2016): two opposite
/// shear layers at `Y1` and `Y2`, a localized transverse velocity kick and a
/// dye marking the fluid outside them.
#[derive(Debug, Clone)]
pub struct KelvinHelmholtz {
    params: ProblemParameters,
}

/// Initial primitives and tracer concentrations over the whole grid.
#[derive(Debug, Clone)]
pub struct InitialState {
    pub flow: FlowState,
    pub tracers: TracerField,
}

impl KelvinHelmholtz {
    pub fn new(params: ProblemParameters) -> Self {
        KelvinHelmholtz { params }
    }

    pub fn parameters(&self) -> &ProblemParameters {
        &self.params
    }

    /// `tanh((y - Y1)/a) - tanh((y - Y2)/a)`: 2 between the layers, 0 outside.
    fn shear_profile(&self, y: f64) -> f64 {
        let p = &self.params;
        ((y - p.y1) / p.tanh_a).tanh() - ((y - p.y2) / p.tanh_a).tanh()
    }

    /// Dimensionless primitive state at `(x, y)`.
    pub fn primitive_at(&self, x: f64, y: f64) -> Primitive {
        let p = &self.params;
        let profile = self.shear_profile(y);
        let bump = |y0: f64| (-(y - y0).powi(2) / (p.sigma * p.sigma)).exp();

        let vx1 = p.u_flow * (profile - 1.0);
        let vx2 = p.amp * (2.0 * PI * x).sin() * (bump(p.y1) + bump(p.y2));
        let rho = p.rho0 * (1.0 + p.del_rho_by_rho0 * 0.5 * profile);

        let v_unit = p.unit_velocity();
        Primitive {
            rho: rho / p.unit_density(),
            velocity: Vector3::new(vx1 / v_unit, vx2 / v_unit, 0.0),
            prs: p.prs0 / (p.unit_density() * v_unit * v_unit),
        }
    }

    /// Dye concentration: 1 outside the layers, 0 between them.
    pub fn tracer_at(&self, y: f64) -> f64 {
        0.5 * (2.0 - self.shear_profile(y))
    }

    /// Fills every cell of `grid`, ghosts included, from the cell centers.
    pub fn initialize(&self, grid: &Grid, ntracer: usize) -> InitialState {
        let x = &grid.axis(Direction::I).x;
        let y = &grid.axis(Direction::J).x;
        let shape = grid.shape();

        let flow = FlowState::from_fn(shape, |i, j, _| self.primitive_at(x[i], y[j]));
        let dye = ScalarField3::from_fn(shape, |_, j, _| self.tracer_at(y[j]));
        let tracers = TracerField::new(vec![dye; ntracer]);

        info!(
            "Kelvin-Helmholtz initial state on {:?} cells, {} tracer(s)",
            shape, ntracer
        );
        InitialState { flow, tracers }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Geometry;
    use crate::input::{AxisSettings, GridSettings};
    use approx::assert_relative_eq;

    fn setup() -> KelvinHelmholtz {
        KelvinHelmholtz::new(ProblemParameters {
            del_rho_by_rho0: 1.0,
            ..ProblemParameters::default()
        })
    }

    #[test]
    fn test_shear_layers() {
        let kh = setup();
        // between the layers the flow runs along +x, outside along -x
        assert_relative_eq!(kh.primitive_at(0.0, 1.0).velocity[0], 1.0, epsilon = 1e-6);
        assert_relative_eq!(kh.primitive_at(0.0, 0.0).velocity[0], -1.0, epsilon = 1e-6);
        assert_relative_eq!(kh.primitive_at(0.0, 2.0).velocity[0], -1.0, epsilon = 1e-6);
        assert_relative_eq!(kh.primitive_at(0.3, 0.5).velocity[0], 0.0, epsilon = 1e-3);
    }

    #[test]
    fn test_density_and_pressure() {
        let kh = setup();
        assert_relative_eq!(kh.primitive_at(0.0, 1.0).rho, 2.0, epsilon = 1e-6);
        assert_relative_eq!(kh.primitive_at(0.0, 0.0).rho, 1.0, epsilon = 1e-6);
        assert_eq!(kh.primitive_at(0.7, 1.3).prs, 10.0);
    }

    #[test]
    fn test_perturbation_peaks_on_the_layers() {
        let kh = setup();
        let on_layer = kh.primitive_at(0.25, 0.5).velocity[1];
        assert_relative_eq!(on_layer, 0.01 * (1.0 + (-25.0f64).exp()), epsilon = 1e-12);
        assert_eq!(kh.primitive_at(0.25, 1.0).velocity[2], 0.0);
        assert!(kh.primitive_at(0.25, 1.0).velocity[1].abs() < on_layer);
        assert_relative_eq!(kh.primitive_at(0.5, 0.5).velocity[1], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_dye_marks_outer_fluid() {
        let kh = setup();
        assert_relative_eq!(kh.tracer_at(1.0), 0.0, epsilon = 1e-6);
        assert_relative_eq!(kh.tracer_at(-0.5), 1.0, epsilon = 1e-6);
        assert_relative_eq!(kh.tracer_at(0.5), 0.5, epsilon = 1e-6);
    }

    #[test]
    fn test_initialize_fills_grid() {
        let settings = GridSettings {
            x1: AxisSettings::new(8, 0.0, 1.0),
            x2: Some(AxisSettings::new(16, 0.0, 2.0)),
            x3: None,
        };
        let grid = Grid::uniform(&settings, Geometry::Cartesian, 2).unwrap();
        let state = setup().initialize(&grid, 2);
        assert_eq!(state.flow.shape(), grid.shape());
        assert_eq!(state.tracers.ntracer(), 2);
        let y = &grid.axis(Direction::J).x;
        assert_eq!(state.tracers.species(1)[[3, 5, 0]], setup().tracer_at(y[5]));
    }
}
