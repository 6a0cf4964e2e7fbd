// src/tracer/flux.rs

use log::{debug, info};
use nalgebra::DMatrix;

use crate::grid::{Grid, InverseLineElements};
use crate::input::{ConfigError, InputDeck};
use crate::tracer::{compute_scalar_gradient, GradientBuffer, SweepState, TracerField};

/// Diffusive tracer flux, one row per cell along the sweep, one column per species.
pub type TracerFlux = DMatrix<f64>;

/// Diffusive flux `F = rho nu grad(C)` of the passive tracers along one sweep.
///
/// The kernel owns its gradient buffer, so each thread driving sweeps needs
/// its own kernel.
#[derive(Debug, Clone)]
pub struct TracerFluxKernel {
    diffusivity: f64,
    inverse_line_elements: InverseLineElements,
    gradient: GradientBuffer,
}

impl TracerFluxKernel {
    /// Builds a kernel for the deck's parameters, checking that `grid` matches
    /// the configured dimensionality and geometry.
    pub fn new(deck: &InputDeck, grid: &Grid) -> Result<Self, ConfigError> {
        let switches = &deck.switches;
        if grid.dimensions() != switches.dimensions {
            return Err(ConfigError::GridMismatch(format!(
                "grid is {}D, configuration is {}D",
                grid.dimensions(),
                switches.dimensions
            )));
        }
        if grid.geometry() != switches.geometry {
            return Err(ConfigError::GridMismatch(format!(
                "grid geometry {:?}, configured {:?}",
                grid.geometry(),
                switches.geometry
            )));
        }
        let kernel = Self::with_diffusivity(deck.parameters.diffusivity(), switches.ntracer, grid);
        info!(
            "tracer flux kernel: nu_dye = {:e}, {} species, buffer of {} points",
            kernel.diffusivity,
            switches.ntracer,
            kernel.gradient.npoints()
        );
        Ok(kernel)
    }

    pub fn with_diffusivity(diffusivity: f64, ntracer: usize, grid: &Grid) -> Self {
        TracerFluxKernel {
            diffusivity,
            inverse_line_elements: grid.geometry().inverse_line_elements(),
            gradient: GradientBuffer::for_grid(ntracer, grid),
        }
    }

    pub fn diffusivity(&self) -> f64 {
        self.diffusivity
    }

    pub fn ntracer(&self) -> usize {
        self.gradient.ntracer()
    }

    /// Interface gradients left by the last sweep.
    pub fn gradient(&self) -> &GradientBuffer {
        &self.gradient
    }

    /// Zeroed flux array large enough for any line of `grid`.
    pub fn new_flux(&self, grid: &Grid) -> TracerFlux {
        DMatrix::zeros(grid.nmax_point(), self.ntracer())
    }

    /// Fills `flux[(n, trc)]` for `n` in `[beg, end]` with the diffusive flux
    /// through interface `n + 1/2` of the swept line. Rows outside the range
    /// are left untouched.
    pub fn compute_tracer_flux(
        &mut self,
        tracers: &TracerField,
        sweep: &SweepState,
        beg: usize,
        end: usize,
        grid: &Grid,
        flux: &mut TracerFlux,
    ) {
        let dir = sweep.direction();
        let d = dir.index();
        let dx = &grid.axis(dir).dx;
        let vc = &sweep.primitives;
        debug_assert_eq!(tracers.ntracer(), self.ntracer());
        debug_assert!(flux.nrows() > end && flux.ncols() >= self.ntracer());
        debug_assert!(vc.len() > end + 1, "sweep state ends before interface {} + 1/2", end);
        debug!("tracer flux along {:?} at {:?}, [{}, {}]", dir, sweep.line.cell, beg, end);

        for (trc, field) in tracers.iter().enumerate() {
            let gradient = self.gradient.line_mut(trc);
            compute_scalar_gradient(
                field,
                gradient,
                beg,
                end,
                grid,
                sweep.line,
                self.inverse_line_elements,
            );
            for i in beg..=end {
                let vi = vc[i].interface(&vc[i + 1], dx[i], dx[i + 1]);
                flux[(i, trc)] = vi.rho * self.diffusivity * gradient[i][d];
            }
        }
    }
}
