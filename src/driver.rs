// src/driver.rs

use log::{debug, info};

use crate::grid::{Direction, Grid};
use crate::input::{ConfigError, InputDeck};
use crate::problem::KelvinHelmholtz;
use crate::tracer::{SweepLine, TracerFluxKernel};

/// Outcome of sweeping every interior line along one direction.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepSummary {
    pub direction: Direction,
    pub lines: usize,
    pub max_abs_flux: f64,
}

/// Builds the grid and the initial state described by `deck`, then evaluates
/// the tracer flux through every interior interface along each enabled direction.
pub fn run_flux_sweeps(deck: &InputDeck) -> Result<Vec<SweepSummary>, ConfigError> {
    let switches = &deck.switches;
    let grid = Grid::uniform(&deck.grid, switches.geometry, switches.dimensions)?;
    let state = KelvinHelmholtz::new(deck.parameters.clone()).initialize(&grid, switches.ntracer);
    let mut kernel = TracerFluxKernel::new(deck, &grid)?;
    let mut flux = kernel.new_flux(&grid);

    let mut summaries = Vec::new();
    for &dir in Direction::enabled(grid.dimensions()) {
        let axis = grid.axis(dir);
        // interfaces from the left boundary of the first interior cell onward
        let (beg, end) = (axis.beg() - 1, axis.end());
        let mut summary = SweepSummary {
            direction: dir,
            lines: 0,
            max_abs_flux: 0.0,
        };

        for line in interior_lines(&grid, dir) {
            let sweep = state.flow.sweep(line);
            kernel.compute_tracer_flux(&state.tracers, &sweep, beg, end, &grid, &mut flux);
            let line_max = flux
                .rows(beg, end - beg + 1)
                .iter()
                .fold(0.0_f64, |acc, f| acc.max(f.abs()));
            summary.max_abs_flux = summary.max_abs_flux.max(line_max);
            summary.lines += 1;
        }
        debug!("{:?} sweeps done over {} lines", dir, summary.lines);
        info!(
            "{:?}: {} lines, max |tracer flux| = {:e}",
            dir, summary.lines, summary.max_abs_flux
        );
        summaries.push(summary);
    }
    Ok(summaries)
}

/// Every line along `dir` whose transverse indices are interior cells.
fn interior_lines(grid: &Grid, dir: Direction) -> Vec<SweepLine> {
    let others: Vec<Direction> = Direction::ALL.into_iter().filter(|&o| o != dir).collect();
    let (a, b) = (grid.axis(others[0]), grid.axis(others[1]));

    let mut lines = Vec::with_capacity((a.end() - a.beg() + 1) * (b.end() - b.beg() + 1));
    for m in a.beg()..=a.end() {
        for n in b.beg()..=b.end() {
            let mut cell = [0; 3];
            cell[others[0].index()] = m;
            cell[others[1].index()] = n;
            lines.push(SweepLine { direction: dir, cell });
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::parse_input_deck_str;

    const DECK: &str = r#"
parameters:
  DEL_RHO_BY_RHO0: 0.0
  REYNOLDS: 1.0e5
  AMP: 0.01
  Y1: 0.5
  Y2: 1.5
  SIGMA: 0.2
  TANH_A: 0.05
  U_FLOW: 1.0
  RHO0: 1.0
  PRS0: 10.0
  LENGTH: 1.0
grid:
  x1: { n_cells: 16, lower: 0.0, upper: 1.0 }
  x2: { n_cells: 32, lower: 0.0, upper: 2.0 }
"#;

    #[test]
    fn test_interior_lines() {
        let deck = parse_input_deck_str(DECK).unwrap();
        let grid = Grid::uniform(&deck.grid, deck.switches.geometry, 2).unwrap();
        let lines = interior_lines(&grid, Direction::I);
        assert_eq!(lines.len(), 32);
        assert_eq!(lines[0].cell, [0, 2, 0]);
        let lines = interior_lines(&grid, Direction::J);
        assert_eq!(lines.len(), 16);
        assert_eq!(lines[15].cell, [17, 0, 0]);
    }

    #[test]
    fn test_run_flux_sweeps() {
        let deck = parse_input_deck_str(DECK).unwrap();
        let summaries = run_flux_sweeps(&deck).unwrap();
        assert_eq!(summaries.len(), 2);

        // dye only varies with y
        assert_eq!(summaries[0].direction, Direction::I);
        assert_eq!(summaries[0].lines, 32);
        assert_eq!(summaries[0].max_abs_flux, 0.0);

        assert_eq!(summaries[1].direction, Direction::J);
        assert_eq!(summaries[1].lines, 16);
        assert!(summaries[1].max_abs_flux > 0.0);
        // |grad C| is bounded by 1/TANH_A across a layer
        let nu = deck.parameters.diffusivity();
        assert!(summaries[1].max_abs_flux <= nu / 0.05);
    }
}
