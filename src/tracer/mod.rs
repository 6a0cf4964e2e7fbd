// src/tracer/mod.rs

pub mod field;
pub mod flux;
pub mod gradient;
pub mod sweep;

pub use field::{ScalarField3, TracerField};
pub use flux::{TracerFlux, TracerFluxKernel};
pub use gradient::{compute_scalar_gradient, GradientBuffer};
pub use sweep::{FlowState, Primitive, SweepLine, SweepState};
