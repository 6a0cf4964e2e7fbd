// src/grid/mod.rs

pub mod geometry;
pub mod metrics;

pub use geometry::{Direction, Geometry, InverseLineElements};
pub use metrics::{Axis, Grid};
