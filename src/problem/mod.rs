// src/problem/mod.rs

pub mod kelvin_helmholtz;

pub use kelvin_helmholtz::{InitialState, KelvinHelmholtz};
