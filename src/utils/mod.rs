// src/utils/mod.rs

pub mod interpolation;

pub use interpolation::interface_average;
