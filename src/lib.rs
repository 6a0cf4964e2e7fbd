// src/lib.rs

pub mod driver;
pub mod grid;
pub mod input;
pub mod problem;
pub mod tracer;
pub mod utils;
