// src/input/mod.rs

pub mod error;
pub mod input_deck;
pub mod parser;

pub use error::ConfigError;
pub use input_deck::{
    AxisSettings, GridSettings, InputDeck, ParameterIndex, Physics, PhysicsSwitches,
    ProblemParameters,
};
pub use parser::{parse_input_deck, parse_input_deck_str};
