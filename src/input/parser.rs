// src/input/parser.rs

use log::info;
use serde_yaml;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use crate::input::{ConfigError, InputDeck};

/// Parses the input deck from a YAML file.
///
/// # Arguments
///
/// * `file_path` - Path to the YAML input file.
///
/// # Returns
///
/// * `Ok(InputDeck)` if reading, parsing and validation succeed.
/// * `Err(ConfigError)` otherwise.
pub fn parse_input_deck<P: AsRef<Path>>(file_path: P) -> Result<InputDeck, ConfigError> {
    let mut file = File::open(file_path.as_ref())?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;
    let input_deck = parse_input_deck_str(&contents)?;
    info!("loaded input deck from {}", file_path.as_ref().display());
    Ok(input_deck)
}

/// Parses and validates an input deck held in memory.
pub fn parse_input_deck_str(contents: &str) -> Result<InputDeck, ConfigError> {
    let input_deck: InputDeck = serde_yaml::from_str(contents)?;
    input_deck.validate()?;
    info!(
        "{}D {:?} run, {} tracer(s), Re = {}, nu_dye = {:e}",
        input_deck.switches.dimensions,
        input_deck.switches.geometry,
        input_deck.switches.ntracer,
        input_deck.parameters.reynolds,
        input_deck.parameters.diffusivity()
    );
    Ok(input_deck)
}
