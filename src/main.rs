// src/main.rs

use std::process::ExitCode;

use kh_tracer::driver::run_flux_sweeps;
use kh_tracer::input::parse_input_deck;
use log::{error, info, LevelFilter};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

fn main() -> ExitCode {
    if let Err(e) = TermLogger::init(
        LevelFilter::Info,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    ) {
        eprintln!("failed to initialise logging: {}", e);
    }

    let Some(path) = std::env::args().nth(1) else {
        eprintln!("usage: kh_tracer <deck.yaml>");
        return ExitCode::FAILURE;
    };

    match parse_input_deck(&path).and_then(|deck| run_flux_sweeps(&deck)) {
        Ok(summaries) => {
            for s in &summaries {
                info!("{:?}: {:e} over {} lines", s.direction, s.max_abs_flux, s.lines);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
