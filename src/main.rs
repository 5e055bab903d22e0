use std::process::ExitCode;

use tm_boards::BoardConfig;
use tm_boards::config::DEFAULT_BRIGHTNESS;
use tm_boards::mock::run_interactive_terminal;

/// Simulated wiring: data and clock lines, then one strobe line per board.
const DIO: u8 = 2;
const CLK: u8 = 3;
const FIRST_STB: u8 = 4;

fn main() -> ExitCode {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let nb_boards = match args.next().map(|arg| arg.parse::<u8>()) {
        None => 1,
        Some(Ok(n)) => n,
        Some(Err(e)) => {
            eprintln!("Invalid board count: {e}");
            return ExitCode::from(2);
        }
    };
    let brightness = match args.next().map(|arg| arg.parse::<u8>()) {
        None => DEFAULT_BRIGHTNESS,
        Some(Ok(b)) => b,
        Some(Err(e)) => {
            eprintln!("Invalid brightness: {e}");
            return ExitCode::from(2);
        }
    };

    let stb: Vec<u8> = (0..nb_boards)
        .map(|i| FIRST_STB.saturating_add(i))
        .collect();
    let config = match BoardConfig::new(DIO, CLK, stb)
        .and_then(|config| config.with_brightness(brightness))
    {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {e}");
            return ExitCode::from(2);
        }
    };

    log::info!("Simulating {} TM1638 board(s)", config.nb_boards());
    match run_interactive_terminal(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
