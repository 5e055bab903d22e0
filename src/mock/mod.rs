mod bus;
mod script;
mod terminal;

pub use bus::{BusError, RecordingBus, TerminalBus, Transaction};
pub use script::{Command, ParseError};
pub use terminal::{TerminalError, run_interactive_terminal};
