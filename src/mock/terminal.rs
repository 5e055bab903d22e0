use std::io::{self, BufRead, Write};

use super::{Command, ParseError, TerminalBus};
use crate::{BoardConfig, TmBoards};

/// Error type for the interactive simulator.
#[derive(Debug, thiserror::Error)]
pub enum TerminalError {
    #[error("failed to access terminal: {0}")]
    Io(#[from] io::Error),
}

/// Clears the screen and moves cursor to top-left.
#[inline]
fn clear_screen(w: &mut impl Write) -> io::Result<()> {
    write!(w, "\x1B[2J\x1B[H")
}

/// Runs an interactive terminal simulating a chain of TM1638 boards.
///
/// Commands are read line by line from stdin until `q` or end of input.
pub fn run_interactive_terminal(config: &BoardConfig) -> Result<(), TerminalError> {
    let mut boards = TmBoards::new(TerminalBus::new(config), config);
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    clear_screen(&mut stdout)?;
    draw_interface(&mut stdout, &boards)?;

    let mut input = String::new();
    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;

        input.clear();
        if stdin.lock().read_line(&mut input)? == 0 {
            break;
        }

        let command = match input.parse::<Command>() {
            Ok(Command::Quit) => break,
            Ok(command) => command,
            Err(ParseError::Empty) => continue,
            Err(e) => {
                writeln!(stdout, "{e}")?;
                continue;
            }
        };

        let outcome = command.apply(&mut boards);
        clear_screen(&mut stdout)?;
        draw_interface(&mut stdout, &boards)?;
        if let Err(e) = outcome {
            log::warn!("command {command:?} failed: {e}");
            writeln!(stdout, "\n❌ {e}")?;
        }
    }

    Ok(())
}

/// Draws the help text and every board.
fn draw_interface(w: &mut impl Write, boards: &TmBoards<TerminalBus>) -> io::Result<()> {
    writeln!(w, "TM1638 Board Simulator ({} board(s))", boards.nb_boards())?;
    writeln!(w)?;
    writeln!(
        w,
        "Commands: led <i> on|off | leds <bits> | seg <i> <text> | segs <text>... | bit <i> <j> on|off | p | q"
    )?;
    writeln!(w)?;
    boards.bus().render(w)
}
