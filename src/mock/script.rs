use std::str::FromStr;

use thiserror::Error;

use crate::error::BoardError;
use crate::{ChainedBus, CharacterFont, TmBoards};

/// Error when parsing a simulator command.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty command")]
    Empty,

    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("invalid number '{0}'")]
    InvalidNumber(String),

    #[error("invalid state '{0}', expected on/off or 1/0")]
    InvalidState(String),
}

/// One line typed into the simulator.
///
/// Format:
/// - `led <i> on|off` - switch LED `i`
/// - `leds <bits>` - set LEDs from 0 upwards, e.g. `leds 10110`
/// - `seg <i> <text>` - show `text` from display `i` on (spaces included)
/// - `segs <text>...` - show each word at its own index, from display 0
/// - `bit <i> <j> on|off` - switch segment `j` of display `i`
/// - `p` - redraw, `q` - quit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Led { index: usize, on: bool },
    Leds(Vec<bool>),
    Seg { index: usize, text: String },
    Segs(Vec<String>),
    Bit { index: usize, bit: u8, on: bool },
    Print,
    Quit,
}

impl Command {
    /// Run the command against `boards`. [`Command::Print`] and
    /// [`Command::Quit`] do nothing here.
    pub fn apply<B, F>(&self, boards: &mut TmBoards<B, F>) -> Result<(), BoardError<B::Error>>
    where
        B: ChainedBus,
        F: CharacterFont,
    {
        match self {
            Command::Led { index, on } => boards.leds().set(*index, *on),
            Command::Leds(values) => boards.set_leds(values.iter().copied()),
            Command::Seg { index, text } => boards.segments().set_run(*index, text),
            Command::Segs(words) => boards.set_segments(words),
            Command::Bit { index, bit, on } => {
                boards.segments().set_segment_bit(*index, *bit, *on)
            }
            Command::Print | Command::Quit => Ok(()),
        }
    }
}

impl FromStr for Command {
    type Err = ParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let (keyword, rest) = next_word(input);

        match keyword {
            "" => Err(ParseError::Empty),
            "led" => {
                let usage = ParseError::Usage("led <index> on|off");
                let (index, rest) = next_word(rest);
                let (state, _) = next_word(rest);
                if state.is_empty() {
                    return Err(usage);
                }
                Ok(Command::Led {
                    index: parse_number(index)?,
                    on: parse_state(state)?,
                })
            }
            "leds" => {
                let (bits, _) = next_word(rest);
                if bits.is_empty() {
                    return Err(ParseError::Usage("leds <bits>"));
                }
                let values = bits
                    .chars()
                    .map(|c| parse_state(c.encode_utf8(&mut [0; 4])))
                    .collect::<Result<_, _>>()?;
                Ok(Command::Leds(values))
            }
            "seg" => {
                let (index, text) = next_word(rest);
                // Keep inner spaces, they blank displays.
                let text = text.trim_end_matches(['\r', '\n']);
                if text.is_empty() {
                    return Err(ParseError::Usage("seg <index> <text>"));
                }
                Ok(Command::Seg {
                    index: parse_number(index)?,
                    text: text.to_owned(),
                })
            }
            "segs" => {
                let words: Vec<String> = rest.split_whitespace().map(str::to_owned).collect();
                if words.is_empty() {
                    return Err(ParseError::Usage("segs <text>..."));
                }
                Ok(Command::Segs(words))
            }
            "bit" => {
                let usage = ParseError::Usage("bit <index> <segment> on|off");
                let (index, rest) = next_word(rest);
                let (bit, rest) = next_word(rest);
                let (state, _) = next_word(rest);
                if state.is_empty() {
                    return Err(usage);
                }
                Ok(Command::Bit {
                    index: parse_number(index)?,
                    bit: parse_number(bit)?,
                    on: parse_state(state)?,
                })
            }
            "p" => Ok(Command::Print),
            "q" => Ok(Command::Quit),
            other => Err(ParseError::UnknownCommand(other.to_owned())),
        }
    }
}

/// Split off the first whitespace-separated word.
///
/// The remainder keeps everything after the single separator that ended the
/// word.
fn next_word(input: &str) -> (&str, &str) {
    let input = input.trim_start();
    match input.find(char::is_whitespace) {
        Some(end) => {
            let (word, rest) = input.split_at(end);
            let separator = rest.chars().next().map_or(0, char::len_utf8);
            (word, &rest[separator..])
        }
        None => (input, ""),
    }
}

fn parse_number<T: FromStr>(token: &str) -> Result<T, ParseError> {
    token
        .parse()
        .map_err(|_| ParseError::InvalidNumber(token.to_owned()))
}

fn parse_state(token: &str) -> Result<bool, ParseError> {
    match token {
        "on" | "1" => Ok(true),
        "off" | "0" => Ok(false),
        _ => Err(ParseError::InvalidState(token.to_owned())),
    }
}
