use std::io::{self, Write};

use crate::ChainedBus;
use crate::config::BoardConfig;
use crate::register::{REGISTERS_PER_BOARD, SLOTS_PER_BOARD};

/// Error types for the in-memory buses.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BusError {
    #[error("no board at position {board} (chain has {nb_boards})")]
    NoSuchBoard { board: usize, nb_boards: usize },

    #[error("register address {0:#04x} out of range")]
    InvalidAddress(u8),

    #[error("injected transport failure")]
    Injected,
}

fn check_register(address: u8, board: usize, nb_boards: usize) -> Result<(), BusError> {
    if board >= nb_boards {
        return Err(BusError::NoSuchBoard { board, nb_boards });
    }
    if address >= REGISTERS_PER_BOARD {
        return Err(BusError::InvalidAddress(address));
    }
    Ok(())
}

/// One register write seen by a [`RecordingBus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Transaction {
    pub address: u8,
    pub value: u8,
    pub board: usize,
}

impl Transaction {
    #[inline]
    pub const fn new(address: u8, value: u8, board: usize) -> Self {
        Self {
            address,
            value,
            board,
        }
    }
}

/// Bus that records every write, for testing addressing and write suppression.
#[derive(Debug, Clone, Default)]
pub struct RecordingBus {
    nb_boards: usize,
    transactions: Vec<Transaction>,
    fail_after: Option<usize>,
}

impl RecordingBus {
    /// Creates a bus for a chain of `nb_boards` boards.
    pub fn new(nb_boards: usize) -> Self {
        Self {
            nb_boards,
            ..Self::default()
        }
    }

    /// Accept `writes` transactions, then fail every following one.
    pub fn failing_after(self, writes: usize) -> Self {
        Self {
            fail_after: Some(writes),
            ..self
        }
    }

    /// Writes recorded so far, oldest first.
    #[inline]
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Forget the recorded writes.
    pub fn clear(&mut self) {
        self.transactions.clear();
    }
}

impl ChainedBus for RecordingBus {
    type Error = BusError;

    fn send_data(&mut self, address: u8, value: u8, board: usize) -> Result<(), Self::Error> {
        if self
            .fail_after
            .is_some_and(|limit| self.transactions.len() >= limit)
        {
            return Err(BusError::Injected);
        }
        check_register(address, board, self.nb_boards)?;

        self.transactions
            .push(Transaction::new(address, value, board));
        Ok(())
    }
}

type RegisterImage = [u8; REGISTERS_PER_BOARD as usize];

/// Bus that keeps the register image of every board and draws it as text.
///
/// Stands in for real hardware in the interactive simulator.
#[derive(Debug, Clone)]
pub struct TerminalBus {
    stb: Vec<u8>,
    brightness: u8,
    registers: Vec<RegisterImage>,
}

impl TerminalBus {
    /// Creates a blank chain wired as described by `config`.
    pub fn new(config: &BoardConfig) -> Self {
        Self {
            stb: config.stb().to_vec(),
            brightness: config.brightness(),
            registers: vec![[0; REGISTERS_PER_BOARD as usize]; config.nb_boards()],
        }
    }

    /// Current content of a register.
    pub fn register(&self, board: usize, address: u8) -> Option<u8> {
        self.registers
            .get(board)
            .and_then(|image| image.get(usize::from(address)))
            .copied()
    }

    /// Draw every board: its LEDs on one line, then its displays.
    pub fn render(&self, w: &mut impl Write) -> io::Result<()> {
        for (board, (image, stb)) in self.registers.iter().zip(&self.stb).enumerate() {
            writeln!(
                w,
                "Board {board} (stb {stb}, brightness {})",
                self.brightness
            )?;
            render_leds(w, image)?;
            render_displays(w, image)?;
        }
        w.flush()
    }
}

impl ChainedBus for TerminalBus {
    type Error = BusError;

    fn send_data(&mut self, address: u8, value: u8, board: usize) -> Result<(), Self::Error> {
        check_register(address, board, self.registers.len())?;
        self.registers[board][usize::from(address)] = value;
        Ok(())
    }
}

/// LEDs are bit 0 of the odd registers.
fn render_leds(w: &mut impl Write, image: &RegisterImage) -> io::Result<()> {
    write!(w, " ")?;
    for slot in 0..SLOTS_PER_BOARD {
        let lit = image[slot * 2 + 1] & 1 != 0;
        write!(w, " {}  ", if lit { '●' } else { '○' })?;
    }
    writeln!(w)
}

/// Three text rows per display, four columns each (the last one holds the
/// decimal point).
fn render_displays(w: &mut impl Write, image: &RegisterImage) -> io::Result<()> {
    let glyphs: Vec<u8> = (0..SLOTS_PER_BOARD).map(|slot| image[slot * 2]).collect();

    let segment = |bits: u8, bit: u8, on: char| if bits & (1 << bit) != 0 { on } else { ' ' };

    write!(w, " ")?;
    for &bits in &glyphs {
        write!(w, " {}  ", segment(bits, 0, '_'))?;
    }
    writeln!(w)?;

    write!(w, " ")?;
    for &bits in &glyphs {
        write!(
            w,
            "{}{}{} ",
            segment(bits, 5, '|'),
            segment(bits, 6, '_'),
            segment(bits, 1, '|')
        )?;
    }
    writeln!(w)?;

    write!(w, " ")?;
    for &bits in &glyphs {
        write!(
            w,
            "{}{}{}{}",
            segment(bits, 4, '|'),
            segment(bits, 3, '_'),
            segment(bits, 2, '|'),
            segment(bits, 7, '.')
        )?;
    }
    writeln!(w)
}
