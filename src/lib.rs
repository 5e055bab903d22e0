pub mod boards;
pub mod config;
pub mod error;
pub mod font;
pub mod leds;
pub mod mock;
pub mod register;
pub mod segments;

pub use boards::TmBoards;
pub use config::BoardConfig;
pub use error::BoardError;
pub use font::Tm1638Font;

/// Trait for writing register bytes onto a chain of TM1638 boards.
///
/// Abstracts over the bit-banged clock/data/strobe transport and in-memory
/// fakes, so addressing logic never touches the wire protocol.
pub trait ChainedBus {
    /// Error type for transport failures.
    type Error: std::fmt::Debug + std::fmt::Display;

    /// Write `value` to register `address` of the board at position `board`
    /// in the chain.
    fn send_data(&mut self, address: u8, value: u8, board: usize) -> Result<(), Self::Error>;
}

impl<T> ChainedBus for &mut T
where
    T: ChainedBus,
{
    type Error = T::Error;

    fn send_data(&mut self, address: u8, value: u8, board: usize) -> Result<(), Self::Error> {
        T::send_data(self, address, value, board)
    }
}

/// Trait for mapping a character to its 7-segment bitmask.
///
/// Bits 0..=6 are segments a..g, bit 7 is the decimal point.
pub trait CharacterFont {
    /// Glyph for `c`, or `None` when the character cannot be displayed.
    fn glyph(&self, c: char) -> Option<u8>;
}

impl<F> CharacterFont for F
where
    F: Fn(char) -> Option<u8>,
{
    fn glyph(&self, c: char) -> Option<u8> {
        self(c)
    }
}
