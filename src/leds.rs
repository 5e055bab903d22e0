use crate::ChainedBus;
use crate::error::BoardError;
use crate::register::{Register, SLOTS_PER_BOARD};

/// The LEDs of every board in the chain, addressed by flat index.
///
/// No state is kept: each set is written straight through to the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedBank {
    count: usize,
}

impl LedBank {
    pub const fn new(nb_boards: usize) -> Self {
        Self {
            count: nb_boards * SLOTS_PER_BOARD,
        }
    }

    /// Number of LEDs across the chain.
    #[inline]
    pub const fn count(&self) -> usize {
        self.count
    }

    /// Switch LED `index` on or off with one bus write.
    pub fn set<B: ChainedBus>(
        &self,
        bus: &mut B,
        index: usize,
        on: bool,
    ) -> Result<(), BoardError<B::Error>> {
        if index >= self.count {
            return Err(BoardError::IndexOutOfRange {
                index,
                len: self.count,
            });
        }

        let register = Register::led(index);
        log::trace!(
            "led {index} {} (board {}, address {:#04x})",
            if on { "on" } else { "off" },
            register.board,
            register.address
        );
        bus.send_data(register.address, u8::from(on), register.board)
            .map_err(BoardError::Transport)
    }

    /// Set LED `i` to `values[i]` for every value, in order.
    ///
    /// Stops at the first failure; LEDs already written stay written.
    pub fn set_all<B, I>(&self, bus: &mut B, values: I) -> Result<(), BoardError<B::Error>>
    where
        B: ChainedBus,
        I: IntoIterator<Item = bool>,
    {
        for (index, on) in values.into_iter().enumerate() {
            self.set(bus, index, on)?;
        }
        Ok(())
    }
}

/// Borrowed view pairing the [`LedBank`] with the bus it writes to.
///
/// Returned by [`TmBoards::leds`](crate::TmBoards::leds).
#[derive(Debug)]
pub struct Leds<'a, B> {
    bus: &'a mut B,
    bank: &'a LedBank,
}

impl<'a, B: ChainedBus> Leds<'a, B> {
    pub(crate) fn new(bus: &'a mut B, bank: &'a LedBank) -> Self {
        Self { bus, bank }
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.bank.count()
    }

    /// See [`LedBank::set`].
    #[inline]
    pub fn set(&mut self, index: usize, on: bool) -> Result<(), BoardError<B::Error>> {
        self.bank.set(self.bus, index, on)
    }

    /// See [`LedBank::set_all`].
    #[inline]
    pub fn set_all<I>(&mut self, values: I) -> Result<(), BoardError<B::Error>>
    where
        I: IntoIterator<Item = bool>,
    {
        self.bank.set_all(self.bus, values)
    }
}
