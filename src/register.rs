/// Number of LED slots (and display slots) on a single board.
pub const SLOTS_PER_BOARD: usize = 8;

/// Number of addressable registers on a single board.
pub const REGISTERS_PER_BOARD: u8 = 16;

/// A register address on one board of the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Register {
    pub address: u8,
    pub board: usize,
}

impl Register {
    /// Register holding the 7-segment display at flat index `index`.
    ///
    /// Displays sit on the even addresses: display 0 on address 0,
    /// display 1 on address 2, and so on. Display 8 is the first one of the
    /// second board.
    #[inline]
    pub const fn display(index: usize) -> Self {
        Self {
            address: slot(index) * 2,
            board: index / SLOTS_PER_BOARD,
        }
    }

    /// Register holding the LED at flat index `index`.
    ///
    /// LEDs use bit 0 of the odd addresses, interleaved with the displays.
    #[inline]
    pub const fn led(index: usize) -> Self {
        Self {
            address: slot(index) * 2 + 1,
            board: index / SLOTS_PER_BOARD,
        }
    }
}

#[inline]
const fn slot(index: usize) -> u8 {
    (index % SLOTS_PER_BOARD) as u8
}
