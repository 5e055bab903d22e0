use crate::error::BoardError;
use crate::register::{Register, SLOTS_PER_BOARD};
use crate::{ChainedBus, CharacterFont};

/// Highest segment bit of a display (the decimal point).
pub const MAX_SEGMENT_BIT: u8 = 7;

/// The 7-segment displays of every board in the chain, addressed by flat index.
///
/// Keeps a shadow copy of the last byte sent to each display so that
/// character writes which would not change anything are skipped.
#[derive(Debug, Clone)]
pub struct SegmentBank<F> {
    font: F,
    shadow: Box<[u8]>,
}

impl<F: CharacterFont> SegmentBank<F> {
    /// Create a bank for `nb_boards` boards, every display blank.
    pub fn new(nb_boards: usize, font: F) -> Self {
        Self {
            font,
            shadow: vec![0; nb_boards * SLOTS_PER_BOARD].into_boxed_slice(),
        }
    }

    /// Number of displays across the chain.
    #[inline]
    pub fn count(&self) -> usize {
        self.shadow.len()
    }

    /// Last byte sent to display `index`.
    #[inline]
    pub fn get(&self, index: usize) -> Option<u8> {
        self.shadow.get(index).copied()
    }

    /// Last bytes sent to every display, in flat index order.
    #[inline]
    pub fn shadow(&self) -> &[u8] {
        &self.shadow
    }

    /// Show `text` on the displays starting at `start`, one character per
    /// display, left to right.
    ///
    /// A display already showing the right glyph is not written again.
    /// An unknown character or a display past the end of the chain aborts the
    /// run at that character; displays before it keep their new content.
    pub fn set_run<B: ChainedBus>(
        &mut self,
        bus: &mut B,
        start: usize,
        text: &str,
    ) -> Result<(), BoardError<B::Error>> {
        let len = self.shadow.len();

        for (offset, c) in text.chars().enumerate() {
            let bits = self
                .font
                .glyph(c)
                .ok_or(BoardError::UnknownCharacter(c))?;
            let index = start.saturating_add(offset);
            let current = self
                .shadow
                .get_mut(index)
                .ok_or(BoardError::IndexOutOfRange { index, len })?;

            if *current == bits {
                log::trace!("display {index} already shows {c:?}, skipping");
                continue;
            }

            write_display(bus, index, bits)?;
            *current = bits;
        }

        Ok(())
    }

    /// Switch a single segment of display `index` on or off.
    ///
    /// The whole display byte is written every time, even when the segment
    /// already had the requested state.
    pub fn set_segment_bit<B: ChainedBus>(
        &mut self,
        bus: &mut B,
        index: usize,
        bit: u8,
        on: bool,
    ) -> Result<(), BoardError<B::Error>> {
        if bit > MAX_SEGMENT_BIT {
            return Err(BoardError::SegmentBitOutOfRange(bit));
        }

        let len = self.shadow.len();
        let current = self
            .shadow
            .get_mut(index)
            .ok_or(BoardError::IndexOutOfRange { index, len })?;

        let mask = 1 << bit;
        let bits = if on { *current | mask } else { *current & !mask };

        write_display(bus, index, bits)?;
        *current = bits;
        Ok(())
    }

    /// Call [`set_run`](Self::set_run) with `values[i]` at display `i`, for
    /// every value in order.
    pub fn set_all<B, I, S>(&mut self, bus: &mut B, values: I) -> Result<(), BoardError<B::Error>>
    where
        B: ChainedBus,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for (index, text) in values.into_iter().enumerate() {
            self.set_run(bus, index, text.as_ref())?;
        }
        Ok(())
    }
}

fn write_display<B: ChainedBus>(
    bus: &mut B,
    index: usize,
    bits: u8,
) -> Result<(), BoardError<B::Error>> {
    let register = Register::display(index);
    log::trace!(
        "display {index} <- {bits:#010b} (board {}, address {:#04x})",
        register.board,
        register.address
    );
    bus.send_data(register.address, bits, register.board)
        .map_err(BoardError::Transport)
}

/// Borrowed view pairing the [`SegmentBank`] with the bus it writes to.
///
/// Returned by [`TmBoards::segments`](crate::TmBoards::segments).
#[derive(Debug)]
pub struct Segments<'a, B, F> {
    bus: &'a mut B,
    bank: &'a mut SegmentBank<F>,
}

impl<'a, B: ChainedBus, F: CharacterFont> Segments<'a, B, F> {
    pub(crate) fn new(bus: &'a mut B, bank: &'a mut SegmentBank<F>) -> Self {
        Self { bus, bank }
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.bank.count()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<u8> {
        self.bank.get(index)
    }

    /// See [`SegmentBank::set_run`].
    #[inline]
    pub fn set_run(&mut self, start: usize, text: &str) -> Result<(), BoardError<B::Error>> {
        self.bank.set_run(self.bus, start, text)
    }

    /// See [`SegmentBank::set_segment_bit`].
    #[inline]
    pub fn set_segment_bit(
        &mut self,
        index: usize,
        bit: u8,
        on: bool,
    ) -> Result<(), BoardError<B::Error>> {
        self.bank.set_segment_bit(self.bus, index, bit, on)
    }

    /// See [`SegmentBank::set_all`].
    #[inline]
    pub fn set_all<I, S>(&mut self, values: I) -> Result<(), BoardError<B::Error>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.bank.set_all(self.bus, values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tm1638Font;
    use crate::mock::{BusError, RecordingBus, Transaction};

    fn bank(nb_boards: usize) -> (SegmentBank<Tm1638Font>, RecordingBus) {
        (
            SegmentBank::new(nb_boards, Tm1638Font),
            RecordingBus::new(nb_boards),
        )
    }

    #[test]
    fn new_bank_is_blank() {
        let (bank, _) = bank(2);
        assert_eq!(bank.count(), 16);
        assert!(bank.shadow().iter().all(|&bits| bits == 0));
    }

    #[test]
    fn run_writes_each_character_to_its_display() {
        let (mut bank, mut bus) = bank(1);

        bank.set_run(&mut bus, 2, "56").unwrap();

        assert_eq!(
            bus.transactions(),
            &[Transaction::new(4, 0x6d, 0), Transaction::new(6, 0x7d, 0)]
        );
        assert_eq!(bank.get(2), Some(0x6d));
        assert_eq!(bank.get(3), Some(0x7d));
    }

    #[test]
    fn unchanged_character_is_not_rewritten() {
        let (mut bank, mut bus) = bank(1);

        bank.set_run(&mut bus, 0, "8").unwrap();
        bank.set_run(&mut bus, 0, "8").unwrap();

        assert_eq!(bus.transactions().len(), 1);
    }

    #[test]
    fn blank_on_blank_display_is_not_written() {
        let (mut bank, mut bus) = bank(1);

        bank.set_run(&mut bus, 0, "    ").unwrap();

        assert!(bus.transactions().is_empty());
    }

    #[test]
    fn run_crosses_board_boundary() {
        let (mut bank, mut bus) = bank(2);

        bank.set_run(&mut bus, 7, "12").unwrap();

        assert_eq!(
            bus.transactions(),
            &[Transaction::new(14, 0x06, 0), Transaction::new(0, 0x5b, 1)]
        );
    }

    #[test]
    fn unknown_character_stops_the_run() {
        let (mut bank, mut bus) = bank(1);

        let result = bank.set_run(&mut bus, 0, "12@4");

        assert_eq!(result, Err(BoardError::UnknownCharacter('@')));
        assert_eq!(bus.transactions().len(), 2);
        assert_eq!(bank.get(2), Some(0));
        assert_eq!(bank.get(3), Some(0));
    }

    #[test]
    fn run_past_last_display_stops_at_the_edge() {
        let (mut bank, mut bus) = bank(1);

        let result = bank.set_run(&mut bus, 6, "123");

        assert_eq!(
            result,
            Err(BoardError::IndexOutOfRange { index: 8, len: 8 })
        );
        assert_eq!(bus.transactions().len(), 2);
    }

    #[test]
    fn failed_write_leaves_shadow_untouched() {
        let (mut bank, _) = bank(1);
        let mut bus = RecordingBus::new(1).failing_after(0);

        let result = bank.set_run(&mut bus, 0, "8");

        assert_eq!(result, Err(BoardError::Transport(BusError::Injected)));
        assert_eq!(bank.get(0), Some(0));
    }

    #[test]
    fn segment_bit_is_always_written() {
        let (mut bank, mut bus) = bank(1);

        bank.set_segment_bit(&mut bus, 0, 3, true).unwrap();
        bank.set_segment_bit(&mut bus, 0, 3, true).unwrap();

        assert_eq!(
            bus.transactions(),
            &[Transaction::new(0, 0x08, 0), Transaction::new(0, 0x08, 0)]
        );
    }

    #[test]
    fn segment_bit_updates_existing_glyph() {
        let (mut bank, mut bus) = bank(1);

        bank.set_run(&mut bus, 1, "8").unwrap();
        bank.set_segment_bit(&mut bus, 1, 6, false).unwrap();
        bank.set_segment_bit(&mut bus, 1, 7, true).unwrap();

        assert_eq!(
            bus.transactions(),
            &[
                Transaction::new(2, 0x7f, 0),
                Transaction::new(2, 0x3f, 0),
                Transaction::new(2, 0xbf, 0),
            ]
        );
        assert_eq!(bank.get(1), Some(0xbf));
    }

    #[test]
    fn segment_bit_then_matching_run_is_suppressed() {
        let (mut bank, mut bus) = bank(1);

        bank.set_segment_bit(&mut bus, 0, 6, true).unwrap();
        bank.set_run(&mut bus, 0, "-").unwrap();

        assert_eq!(bus.transactions().len(), 1);
    }

    #[test]
    fn segment_bit_out_of_range_is_rejected() {
        let (mut bank, mut bus) = bank(1);

        let result = bank.set_segment_bit(&mut bus, 0, 8, true);

        assert_eq!(result, Err(BoardError::SegmentBitOutOfRange(8)));
        assert!(bus.transactions().is_empty());
    }

    #[test]
    fn segment_bit_index_past_chain_is_rejected() {
        let (mut bank, mut bus) = bank(1);

        let result = bank.set_segment_bit(&mut bus, 8, 0, true);

        assert_eq!(result, Err(BoardError::IndexOutOfRange { index: 8, len: 8 }));
        assert!(bus.transactions().is_empty());
    }

    #[test]
    fn failed_segment_bit_write_leaves_shadow_untouched() {
        let (mut bank, _) = bank(1);
        let mut bus = RecordingBus::new(1).failing_after(0);

        let result = bank.set_segment_bit(&mut bus, 0, 3, true);

        assert_eq!(result, Err(BoardError::Transport(BusError::Injected)));
        assert_eq!(bank.get(0), Some(0));
    }

    #[test]
    fn set_all_runs_each_element_at_its_own_index() {
        let (mut bank, mut bus) = bank(1);

        bank.set_all(&mut bus, ["1", "23"]).unwrap();

        assert_eq!(
            bus.transactions(),
            &[
                Transaction::new(0, 0x06, 0),
                Transaction::new(2, 0x5b, 0),
                Transaction::new(4, 0x4f, 0),
            ]
        );
    }
}
