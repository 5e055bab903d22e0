use crate::config::BoardConfig;
use crate::error::BoardError;
use crate::font::Tm1638Font;
use crate::leds::{LedBank, Leds};
use crate::segments::{SegmentBank, Segments};
use crate::{ChainedBus, CharacterFont};

/// All the chained TM1638 boards (8 LEDs and 8 7-segment displays each)
/// seen as one device.
///
/// LEDs and displays are addressed by flat index across the chain: index 0
/// is the leftmost slot of the first board, index 8 the leftmost slot of the
/// second board, and so on.
///
/// Every write goes through `&mut self`; sharing a `TmBoards` between threads
/// needs an outer lock.
#[derive(Debug)]
pub struct TmBoards<B, F = Tm1638Font> {
    bus: B,
    nb_boards: usize,
    leds: LedBank,
    segments: SegmentBank<F>,
}

impl<B: ChainedBus> TmBoards<B> {
    /// Create the board group with the default font.
    ///
    /// `bus` is the transport already set up from `config`; the number of
    /// boards comes from the configured strobe lines.
    pub fn new(bus: B, config: &BoardConfig) -> Self {
        Self::with_font(bus, config, Tm1638Font)
    }
}

impl<B: ChainedBus, F: CharacterFont> TmBoards<B, F> {
    /// Create the board group with a custom font.
    pub fn with_font(bus: B, config: &BoardConfig, font: F) -> Self {
        let nb_boards = config.nb_boards();
        log::debug!(
            "TM1638 chain: {nb_boards} board(s), dio {}, clk {}, stb {:?}, brightness {}",
            config.dio(),
            config.clk(),
            config.stb(),
            config.brightness()
        );

        Self {
            bus,
            nb_boards,
            leds: LedBank::new(nb_boards),
            segments: SegmentBank::new(nb_boards, font),
        }
    }

    /// Number of chained boards.
    #[inline]
    pub fn nb_boards(&self) -> usize {
        self.nb_boards
    }

    /// The LEDs of the chain.
    #[inline]
    pub fn leds(&mut self) -> Leds<'_, B> {
        Leds::new(&mut self.bus, &self.leds)
    }

    /// The 7-segment displays of the chain.
    #[inline]
    pub fn segments(&mut self) -> Segments<'_, B, F> {
        Segments::new(&mut self.bus, &mut self.segments)
    }

    /// Set LED `i` to `values[i]` for every value.
    pub fn set_leds<I>(&mut self, values: I) -> Result<(), BoardError<B::Error>>
    where
        I: IntoIterator<Item = bool>,
    {
        self.leds().set_all(values)
    }

    /// Show `values[i]` starting at display `i`, for every value.
    ///
    /// Each element is its own run, so `["12", "3"]` ends with "13" on the
    /// first two displays.
    pub fn set_segments<I, S>(&mut self, values: I) -> Result<(), BoardError<B::Error>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.segments().set_all(values)
    }

    /// Last byte sent to display `index`.
    #[inline]
    pub fn display(&self, index: usize) -> Option<u8> {
        self.segments.get(index)
    }

    #[inline]
    pub fn bus(&self) -> &B {
        &self.bus
    }

    #[inline]
    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    pub fn into_inner(self) -> B {
        self.bus
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{RecordingBus, Transaction};

    fn config(nb_boards: u8) -> BoardConfig {
        BoardConfig::new(0, 1, (0..nb_boards).map(|i| i + 2).collect::<Vec<_>>()).unwrap()
    }

    #[test]
    fn board_count_comes_from_strobe_lines() {
        let boards = TmBoards::new(RecordingBus::new(3), &config(3));

        assert_eq!(boards.nb_boards(), 3);
    }

    #[test]
    fn views_cover_the_whole_chain() {
        let mut boards = TmBoards::new(RecordingBus::new(2), &config(2));

        assert_eq!(boards.leds().count(), 16);
        assert_eq!(boards.segments().count(), 16);
    }

    #[test]
    fn set_leds_writes_every_value_in_order() {
        let mut boards = TmBoards::new(RecordingBus::new(2), &config(2));

        boards
            .set_leds([true, false, false, false, false, false, false, false, true])
            .unwrap();

        let transactions = boards.bus().transactions();
        assert_eq!(transactions.len(), 9);
        assert_eq!(transactions[0], Transaction::new(1, 1, 0));
        assert_eq!(transactions[8], Transaction::new(1, 1, 1));
    }

    #[test]
    fn set_segments_runs_once_per_element() {
        let mut boards = TmBoards::new(RecordingBus::new(1), &config(1));

        boards.set_segments(["12", "3"]).unwrap();

        assert_eq!(
            boards.bus().transactions(),
            &[
                Transaction::new(0, 0x06, 0),
                Transaction::new(2, 0x5b, 0),
                Transaction::new(2, 0x4f, 0),
            ]
        );
        assert_eq!(boards.display(0), Some(0x06));
        assert_eq!(boards.display(1), Some(0x4f));
    }

    #[test]
    fn set_segments_accepts_owned_strings() {
        let mut boards = TmBoards::new(RecordingBus::new(1), &config(1));

        let digits: Vec<String> = (0..8).map(|d| d.to_string()).collect();
        boards.set_segments(&digits).unwrap();

        assert_eq!(boards.bus().transactions().len(), 8);
    }

    #[test]
    fn borrowed_bus_stays_with_the_caller() {
        let mut bus = RecordingBus::new(1);

        let mut boards = TmBoards::new(&mut bus, &config(1));
        boards.leds().set(0, true).unwrap();
        drop(boards);

        assert_eq!(bus.transactions(), &[Transaction::new(1, 1, 0)]);
    }

    #[test]
    fn custom_font() {
        let zero_only = |c: char| (c == '0').then_some(0xff_u8);
        let mut boards = TmBoards::with_font(RecordingBus::new(1), &config(1), zero_only);

        boards.segments().set_run(0, "0").unwrap();

        assert_eq!(
            boards.segments().set_run(1, "1"),
            Err(BoardError::UnknownCharacter('1'))
        );
        assert_eq!(boards.display(0), Some(0xff));
    }
}
