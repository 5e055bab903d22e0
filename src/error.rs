/// Error returned by LED and display writes.
///
/// Generic over the bus error so transport failures pass through untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError<E> {
    /// The font has no glyph for this character.
    #[error("cannot display the character '{0}'")]
    UnknownCharacter(char),

    /// Flat LED or display index past the end of the chain.
    #[error("index {index} out of range for {len} slots")]
    IndexOutOfRange { index: usize, len: usize },

    /// Segment bit outside 0..=7.
    #[error("segment bit {0} out of range (0..=7)")]
    SegmentBitOutOfRange(u8),

    /// The bus rejected the write.
    #[error("bus write failed: {0}")]
    Transport(E),
}
