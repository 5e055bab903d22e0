/// Highest brightness level accepted by the TM1638 display control command.
pub const MAX_BRIGHTNESS: u8 = 7;

/// Brightness used when none is configured.
pub const DEFAULT_BRIGHTNESS: u8 = 1;

/// Error types for board configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("at least one strobe line is required")]
    NoStrobeLines,

    #[error("pin {0} is assigned more than once")]
    DuplicatePin(u8),

    #[error("brightness {0} out of range (0..=7)")]
    BrightnessOutOfRange(u8),
}

/// Wiring and brightness for a chain of TM1638 boards.
///
/// All boards share the data and clock lines; each board has its own strobe
/// line, so the number of strobe lines is the number of boards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardConfig {
    dio: u8,
    clk: u8,
    stb: Vec<u8>,
    brightness: u8,
}

impl BoardConfig {
    /// Create a configuration with the default brightness.
    pub fn new(dio: u8, clk: u8, stb: impl Into<Vec<u8>>) -> Result<Self, ConfigError> {
        let stb = stb.into();
        if stb.is_empty() {
            return Err(ConfigError::NoStrobeLines);
        }

        let mut seen = Vec::with_capacity(stb.len() + 2);
        for pin in [dio, clk].into_iter().chain(stb.iter().copied()) {
            if seen.contains(&pin) {
                return Err(ConfigError::DuplicatePin(pin));
            }
            seen.push(pin);
        }

        Ok(Self {
            dio,
            clk,
            stb,
            brightness: DEFAULT_BRIGHTNESS,
        })
    }

    /// Replace the brightness level.
    pub fn with_brightness(self, brightness: u8) -> Result<Self, ConfigError> {
        if brightness > MAX_BRIGHTNESS {
            return Err(ConfigError::BrightnessOutOfRange(brightness));
        }
        Ok(Self { brightness, ..self })
    }

    #[inline]
    pub fn dio(&self) -> u8 {
        self.dio
    }

    #[inline]
    pub fn clk(&self) -> u8 {
        self.clk
    }

    /// Strobe lines, one per board, in chain order.
    #[inline]
    pub fn stb(&self) -> &[u8] {
        &self.stb
    }

    #[inline]
    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    /// Number of chained boards.
    #[inline]
    pub fn nb_boards(&self) -> usize {
        self.stb.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn board_count_follows_strobe_lines() {
        let config = BoardConfig::new(10, 11, [12, 13, 14]).unwrap();
        assert_eq!(config.nb_boards(), 3);
        assert_eq!(config.stb(), &[12, 13, 14]);
    }

    #[test]
    fn default_brightness_is_one() {
        let config = BoardConfig::new(10, 11, [12]).unwrap();
        assert_eq!(config.brightness(), DEFAULT_BRIGHTNESS);
    }

    #[test]
    fn empty_strobe_list_is_rejected() {
        assert_eq!(
            BoardConfig::new(10, 11, Vec::new()),
            Err(ConfigError::NoStrobeLines)
        );
    }

    #[test_case(10, 11, &[12, 10]; "strobe shares data line")]
    #[test_case(10, 10, &[12]; "clock shares data line")]
    fn shared_pin_is_rejected(dio: u8, clk: u8, stb: &[u8]) {
        assert_eq!(
            BoardConfig::new(dio, clk, stb),
            Err(ConfigError::DuplicatePin(10))
        );
    }

    #[test]
    fn brightness_is_bounded() {
        let config = BoardConfig::new(10, 11, [12]).unwrap();

        assert_eq!(config.clone().with_brightness(7).unwrap().brightness(), 7);
        assert_eq!(
            config.with_brightness(8),
            Err(ConfigError::BrightnessOutOfRange(8))
        );
    }
}
