//! Error types for the watch face

/// Errors reported by the watch face and its device drivers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Formatted text does not fit the label buffer
    TextOverflow,
    /// Display driver failed to initialise or draw
    Display,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::TextOverflow => f.write_str("text does not fit label buffer"),
            Error::Display => f.write_str("display error"),
        }
    }
}
