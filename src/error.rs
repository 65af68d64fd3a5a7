use derive_more::derive::{Display, Error};

use crate::indicator::Indicator;

/// A specialized `Result` where the error is this crate's `Error` type.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Define a unified error type for this crate.
///
/// Every variant is local and recoverable: a rejected request never reaches the
/// hardware, so the display keeps whatever it showed before the call.
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// The character has no glyph (outside printable ASCII, `0x20..=0x7E`).
    #[display("character {_0:?} has no glyph")]
    OutOfRangeCharacter(#[error(not(source))] char),

    /// The position is beyond the panel's last character position.
    #[display("position {_0} is outside the display")]
    OutOfRangePosition(#[error(not(source))] u8),

    /// A raw pixel address outside the controller's rows or columns.
    #[display("segment ({row}, {column}) is not addressable")]
    OutOfRangeSegment { row: u8, column: u8 },

    /// The indicator name is not one this crate knows.
    #[display("unknown indicator name")]
    InvalidIndicatorName,

    /// The indicator is valid but the panel has no segment for it.
    #[display("indicator {_0:?} is not wired on this panel")]
    UnwiredIndicator(#[error(not(source))] Indicator),

    #[display("display is disabled")]
    DisplayDisabled,

    #[display("display command queue is full")]
    CommandQueueFull,
}
