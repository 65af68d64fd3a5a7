//! Named single-segment indicators.

use core::str::FromStr;

use crate::{Error, Result};

/// A fixed symbol on the glass that is independent of the character positions.
///
/// The colon between hours and minutes is controlled separately with
/// [`SegmentDisplay::set_colon`](crate::SegmentDisplay::set_colon).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Indicator {
    /// Radio / signal symbol.
    Signal,
    /// Alarm bell.
    Bell,
    Pm,
    /// 24-hour mode.
    TwentyFourHour,
    /// Stopwatch lap.
    Lap,
}

impl Indicator {
    /// Every indicator, in table order.
    pub const ALL: [Self; 5] = [
        Self::Signal,
        Self::Bell,
        Self::Pm,
        Self::TwentyFourHour,
        Self::Lap,
    ];

    /// The identifier accepted by [`Indicator::from_name`].
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Signal => "signal",
            Self::Bell => "bell",
            Self::Pm => "pm",
            Self::TwentyFourHour => "24h",
            Self::Lap => "lap",
        }
    }

    /// Looks an indicator up by its identifier (ASCII case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIndicatorName`] if no indicator has that name.
    pub fn from_name(name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|indicator| indicator.name().eq_ignore_ascii_case(name))
            .ok_or(Error::InvalidIndicatorName)
    }
}

impl FromStr for Indicator {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self> {
        Self::from_name(name)
    }
}
