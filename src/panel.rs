//! Panel configuration: where each position's segments, the indicators, and the
//! colon are wired, plus the glyph overrides that the wiring forces.
//!
//! A [`PanelLayout`] is built and validated at compile time, so a wiring mistake
//! is a build error rather than a runtime fault:
//!
//! ```compile_fail
//! # use slcd_kit::panel::{GlyphOverride, PanelLayout, PositionRoute};
//! # use slcd_kit::segment::SegmentAddress;
//! const ROUTES: [PositionRoute; 1] = [PositionRoute::from_packed(0xC000_0000_0000_0000)];
//! // Override points at position 3 on a one-position panel.
//! const OVERRIDES: [GlyphOverride; 1] = [GlyphOverride::new('7', 3, '&')];
//! static PANEL: PanelLayout = PanelLayout::new(&ROUTES, &[], SegmentAddress::at(0, 0), &OVERRIDES);
//! ```

use crate::glyph::{self, glyph_of};
use crate::indicator::Indicator;
use crate::segment::{SegmentAddress, Slot};
use crate::{Error, Result};

/// Number of logical segments per character position.
pub const SLOT_COUNT: usize = 8;

/// The physical segment behind each logical segment of one character position.
///
/// Slot *i* pairs with bit *i* of a glyph pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PositionRoute([Slot; SLOT_COUNT]);

impl PositionRoute {
    #[must_use]
    pub const fn new(slots: [Slot; SLOT_COUNT]) -> Self {
        Self(slots)
    }

    /// Decodes the packed form: byte *i* (least significant first) is slot *i*,
    /// with the row in its two high bits and the column in its six low bits.
    /// Row 3 marks an absent slot.
    ///
    /// ```rust
    /// use slcd_kit::panel::PositionRoute;
    /// use slcd_kit::segment::{SegmentAddress, Slot};
    ///
    /// const ROUTE: PositionRoute = PositionRoute::from_packed(0xC045_4405_0646_8584);
    /// assert_eq!(ROUTE.slots()[0], Slot::Segment(SegmentAddress::at(2, 4)));
    /// assert_eq!(ROUTE.slots()[7], Slot::Absent);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics (at compile time when used in a `const`) if a column is out of range.
    #[must_use]
    #[expect(clippy::indexing_slicing, reason = "Both indexes are below SLOT_COUNT")]
    pub const fn from_packed(packed: u64) -> Self {
        let bytes = packed.to_le_bytes();
        let mut slots = [Slot::Absent; SLOT_COUNT];
        let mut index = 0;
        while index < SLOT_COUNT {
            slots[index] = Slot::from_packed(bytes[index]);
            index += 1;
        }
        Self(slots)
    }

    #[must_use]
    pub const fn slots(&self) -> &[Slot; SLOT_COUNT] {
        &self.0
    }

    /// Slots in bit order, low bit first.
    pub fn iter(&self) -> impl Iterator<Item = Slot> + '_ {
        self.0.iter().copied()
    }

    /// Number of slots backed by a physical segment.
    #[must_use]
    pub fn present_count(&self) -> usize {
        self.iter().filter(|slot| slot.address().is_some()).count()
    }
}

/// Renders `character` as `substitute` at one position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GlyphOverride {
    pub character: char,
    pub position: u8,
    pub substitute: char,
}

impl GlyphOverride {
    #[must_use]
    pub const fn new(character: char, position: u8, substitute: char) -> Self {
        Self {
            character,
            position,
            substitute,
        }
    }
}

/// Everything the renderer needs to know about one LCD glass.
#[derive(Debug, Clone, Copy)]
pub struct PanelLayout {
    routes: &'static [PositionRoute],
    indicators: &'static [(Indicator, SegmentAddress)],
    colon: SegmentAddress,
    overrides: &'static [GlyphOverride],
}

impl PanelLayout {
    /// Constructor: verifies the tables describe a usable panel.
    ///
    /// # Panics
    ///
    /// Panics (at compile time when used in a `const`/`static`) if there are no
    /// positions or more than 255, if an override names a position the panel
    /// lacks or a character without a glyph, or if an indicator is listed twice.
    #[must_use]
    #[expect(clippy::indexing_slicing, reason = "Indexes are bounded by the loop conditions")]
    pub const fn new(
        routes: &'static [PositionRoute],
        indicators: &'static [(Indicator, SegmentAddress)],
        colon: SegmentAddress,
        overrides: &'static [GlyphOverride],
    ) -> Self {
        assert!(!routes.is_empty(), "panel needs at least one position");
        assert!(
            routes.len() <= u8::MAX as usize,
            "panel positions must be addressable with u8"
        );

        let mut i = 0;
        while i < overrides.len() {
            let glyph_override = &overrides[i];
            assert!(
                (glyph_override.position as usize) < routes.len(),
                "glyph override position out of range"
            );
            assert!(
                glyph::is_printable(glyph_override.character),
                "glyph override character has no glyph"
            );
            assert!(
                glyph::is_printable(glyph_override.substitute),
                "glyph override substitute has no glyph"
            );
            i += 1;
        }

        let mut i = 0;
        while i < indicators.len() {
            let mut j = i + 1;
            while j < indicators.len() {
                assert!(
                    indicators[i].0 as u8 != indicators[j].0 as u8,
                    "duplicate indicator in panel"
                );
                j += 1;
            }
            i += 1;
        }

        Self {
            routes,
            indicators,
            colon,
            overrides,
        }
    }

    /// Number of character positions.
    #[must_use]
    #[expect(clippy::cast_possible_truncation, reason = "Checked in `new`")]
    pub const fn width(&self) -> u8 {
        self.routes.len() as u8
    }

    #[must_use]
    pub const fn routes(&self) -> &'static [PositionRoute] {
        self.routes
    }

    /// The route for `position`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRangePosition`] if the panel has no such position.
    pub fn route(&self, position: u8) -> Result<&'static PositionRoute> {
        self.routes
            .get(usize::from(position))
            .ok_or(Error::OutOfRangePosition(position))
    }

    /// The glyph to draw for `character` at `position`, after overrides.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRangeCharacter`] if `character` has no glyph.
    pub fn glyph_at(&self, character: char, position: u8) -> Result<u8> {
        let resolved = self
            .overrides
            .iter()
            .find(|glyph_override| {
                glyph_override.character == character && glyph_override.position == position
            })
            .map_or(character, |glyph_override| glyph_override.substitute);
        glyph_of(resolved)
    }

    /// The segment that lights `indicator`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnwiredIndicator`] if this panel has no such symbol.
    pub fn indicator(&self, indicator: Indicator) -> Result<SegmentAddress> {
        self.indicators
            .iter()
            .find(|(candidate, _)| *candidate == indicator)
            .map(|(_, address)| *address)
            .ok_or(Error::UnwiredIndicator(indicator))
    }

    pub fn indicators(&self) -> impl Iterator<Item = (Indicator, SegmentAddress)> + '_ {
        self.indicators.iter().copied()
    }

    #[must_use]
    pub const fn colon(&self) -> SegmentAddress {
        self.colon
    }
}

const fn seg(row: u8, column: u8) -> Slot {
    Slot::Segment(SegmentAddress::at(row, column))
}

const ABSENT: Slot = Slot::Absent;

/// Segment routes of the standard ten-position watch glass.
///
/// Several positions drive two logical segments from one line (positions 4 and
/// 6 share A with D), which is why those positions need glyph overrides.
#[rustfmt::skip]
pub const SENSOR_WATCH_ROUTES: [PositionRoute; 10] = [
    PositionRoute::new([seg(0, 13), seg(1, 13), seg(2, 13), seg(2, 15), seg(2, 14), seg(0, 14), seg(1, 15), seg(1, 14)]),
    PositionRoute::new([seg(0, 11), seg(1, 11), seg(1, 11), seg(2, 11), seg(1, 12), seg(1, 12), seg(2, 12), seg(0, 12)]),
    PositionRoute::new([seg(1, 9), seg(0, 9), seg(2, 9), seg(1, 9), seg(0, 10), ABSENT, seg(1, 9), ABSENT]),
    PositionRoute::new([seg(0, 7), seg(1, 7), seg(2, 7), seg(2, 6), seg(2, 8), seg(0, 8), seg(1, 8), ABSENT]),
    PositionRoute::new([seg(1, 18), seg(2, 19), seg(0, 19), seg(1, 18), seg(0, 18), seg(2, 18), seg(1, 19), ABSENT]),
    PositionRoute::new([seg(2, 20), seg(2, 21), seg(1, 21), seg(0, 21), seg(0, 20), seg(1, 17), seg(1, 20), ABSENT]),
    PositionRoute::new([seg(0, 22), seg(2, 23), seg(0, 23), seg(0, 22), seg(1, 22), seg(2, 22), seg(1, 23), ABSENT]),
    PositionRoute::new([seg(2, 1), seg(2, 10), seg(0, 1), seg(0, 0), seg(1, 0), seg(2, 0), seg(1, 1), ABSENT]),
    PositionRoute::new([seg(2, 2), seg(2, 3), seg(0, 4), seg(0, 3), seg(0, 2), seg(1, 2), seg(1, 3), ABSENT]),
    PositionRoute::new([seg(2, 4), seg(2, 5), seg(1, 6), seg(0, 6), seg(0, 5), seg(1, 4), seg(1, 5), ABSENT]),
];

pub const SENSOR_WATCH_INDICATORS: [(Indicator, SegmentAddress); 5] = [
    (Indicator::Signal, SegmentAddress::at(0, 17)),
    (Indicator::Bell, SegmentAddress::at(0, 16)),
    (Indicator::Pm, SegmentAddress::at(2, 17)),
    (Indicator::TwentyFourHour, SegmentAddress::at(2, 16)),
    (Indicator::Lap, SegmentAddress::at(1, 10)),
];

pub const SENSOR_WATCH_COLON: SegmentAddress = SegmentAddress::at(1, 16);

/// A plain `7` loses its top stroke where A and D share a line; `&` draws the
/// closest shape those positions can show.
pub const SENSOR_WATCH_OVERRIDES: [GlyphOverride; 2] = [
    GlyphOverride::new('7', 4, '&'),
    GlyphOverride::new('7', 6, '&'),
];

/// The standard ten-position watch glass.
pub static SENSOR_WATCH_PANEL: PanelLayout = PanelLayout::new(
    &SENSOR_WATCH_ROUTES,
    &SENSOR_WATCH_INDICATORS,
    SENSOR_WATCH_COLON,
    &SENSOR_WATCH_OVERRIDES,
);

#[cfg(all(test, not(target_os = "none")))]
mod tests {
    use super::*;

    #[test]
    fn test_width() {
        assert_eq!(SENSOR_WATCH_PANEL.width(), 10);
        assert!(SENSOR_WATCH_PANEL.route(9).is_ok());
        assert_eq!(
            SENSOR_WATCH_PANEL.route(10),
            Err(Error::OutOfRangePosition(10))
        );
    }

    #[test]
    fn test_glyph_override_only_at_listed_positions() {
        let ampersand = glyph_of('&').unwrap();
        let seven = glyph_of('7').unwrap();
        assert_eq!(SENSOR_WATCH_PANEL.glyph_at('7', 4), Ok(ampersand));
        assert_eq!(SENSOR_WATCH_PANEL.glyph_at('7', 6), Ok(ampersand));
        for position in [0, 1, 2, 3, 5, 7, 8, 9] {
            assert_eq!(SENSOR_WATCH_PANEL.glyph_at('7', position), Ok(seven));
        }
        assert_eq!(SENSOR_WATCH_PANEL.glyph_at('1', 4), glyph_of('1'));
    }

    #[test]
    fn test_glyph_at_rejects_unprintable() {
        assert_eq!(
            SENSOR_WATCH_PANEL.glyph_at('\u{1}', 0),
            Err(Error::OutOfRangeCharacter('\u{1}'))
        );
    }

    #[test]
    fn test_indicator_lookup() {
        const ROUTES: [PositionRoute; 1] = [PositionRoute::new([ABSENT; SLOT_COUNT])];
        static BARE: PanelLayout = PanelLayout::new(&ROUTES, &[], SegmentAddress::at(0, 0), &[]);

        assert_eq!(
            SENSOR_WATCH_PANEL.indicator(Indicator::Bell),
            Ok(SegmentAddress::at(0, 16))
        );
        assert_eq!(SENSOR_WATCH_PANEL.indicators().count(), Indicator::ALL.len());
        assert_eq!(
            BARE.indicator(Indicator::Lap),
            Err(Error::UnwiredIndicator(Indicator::Lap))
        );
    }

    #[test]
    fn test_present_count() {
        assert_eq!(SENSOR_WATCH_ROUTES[0].present_count(), 8);
        assert_eq!(SENSOR_WATCH_ROUTES[2].present_count(), 6);
        assert_eq!(SENSOR_WATCH_ROUTES[9].present_count(), 7);
    }
}
