//! Decodes a glyph pattern against a position route into segment writes.
//!
//! LCD segments hold their last state, so a character is always redrawn in full:
//! every physical segment of the position is cleared, then set again if the
//! pattern has its bit. Absent slots produce no writes at all.

use crate::panel::PositionRoute;
use crate::segment::{SegmentLcd, SegmentWrite};

/// Upper bound on the writes one character placement can issue.
pub const MAX_WRITES_PER_CHARACTER: usize = 2 * crate::panel::SLOT_COUNT;

/// The writes that draw `pattern` on `route`, low bit first.
pub fn writes(pattern: u8, route: &PositionRoute) -> impl Iterator<Item = SegmentWrite> + '_ {
    route
        .iter()
        .zip(0u32..)
        .filter_map(move |(slot, bit)| {
            let on = pattern.checked_shr(bit).is_some_and(|bits| bits & 1 == 1);
            slot.address().map(|address| (address, on))
        })
        .flat_map(|(address, on)| {
            core::iter::once(SegmentWrite::clear(address))
                .chain(on.then_some(SegmentWrite::set(address)))
        })
}

/// Draws `pattern` on `route` and returns the number of writes issued.
pub fn render<L: SegmentLcd + ?Sized>(lcd: &mut L, pattern: u8, route: &PositionRoute) -> usize {
    writes(pattern, route).fold(0, |count, write| {
        write.apply(lcd);
        count.saturating_add(1)
    })
}
