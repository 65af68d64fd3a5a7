//! A [`SegmentLcd`] that records every write instead of driving glass.
//!
//! Used for host tests and for bring-up, where it can stand in for the
//! controller and show exactly which segments a screen touches.

use heapless::Vec;

use crate::segment::{COLUMN_COUNT, ROW_COUNT, SegmentAddress, SegmentLcd, SegmentWrite};

/// Records up to `N` writes and tracks the resulting on/off state of every segment.
#[derive(Debug, Clone)]
pub struct RecordingLcd<const N: usize> {
    writes: Vec<SegmentWrite, N>,
    overflowed: bool,
    lit: [u32; ROW_COUNT as usize],
    enabled: bool,
    enable_count: u32,
}

impl<const N: usize> RecordingLcd<N> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            writes: Vec::new(),
            overflowed: false,
            lit: [0; ROW_COUNT as usize],
            enabled: false,
            enable_count: 0,
        }
    }

    /// Writes recorded since creation or the last [`clear_log`](Self::clear_log).
    #[must_use]
    pub fn writes(&self) -> &[SegmentWrite] {
        &self.writes
    }

    /// `true` if writes were dropped because the log was full.
    #[must_use]
    pub const fn overflowed(&self) -> bool {
        self.overflowed
    }

    /// Forgets the write log but keeps the segment state.
    pub fn clear_log(&mut self) {
        self.writes.clear();
        self.overflowed = false;
    }

    /// Current state of one segment.
    #[must_use]
    pub fn is_lit(&self, address: SegmentAddress) -> bool {
        self.lit
            .get(usize::from(address.row()))
            .is_some_and(|row| row & column_mask(address.column()) != 0)
    }

    /// Number of segments currently on.
    #[must_use]
    pub fn lit_count(&self) -> u32 {
        self.lit.iter().map(|row| row.count_ones()).sum()
    }

    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// How many times the controller has been attached.
    #[must_use]
    pub const fn enable_count(&self) -> u32 {
        self.enable_count
    }
}

impl<const N: usize> Default for RecordingLcd<N> {
    fn default() -> Self {
        Self::new()
    }
}

fn column_mask(column: u8) -> u32 {
    1u32.checked_shl(u32::from(column)).unwrap_or(0)
}

impl<const N: usize> SegmentLcd for RecordingLcd<N> {
    fn set_segment(&mut self, row: u8, column: u8, on: bool) {
        let Some(address) = SegmentAddress::new(row, column) else {
            return;
        };
        if let Some(bits) = self.lit.get_mut(usize::from(row)) {
            let mask = column_mask(column);
            if on {
                *bits |= mask;
            } else {
                *bits &= !mask;
            }
        }
        if self.writes.push(SegmentWrite { address, on }).is_err() {
            self.overflowed = true;
        }
    }

    fn enable(&mut self) {
        self.enabled = true;
        self.enable_count = self.enable_count.saturating_add(1);
    }

    // Glass content is lost when the controller is detached.
    fn disable(&mut self) {
        self.enabled = false;
        self.lit = [0; ROW_COUNT as usize];
    }
}

const _: () = assert!(COLUMN_COUNT as u32 <= u32::BITS, "row bitmap too narrow");

#[cfg(all(test, not(target_os = "none")))]
mod tests {
    use super::*;

    #[test]
    fn test_tracks_state() {
        let mut lcd = RecordingLcd::<8>::new();
        lcd.set_segment(1, 23, true);
        lcd.set_segment(0, 0, true);
        lcd.set_segment(0, 0, false);
        assert!(lcd.is_lit(SegmentAddress::at(1, 23)));
        assert!(!lcd.is_lit(SegmentAddress::at(0, 0)));
        assert_eq!(lcd.lit_count(), 1);
        assert_eq!(lcd.writes().len(), 3);
    }

    #[test]
    fn test_every_column_has_its_own_bit() {
        let mut lcd = RecordingLcd::<128>::new();
        for row in 0..ROW_COUNT {
            for column in 0..COLUMN_COUNT {
                lcd.set_segment(row, column, true);
            }
        }
        assert_eq!(lcd.lit_count(), u32::from(ROW_COUNT) * u32::from(COLUMN_COUNT));
        lcd.set_segment(2, COLUMN_COUNT - 1, false);
        assert!(!lcd.is_lit(SegmentAddress::at(2, COLUMN_COUNT - 1)));
        assert!(lcd.is_lit(SegmentAddress::at(2, COLUMN_COUNT - 2)));
        // Off-controller writes are ignored.
        lcd.set_segment(0, COLUMN_COUNT, true);
        assert_eq!(lcd.writes().len(), 3 * usize::from(COLUMN_COUNT) + 1);
    }

    #[test]
    fn test_overflow() {
        let mut lcd = RecordingLcd::<2>::new();
        for column in 0..3 {
            lcd.set_segment(0, column, true);
        }
        assert!(lcd.overflowed());
        assert_eq!(lcd.writes().len(), 2);
        assert_eq!(lcd.lit_count(), 3);
        lcd.clear_log();
        assert!(!lcd.overflowed());
        assert!(lcd.writes().is_empty());
    }

    #[test]
    fn test_disable_blanks_glass() {
        let mut lcd = RecordingLcd::<4>::new();
        lcd.enable();
        lcd.set_segment(2, 5, true);
        lcd.disable();
        assert!(!lcd.is_enabled());
        assert_eq!(lcd.lit_count(), 0);
        lcd.enable();
        assert_eq!(lcd.enable_count(), 2);
    }
}
