//! Physical segment addressing and the hardware write primitive.
//!
//! A segment is one illuminable element of the LCD, addressed by the COM line
//! (row) that drives it and the SEG line (column) that selects it.

/// Number of COM lines (rows) that carry segments.
pub const ROW_COUNT: u8 = 3;

/// Number of SEG lines (columns) routed to the glass.
pub const COLUMN_COUNT: u8 = 24;

/// Packed slot value reserved for "no segment here" (`row == 3`).
const PACKED_ABSENT_ROW: u8 = 3;

/// The write primitive supplied by the board's segment LCD controller.
///
/// `set_segment` is unconditional and idempotent. The display service only
/// calls it with addresses it has already validated.
pub trait SegmentLcd {
    /// Turns the segment at (`row`, `column`) on or off.
    fn set_segment(&mut self, row: u8, column: u8, on: bool);

    /// Attaches the controller and starts refresh.
    fn enable(&mut self) {}

    /// Detaches the controller, e.g. before entering backup sleep.
    fn disable(&mut self) {}
}

impl<L: SegmentLcd + ?Sized> SegmentLcd for &mut L {
    fn set_segment(&mut self, row: u8, column: u8, on: bool) {
        (**self).set_segment(row, column, on);
    }

    fn enable(&mut self) {
        (**self).enable();
    }

    fn disable(&mut self) {
        (**self).disable();
    }
}

/// A validated (row, column) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SegmentAddress {
    row: u8,
    column: u8,
}

impl SegmentAddress {
    /// Returns the address, or `None` if it is outside the controller.
    #[must_use]
    pub const fn new(row: u8, column: u8) -> Option<Self> {
        if row < ROW_COUNT && column < COLUMN_COUNT {
            Some(Self { row, column })
        } else {
            None
        }
    }

    /// Const constructor for tables.
    ///
    /// # Panics
    ///
    /// Panics (at compile time when used in a `const`) if the address is out of range.
    #[must_use]
    pub const fn at(row: u8, column: u8) -> Self {
        assert!(row < ROW_COUNT, "segment row out of range");
        assert!(column < COLUMN_COUNT, "segment column out of range");
        Self { row, column }
    }

    #[must_use]
    pub const fn row(self) -> u8 {
        self.row
    }

    #[must_use]
    pub const fn column(self) -> u8 {
        self.column
    }

    /// Writes this segment through the primitive.
    pub fn write<L: SegmentLcd + ?Sized>(self, lcd: &mut L, on: bool) {
        lcd.set_segment(self.row, self.column, on);
    }
}

/// One logical segment slot of a character position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Slot {
    Segment(SegmentAddress),
    /// No physical segment backs this logical slot at this position.
    Absent,
}

impl Slot {
    /// Decodes one packed byte: row in the two high bits, column in the six low bits.
    ///
    /// # Panics
    ///
    /// Panics (at compile time when used in a `const`) if the column is out of range.
    #[must_use]
    pub const fn from_packed(byte: u8) -> Self {
        let row = byte >> 6;
        if row == PACKED_ABSENT_ROW {
            Self::Absent
        } else {
            Self::Segment(SegmentAddress::at(row, byte & 0x3F))
        }
    }

    #[must_use]
    pub const fn address(self) -> Option<SegmentAddress> {
        match self {
            Self::Segment(address) => Some(address),
            Self::Absent => None,
        }
    }
}

/// A single primitive write, as issued by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SegmentWrite {
    pub address: SegmentAddress,
    pub on: bool,
}

impl SegmentWrite {
    #[must_use]
    pub const fn clear(address: SegmentAddress) -> Self {
        Self { address, on: false }
    }

    #[must_use]
    pub const fn set(address: SegmentAddress) -> Self {
        Self { address, on: true }
    }

    pub fn apply<L: SegmentLcd + ?Sized>(self, lcd: &mut L) {
        self.address.write(lcd, self.on);
    }
}
