//! Character rendering for multiplexed segment LCDs, such as the ten-position
//! glass of a wrist watch.
//!
//! The controller has far fewer drive lines than the glass has segments, so
//! each character position has its own route from logical segments to physical
//! (row, column) addresses. [`SegmentDisplay`] turns characters and indicator
//! requests into writes through the board's [`SegmentLcd`] driver.
#![cfg_attr(not(test), no_std)]

pub mod command;
mod display;
mod error;
pub mod glyph;
mod indicator;
pub mod panel;
mod recording_lcd;
pub mod renderer;
pub mod segment;

// Re-export commonly used items
pub use command::{DisplayCommand, DisplayCommands};
pub use display::SegmentDisplay;
pub use error::{Error, Result};
pub use indicator::Indicator;
pub use panel::{PanelLayout, SENSOR_WATCH_PANEL};
pub use recording_lcd::RecordingLcd;
pub use segment::{SegmentAddress, SegmentLcd};
