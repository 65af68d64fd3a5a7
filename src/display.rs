//! The display service: the only owner of the segment LCD write path.
//!
//! See [`SegmentDisplay`] for usage.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;

use crate::command::{DisplayCommand, DisplayCommands};
use crate::glyph::Segments;
use crate::indicator::Indicator;
use crate::panel::PanelLayout;
use crate::renderer;
use crate::segment::{SegmentAddress, SegmentLcd};
use crate::{Error, Result};

struct DisplayState<L> {
    lcd: L,
    enabled: bool,
}

impl<L> DisplayState<L> {
    const fn check_enabled(&self) -> Result<()> {
        if self.enabled {
            Ok(())
        } else {
            Err(Error::DisplayDisabled)
        }
    }
}

/// Draws characters, indicators, and raw pixels on a multiplexed segment LCD.
///
/// Every call runs inside a critical section, so a tick interrupt that toggles
/// the colon can never land in the middle of a half-drawn character. The
/// constructor is `const`, so the display can live in a `static` shared by
/// thread and interrupt context.
///
/// Content is not kept across [`disable_display`](Self::disable_display);
/// redraw after enabling again.
///
/// # Example
///
/// ```rust
/// use slcd_kit::{Indicator, RecordingLcd, SENSOR_WATCH_PANEL, SegmentDisplay};
///
/// static DISPLAY: SegmentDisplay<RecordingLcd<256>> =
///     SegmentDisplay::new(RecordingLcd::new(), &SENSOR_WATCH_PANEL);
///
/// fn main() -> slcd_kit::Result<()> {
///     DISPLAY.enable_display();
///     DISPLAY.show_string("MO 15 1030", 0)?;
///     DISPLAY.set_colon()?;
///     DISPLAY.set_indicator(Indicator::Bell)?;
///     Ok(())
/// }
/// ```
pub struct SegmentDisplay<L: SegmentLcd> {
    panel: &'static PanelLayout,
    state: Mutex<CriticalSectionRawMutex, RefCell<DisplayState<L>>>,
}

impl<L: SegmentLcd> SegmentDisplay<L> {
    /// Wraps `lcd`; the display starts disabled.
    #[must_use]
    pub const fn new(lcd: L, panel: &'static PanelLayout) -> Self {
        Self {
            panel,
            state: Mutex::new(RefCell::new(DisplayState {
                lcd,
                enabled: false,
            })),
        }
    }

    #[must_use]
    pub const fn panel(&self) -> &'static PanelLayout {
        self.panel
    }

    fn with_state<R>(&self, f: impl FnOnce(&mut DisplayState<L>) -> R) -> R {
        self.state.lock(|cell| f(&mut cell.borrow_mut()))
    }

    /// Attaches the controller and starts refresh.
    pub fn enable_display(&self) {
        self.with_state(|state| {
            state.lcd.enable();
            state.enabled = true;
        });
        #[cfg(feature = "defmt")]
        defmt::debug!("segment display enabled");
    }

    /// Detaches the controller, e.g. before backup sleep. Glass content is lost.
    pub fn disable_display(&self) {
        self.with_state(|state| {
            state.lcd.disable();
            state.enabled = false;
        });
        #[cfg(feature = "defmt")]
        defmt::debug!("segment display disabled");
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.with_state(|state| state.enabled)
    }

    /// Draws `character` at `position`.
    ///
    /// # Errors
    ///
    /// - [`Error::OutOfRangePosition`] if the panel has no such position.
    /// - [`Error::OutOfRangeCharacter`] if `character` is not printable ASCII.
    /// - [`Error::DisplayDisabled`] if the display is not enabled.
    ///
    /// On error nothing is written.
    pub fn show_character(&self, character: char, position: u8) -> Result<()> {
        let route = self.panel.route(position).inspect_err(log_rejected)?;
        let pattern = self
            .panel
            .glyph_at(character, position)
            .inspect_err(log_rejected)?;
        self.with_state(|state| -> Result<_> {
            state.check_enabled()?;
            renderer::render(&mut state.lcd, pattern, route);
            Ok(())
        })
    }

    /// Draws `text` from `start_position` rightwards and returns how many
    /// positions were written.
    ///
    /// Characters past the last position are dropped. Characters without a
    /// glyph are drawn blank.
    ///
    /// # Errors
    ///
    /// - [`Error::OutOfRangePosition`] if `start_position` is off the panel.
    /// - [`Error::DisplayDisabled`] if the display is not enabled.
    pub fn show_string(&self, text: &str, start_position: u8) -> Result<usize> {
        self.panel
            .route(start_position)
            .inspect_err(log_rejected)?;
        self.with_state(|state| -> Result<_> {
            state.check_enabled()?;
            let mut placed = 0usize;
            for (character, position) in text.chars().zip(start_position..self.panel.width()) {
                let pattern = self
                    .panel
                    .glyph_at(character, position)
                    .unwrap_or(Segments::SPACE);
                let route = self.panel.route(position)?;
                renderer::render(&mut state.lcd, pattern, route);
                placed = placed.saturating_add(1);
            }
            Ok(placed)
        })
    }

    /// Blanks every character position. Indicators and the colon are untouched.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DisplayDisabled`] if the display is not enabled.
    pub fn clear_characters(&self) -> Result<()> {
        self.with_state(|state| -> Result<_> {
            state.check_enabled()?;
            for route in self.panel.routes() {
                renderer::render(&mut state.lcd, Segments::SPACE, route);
            }
            Ok(())
        })
    }

    /// Turns on one raw segment.
    ///
    /// # Errors
    ///
    /// - [`Error::OutOfRangeSegment`] if the address is outside the controller.
    /// - [`Error::DisplayDisabled`] if the display is not enabled.
    pub fn set_pixel(&self, row: u8, column: u8) -> Result<()> {
        self.write_pixel(row, column, true)
    }

    /// Turns off one raw segment.
    ///
    /// # Errors
    ///
    /// - [`Error::OutOfRangeSegment`] if the address is outside the controller.
    /// - [`Error::DisplayDisabled`] if the display is not enabled.
    pub fn clear_pixel(&self, row: u8, column: u8) -> Result<()> {
        self.write_pixel(row, column, false)
    }

    fn write_pixel(&self, row: u8, column: u8, on: bool) -> Result<()> {
        let address = SegmentAddress::new(row, column)
            .ok_or(Error::OutOfRangeSegment { row, column })
            .inspect_err(log_rejected)?;
        self.write_segment(address, on)
    }

    fn write_segment(&self, address: SegmentAddress, on: bool) -> Result<()> {
        self.with_state(|state| -> Result<_> {
            state.check_enabled()?;
            address.write(&mut state.lcd, on);
            Ok(())
        })
    }

    /// # Errors
    ///
    /// Returns [`Error::DisplayDisabled`] if the display is not enabled.
    pub fn set_colon(&self) -> Result<()> {
        self.write_segment(self.panel.colon(), true)
    }

    /// # Errors
    ///
    /// Returns [`Error::DisplayDisabled`] if the display is not enabled.
    pub fn clear_colon(&self) -> Result<()> {
        self.write_segment(self.panel.colon(), false)
    }

    /// Lights `indicator`.
    ///
    /// # Errors
    ///
    /// - [`Error::UnwiredIndicator`] if the panel has no such symbol.
    /// - [`Error::DisplayDisabled`] if the display is not enabled.
    pub fn set_indicator(&self, indicator: Indicator) -> Result<()> {
        let address = self.panel.indicator(indicator).inspect_err(log_rejected)?;
        self.write_segment(address, true)
    }

    /// Turns `indicator` off.
    ///
    /// # Errors
    ///
    /// - [`Error::UnwiredIndicator`] if the panel has no such symbol.
    /// - [`Error::DisplayDisabled`] if the display is not enabled.
    pub fn clear_indicator(&self, indicator: Indicator) -> Result<()> {
        let address = self.panel.indicator(indicator).inspect_err(log_rejected)?;
        self.write_segment(address, false)
    }

    /// Lights the indicator called `name` (see [`Indicator::name`]).
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidIndicatorName`] if no indicator has that name.
    /// - Otherwise as [`set_indicator`](Self::set_indicator).
    pub fn set_indicator_named(&self, name: &str) -> Result<()> {
        self.set_indicator(Indicator::from_name(name).inspect_err(log_rejected)?)
    }

    /// Turns off the indicator called `name` (see [`Indicator::name`]).
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidIndicatorName`] if no indicator has that name.
    /// - Otherwise as [`clear_indicator`](Self::clear_indicator).
    pub fn clear_indicator_named(&self, name: &str) -> Result<()> {
        self.clear_indicator(Indicator::from_name(name).inspect_err(log_rejected)?)
    }

    /// Turns off every indicator of the panel and the colon.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DisplayDisabled`] if the display is not enabled.
    pub fn clear_all_indicators(&self) -> Result<()> {
        self.with_state(|state| -> Result<_> {
            state.check_enabled()?;
            for (_, address) in self.panel.indicators() {
                address.write(&mut state.lcd, false);
            }
            self.panel.colon().write(&mut state.lcd, false);
            Ok(())
        })
    }

    /// Carries out one queued request.
    ///
    /// # Errors
    ///
    /// Returns the error of the underlying operation.
    pub fn apply(&self, command: &DisplayCommand) -> Result<()> {
        match command {
            DisplayCommand::Character {
                character,
                position,
            } => self.show_character(*character, *position),
            DisplayCommand::Text {
                text,
                start_position,
            } => self.show_string(text, *start_position).map(|_| ()),
            DisplayCommand::ClearCharacters => self.clear_characters(),
            DisplayCommand::SetIndicator(indicator) => self.set_indicator(*indicator),
            DisplayCommand::ClearIndicator(indicator) => self.clear_indicator(*indicator),
            DisplayCommand::SetColon => self.set_colon(),
            DisplayCommand::ClearColon => self.clear_colon(),
            DisplayCommand::ClearAllIndicators => self.clear_all_indicators(),
        }
    }

    /// Applies every command waiting in `commands` and returns how many were
    /// applied successfully. Failed commands are logged and skipped.
    pub fn drain<const N: usize>(&self, commands: &DisplayCommands<N>) -> usize {
        let mut applied = 0usize;
        while let Ok(command) = commands.try_receive() {
            match self.apply(&command) {
                Ok(()) => applied = applied.saturating_add(1),
                Err(_err) => {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("display command failed: {}", _err);
                }
            }
        }
        applied
    }

    /// Grants temporary access to the driver, e.g. to inspect a [`RecordingLcd`](crate::RecordingLcd).
    pub fn with_lcd<R>(&self, f: impl FnOnce(&mut L) -> R) -> R {
        self.with_state(|state| f(&mut state.lcd))
    }
}

fn log_rejected(_err: &Error) {
    #[cfg(feature = "defmt")]
    defmt::warn!("display request rejected: {}", _err);
}

#[cfg(all(test, not(target_os = "none")))]
mod tests {
    use super::*;
    use crate::panel::SENSOR_WATCH_PANEL;
    use crate::recording_lcd::RecordingLcd;

    type TestDisplay = SegmentDisplay<RecordingLcd<512>>;

    fn enabled_display() -> TestDisplay {
        let display = SegmentDisplay::new(RecordingLcd::new(), &SENSOR_WATCH_PANEL);
        display.enable_display();
        display
    }

    #[test]
    fn test_starts_disabled() {
        let display: TestDisplay = SegmentDisplay::new(RecordingLcd::new(), &SENSOR_WATCH_PANEL);
        assert!(!display.is_enabled());
        assert_eq!(display.show_character('A', 0), Err(Error::DisplayDisabled));
        assert_eq!(display.set_colon(), Err(Error::DisplayDisabled));
        assert!(display.with_lcd(|lcd| lcd.writes().is_empty()));
    }

    #[test]
    fn test_enable_disable() {
        let display = enabled_display();
        assert!(display.is_enabled());
        assert!(display.with_lcd(|lcd| lcd.is_enabled()));
        display.show_character('8', 0).unwrap();
        display.disable_display();
        assert!(!display.is_enabled());
        assert_eq!(display.with_lcd(|lcd| lcd.lit_count()), 0);
        assert_eq!(display.show_string("12", 0), Err(Error::DisplayDisabled));
    }

    #[test]
    fn test_show_string_stops_at_panel_edge() {
        let display = enabled_display();
        assert_eq!(display.show_string("ABCDEF", 7), Ok(3));
        assert_eq!(display.show_string("", 0), Ok(0));
        assert_eq!(
            display.show_string("A", 10),
            Err(Error::OutOfRangePosition(10))
        );
    }

    #[test]
    fn test_show_string_blanks_unprintable() {
        let display = enabled_display();
        display.show_string("88", 0).unwrap();
        assert_eq!(display.show_string("\u{1}8", 0), Ok(2));
        let route = SENSOR_WATCH_PANEL.route(0).unwrap();
        let lit = display.with_lcd(|lcd| {
            route
                .iter()
                .filter_map(crate::segment::Slot::address)
                .any(|address| lcd.is_lit(address))
        });
        assert!(!lit);
    }

    #[test]
    fn test_pixel_passthrough() {
        let display = enabled_display();
        display.set_pixel(2, 23).unwrap();
        assert!(display.with_lcd(|lcd| lcd.is_lit(SegmentAddress::at(2, 23))));
        display.clear_pixel(2, 23).unwrap();
        assert!(!display.with_lcd(|lcd| lcd.is_lit(SegmentAddress::at(2, 23))));
        assert_eq!(
            display.set_pixel(3, 0),
            Err(Error::OutOfRangeSegment { row: 3, column: 0 })
        );
        assert_eq!(display.with_lcd(|lcd| lcd.writes().len()), 2);
    }

    #[test]
    fn test_named_indicators() {
        let display = enabled_display();
        display.set_indicator_named("pm").unwrap();
        assert!(display.with_lcd(|lcd| lcd.is_lit(SegmentAddress::at(2, 17))));
        assert_eq!(
            display.set_indicator_named("moon"),
            Err(Error::InvalidIndicatorName)
        );
        display.clear_indicator_named("PM").unwrap();
        assert!(!display.with_lcd(|lcd| lcd.is_lit(SegmentAddress::at(2, 17))));
    }

    #[test]
    fn test_clear_characters() {
        let display = enabled_display();
        display.show_string("8888888888", 0).unwrap();
        display.set_colon().unwrap();
        display.clear_characters().unwrap();
        // Only the colon survives.
        assert_eq!(display.with_lcd(|lcd| lcd.lit_count()), 1);
    }
}
