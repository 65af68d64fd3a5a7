//! Display requests posted from interrupt context.
//!
//! An interrupt handler (a tick, a button) can queue a [`DisplayCommand`] with
//! [`post`] instead of drawing directly; the main flow then applies the queue
//! with [`SegmentDisplay::drain`](crate::SegmentDisplay::drain).

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use heapless::String;

use crate::indicator::Indicator;
use crate::{Error, Result};

/// Longest text a queued [`DisplayCommand::Text`] carries.
pub const COMMAND_TEXT_CAPACITY: usize = 16;

/// One queued display request.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayCommand {
    Character { character: char, position: u8 },
    Text {
        text: String<COMMAND_TEXT_CAPACITY>,
        start_position: u8,
    },
    ClearCharacters,
    SetIndicator(Indicator),
    ClearIndicator(Indicator),
    SetColon,
    ClearColon,
    ClearAllIndicators,
}

impl DisplayCommand {
    /// A text request; characters beyond [`COMMAND_TEXT_CAPACITY`] bytes are dropped,
    /// the same way the display drops characters past its last position.
    #[must_use]
    pub fn text(text: &str, start_position: u8) -> Self {
        let mut truncated = String::new();
        for character in text.chars() {
            if truncated.push(character).is_err() {
                break;
            }
        }
        Self::Text {
            text: truncated,
            start_position,
        }
    }
}

/// Queue of display requests.
pub type DisplayCommands<const N: usize> = Channel<CriticalSectionRawMutex, DisplayCommand, N>;

/// Creates an empty queue, for use in a `static`.
#[must_use]
pub const fn commands<const N: usize>() -> DisplayCommands<N> {
    Channel::new()
}

/// Queues `command` without blocking.
///
/// # Errors
///
/// Returns [`Error::CommandQueueFull`] if the queue has no room; the command is dropped.
pub fn post<const N: usize>(commands: &DisplayCommands<N>, command: DisplayCommand) -> Result<()> {
    commands.try_send(command).map_err(|_| {
        #[cfg(feature = "defmt")]
        defmt::info!("display command queue full, command dropped");
        Error::CommandQueueFull
    })
}
