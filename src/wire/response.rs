//! Status responses clocked back to the peer.
//!
//! The response set is closed: `OK`, `ERR`, `STA:<bits>` and `RDY`, each
//! newline-terminated and well under `FRAME_CAPACITY - 1` bytes.

use core::fmt::{self, Write};

use crate::app::commands::Command;

use super::{CHANNEL_COUNT, FRAME_CAPACITY, Frame};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Response {
    Ok,
    Err,
    /// Channel states in index order.
    Status([bool; CHANNEL_COUNT]),
    /// Preloaded once, for the very first exchange.
    Ready,
}

impl Response {
    /// Response for a command that was recognised and applied.
    ///
    /// Returns `None` for [`Command::Unrecognized`]: the caller leaves the
    /// pre-seeded `ERR` in place.
    pub fn for_applied(command: &Command, channels: &[bool; CHANNEL_COUNT]) -> Option<Self> {
        match command {
            Command::SetChannel { .. } | Command::SetAll(_) => Some(Self::Ok),
            Command::Query => Some(Self::Status(*channels)),
            Command::Unrecognized(_) => None,
        }
    }

    /// Render into a frame, replacing its previous contents.
    pub fn write_to(&self, frame: &mut Frame) {
        let mut text: heapless::String<FRAME_CAPACITY> = heapless::String::new();
        // Every variant is far shorter than the capacity.
        let _ = write!(text, "{self}");
        frame.load(text.as_bytes());
    }

    pub fn to_frame(&self) -> Frame {
        let mut frame = Frame::zeroed();
        self.write_to(&mut frame);
        frame
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok => f.write_str("OK\n"),
            Self::Err => f.write_str("ERR\n"),
            Self::Ready => f.write_str("RDY\n"),
            Self::Status(channels) => {
                f.write_str("STA:")?;
                for &on in channels {
                    f.write_char(if on { '1' } else { '0' })?;
                }
                f.write_char('\n')
            }
        }
    }
}
