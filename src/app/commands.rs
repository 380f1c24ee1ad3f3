//! Commands decoded from the peer's inbound frames.
//!
//! A [`Command`] is produced by the [parser](crate::wire::parser) from one
//! frame and consumed by the [dispatcher](super::dispatcher); it is never
//! mutated in between.

use crate::error::ParseError;
use crate::wire::CHANNEL_COUNT;

/// One of the four indicator channels, in protocol index order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Channel {
    Green = 0,
    Orange = 1,
    Red = 2,
    Blue = 3,
}

impl Channel {
    /// All channels in index order.
    pub const ALL: [Channel; CHANNEL_COUNT] =
        [Self::Green, Self::Orange, Self::Red, Self::Blue];

    pub const fn index(self) -> usize {
        self as usize
    }

    /// The one-letter protocol symbol (`G`, `O`, `R`, `B`).
    pub const fn symbol(self) -> u8 {
        match self {
            Self::Green => b'G',
            Self::Orange => b'O',
            Self::Red => b'R',
            Self::Blue => b'B',
        }
    }

    pub fn from_symbol(symbol: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.symbol() == symbol)
    }
}

/// A decoded peer command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `LED:<G|O|R|B><0|1>`
    SetChannel { channel: Channel, on: bool },
    /// `LED:A<0|1>`
    SetAll(bool),
    /// `GET:LED`
    Query,
    /// Anything else.  The reason is kept for logging only.
    Unrecognized(ParseError),
}
