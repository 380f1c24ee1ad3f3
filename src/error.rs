//! Unified error types for the SPI LED endpoint.
//!
//! A single `Error` enum that every subsystem converts into.  None of these
//! are fatal: the transfer state machine absorbs every variant locally and
//! re-arms the next exchange.  All variants are `Copy` so they can travel
//! through the ISR event queue without allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The inbound frame did not match the command grammar.
    Parse(ParseError),
    /// A channel operation referenced a channel that does not exist.
    Channel(ChannelError),
    /// The duplex link reported a fault or refused to arm.
    Transport(TransportFault),
    /// Peripheral initialisation failed.
    Init(&'static str),
    /// Configuration is invalid or could not be loaded.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "parse: {e}"),
            Self::Channel(e) => write!(f, "channel: {e}"),
            Self::Transport(e) => write!(f, "transport: {e}"),
            Self::Init(msg) => write!(f, "init: {msg}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Parse errors
// ---------------------------------------------------------------------------

/// Why an inbound token was not recognised.  Never surfaced to the peer
/// beyond the pre-seeded `ERR` response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// Neither `LED:` nor `GET:LED` prefix.
    UnknownVerb,
    /// `LED:` followed by a symbol outside `G`, `O`, `R`, `B`, `A`.
    UnknownChannel(u8),
    /// `LED:` value byte other than `0` or `1` (including a missing byte).
    InvalidValue(u8),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownVerb => write!(f, "unknown command"),
            Self::UnknownChannel(b) => write!(f, "unknown channel symbol 0x{b:02x}"),
            Self::InvalidValue(b) => write!(f, "invalid value byte 0x{b:02x}"),
        }
    }
}

impl From<ParseError> for Error {
    fn from(e: ParseError) -> Self {
        Self::Parse(e)
    }
}

// ---------------------------------------------------------------------------
// Channel errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelError {
    /// Index outside `0..CHANNEL_COUNT`.
    InvalidIndex(usize),
}

impl fmt::Display for ChannelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidIndex(i) => write!(f, "invalid channel index {i}"),
        }
    }
}

impl From<ChannelError> for Error {
    fn from(e: ChannelError) -> Self {
        Self::Channel(e)
    }
}

// ---------------------------------------------------------------------------
// Transport faults
// ---------------------------------------------------------------------------

/// Link-level faults reported by the duplex transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportFault {
    /// Select line released before a full frame was clocked.
    Framing,
    /// Receive data arrived before the previous byte was consumed.
    Overrun,
    /// A bounded-wait transfer did not complete in time.
    Timeout,
    /// Bus mode / select conflict reported by the peripheral.
    ModeFault,
    /// The transport refused to arm a new exchange.
    Busy,
}

impl fmt::Display for TransportFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Framing => write!(f, "framing error"),
            Self::Overrun => write!(f, "receive overrun"),
            Self::Timeout => write!(f, "transfer timeout"),
            Self::ModeFault => write!(f, "mode fault"),
            Self::Busy => write!(f, "transport busy"),
        }
    }
}

impl From<TransportFault> for Error {
    fn from(e: TransportFault) -> Self {
        Self::Transport(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
