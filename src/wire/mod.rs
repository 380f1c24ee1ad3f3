//! Wire format for the SPI command link.
//!
//! Every exchange is a full-duplex transfer of exactly [`FRAME_CAPACITY`]
//! bytes, MSB first, framed by the select line, no CRC:
//!
//! ```text
//!  master ──▶ slave   "LED:G1\n" \0 \0 ... \0      (32 bytes)
//!  slave  ──▶ master  "OK\n"     \0 \0 ... \0      (32 bytes, one exchange late)
//! ```
//!
//! The response to a command is clocked out during the *next* exchange,
//! so the outbound frame of exchange `n + 1` carries the answer to the
//! inbound frame of exchange `n`.

pub mod frame;
pub mod parser;
pub mod response;

pub use frame::Frame;
pub use response::Response;

/// Bytes per exchange in each direction.
pub const FRAME_CAPACITY: usize = 32;

/// Number of actuator channels addressed by the protocol.
pub const CHANNEL_COUNT: usize = 4;
