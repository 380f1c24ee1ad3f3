//! Command grammar.
//!
//! ```text
//! LED:<sym><val>   sym ∈ {G,O,R,B,A}, val ∈ {0,1}
//! GET:LED
//! ```
//!
//! Matching is prefix-based and case-sensitive.  The prefixes are
//! disjoint, so the first match is the only match.  Bytes after the
//! recognised part of the token are ignored, which lets `\r\n` peers work.

use crate::app::commands::{Channel, Command};
use crate::error::ParseError;

use super::Frame;

const SET_PREFIX: &[u8] = b"LED:";
const QUERY_PREFIX: &[u8] = b"GET:LED";
const ALL_SYMBOL: u8 = b'A';

/// Decode the token carried by an inbound frame.
pub fn parse_frame(frame: &Frame) -> Command {
    parse(frame.token())
}

/// Decode a bounded token (no `\n`, no NUL) into a [`Command`].
pub fn parse(token: &[u8]) -> Command {
    match try_parse(token) {
        Ok(cmd) => cmd,
        Err(e) => Command::Unrecognized(e),
    }
}

fn try_parse(token: &[u8]) -> Result<Command, ParseError> {
    if let Some(args) = token.strip_prefix(SET_PREFIX) {
        return parse_set(args);
    }
    if token.starts_with(QUERY_PREFIX) {
        return Ok(Command::Query);
    }
    Err(ParseError::UnknownVerb)
}

fn parse_set(args: &[u8]) -> Result<Command, ParseError> {
    // A missing byte reads as NUL, the same as an unterminated C string.
    let symbol = args.first().copied().unwrap_or(0);
    let value = args.get(1).copied().unwrap_or(0);

    // The value byte is validated before the symbol.
    let on = match value {
        b'0' => false,
        b'1' => true,
        other => return Err(ParseError::InvalidValue(other)),
    };

    if symbol == ALL_SYMBOL {
        return Ok(Command::SetAll(on));
    }
    Channel::from_symbol(symbol)
        .map(|channel| Command::SetChannel { channel, on })
        .ok_or(ParseError::UnknownChannel(symbol))
}
