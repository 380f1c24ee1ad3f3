//! Command dispatcher: frame in, response out.
//!
//! Parses the inbound frame, applies the command to the actuator store and
//! builds the response.  No I/O of its own; the result depends only on the
//! current channel state and the frame.

use log::debug;

use crate::wire::parser::parse_frame;
use crate::wire::{Frame, Response};

use super::actuators::ActuatorBank;
use super::commands::Command;
use super::ports::ActuatorDriver;

/// What happened to one inbound frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dispatch {
    pub command: Command,
    /// `None` leaves the pre-seeded `ERR` in the outbound frame.
    pub response: Option<Response>,
}

pub fn dispatch<D: ActuatorDriver>(bank: &mut ActuatorBank<D>, inbound: &Frame) -> Dispatch {
    let command = parse_frame(inbound);

    let applied = match command {
        Command::SetChannel { channel, on } => bank.set_channel(channel.index(), on).is_ok(),
        Command::SetAll(on) => {
            bank.set_all(on);
            true
        }
        Command::Query => true,
        Command::Unrecognized(reason) => {
            debug!("dispatch: rejected {:?} ({})", inbound, reason);
            false
        }
    };

    let response = if applied {
        Response::for_applied(&command, &bank.snapshot())
    } else {
        None
    };

    Dispatch { command, response }
}
