//! Port traits — the boundary between endpoint logic and the hardware.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ LinkContext / TransferFsm (domain)
//! ```
//!
//! The pin toggling and the duplex transfer engine are both capabilities
//! the core drives through these traits.  Production adapters live in
//! [`crate::adapters`]; the integration tests supply recording mocks.

use crate::error::TransportFault;
use crate::wire::Frame;

// ───────────────────────────────────────────────────────────────
// Actuator driver (domain → pins)
// ───────────────────────────────────────────────────────────────

/// Drives the physical output behind each channel.
///
/// Called only with indices in `0..CHANNEL_COUNT`.  Writes are idempotent;
/// the store may repeat a write with the same value.
pub trait ActuatorDriver {
    fn set_pin(&mut self, index: usize, on: bool);
}

impl<T: ActuatorDriver + ?Sized> ActuatorDriver for &mut T {
    fn set_pin(&mut self, index: usize, on: bool) {
        (**self).set_pin(index, on);
    }
}

// ───────────────────────────────────────────────────────────────
// Duplex transport, event-driven flavour
// ───────────────────────────────────────────────────────────────

/// A transfer engine that runs exchanges in the background and reports
/// completion or faults asynchronously, through the
/// [`events`](crate::events) queue.
pub trait DuplexTransport {
    /// Commit `outbound` as the next exchange's transmit data and start
    /// listening for the peer.  The transport keeps its own copy; the
    /// received bytes come back in an
    /// [`ExchangeCompleted`](crate::events::LinkEvent::ExchangeCompleted).
    fn arm(&mut self, outbound: &Frame) -> Result<(), TransportFault>;
}

// ───────────────────────────────────────────────────────────────
// Duplex transport, polled flavour
// ───────────────────────────────────────────────────────────────

/// A transfer engine driven synchronously from the main loop.
pub trait PolledTransport {
    /// Whether the peer has asserted the select line.
    fn exchange_requested(&mut self) -> bool;

    /// Run one full exchange, waiting at most `timeout_ms`.
    fn transfer(
        &mut self,
        outbound: &Frame,
        inbound: &mut Frame,
        timeout_ms: u32,
    ) -> Result<(), TransportFault>;
}
