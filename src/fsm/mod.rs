//! Transfer / recovery state machine.
//!
//! ```text
//!            init()
//!   IDLE ────────────▶ PENDING ◀──┐
//!                        │  │     │ on_complete(): ERR, dispatch, stage, re-arm
//!                        │  └─────┤
//!                        │        │ on_fault():    reset, ERR, re-arm
//!                        └────────┘
//! ```
//!
//! `Pending` is the only steady state and there is no terminal state: an
//! exchange is armed after every `init`, `on_complete` and `on_fault`, so
//! the peer never finds the endpoint un-armed.
//!
//! Two drivers exist and they are mutually exclusive by construction:
//! [`TransferFsm`] consumes [`LinkEvent`]s raised by an asynchronous
//! transport, [`polling::PollingFsm`] runs bounded blocking transfers from
//! the main loop.  Each takes the [`LinkContext`] by value, see
//! [`Endpoint`](crate::app::service::Endpoint).

pub mod context;
pub mod polling;

use log::{debug, info, warn};

use crate::app::ports::{ActuatorDriver, DuplexTransport};
use crate::config::EndpointConfig;
use crate::diagnostics::LinkStats;
use crate::error::TransportFault;
use crate::events::{EventConsumer, LinkEvent};
use crate::wire::Frame;

use context::LinkContext;

// ---------------------------------------------------------------------------
// State identity
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum LinkState {
    /// Constructed, nothing armed yet.  Startup only.
    Idle = 0,
    /// An exchange is armed and waiting for the peer.
    Pending = 1,
}

impl LinkState {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Pending => "Pending",
        }
    }
}

// ---------------------------------------------------------------------------
// Event-driven driver
// ---------------------------------------------------------------------------

/// Drives the link from completion / fault events.
///
/// The consumer half of the event queue is owned here, so events are
/// handled strictly one at a time from [`service`](Self::service).
pub struct TransferFsm<'q, D, T> {
    ctx: LinkContext<D>,
    transport: T,
    events: EventConsumer<'q>,
    state: LinkState,
    rearm_attempts: u8,
    /// The last arm was refused; retry on the next service pass.
    rearm_due: bool,
}

impl<'q, D: ActuatorDriver, T: DuplexTransport> TransferFsm<'q, D, T> {
    pub(crate) fn new(
        ctx: LinkContext<D>,
        transport: T,
        events: EventConsumer<'q>,
        config: &EndpointConfig,
    ) -> Self {
        Self {
            ctx,
            transport,
            events,
            state: LinkState::Idle,
            rearm_attempts: config.rearm_attempts.max(1),
            rearm_due: false,
        }
    }

    /// Zero both buffers, stage `RDY`, arm the first exchange.  Runs once;
    /// later calls are ignored so `RDY` is never staged again.
    pub(crate) fn init(&mut self) {
        if self.state != LinkState::Idle {
            warn!("link already initialised; init ignored");
            return;
        }
        self.ctx.prime();
        self.transition(LinkState::Pending);
        self.rearm();
    }

    /// One exchange finished with `inbound` clocked in.
    pub fn on_complete(&mut self, inbound: &Frame) {
        if self.state == LinkState::Idle {
            warn!("exchange completed before init; dropped");
            return;
        }
        let outcome = self.ctx.process_inbound(inbound);
        debug!(
            "exchange: {:?} -> {:?}",
            outcome.command,
            self.ctx.outbound()
        );
        self.rearm();
    }

    /// The link reported a fault.  Never fatal.
    pub fn on_fault(&mut self, fault: TransportFault) {
        if self.state == LinkState::Idle {
            warn!("link fault before init ({}); dropped", fault);
            return;
        }
        warn!("link fault: {}; resetting buffers", fault);
        self.ctx.recover();
        self.rearm();
    }

    pub fn handle(&mut self, event: LinkEvent) {
        match event {
            LinkEvent::ExchangeCompleted(inbound) => self.on_complete(&inbound),
            LinkEvent::ExchangeFaulted(fault) => self.on_fault(fault),
        }
    }

    /// Drain every queued event in order, then retry a deferred arm.
    /// Returns the number of events handled.
    pub fn service(&mut self) -> usize {
        let mut handled = 0;
        while let Some(event) = self.events.dequeue() {
            self.handle(event);
            handled += 1;
        }
        if self.rearm_due && self.state == LinkState::Pending {
            self.rearm();
        }
        handled
    }

    pub fn state(&self) -> LinkState {
        self.state
    }

    /// Whether a refused arm is waiting to be retried.
    pub fn rearm_due(&self) -> bool {
        self.rearm_due
    }

    pub fn set_channel(&mut self, index: usize, on: bool) {
        self.ctx.set_channel(index, on);
    }

    pub fn get_channel(&self, index: usize) -> bool {
        self.ctx.get_channel(index)
    }

    pub fn outbound(&self) -> &Frame {
        self.ctx.outbound()
    }

    pub fn stats(&self) -> &LinkStats {
        self.ctx.stats()
    }

    pub fn context(&self) -> &LinkContext<D> {
        &self.ctx
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    // -----------------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------------

    fn transition(&mut self, next: LinkState) {
        if next != self.state {
            info!("link: {} -> {}", self.state.name(), next.name());
            self.state = next;
        }
    }

    fn rearm(&mut self) {
        for attempt in 1..=self.rearm_attempts {
            match self.transport.arm(&self.ctx.tx) {
                Ok(()) => {
                    self.rearm_due = false;
                    return;
                }
                Err(fault) => {
                    self.ctx.stats.record_arm_failure();
                    warn!(
                        "arm refused ({}), attempt {}/{}",
                        fault, attempt, self.rearm_attempts
                    );
                }
            }
        }
        self.rearm_due = true;
    }
}
