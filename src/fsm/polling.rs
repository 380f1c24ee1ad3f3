//! Polling driver: the same exchange contract, triggered from the main loop.
//!
//! Each call to [`PollingFsm::drive_exchange_once`] checks the select line
//! and, if the peer is waiting, runs one bounded blocking transfer.  The
//! outbound frame staged by the previous call is what the peer receives.

use log::{debug, info, warn};

use crate::app::dispatcher::Dispatch;
use crate::app::ports::{ActuatorDriver, PolledTransport};
use crate::config::EndpointConfig;
use crate::diagnostics::LinkStats;
use crate::error::TransportFault;
use crate::wire::Frame;

use super::LinkState;
use super::context::LinkContext;

/// Result of one polling pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// Select line not asserted; nothing happened.
    NoRequest,
    /// A full exchange ran and its command was dispatched.
    Exchanged(Dispatch),
    /// The transfer failed; buffers were reset to `ERR`.
    Faulted(TransportFault),
}

pub struct PollingFsm<D, T> {
    ctx: LinkContext<D>,
    transport: T,
    state: LinkState,
    timeout_ms: u32,
}

impl<D: ActuatorDriver, T: PolledTransport> PollingFsm<D, T> {
    pub(crate) fn new(ctx: LinkContext<D>, transport: T, config: &EndpointConfig) -> Self {
        Self {
            ctx,
            transport,
            state: LinkState::Idle,
            timeout_ms: config.poll_timeout_ms,
        }
    }

    /// Zero both buffers and stage `RDY` for the first exchange.  Runs
    /// once; later calls are ignored.
    pub(crate) fn init(&mut self) {
        if self.state != LinkState::Idle {
            warn!("link(poll) already initialised; init ignored");
            return;
        }
        self.ctx.prime();
        info!("link(poll): {} -> {}", self.state.name(), LinkState::Pending.name());
        self.state = LinkState::Pending;
    }

    /// Run at most one exchange.  Initialises on first use.
    pub fn drive_exchange_once(&mut self) -> PollOutcome {
        if self.state == LinkState::Idle {
            self.init();
        }
        if !self.transport.exchange_requested() {
            return PollOutcome::NoRequest;
        }

        self.ctx.rx.clear();
        let result = self
            .transport
            .transfer(&self.ctx.tx, &mut self.ctx.rx, self.timeout_ms);

        match result {
            Ok(()) => {
                let outcome = self.ctx.process_rx();
                debug!(
                    "exchange(poll): {:?} -> {:?}",
                    outcome.command,
                    self.ctx.outbound()
                );
                PollOutcome::Exchanged(outcome)
            }
            Err(fault) => {
                warn!("link fault (poll): {}; resetting buffers", fault);
                self.ctx.recover();
                PollOutcome::Faulted(fault)
            }
        }
    }

    pub fn state(&self) -> LinkState {
        self.state
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
}
