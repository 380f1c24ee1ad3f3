//! Endpoint assembly — the hexagonal core.
//!
//! [`Endpoint`] owns the [`LinkContext`] and the configuration.  It is
//! consumed by exactly one driver constructor, so the interrupt path and
//! the polling path can never share the exchange buffers.
//!
//! ```text
//!                    ┌─▶ interrupt_driven(transport, events) ─▶ TransferFsm
//!  Endpoint::new ────┤
//!                    └─▶ polling(transport) ──────────────────▶ PollingFsm
//! ```

use log::info;

use crate::config::EndpointConfig;
use crate::events::EventConsumer;
use crate::fsm::TransferFsm;
use crate::fsm::context::LinkContext;
use crate::fsm::polling::PollingFsm;

use super::ports::{ActuatorDriver, DuplexTransport, PolledTransport};

pub struct Endpoint<D> {
    ctx: LinkContext<D>,
    config: EndpointConfig,
}

impl<D: ActuatorDriver> Endpoint<D> {
    /// Build the context with every channel off.  Nothing is armed yet.
    pub fn new(config: EndpointConfig, actuators: D) -> Self {
        Self {
            ctx: LinkContext::new(actuators),
            config,
        }
    }

    /// Direct channel write before a driver is attached.
    pub fn set_channel(&mut self, index: usize, on: bool) {
        self.ctx.set_channel(index, on);
    }

    pub fn get_channel(&self, index: usize) -> bool {
        self.ctx.get_channel(index)
    }

    /// Hand the link to an asynchronous transport.  The returned machine
    /// is initialised and has its first exchange armed.
    pub fn interrupt_driven<'q, T: DuplexTransport>(
        self,
        transport: T,
        events: EventConsumer<'q>,
    ) -> TransferFsm<'q, D, T> {
        info!("endpoint: interrupt-driven link");
        let mut fsm = TransferFsm::new(self.ctx, transport, events, &self.config);
        fsm.init();
        fsm
    }

    /// Hand the link to a polled transport, initialised with `RDY` staged.
    pub fn polling<T: PolledTransport>(self, transport: T) -> PollingFsm<D, T> {
        info!(
            "endpoint: polled link (timeout {} ms)",
            self.config.poll_timeout_ms
        );
        let mut fsm = PollingFsm::new(self.ctx, transport, &self.config);
        fsm.init();
        fsm
    }
}
