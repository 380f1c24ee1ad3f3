//! Explicit context owned by whichever driver runs the link.
//!
//! `LinkContext` holds both exchange buffers, the actuator store and the
//! link statistics.  It is built once at startup and moved into exactly
//! one driver; tests build a fresh one per case.

use crate::app::actuators::ActuatorBank;
use crate::app::dispatcher::{Dispatch, dispatch};
use crate::app::ports::ActuatorDriver;
use crate::diagnostics::LinkStats;
use crate::wire::{Frame, Response};

pub struct LinkContext<D> {
    /// Clocked out during the next exchange.
    pub(crate) tx: Frame,
    /// Filled by the transport during an exchange.
    pub(crate) rx: Frame,
    pub(crate) bank: ActuatorBank<D>,
    pub(crate) stats: LinkStats,
}

impl<D: ActuatorDriver> LinkContext<D> {
    pub fn new(driver: D) -> Self {
        Self {
            tx: Frame::zeroed(),
            rx: Frame::zeroed(),
            bank: ActuatorBank::new(driver),
            stats: LinkStats::default(),
        }
    }

    /// Startup content: both buffers zeroed, `RDY` queued for the first
    /// exchange.
    pub fn prime(&mut self) {
        self.rx.clear();
        Response::Ready.write_to(&mut self.tx);
    }

    /// Process whatever is in `rx` and stage the answer in `tx`.
    ///
    /// `ERR` is staged first so every path that produces no response
    /// answers `ERR`.  `rx` is zeroed afterwards.
    pub fn process_rx(&mut self) -> Dispatch {
        Response::Err.write_to(&mut self.tx);

        let outcome = dispatch(&mut self.bank, &self.rx);
        if let Some(response) = outcome.response {
            response.write_to(&mut self.tx);
        }
        self.stats.record_exchange(outcome.response.is_some());

        self.rx.clear();
        outcome
    }

    /// Copy an inbound frame into `rx`, then [`process_rx`](Self::process_rx).
    pub fn process_inbound(&mut self, inbound: &Frame) -> Dispatch {
        self.rx = *inbound;
        self.process_rx()
    }

    /// Fault recovery content: both buffers reset, `ERR` staged.
    pub fn recover(&mut self) {
        self.rx.clear();
        Response::Err.write_to(&mut self.tx);
        self.stats.record_fault();
    }

    /// Direct channel write, bypassing the link.  An out-of-range index is
    /// ignored.
    pub fn set_channel(&mut self, index: usize, on: bool) {
        let _ = self.bank.set_channel(index, on);
    }

    /// Direct channel read; `false` for an out-of-range index.
    pub fn get_channel(&self, index: usize) -> bool {
        self.bank.get_channel(index).unwrap_or(false)
    }

    pub fn outbound(&self) -> &Frame {
        &self.tx
    }

    pub fn bank(&self) -> &ActuatorBank<D> {
        &self.bank
    }

    pub fn stats(&self) -> &LinkStats {
        &self.stats
    }
}
