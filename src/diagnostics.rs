//! Runtime link statistics.
//!
//! Counters are updated by the [`LinkContext`](crate::fsm::context::LinkContext)
//! on every exchange and fault, and logged periodically by the firmware.
//! They wrap rather than saturate; consumers look at deltas.

use log::info;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkStats {
    /// Completed exchanges processed by the dispatcher.
    pub exchanges: u32,
    /// Completed exchanges whose command was not recognised or not applied.
    pub rejected: u32,
    /// Link-level faults recovered from.
    pub faults: u32,
    /// Arm attempts the transport refused.
    pub arm_failures: u32,
}

impl LinkStats {
    pub fn record_exchange(&mut self, accepted: bool) {
        self.exchanges = self.exchanges.wrapping_add(1);
        if !accepted {
            self.rejected = self.rejected.wrapping_add(1);
        }
    }

    pub fn record_fault(&mut self) {
        self.faults = self.faults.wrapping_add(1);
    }

    pub fn record_arm_failure(&mut self) {
        self.arm_failures = self.arm_failures.wrapping_add(1);
    }

    pub fn log_summary(&self) {
        info!(
            "LINK | exchanges={} rejected={} faults={} arm_failures={}",
            self.exchanges, self.rejected, self.faults, self.arm_failures
        );
    }
}
