//! Actuator state store.
//!
//! Holds the boolean state of the fixed channel set and mirrors every
//! change onto the injected [`ActuatorDriver`].  Cardinality never changes.

use crate::error::ChannelError;
use crate::wire::CHANNEL_COUNT;

use super::ports::ActuatorDriver;

pub struct ActuatorBank<D> {
    states: [bool; CHANNEL_COUNT],
    driver: D,
}

impl<D: ActuatorDriver> ActuatorBank<D> {
    /// Create the store with every channel off, driving all pins low.
    pub fn new(mut driver: D) -> Self {
        for index in 0..CHANNEL_COUNT {
            driver.set_pin(index, false);
        }
        Self {
            states: [false; CHANNEL_COUNT],
            driver,
        }
    }

    pub fn set_channel(&mut self, index: usize, on: bool) -> Result<(), ChannelError> {
        let slot = self
            .states
            .get_mut(index)
            .ok_or(ChannelError::InvalidIndex(index))?;
        *slot = on;
        self.driver.set_pin(index, on);
        Ok(())
    }

    /// Set every channel in index order.
    pub fn set_all(&mut self, on: bool) {
        for index in 0..CHANNEL_COUNT {
            self.states[index] = on;
            self.driver.set_pin(index, on);
        }
    }

    pub fn get_channel(&self, index: usize) -> Result<bool, ChannelError> {
        self.states
            .get(index)
            .copied()
            .ok_or(ChannelError::InvalidIndex(index))
    }

    pub fn snapshot(&self) -> [bool; CHANNEL_COUNT] {
        self.states
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }
}
