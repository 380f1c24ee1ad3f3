//! GPIO actuator adapter.
//!
//! Implements [`ActuatorDriver`] over any four embedded-hal output pins,
//! in channel index order.  On ESP-IDF these are `PinDriver`s; on the host
//! anything implementing `OutputPin` works.

use embedded_hal::digital::{OutputPin, PinState};
use log::warn;

use crate::app::ports::ActuatorDriver;
use crate::wire::CHANNEL_COUNT;

pub struct PinActuators<P> {
    pins: [P; CHANNEL_COUNT],
}

impl<P: OutputPin> PinActuators<P> {
    pub fn new(pins: [P; CHANNEL_COUNT]) -> Self {
        Self { pins }
    }

    pub fn pins(&self) -> &[P; CHANNEL_COUNT] {
        &self.pins
    }
}

impl<P: OutputPin> ActuatorDriver for PinActuators<P> {
    fn set_pin(&mut self, index: usize, on: bool) {
        let Some(pin) = self.pins.get_mut(index) else {
            return;
        };
        // A failed write leaves the cached channel state ahead of the pin;
        // the next write to the channel corrects it.
        if let Err(e) = pin.set_state(PinState::from(on)) {
            warn!("LED pin {} write failed: {:?}", index, e);
        }
    }
}
