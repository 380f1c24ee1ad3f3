//! Mock hardware for integration tests.
//!
//! Records every pin write and every armed / transferred frame so tests
//! can assert on the full history without a real SPI peripheral.

use std::collections::VecDeque;

use spi_led_endpoint::app::ports::{ActuatorDriver, DuplexTransport, PolledTransport};
use spi_led_endpoint::error::TransportFault;
use spi_led_endpoint::wire::{CHANNEL_COUNT, Frame};

// ── Pins ──────────────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingLeds {
    pub writes: Vec<(usize, bool)>,
}

#[allow(dead_code)]
impl RecordingLeds {
    /// Pin levels implied by the write history.
    pub fn levels(&self) -> [bool; CHANNEL_COUNT] {
        let mut levels = [false; CHANNEL_COUNT];
        for &(i, on) in &self.writes {
            levels[i] = on;
        }
        levels
    }
}

impl ActuatorDriver for RecordingLeds {
    fn set_pin(&mut self, index: usize, on: bool) {
        assert!(index < CHANNEL_COUNT, "driver called with index {index}");
        self.writes.push((index, on));
    }
}

// ── Event-driven transport ────────────────────────────────────

#[derive(Default)]
pub struct MockDuplex {
    /// Every frame committed for transmission, in order.
    pub armed: Vec<Frame>,
    /// Refuse this many upcoming arm calls with `Busy`.
    pub refuse: usize,
}

#[allow(dead_code)]
impl MockDuplex {
    /// What the peer will receive on the next exchange.
    pub fn current(&self) -> &[u8] {
        self.armed.last().map(Frame::payload).unwrap_or_default()
    }
}

impl DuplexTransport for MockDuplex {
    fn arm(&mut self, outbound: &Frame) -> Result<(), TransportFault> {
        if self.refuse > 0 {
            self.refuse -= 1;
            return Err(TransportFault::Busy);
        }
        self.armed.push(*outbound);
        Ok(())
    }
}

// ── Polled transport ──────────────────────────────────────────

#[allow(dead_code)]
pub enum BusStep {
    Idle,
    Peer(Vec<u8>),
    Fault(TransportFault),
}

#[derive(Default)]
pub struct MockBus {
    pub steps: VecDeque<BusStep>,
    /// Frames clocked out to the peer, in order.
    pub sent: Vec<Frame>,
}

#[allow(dead_code)]
impl MockBus {
    pub fn peer(&mut self, bytes: &[u8]) {
        self.steps.push_back(BusStep::Peer(bytes.to_vec()));
    }

    pub fn fault(&mut self, fault: TransportFault) {
        self.steps.push_back(BusStep::Fault(fault));
    }

    pub fn idle(&mut self) {
        self.steps.push_back(BusStep::Idle);
    }
}

impl PolledTransport for MockBus {
    fn exchange_requested(&mut self) -> bool {
        match self.steps.front() {
            Some(BusStep::Idle) => {
                self.steps.pop_front();
                false
            }
            Some(_) => true,
            None => false,
        }
    }

    fn transfer(
        &mut self,
        outbound: &Frame,
        inbound: &mut Frame,
        _timeout_ms: u32,
    ) -> Result<(), TransportFault> {
        self.sent.push(*outbound);
        match self.steps.pop_front() {
            Some(BusStep::Peer(bytes)) => {
                *inbound = Frame::from_bytes(&bytes);
                Ok(())
            }
            Some(BusStep::Fault(f)) => Err(f),
            Some(BusStep::Idle) | None => Err(TransportFault::Timeout),
        }
    }
}
