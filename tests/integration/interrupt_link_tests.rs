//! Integration tests for the interrupt-driven link:
//! ISR event → queue → TransferFsm → dispatcher → actuators → re-arm.

use spi_led_endpoint::app::service::Endpoint;
use spi_led_endpoint::config::EndpointConfig;
use spi_led_endpoint::error::TransportFault;
use spi_led_endpoint::events::{EventProducer, EventQueue, LinkEvent, push_event};
use spi_led_endpoint::fsm::{LinkState, TransferFsm};
use spi_led_endpoint::wire::{FRAME_CAPACITY, Frame};

use super::mock_hw::{MockDuplex, RecordingLeds};

const SYMBOLS: [u8; 4] = [b'G', b'O', b'R', b'B'];

/// The endpoint plus the ISR side of its event queue.
struct Bench<'q> {
    link: TransferFsm<'q, RecordingLeds, MockDuplex>,
    isr: EventProducer<'q>,
}

impl<'q> Bench<'q> {
    fn new(queue: &'q mut EventQueue) -> Self {
        Self::with_transport(queue, MockDuplex::default())
    }

    fn with_transport(queue: &'q mut EventQueue, transport: MockDuplex) -> Self {
        let (isr, events) = queue.split();
        let endpoint = Endpoint::new(EndpointConfig::default(), RecordingLeds::default());
        let link = endpoint.interrupt_driven(transport, events);
        Self { link, isr }
    }

    /// Peer clocks `bytes` in.  Returns what the endpoint staged for the
    /// next exchange.
    fn send(&mut self, bytes: &[u8]) -> Vec<u8> {
        let event = LinkEvent::ExchangeCompleted(Frame::from_bytes(bytes));
        assert!(push_event(&mut self.isr, event));
        assert_eq!(self.link.service(), 1);
        self.link.transport().current().to_vec()
    }

    fn fault(&mut self, fault: TransportFault) -> Vec<u8> {
        assert!(push_event(&mut self.isr, LinkEvent::ExchangeFaulted(fault)));
        assert_eq!(self.link.service(), 1);
        self.link.transport().current().to_vec()
    }

    fn channels(&self) -> [bool; 4] {
        core::array::from_fn(|i| self.link.get_channel(i))
    }

    fn pin_writes(&self) -> usize {
        self.link.context().bank().driver().writes.len()
    }
}

// ── Startup ───────────────────────────────────────────────────

#[test]
fn first_exchange_carries_ready() {
    let mut q = EventQueue::new();
    let bench = Bench::new(&mut q);
    assert_eq!(bench.link.state(), LinkState::Pending);
    assert_eq!(bench.link.transport().armed.len(), 1);
    assert_eq!(bench.link.transport().current(), b"RDY\n");
    assert_eq!(bench.channels(), [false; 4]);
}

#[test]
fn startup_drives_every_pin_low() {
    let mut q = EventQueue::new();
    let bench = Bench::new(&mut q);
    let leds = bench.link.context().bank().driver();
    assert_eq!(leds.writes, vec![(0, false), (1, false), (2, false), (3, false)]);
}

#[test]
fn ready_is_never_regenerated() {
    let mut q = EventQueue::new();
    let mut bench = Bench::new(&mut q);
    bench.send(b"LED:G1\n");
    bench.fault(TransportFault::Overrun);
    bench.send(b"\0");
    let ready = bench
        .link
        .transport()
        .armed
        .iter()
        .filter(|f| f.payload() == b"RDY\n")
        .count();
    assert_eq!(ready, 1);
}

// ── Command grammar ───────────────────────────────────────────

#[test]
fn each_channel_can_be_set_and_cleared() {
    let mut q = EventQueue::new();
    let mut bench = Bench::new(&mut q);
    for (index, &sym) in SYMBOLS.iter().enumerate() {
        for (val, on) in [(b'1', true), (b'0', false)] {
            let cmd = [b'L', b'E', b'D', b':', sym, val, b'\n'];
            assert_eq!(bench.send(&cmd), b"OK\n");
            assert_eq!(bench.link.get_channel(index), on);
        }
    }
}

#[test]
fn set_all_on_and_off() {
    let mut q = EventQueue::new();
    let mut bench = Bench::new(&mut q);
    assert_eq!(bench.send(b"LED:A1\n"), b"OK\n");
    assert_eq!(bench.channels(), [true; 4]);
    assert_eq!(bench.send(b"LED:A0\n"), b"OK\n");
    assert_eq!(bench.channels(), [false; 4]);
}

#[test]
fn query_reports_channels_in_index_order() {
    let mut q = EventQueue::new();
    let mut bench = Bench::new(&mut q);
    assert_eq!(bench.send(b"GET:LED\n"), b"STA:0000\n");
    bench.send(b"LED:O1\n");
    bench.send(b"LED:B1\n");
    assert_eq!(bench.send(b"GET:LED\n"), b"STA:0101\n");
    bench.send(b"LED:A1\n");
    assert_eq!(bench.send(b"GET:LED\n"), b"STA:1111\n");
}

#[test]
fn malformed_input_answers_err_without_touching_state() {
    let mut q = EventQueue::new();
    let mut bench = Bench::new(&mut q);
    bench.send(b"LED:R1\n");
    let before = bench.channels();
    let writes = bench.pin_writes();

    for bad in [
        &b"LED:X1\n"[..],
        b"LED:G2\n",
        b"LED:A\n",
        b"FOO\n",
        b"led:g1\n",
        b"GET:LE\n",
        b"",
    ] {
        assert_eq!(bench.send(bad), b"ERR\n", "input {}", bad.escape_ascii());
    }

    assert_eq!(bench.channels(), before);
    assert_eq!(bench.pin_writes(), writes);
}

#[test]
fn err_response_does_not_stick() {
    let mut q = EventQueue::new();
    let mut bench = Bench::new(&mut q);
    assert_eq!(bench.send(b"NOPE\n"), b"ERR\n");
    assert_eq!(bench.send(b"GET:LED\n"), b"STA:0000\n");
}

#[test]
fn repeated_commands_are_idempotent() {
    let mut q = EventQueue::new();
    let mut bench = Bench::new(&mut q);
    bench.send(b"LED:G1\n");
    let once = bench.channels();
    bench.send(b"LED:G1\n");
    assert_eq!(bench.channels(), once);

    bench.send(b"LED:A1\n");
    let once = bench.channels();
    bench.send(b"LED:A1\n");
    assert_eq!(bench.channels(), once);
}

#[test]
fn full_frame_with_trailing_garbage_is_handled() {
    let mut q = EventQueue::new();
    let mut bench = Bench::new(&mut q);
    let mut raw = [b'Z'; FRAME_CAPACITY];
    raw[..6].copy_from_slice(b"LED:B1");
    assert_eq!(bench.send(&raw), b"OK\n");
    assert!(bench.link.get_channel(3));

    let garbage = [0xFFu8; FRAME_CAPACITY];
    assert_eq!(bench.send(&garbage), b"ERR\n");
}

// ── Fault recovery ────────────────────────────────────────────

#[test]
fn fault_stages_err_and_rearms() {
    let mut q = EventQueue::new();
    let mut bench = Bench::new(&mut q);
    bench.send(b"GET:LED\n");
    let armed = bench.link.transport().armed.len();

    assert_eq!(bench.fault(TransportFault::Framing), b"ERR\n");
    assert_eq!(bench.link.transport().armed.len(), armed + 1);
    assert_eq!(bench.link.state(), LinkState::Pending);
    assert_eq!(bench.link.stats().faults, 1);
}

#[test]
fn link_recovers_after_faults() {
    let mut q = EventQueue::new();
    let mut bench = Bench::new(&mut q);
    for fault in [
        TransportFault::Overrun,
        TransportFault::Framing,
        TransportFault::ModeFault,
        TransportFault::Timeout,
    ] {
        bench.fault(fault);
    }
    assert_eq!(bench.send(b"LED:G1\n"), b"OK\n");
    assert!(bench.link.get_channel(0));
}

#[test]
fn fault_keeps_channel_state() {
    let mut q = EventQueue::new();
    let mut bench = Bench::new(&mut q);
    bench.send(b"LED:A1\n");
    bench.fault(TransportFault::Overrun);
    assert_eq!(bench.channels(), [true; 4]);
}

#[test]
fn refused_arm_is_retried_until_it_succeeds() {
    let mut q = EventQueue::new();
    let attempts = EndpointConfig::default().rearm_attempts as usize;
    let transport = MockDuplex {
        refuse: attempts * 2,
        ..MockDuplex::default()
    };
    let mut bench = Bench::with_transport(&mut q, transport);
    assert!(bench.link.transport().armed.is_empty());
    assert!(bench.link.rearm_due());

    // One more full round of refusals, then accepted.
    assert_eq!(bench.link.service(), 0);
    assert!(bench.link.rearm_due());
    assert_eq!(bench.link.service(), 0);
    assert!(!bench.link.rearm_due());
    assert_eq!(bench.link.transport().current(), b"RDY\n");
    assert_eq!(bench.link.stats().arm_failures as usize, attempts * 2);
}

// ── Queue and direct API ──────────────────────────────────────

#[test]
fn queued_events_are_handled_in_order() {
    let mut q = EventQueue::new();
    let mut bench = Bench::new(&mut q);
    for cmd in [&b"LED:G1\n"[..], b"LED:G0\n", b"LED:R1\n"] {
        assert!(push_event(
            &mut bench.isr,
            LinkEvent::ExchangeCompleted(Frame::from_bytes(cmd))
        ));
    }
    assert_eq!(bench.link.service(), 3);
    assert_eq!(bench.channels(), [false, false, true, false]);
    assert_eq!(bench.link.transport().armed.len(), 4);
    assert_eq!(bench.link.stats().exchanges, 3);
}

#[test]
fn direct_channel_api_ignores_bad_indices() {
    let mut q = EventQueue::new();
    let mut bench = Bench::new(&mut q);
    bench.link.set_channel(1, true);
    bench.link.set_channel(4, true);
    bench.link.set_channel(usize::MAX, true);
    assert_eq!(bench.channels(), [false, true, false, false]);
    assert!(!bench.link.get_channel(4));
    assert_eq!(bench.send(b"GET:LED\n"), b"STA:0100\n");
}
