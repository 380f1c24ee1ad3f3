//! Link events and the queue that carries them out of interrupt context.
//!
//! ```text
//! ┌──────────────────┐     ┌──────────────┐     ┌──────────────────┐
//! │ transfer-done ISR│────▶│  EventQueue  │────▶│ TransferFsm      │
//! │ (Producer half)  │     │  (SPSC)      │     │ (Consumer half)  │
//! └──────────────────┘     └──────────────┘     └──────────────────┘
//! ```
//!
//! The queue has exactly one producer and one consumer, so events are
//! handled one at a time, in order, and never re-entrantly.

use heapless::spsc::{Consumer, Producer, Queue};

use crate::error::TransportFault;
use crate::wire::Frame;

/// Queue depth.  Power of two; holds `EVENT_QUEUE_CAP - 1` events.
pub const EVENT_QUEUE_CAP: usize = 8;

/// Something the duplex transport reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkEvent {
    /// An exchange finished; carries the bytes the peer clocked in.
    ExchangeCompleted(Frame),
    /// The exchange failed at link level.
    ExchangeFaulted(TransportFault),
}

pub type EventQueue = Queue<LinkEvent, EVENT_QUEUE_CAP>;
pub type EventProducer<'q> = Producer<'q, LinkEvent, EVENT_QUEUE_CAP>;
pub type EventConsumer<'q> = Consumer<'q, LinkEvent, EVENT_QUEUE_CAP>;

/// Push an event from interrupt context.
///
/// Returns `false` if the queue is full and the event was dropped.  The
/// peer cannot start another exchange until the consumer re-arms, so a
/// full queue only happens if the consumer has stalled.
pub fn push_event(producer: &mut EventProducer<'_>, event: LinkEvent) -> bool {
    producer.enqueue(event).is_ok()
}
