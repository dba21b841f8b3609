//! Receive-path byte plumbing.
//!
//! Two pieces sit between the radio ISR and the router:
//!
//! - [`RxQueue`] and its split halves, a lock-free single-producer
//!   single-consumer handoff. The receive interrupt owns the producer and
//!   pushes whole deliveries; the main loop owns the consumer, which
//!   presents the polling [`RadioPort`] receive contract (bytes, then a
//!   `None` boundary).
//! - [`FrameAssembler`], which drains a [`RadioPort`] into a bounded
//!   buffer and hands back one complete delivery at a time. Oversized
//!   deliveries are dropped whole; nothing is ever truncated.

use heapless::spsc::{Consumer, Producer, Queue};
use log::warn;

use crate::app::ports::RadioPort;
use crate::config::INBOUND_FRAME_MAX;

/// Handoff depth in queue slots. One slot stays reserved by the SPSC
/// design, and each delivery spends one slot on its end marker.
pub const RX_QUEUE_DEPTH: usize = 256;

/// Upper bound on bytes drained per pump so a chattering driver cannot
/// stall the cooperative loop.
const RX_DRAIN_BUDGET: usize = RX_QUEUE_DEPTH;

/// One cell of the ISR-to-main handoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RxByte {
    Data(u8),
    /// Closes one radio delivery.
    End,
}

pub type RxQueue = Queue<RxByte, RX_QUEUE_DEPTH>;

/// Split a queue into its interrupt-side and loop-side halves.
pub fn split(queue: &mut RxQueue) -> (RxProducer<'_>, RxConsumer<'_>) {
    let (producer, consumer) = queue.split();
    (
        RxProducer {
            queue: producer,
            dropped: 0,
        },
        RxConsumer { queue: consumer },
    )
}

/// Interrupt-side half. Pushes complete deliveries or nothing.
pub struct RxProducer<'q> {
    queue: Producer<'q, RxByte, RX_QUEUE_DEPTH>,
    dropped: u32,
}

impl RxProducer<'_> {
    /// Enqueue one whole delivery plus its end marker.
    ///
    /// Space is checked up front: a delivery that does not fit is dropped
    /// in full, keeping the consumer's byte stream packet-aligned. Returns
    /// `false` on a drop.
    pub fn deliver(&mut self, packet: &[u8]) -> bool {
        let free = self.queue.capacity() - self.queue.len();
        if packet.len() + 1 > free {
            self.dropped = self.dropped.wrapping_add(1);
            return false;
        }
        // Cannot fail past the space check; this is the only producer.
        for &byte in packet {
            let _ = self.queue.enqueue(RxByte::Data(byte));
        }
        let _ = self.queue.enqueue(RxByte::End);
        true
    }

    /// Deliveries dropped for lack of queue space since startup.
    pub fn dropped_deliveries(&self) -> u32 {
        self.dropped
    }
}

/// Loop-side half. Presents the polling receive contract.
pub struct RxConsumer<'q> {
    queue: Consumer<'q, RxByte, RX_QUEUE_DEPTH>,
}

impl RxConsumer<'_> {
    /// Next data byte, or `None` at an end marker or an empty queue.
    ///
    /// Because the producer only enqueues whole deliveries, an empty
    /// queue can never split a delivery in half.
    pub fn poll(&mut self) -> Option<u8> {
        match self.queue.dequeue() {
            Some(RxByte::Data(byte)) => Some(byte),
            Some(RxByte::End) | None => None,
        }
    }
}

/// Accumulates port bytes into one bounded delivery at a time.
#[derive(Debug, Default)]
pub struct FrameAssembler {
    buf: heapless::Vec<u8, INBOUND_FRAME_MAX>,
    receiving: bool,
    overrun: bool,
}

impl FrameAssembler {
    pub const fn new() -> Self {
        Self {
            buf: heapless::Vec::new(),
            receiving: false,
            overrun: false,
        }
    }

    /// Drain the radio until a delivery boundary or the drain budget.
    ///
    /// Returns the completed delivery's bytes, valid until the next call.
    /// Oversized deliveries are logged and dropped whole; a partial
    /// delivery (budget exhausted mid-packet) is kept for the next pump.
    pub fn pump(&mut self, radio: &mut impl RadioPort) -> Option<&[u8]> {
        if !self.receiving && !self.buf.is_empty() {
            // Previous delivery was handed out last pump; reclaim the buffer.
            self.buf.clear();
        }
        for _ in 0..RX_DRAIN_BUDGET {
            match radio.receive_byte() {
                Some(byte) => {
                    self.receiving = true;
                    if self.buf.push(byte).is_err() {
                        self.overrun = true;
                    }
                }
                None => {
                    if !self.receiving {
                        return None;
                    }
                    self.receiving = false;
                    if core::mem::take(&mut self.overrun) {
                        warn!(
                            "RX | delivery over {INBOUND_FRAME_MAX} bytes dropped whole"
                        );
                        self.buf.clear();
                        return None;
                    }
                    return Some(&self.buf);
                }
            }
        }
        None
    }
}
