//! Outbound side of the host channel.

use std::collections::VecDeque;

use crate::protocol::OutboundMessage;

/// Receives requests for the host. Sending never waits for delivery.
pub trait HostSink {
    fn send(&mut self, message: OutboundMessage);
}

/// Buffers outbound requests until a transport drains them.
#[derive(Debug, Default)]
pub struct Outbox {
    queue: VecDeque<OutboundMessage>,
}

impl Outbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drain(&mut self) -> Vec<OutboundMessage> {
        self.queue.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl HostSink for Outbox {
    fn send(&mut self, message: OutboundMessage) {
        self.queue.push_back(message);
    }
}
