use std::{collections::VecDeque, hash::Hash};

use anyhow::{Result, bail};
use tokio::sync::mpsc::{UnboundedReceiver, error::TryRecvError};

use crate::message_filter;

/// A receiver that skips pending messages which are superseded by a more recent message with the
/// same key.
///
/// Used for inbound requests where only the latest one matters, velocity commands for example.
#[derive(Debug)]
pub struct CoalescingReceiver<T: CoalescingKey> {
    receiver: UnboundedReceiver<T>,
    pending: VecDeque<T>,
}

pub trait CoalescingKey {
    type Key: Eq + Hash;

    /// `None` if the message must never be skipped.
    fn coalescing_key(&self) -> Option<Self::Key>;
}

impl<T: CoalescingKey> From<UnboundedReceiver<T>> for CoalescingReceiver<T> {
    fn from(receiver: UnboundedReceiver<T>) -> Self {
        Self::new(receiver)
    }
}

impl<T: CoalescingKey> CoalescingReceiver<T> {
    pub fn new(receiver: UnboundedReceiver<T>) -> Self {
        Self {
            receiver,
            pending: VecDeque::new(),
        }
    }

    /// Receives the next message and returns an error when all senders are gone and nothing is
    /// pending anymore.
    pub async fn recv(&mut self) -> Result<T> {
        loop {
            let disconnected = self.pull_pending();

            if !self.pending.is_empty() {
                let messages: Vec<T> = self.pending.drain(..).collect();
                self.pending =
                    message_filter::keep_last_per_key(messages, |msg| msg.coalescing_key()).into();
            }

            if let Some(pending) = self.pending.pop_front() {
                return Ok(pending);
            }

            if disconnected {
                bail!("Sender disconnected");
            }

            match self.receiver.recv().await {
                Some(message) => self.pending.push_back(message),
                None => bail!("Sender disconnected"),
            }
        }
    }

    /// Moves everything that is immediately available into `pending`. Returns `true` if the
    /// senders are gone.
    fn pull_pending(&mut self) -> bool {
        loop {
            match self.receiver.try_recv() {
                Ok(message) => self.pending.push_back(message),
                Err(TryRecvError::Disconnected) => return true,
                Err(TryRecvError::Empty) => return false,
            }
        }
    }
}
