use log::debug;
use parking_lot::Mutex;
use tokio::sync::broadcast::{
    self,
    error::{RecvError, TryRecvError},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopicOptions {
    /// Number of messages buffered per subscriber before slow subscribers start losing the oldest.
    pub queue_size: usize,
    /// Retain the last message and deliver it to subscribers that join later.
    pub latching: bool,
}

impl TopicOptions {
    pub const fn new(queue_size: usize) -> Self {
        Self {
            queue_size,
            latching: false,
        }
    }

    pub const fn latched(queue_size: usize) -> Self {
        Self {
            queue_size,
            latching: true,
        }
    }
}

/// A named publish target for messages of type `M`.
#[derive(Debug)]
pub struct Topic<M> {
    name: String,
    options: TopicOptions,
    sender: broadcast::Sender<M>,
    /// The last message if latching. Also serializes publishing and subscribing, so that a new
    /// subscriber never sees a message twice.
    latched: Mutex<Option<M>>,
}

impl<M: Clone> Topic<M> {
    /// `queue_size` must be at least one.
    pub(crate) fn new(name: impl Into<String>, options: TopicOptions) -> Self {
        let (sender, _) = broadcast::channel(options.queue_size);
        Self {
            name: name.into(),
            options,
            sender,
            latched: Mutex::new(None),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn options(&self) -> TopicOptions {
        self.options
    }

    /// Publishes a message to all current subscribers.
    ///
    /// Publishing without subscribers is fine, the message is then only retained if the topic
    /// latches.
    pub fn publish(&self, message: M) {
        let mut latched = self.latched.lock();
        if self.options.latching {
            *latched = Some(message.clone());
        }
        if self.sender.send(message).is_err() {
            debug!("{}: No subscribers", self.name);
        }
    }

    /// The retained message of a latching topic.
    pub fn latched(&self) -> Option<M> {
        self.latched.lock().clone()
    }

    pub fn subscribe(&self) -> Subscription<M> {
        let latched = self.latched.lock();
        Subscription {
            topic: self.name.clone(),
            latched: latched.clone(),
            receiver: self.sender.subscribe(),
        }
    }
}

/// Receives the messages of a [`Topic`], starting with the latched one, if any.
#[derive(Debug)]
pub struct Subscription<M> {
    topic: String,
    latched: Option<M>,
    receiver: broadcast::Receiver<M>,
}

impl<M: Clone> Subscription<M> {
    /// Returns the next pending message without waiting.
    pub fn try_recv(&mut self) -> Option<M> {
        if let Some(latched) = self.latched.take() {
            return Some(latched);
        }

        loop {
            match self.receiver.try_recv() {
                Ok(message) => return Some(message),
                Err(TryRecvError::Lagged(skipped)) => {
                    debug!("{}: Subscriber skipped {skipped} messages", self.topic);
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => return None,
            }
        }
    }

    /// Waits for the next message. `None` if the topic is gone.
    pub async fn recv(&mut self) -> Option<M> {
        if let Some(latched) = self.latched.take() {
            return Some(latched);
        }

        loop {
            match self.receiver.recv().await {
                Ok(message) => return Some(message),
                Err(RecvError::Lagged(skipped)) => {
                    debug!("{}: Subscriber skipped {skipped} messages", self.topic);
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }
}
