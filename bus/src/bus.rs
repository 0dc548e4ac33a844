use std::{
    any::{self, Any},
    collections::HashMap,
    sync::Arc,
};

use anyhow::{Result, bail};
use log::info;
use parking_lot::Mutex;

use crate::{Topic, TopicOptions};

/// The registry of advertised topics.
#[derive(Debug, Default)]
pub struct Bus {
    topics: Mutex<HashMap<String, AdvertisedTopic>>,
}

#[derive(Debug)]
struct AdvertisedTopic {
    message_type: &'static str,
    topic: Arc<dyn Any + Send + Sync>,
}

impl Bus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advertises a topic, or returns the already advertised one if the message type matches.
    ///
    /// When the topic exists, `options` are ignored.
    pub fn advertise<M>(&self, name: &str, options: TopicOptions) -> Result<Arc<Topic<M>>>
    where
        M: Clone + Send + 'static,
    {
        let mut topics = self.topics.lock();
        if let Some(advertised) = topics.get(name) {
            return match advertised.topic.clone().downcast::<Topic<M>>() {
                Ok(topic) => Ok(topic),
                Err(_) => bail!(
                    "{name}: Already advertised with message type {}",
                    advertised.message_type
                ),
            };
        }

        if options.queue_size == 0 {
            bail!("{name}: Queue size must be at least one");
        }

        let message_type = any::type_name::<M>();
        info!("Advertising {name} ({message_type}, {options:?})");
        let topic = Arc::new(Topic::new(name, options));
        topics.insert(
            name.to_string(),
            AdvertisedTopic {
                message_type,
                topic: topic.clone(),
            },
        );
        Ok(topic)
    }

    /// Returns the topic if it is advertised with message type `M`.
    pub fn topic<M>(&self, name: &str) -> Option<Arc<Topic<M>>>
    where
        M: Clone + Send + 'static,
    {
        let topics = self.topics.lock();
        topics
            .get(name)
            .and_then(|advertised| advertised.topic.clone().downcast::<Topic<M>>().ok())
    }

    pub fn topic_names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.topics.lock().keys().cloned().collect();
        names.sort();
        names
    }
}
