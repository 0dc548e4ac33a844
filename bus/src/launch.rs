use std::sync::Arc;

use anyhow::{Result, bail};
use log::info;

use crate::{Bus, Topic, TopicOptions, messages::LaunchMode};

/// Switches the launch configuration of the robot (mapping, navigation, ...).
#[derive(Debug)]
pub struct LaunchControl {
    topic: Arc<Topic<LaunchMode>>,
}

impl LaunchControl {
    pub const DEFAULT_TOPIC: &'static str = "/tr_hmi/launch_mode";

    pub fn new(bus: &Bus, topic: &str) -> Result<Self> {
        let topic = bus.advertise(topic, TopicOptions::latched(1))?;
        Ok(Self { topic })
    }

    pub fn topic(&self) -> &Arc<Topic<LaunchMode>> {
        &self.topic
    }

    /// The most recently requested mode.
    pub fn mode(&self) -> Option<LaunchMode> {
        self.topic.latched()
    }

    pub fn toggle(&self, mode: &str) -> Result<()> {
        let mode = mode.trim();
        if mode.is_empty() {
            bail!("{}: Empty launch mode", self.topic.name());
        }
        info!("Switching launch mode to {mode}");
        self.topic.publish(mode.into());
        Ok(())
    }
}
