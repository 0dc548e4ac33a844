use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::{Bus, GoalPublisher, LaunchControl, SpeedLimits, VelocityPublisher};

/// Names of the topics the HMI node publishes to.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TopicNames {
    pub goal: String,
    pub cmd_vel: String,
    pub launch_mode: String,
}

impl Default for TopicNames {
    fn default() -> Self {
        Self {
            goal: GoalPublisher::DEFAULT_TOPIC.into(),
            cmd_vel: VelocityPublisher::DEFAULT_TOPIC.into(),
            launch_mode: LaunchControl::DEFAULT_TOPIC.into(),
        }
    }
}

/// The publishers of the HMI node.
#[derive(Debug)]
pub struct HmiNode {
    pub bus: Arc<Bus>,
    pub goal: GoalPublisher,
    pub velocity: VelocityPublisher,
    pub launch: LaunchControl,
}

impl HmiNode {
    pub fn new(bus: Arc<Bus>, topics: &TopicNames, limits: SpeedLimits) -> Result<Self> {
        let goal = GoalPublisher::new(&bus, &topics.goal).context("Goal publisher")?;
        let velocity = VelocityPublisher::new(&bus, &topics.cmd_vel, limits)
            .context("Velocity publisher")?;
        let launch =
            LaunchControl::new(&bus, &topics.launch_mode).context("Launch mode control")?;

        Ok(Self {
            bus,
            goal,
            velocity,
            launch,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advertises_all_topics() {
        let node = HmiNode::new(
            Arc::new(Bus::new()),
            &TopicNames::default(),
            SpeedLimits::default(),
        )
        .unwrap();

        assert_eq!(
            node.bus.topic_names(),
            vec!["/cmd_vel", "/tr_hmi/goal", "/tr_hmi/launch_mode"]
        );
    }

    #[test]
    fn conflicting_topic_names_fail() {
        let topics = TopicNames {
            cmd_vel: "/tr_hmi/goal".into(),
            ..Default::default()
        };
        let result = HmiNode::new(Arc::new(Bus::new()), &topics, SpeedLimits::default());
        assert!(result.is_err());
    }
}
