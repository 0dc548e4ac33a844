use std::time::Instant;

use anyhow::{Context, Result};
use log::warn;
use serde_json::Value;

use crate::{GestureEvent, GestureEventKind, RawStageEvent, Transformable, TransformableConfig};

/// A display stage that receives raw events from the browser and feeds them into its
/// [`Transformable`].
#[derive(Debug, Default)]
pub struct Stage {
    transformable: Transformable,
}

impl Stage {
    pub fn new(config: TransformableConfig) -> Self {
        Self {
            transformable: Transformable::new(config),
        }
    }

    pub fn on(&mut self, kind: GestureEventKind, handler: impl FnMut(&GestureEvent) + 'static) {
        self.transformable.on(kind, handler);
    }

    pub fn transformable(&self) -> &Transformable {
        &self.transformable
    }

    /// Delivers a raw stage event that happened now.
    ///
    /// Events that can not be interpreted are logged and dropped.
    pub fn deliver(&mut self, raw: Value) {
        self.deliver_at(raw, Instant::now());
    }

    pub fn deliver_at(&mut self, raw: Value, time: Instant) {
        match parse(raw) {
            Ok(event) => self.transformable.process(&event.into_stage_event(time)),
            Err(e) => warn!("Dropping stage event: {e:#}"),
        }
    }
}

fn parse(raw: Value) -> Result<RawStageEvent> {
    let description = raw.to_string();
    serde_json::from_value(raw).with_context(|| format!("Invalid stage event {description}"))
}
