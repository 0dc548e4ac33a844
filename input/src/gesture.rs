use std::{fmt, str::FromStr};

use anyhow::{Result, bail};
use serde::Serialize;

use crate::PointerEvent;
use tr_hmi_geometry::{Point, Vector};

/// A semantic gesture detected on the stage.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "lowercase")]
pub enum GestureEvent {
    /// A pointer got pressed. `active` includes the new pointer.
    Start { active: usize },
    /// Pointer positions changed since the previous tick.
    Update { active: usize },
    /// A single pointer panned by the given delta since the previous tick.
    Move(Vector),
    /// Two or more pointers pinched. `scale` is relative to the previous tick, `start` is the
    /// current position of the first pointer.
    Scale { start: Point, scale: f64 },
    /// All pointers were released without a transform in between.
    Click(Release),
    /// A pointer was released.
    Complete(Release),
}

impl GestureEvent {
    pub fn kind(&self) -> GestureEventKind {
        use GestureEvent::*;
        match self {
            Start { .. } => GestureEventKind::Start,
            Update { .. } => GestureEventKind::Update,
            Move(_) => GestureEventKind::Move,
            Scale { .. } => GestureEventKind::Scale,
            Click(_) => GestureEventKind::Click,
            Complete(_) => GestureEventKind::Complete,
        }
    }
}

/// The release event together with the number of pointers still pressed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Release {
    #[serde(flatten)]
    pub event: PointerEvent,
    pub active: usize,
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum GestureEventKind {
    Start,
    Update,
    Move,
    Scale,
    Click,
    Complete,
}

impl GestureEventKind {
    pub const ALL: [GestureEventKind; 6] = [
        Self::Start,
        Self::Update,
        Self::Move,
        Self::Scale,
        Self::Click,
        Self::Complete,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Update => "update",
            Self::Move => "move",
            Self::Scale => "scale",
            Self::Click => "click",
            Self::Complete => "complete",
        }
    }
}

impl fmt::Display for GestureEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GestureEventKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match Self::ALL.into_iter().find(|kind| kind.name() == s) {
            Some(kind) => Ok(kind),
            None => bail!("Unknown gesture event: {s}"),
        }
    }
}
