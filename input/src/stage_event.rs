use std::time::Instant;

use serde::{Deserialize, Serialize, Serializer, ser::SerializeStruct};

use crate::PointerId;
use tr_hmi_geometry::Point;

/// An event the stage delivers to the gesture interpreter.
#[derive(Debug, Clone)]
pub enum StageEvent {
    MouseDown(PointerEvent),
    MouseMove(PointerEvent),
    MouseUp(PointerEvent),
    /// Display refresh.
    Tick(Instant),
}

/// A pointer event in stage coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerEvent {
    pub pointer: PointerId,
    pub pos: Point,
    pub time: Instant,
}

impl PointerEvent {
    pub fn new(pointer: impl Into<PointerId>, pos: impl Into<Point>, time: Instant) -> Self {
        Self {
            pointer: pointer.into(),
            pos: pos.into(),
            time,
        }
    }
}

/// The wire shape of stage events.
///
/// ```json
/// {"type": "stagemousedown", "pointerID": 3, "stageX": 10.0, "stageY": 20.0}
/// {"type": "tick"}
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum RawStageEvent {
    #[serde(rename = "stagemousedown")]
    MouseDown(RawPointerEvent),
    #[serde(rename = "stagemousemove")]
    MouseMove(RawPointerEvent),
    #[serde(rename = "stagemouseup")]
    MouseUp(RawPointerEvent),
    #[serde(rename = "tick")]
    Tick,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawPointerEvent {
    #[serde(rename = "pointerID", default)]
    pub pointer_id: Option<i64>,
    #[serde(rename = "stageX")]
    pub stage_x: f64,
    #[serde(rename = "stageY")]
    pub stage_y: f64,
}

impl RawStageEvent {
    /// Converts the wire event into a [`StageEvent`] that happened at `time`.
    pub fn into_stage_event(self, time: Instant) -> StageEvent {
        let pointer = |raw: RawPointerEvent| PointerEvent {
            pointer: PointerId::from_stage(raw.pointer_id),
            pos: Point::new(raw.stage_x, raw.stage_y),
            time,
        };

        match self {
            RawStageEvent::MouseDown(raw) => StageEvent::MouseDown(pointer(raw)),
            RawStageEvent::MouseMove(raw) => StageEvent::MouseMove(pointer(raw)),
            RawStageEvent::MouseUp(raw) => StageEvent::MouseUp(pointer(raw)),
            RawStageEvent::Tick => StageEvent::Tick(time),
        }
    }
}

impl Serialize for PointerEvent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("PointerEvent", 3)?;
        state.serialize_field("pointerID", &self.pointer)?;
        state.serialize_field("stageX", &self.pos.x)?;
        state.serialize_field("stageY", &self.pos.y)?;
        state.end()
    }
}
