use serde::{Serialize, Serializer};

use tr_hmi_geometry::Point;

/// Identifies a single contact on the stage.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum PointerId {
    /// The pointer used for events that don't carry an identifier (the mouse, for example).
    Primary,
    Id(i64),
}

impl PointerId {
    /// Normalizes the optional identifier the stage reports.
    ///
    /// A missing identifier and `0` both refer to the primary pointer.
    pub fn from_stage(id: Option<i64>) -> Self {
        match id {
            None | Some(0) => Self::Primary,
            Some(id) => Self::Id(id),
        }
    }
}

impl From<i64> for PointerId {
    fn from(id: i64) -> Self {
        Self::from_stage(Some(id))
    }
}

impl Serialize for PointerId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PointerId::Primary => serializer.serialize_none(),
            PointerId::Id(id) => serializer.serialize_i64(*id),
        }
    }
}

/// Tracking state of a pressed pointer.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct PointerRecord {
    /// Where the pointer was pressed.
    pub start: Point,
    /// The most recently reported position.
    pub current: Point,
    /// The position at the end of the previously processed tick.
    pub previous: Point,
}

impl PointerRecord {
    pub fn pressed_at(pos: Point) -> Self {
        Self {
            start: pos,
            current: pos,
            previous: pos,
        }
    }

    /// Movement since the previously processed tick.
    pub fn delta(&self) -> Point {
        self.current - self.previous
    }

    /// Commits the current position as the previous one.
    pub(crate) fn advance(&mut self) {
        self.previous = self.current;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_or_zero_identifier_is_primary() {
        assert_eq!(PointerId::from_stage(None), PointerId::Primary);
        assert_eq!(PointerId::from_stage(Some(0)), PointerId::Primary);
        assert_eq!(PointerId::from_stage(Some(-1)), PointerId::Id(-1));
        assert_eq!(PointerId::from(7), PointerId::Id(7));
    }

    #[test]
    fn advance_resets_delta() {
        let mut record = PointerRecord::pressed_at(Point::new(1.0, 1.0));
        record.current = Point::new(4.0, 5.0);
        assert_eq!(record.delta(), Point::new(3.0, 4.0));
        record.advance();
        assert_eq!(record.delta(), Point::ZERO);
        assert_eq!(record.start, Point::new(1.0, 1.0));
    }
}
