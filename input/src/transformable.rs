use std::{
    collections::HashMap,
    time::{Duration, Instant},
};

use derive_more::Debug;
use indexmap::IndexMap;
use log::debug;

use crate::{
    GestureEvent, GestureEventKind, PointerEvent, PointerId, PointerRecord, Release, StageEvent,
};

/// Minimum movement per axis in stage units before a single pointer pan counts as a transform.
pub const DEFAULT_TOUCH_SLOP: f64 = 1.0;

/// Clicks are only reported if the previous release happened longer ago than this.
///
/// This prevents the last finger of a multi touch sequence from producing a click.
pub const DEFAULT_CLICK_DEBOUNCE: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformableConfig {
    pub touch_slop: f64,
    pub click_debounce: Duration,
}

impl Default for TransformableConfig {
    fn default() -> Self {
        Self {
            touch_slop: DEFAULT_TOUCH_SLOP,
            click_debounce: DEFAULT_CLICK_DEBOUNCE,
        }
    }
}

pub type GestureHandler = Box<dyn FnMut(&GestureEvent)>;

/// Interprets the pointer events of one stage as pan, pinch, and click gestures.
///
/// Movements are not reported when they happen, they are batched and reported on the next tick.
#[derive(Debug)]
pub struct Transformable {
    config: TransformableConfig,
    /// The pressed pointers, in the order they were pressed.
    records: IndexMap<PointerId, PointerRecord>,
    active: usize,
    /// A move was received since the last tick.
    dirty: bool,
    /// The current press sequence produced a pan or a scale, so the release is not a click.
    has_transformed: bool,
    last_release: Option<Instant>,
    #[debug(skip)]
    handlers: HashMap<GestureEventKind, GestureHandler>,
}

impl Default for Transformable {
    fn default() -> Self {
        Self::new(TransformableConfig::default())
    }
}

impl Transformable {
    pub fn new(config: TransformableConfig) -> Self {
        Self {
            config,
            records: IndexMap::new(),
            active: 0,
            dirty: false,
            has_transformed: false,
            last_release: None,
            handlers: HashMap::new(),
        }
    }

    /// Registers the handler for a gesture kind. A previously registered handler for the same kind
    /// is replaced.
    pub fn on(&mut self, kind: GestureEventKind, handler: impl FnMut(&GestureEvent) + 'static) {
        self.handlers.insert(kind, Box::new(handler));
    }

    /// Number of currently pressed pointers.
    pub fn active(&self) -> usize {
        self.active
    }

    pub fn pointer(&self, id: PointerId) -> Option<&PointerRecord> {
        self.records.get(&id)
    }

    /// The pressed pointers in the order they were pressed.
    pub fn pointers(&self) -> impl Iterator<Item = (PointerId, &PointerRecord)> {
        self.records.iter().map(|(id, record)| (*id, record))
    }

    pub fn process(&mut self, event: &StageEvent) {
        match event {
            StageEvent::MouseDown(event) => self.press(event),
            StageEvent::MouseMove(event) => self.pointer_moved(event),
            StageEvent::MouseUp(event) => self.release(event),
            StageEvent::Tick(_) => self.tick(),
        }
    }

    fn press(&mut self, event: &PointerEvent) {
        // Re-pressing a known pointer keeps its place in the press order.
        self.records
            .insert(event.pointer, PointerRecord::pressed_at(event.pos));
        self.update_active();

        self.dispatch(GestureEvent::Start {
            active: self.active,
        });

        self.has_transformed = false;
    }

    fn pointer_moved(&mut self, event: &PointerEvent) {
        if let Some(record) = self.records.get_mut(&event.pointer) {
            record.current = event.pos;
        }
        self.update_active();
        self.dirty = true;
    }

    fn tick(&mut self) {
        if !self.dirty {
            return;
        }
        self.dirty = false;

        self.dispatch(GestureEvent::Update {
            active: self.active,
        });

        // Both compare `current` against `previous`, so previous positions are committed last.
        self.detect_pan();
        self.detect_scale();

        for record in self.records.values_mut() {
            record.advance();
        }
    }

    fn release(&mut self, event: &PointerEvent) {
        self.records.shift_remove(&event.pointer);
        self.update_active();

        let now = event.time;
        let debounced = self.last_release.is_some_and(|last| {
            now.saturating_duration_since(last) <= self.config.click_debounce
        });

        let release = Release {
            event: event.clone(),
            active: self.active,
        };

        if self.active == 0 && !self.has_transformed && !debounced {
            self.dispatch(GestureEvent::Click(release.clone()));
        }

        self.has_transformed = false;
        self.last_release = Some(now);

        self.dispatch(GestureEvent::Complete(release));
    }

    fn detect_pan(&mut self) {
        if self.active != 1 {
            return;
        }
        let Some(record) = self.records.values().next() else {
            return;
        };

        let delta = record.delta();
        self.dispatch(GestureEvent::Move(delta));

        // Both axes need to exceed the slop.
        let slop = self.config.touch_slop;
        if delta.x.abs() > slop && delta.y.abs() > slop {
            self.has_transformed = true;
        }
    }

    fn detect_scale(&mut self) {
        if self.active <= 1 {
            return;
        }
        let mut pressed = self.records.values();
        let (Some(first), Some(second)) = (pressed.next(), pressed.next()) else {
            return;
        };

        let previous_distance = first.previous.distance_to(second.previous);
        let current_distance = first.current.distance_to(second.current);
        let start = first.current;

        self.has_transformed = true;

        if previous_distance == 0.0 {
            debug!("Skipping scale, the previous pointer positions are identical");
            return;
        }

        let scale = current_distance / previous_distance;
        if !scale.is_finite() {
            debug!("Skipping scale, ratio {current_distance} / {previous_distance} is not finite");
            return;
        }

        self.dispatch(GestureEvent::Scale { start, scale });
    }

    fn update_active(&mut self) {
        self.active = self.records.len();
    }

    fn dispatch(&mut self, event: GestureEvent) {
        if let Some(handler) = self.handlers.get_mut(&event.kind()) {
            handler(&event);
        }
    }
}
