//! Multi-touch gesture interpretation for the map stage.
//!
//! Raw pointer events of the stage are turned into pan (`move`), pinch (`scale`) and `click`
//! gestures. Movements are batched and surfaced once per display tick.
mod gesture;
mod pointer;
mod stage;
mod stage_event;
mod transformable;

pub use gesture::*;
pub use pointer::*;
pub use stage::*;
pub use stage_event::*;
pub use transformable::*;
