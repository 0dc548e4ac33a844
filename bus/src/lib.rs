//! An in-process stand-in for the robot messaging bus the HMI node publishes to.
//!
//! Topics are typed and named. A latched topic redelivers its last message to every new
//! subscriber.
mod bus;
mod goal;
mod launch;
pub mod messages;
mod node;
mod topic;
mod velocity;

pub use bus::*;
pub use goal::*;
pub use launch::*;
pub use node::*;
pub use topic::*;
pub use velocity::*;
