//! Handlers for the requests the map UI sends over its socket connection.
mod handlers;
mod response;
mod route;
mod router;
mod settings;

pub use response::*;
pub use route::*;
pub use router::*;
pub use settings::*;
