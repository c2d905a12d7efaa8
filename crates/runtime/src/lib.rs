pub mod deferred;
pub mod event_bus;
pub mod fetch;

pub use deferred::*;
pub use event_bus::*;
pub use fetch::*;
