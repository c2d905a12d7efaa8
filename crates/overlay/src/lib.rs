pub mod controller;
pub mod error;
pub mod gate;
pub mod info;
pub mod modal;
pub mod target;
pub mod viewport;

pub use controller::*;
pub use error::*;
pub use gate::*;
pub use info::*;
pub use modal::*;
pub use target::*;
pub use viewport::*;
