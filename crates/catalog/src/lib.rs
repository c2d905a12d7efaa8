pub mod error;
pub mod loader;
pub mod normalize;
pub mod poi;
pub mod slug;
pub mod source;

pub use error::*;
pub use loader::*;
pub use poi::*;
pub use slug::*;
pub use source::*;
