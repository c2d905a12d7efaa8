pub mod language;
pub mod localizer;
pub mod translations;

pub use language::*;
pub use localizer::*;
pub use translations::*;
