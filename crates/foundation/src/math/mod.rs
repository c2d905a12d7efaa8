pub mod heading;

pub use heading::*;
