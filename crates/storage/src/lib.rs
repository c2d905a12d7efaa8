pub mod completion;
pub mod kv;

pub use completion::*;
pub use kv::*;
