//! Data model shared by the scanner, the driver and report consumers.

mod component;
mod finding;
mod payload;
mod report;

pub use component::*;
pub use finding::*;
pub use payload::*;
pub use report::*;
