//! Error types for the a11ylens protocol layer.

mod driver;
mod scan;

pub use driver::*;
pub use scan::*;
