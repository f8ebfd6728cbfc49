//! # a11ylens Config
//!
//! Configuration for scan sessions: browser launch options, stabilization
//! timing, retry budgets and the framework-name filter used by attribution.
//! Every value has a default so an empty file is a valid configuration.

mod error;
mod loader;
mod schema;
mod validator;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::*;
pub use validator::{ConfigValidator, ValidationError, ValidationResult, ValidationWarning};
