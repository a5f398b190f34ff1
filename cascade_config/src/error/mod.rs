//! Error types produced by the configuration resolver.

mod aggregate;
mod constructors;
mod conversions;
mod helpers;
mod types;

pub use aggregate::AggregatedErrors;
pub use helpers::is_display_request;
pub use types::{CascadeError, SchemaError};
