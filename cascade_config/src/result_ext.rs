//! Extensions for mapping errors to `CascadeResult` concisely.
//!
//! These helpers reduce repetitive `.map_err(|e| Arc::new(e.into()))`
//! patterns when converting external error types into the crate's
//! `CascadeResult<T>` alias (`Result<T, Arc<CascadeError>>`).
//!
//! # Examples
//!
//! ```
//! use cascade_config::{CascadeResult, CascadeResultExt};
//! use figment::{Figment, providers::Serialized};
//!
//! fn port() -> CascadeResult<u16> {
//!     Figment::from(Serialized::default("port", 8080_u16))
//!         .extract_inner("port")
//!         .into_cascade()
//! }
//! assert_eq!(port().ok(), Some(8080));
//! ```

use crate::{CascadeError, CascadeResult};
use std::sync::Arc;

/// Generic extension for mapping any `Result<T, E>` with
/// `E: Into<CascadeError>` into a `CascadeResult<T>`.
pub trait CascadeResultExt<T, E> {
    /// Convert `Result<T, E>` into `CascadeResult<T>` using `Into<CascadeError>`.
    ///
    /// # Errors
    ///
    /// Propagates the original error after conversion into `Arc<CascadeError>`.
    fn into_cascade(self) -> CascadeResult<T>;
}

impl<T, E> CascadeResultExt<T, E> for Result<T, E>
where
    E: Into<CascadeError>,
{
    fn into_cascade(self) -> CascadeResult<T> {
        self.map_err(|e| Arc::new(e.into()))
    }
}
