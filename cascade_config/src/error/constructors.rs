//! Constructors and inspection helpers for `CascadeError`.

use figment::Error as FigmentError;

use super::CascadeError;

impl CascadeError {
    /// Construct a gathering error from a [`figment::Error`].
    ///
    /// # Examples
    ///
    /// ```
    /// use cascade_config::CascadeError;
    /// let e = CascadeError::gathering(figment::Error::from("boom"));
    /// assert!(matches!(e, CascadeError::Gathering(_)));
    /// ```
    #[must_use]
    pub fn gathering(source: FigmentError) -> Self {
        Self::Gathering(Box::new(source))
    }

    /// Construct a file error for `path`.
    #[must_use]
    pub fn file(
        path: impl Into<std::path::PathBuf>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::File {
            path: path.into(),
            source: source.into(),
        }
    }

    /// Iterate over the leaf errors, flattening an aggregate.
    ///
    /// A non-aggregate error yields itself.
    #[must_use = "iterators should be consumed to inspect errors"]
    pub fn leaves(&self) -> Box<dyn Iterator<Item = &Self> + '_> {
        match self {
            Self::Aggregate(agg) => Box::new(agg.iter()),
            other => Box::new(std::iter::once(other)),
        }
    }
}
