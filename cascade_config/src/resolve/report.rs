//! Summary of a successful resolution.

use super::SourceKind;
use crate::value::Scalar;

/// The final value of one leaf and the layer that supplied it.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedField {
    /// Dotted declared name.
    pub name: String,
    /// Key path in the serialized destination.
    pub path: Vec<String>,
    /// Winning layer.
    pub source: SourceKind,
    /// Value written to the destination.
    pub value: Scalar,
}

/// What a resolution did, field by field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Report {
    fields: Vec<ResolvedField>,
    trailing: Vec<String>,
}

impl Report {
    pub(crate) const fn new(fields: Vec<ResolvedField>, trailing: Vec<String>) -> Self {
        Self { fields, trailing }
    }

    /// Resolved leaves in schema order.
    #[must_use]
    pub fn fields(&self) -> &[ResolvedField] {
        &self.fields
    }

    /// Looks up a leaf by its dotted name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ResolvedField> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// The layer that supplied `name`, if it is a resolved leaf.
    #[must_use]
    pub fn source_of(&self, name: &str) -> Option<SourceKind> {
        self.get(name).map(|field| field.source)
    }

    /// Positional arguments that followed the flags.
    #[must_use]
    pub fn trailing_args(&self) -> &[String] {
        &self.trailing
    }
}
