//! Writes resolved values back into the caller's destination.

use figment::{Figment, providers::Serialized, value::Dict};
use serde::{Serialize, de::DeserializeOwned};

use super::ResolvedField;
use crate::value::{insert_at, lookup};
use crate::{CascadeError, CascadeResult, CascadeResultExt};

/// Overwrites every resolved leaf of `dest`.
///
/// The resolved values are merged over `base`, the serialized form of
/// `dest`, and the result is deserialized back into `dest`. Fields outside
/// the schema keep their current values.
pub(crate) fn write_back<T>(dest: &mut T, base: &Dict, resolved: &[ResolvedField]) -> CascadeResult<()>
where
    T: Serialize + DeserializeOwned,
{
    let mut overrides = Dict::new();
    for field in resolved {
        let value = field
            .value
            .to_value(lookup(base, &field.path))
            .map_err(CascadeError::gathering)?;
        insert_at(&mut overrides, &field.path, value);
    }
    let merged = Figment::from(Serialized::defaults(base))
        .merge(Serialized::defaults(overrides))
        .extract::<T>()
        .into_cascade()?;
    *dest = merged;
    Ok(())
}
