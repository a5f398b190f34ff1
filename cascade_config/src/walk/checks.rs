//! Checks that need the complete binding list.

use std::collections::HashMap;

use super::Binding;
use crate::error::SchemaError;

/// Long option reserved for the help trigger.
const HELP_FLAG: &str = "help";

fn is_valid_flag(key: &str) -> bool {
    !key.starts_with('-')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

/// Rejects reserved, malformed and duplicated flag keys.
pub(super) fn validate_flags(bindings: &[Binding]) -> Result<(), SchemaError> {
    let mut seen: HashMap<&str, &str> = HashMap::new();
    for binding in bindings {
        let Some(key) = binding.flag.as_deref() else {
            continue;
        };
        if key == HELP_FLAG {
            return Err(SchemaError::ReservedFlag {
                field: binding.name.clone(),
                key: key.to_owned(),
            });
        }
        if !is_valid_flag(key) {
            return Err(SchemaError::InvalidFlag {
                field: binding.name.clone(),
                key: key.to_owned(),
            });
        }
        if let Some(first) = seen.insert(key, &binding.name) {
            return Err(SchemaError::DuplicateFlag {
                key: key.to_owned(),
                first: first.to_owned(),
                second: binding.name.clone(),
            });
        }
    }
    Ok(())
}
