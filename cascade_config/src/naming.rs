//! Derivation of external key names from declared field names.
//!
//! Both forms share one word-boundary rule: a boundary sits between a
//! lowercase or digit run and a following uppercase letter, and between an
//! uppercase run and a capitalised word (`TGBotToken` splits as
//! `TG`/`Bot`/`Token`). Existing separators (`_`, `-`) are boundaries too, so
//! snake-case Rust identifiers and Pascal-case names derive the same keys.

use heck::{ToKebabCase, ToShoutySnakeCase};

/// Separator between a flag prefix and the next segment.
pub const FLAG_SEPARATOR: &str = "-";

/// Separator between an environment prefix and the next segment.
pub const ENV_SEPARATOR: &str = "_";

/// Kebab-case form used for command-line flags.
///
/// ```
/// use cascade_config::naming::to_flag_name;
/// assert_eq!(to_flag_name("LogLevel"), "log-level");
/// assert_eq!(to_flag_name("TGBotToken"), "tg-bot-token");
/// ```
#[must_use]
pub fn to_flag_name(name: &str) -> String {
    name.to_kebab_case()
}

/// SCREAMING_SNAKE_CASE form used for environment variables.
///
/// ```
/// use cascade_config::naming::to_env_name;
/// assert_eq!(to_env_name("LogLevel"), "LOG_LEVEL");
/// assert_eq!(to_env_name("log_level"), "LOG_LEVEL");
/// ```
#[must_use]
pub fn to_env_name(name: &str) -> String {
    name.to_shouty_snake_case()
}

/// Joins `prefix` and `segment` with `separator`, skipping empty parts.
///
/// ```
/// use cascade_config::naming::join;
/// assert_eq!(join("storage", "user", "-"), "storage-user");
/// assert_eq!(join("", "user", "-"), "user");
/// assert_eq!(join("storage", "", "-"), "storage");
/// ```
#[must_use]
pub fn join(prefix: &str, segment: &str, separator: &str) -> String {
    match (prefix.is_empty(), segment.is_empty()) {
        (true, _) => segment.to_owned(),
        (false, true) => prefix.to_owned(),
        (false, false) => format!("{prefix}{separator}{segment}"),
    }
}
