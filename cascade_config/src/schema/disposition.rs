//! Parsing of the CLI disposition string.

use super::DISABLED;

/// How a field is exposed on the command line.
///
/// Parsed from a comma separated list drawn from `required`, `optional` and
/// `hidden`, or the single token `-` which removes the field from
/// resolution.
///
/// ```
/// use cascade_config::Disposition;
/// let d = Disposition::parse("hidden, optional").expect("valid disposition");
/// assert_eq!(d.required, Some(false));
/// assert!(d.hidden);
/// assert!(Disposition::parse("required,optional").is_err());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Disposition {
    /// `Some(true)` for `required`, `Some(false)` for `optional`, `None`
    /// when neither was given.
    pub required: Option<bool>,
    /// Whether the flag is left out of help output.
    pub hidden: bool,
    /// Whether the field is excluded from resolution.
    pub skip: bool,
}

impl Disposition {
    /// Parses a disposition string. Empty tokens are ignored.
    ///
    /// # Errors
    ///
    /// Returns a message for unknown tokens, for `required` combined with
    /// `optional`, and for `-` combined with anything else.
    pub fn parse(text: &str) -> Result<Self, String> {
        let tokens: Vec<&str> = text
            .split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .collect();

        if tokens.contains(&DISABLED) {
            return if tokens.len() == 1 {
                Ok(Self {
                    skip: true,
                    ..Self::default()
                })
            } else {
                Err(format!("'{DISABLED}' cannot be combined with other options"))
            };
        }

        let mut disposition = Self::default();
        for token in tokens {
            match token {
                "required" | "optional" => {
                    let wanted = token == "required";
                    if disposition.required.is_some_and(|seen| seen != wanted) {
                        return Err("'required' and 'optional' are mutually exclusive".to_owned());
                    }
                    disposition.required = Some(wanted);
                }
                "hidden" => disposition.hidden = true,
                other => return Err(format!("unknown option '{other}'")),
            }
        }
        Ok(disposition)
    }
}
