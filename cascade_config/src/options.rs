//! Resolution policy passed down the schema tree.

/// Policy for one resolution, copied into every nested group.
///
/// Groups receive a modified copy (new prefixes, their own category, and
/// `required_by_default` set to the group's own requiredness), so sibling
/// subtrees never observe each other's changes.
///
/// ```
/// use cascade_config::ParseOptions;
/// let opts = ParseOptions::file_and_env().with_env_prefix("APP");
/// assert!(opts.already_has_default_values);
/// assert_eq!(opts.env_prefix, "APP");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Treat non-zero values already in the destination as defaults.
    pub already_has_default_values: bool,
    /// Leaves without `required` or `optional` are required.
    pub required_by_default: bool,
    /// Inherited environment variable prefix.
    pub env_prefix: String,
    /// Inherited flag prefix.
    pub flag_prefix: String,
    /// Inherited help heading.
    pub category: Option<String>,
    /// Environment lookup is disabled for the subtree.
    pub env_disabled: bool,
    /// Flags are disabled for the subtree.
    pub flag_disabled: bool,
}

impl ParseOptions {
    /// For applications that decode a file into the destination first and
    /// then layer environment and flags on top.
    #[must_use]
    pub const fn file_and_env() -> Self {
        Self {
            already_has_default_values: true,
            required_by_default: true,
            env_prefix: String::new(),
            flag_prefix: String::new(),
            category: None,
            env_disabled: false,
            flag_disabled: false,
        }
    }

    /// For applications configured from environment and flags only.
    #[must_use]
    pub const fn env_only() -> Self {
        Self {
            already_has_default_values: false,
            required_by_default: true,
            env_prefix: String::new(),
            flag_prefix: String::new(),
            category: None,
            env_disabled: false,
            flag_disabled: false,
        }
    }

    /// Sets the root environment prefix.
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Sets the root flag prefix.
    #[must_use]
    pub fn with_flag_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.flag_prefix = prefix.into();
        self
    }

    /// Sets whether leaves are required unless marked `optional`.
    #[must_use]
    pub const fn with_required_by_default(mut self, required: bool) -> Self {
        self.required_by_default = required;
        self
    }
}
