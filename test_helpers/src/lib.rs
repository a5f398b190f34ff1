//! Test helpers shared across the `cascade_config` workspace.
//!
//! [`env`] serialises mutation of the process environment and restores it
//! afterwards; [`jail`] runs a closure inside a [`figment::Jail`] and writes
//! configuration files into it.

pub mod env;
pub mod jail;
