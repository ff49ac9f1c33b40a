//! `libconfgen` is the shared engine behind the systemd-confgen tools.
//!
//! It turns a set of typed, optional settings plus a target-path policy
//! into a configuration file on disk (or removes one), reporting whether
//! the filesystem actually changed:
//!
//! - [`policy`] — which locations a surface may write to, and how a
//!   caller-supplied base name maps to an on-disk `.conf` file
//! - [`render`] — deterministic document rendering, either `[Section]`
//!   plus `Key=value` lines or one bare token per line
//! - [`apply`] — whole-file writes (creating parent directories) and
//!   tolerant removes
//! - [`error`] — the error type shared by all of the above
//!
//! Writes are full-file overwrites, never merges, and nothing here locks
//! the target path: concurrent invocations race at the OS level and the
//! last writer wins.

pub mod apply;
pub mod error;
pub mod policy;
pub mod render;

pub use apply::{remove_config, remove_configs, write_config};
pub use error::ConfigError;
pub use policy::{TargetPolicy, conf_file_name};
pub use render::{Setting, render_flat, render_sectioned};
