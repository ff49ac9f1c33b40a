//! Error type shared by the configuration engine and the tools.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Errors reported by the configuration engine.
///
/// The first three variants are caller errors and are detected before
/// any filesystem access. `Io` wraps an operating-system failure from
/// the write or remove itself; it is fatal for the invocation and never
/// retried.
#[derive(Debug)]
pub enum ConfigError {
    /// The requested target path is not in the surface's allowed set.
    DisallowedPath {
        path: PathBuf,
        allowed: Vec<PathBuf>,
    },
    /// The target directory takes named drop-in files and no file name
    /// was given.
    MissingFileName,
    /// A value required for the requested operation was not supplied.
    MissingValue(&'static str),
    /// Filesystem failure at `path`.
    Io { path: PathBuf, source: io::Error },
}

impl ConfigError {
    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        ConfigError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::DisallowedPath { path, allowed } => {
                write!(
                    f,
                    "{} is not an allowed configuration path (expected one of:",
                    path.display()
                )?;
                for p in allowed {
                    write!(f, " {}", p.display())?;
                }
                write!(f, ")")
            }
            ConfigError::MissingFileName => {
                write!(f, "file_name must be set when the target is a drop-in directory")
            }
            ConfigError::MissingValue(name) => {
                write!(f, "{} must be set for this operation", name)
            }
            ConfigError::Io { path, source } => {
                write!(f, "{}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disallowed_path_message_lists_alternatives() {
        let err = ConfigError::DisallowedPath {
            path: PathBuf::from("/tmp/nowhere"),
            allowed: vec![
                PathBuf::from("/etc/modules-load.d"),
                PathBuf::from("/run/modules-load.d"),
            ],
        };
        let msg = err.to_string();
        assert!(msg.contains("/tmp/nowhere"));
        assert!(msg.contains("/etc/modules-load.d"));
        assert!(msg.contains("/run/modules-load.d"));
    }

    #[test]
    fn test_missing_value_names_the_option() {
        let err = ConfigError::MissingValue("modules");
        assert!(err.to_string().contains("modules"));
    }

    #[test]
    fn test_io_error_keeps_source() {
        use std::error::Error;

        let err = ConfigError::io(
            Path::new("/run/modules-load.d/a.conf"),
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.to_string().contains("/run/modules-load.d/a.conf"));
        assert!(err.source().is_some());
    }
}
