//! Target-path policy: which locations a surface may write to.

use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// The locations a configuration surface is allowed to write to.
///
/// A surface has a fixed list of drop-in directories that take named
/// `.conf` files and, optionally, one canonical full-path file (the
/// system-wide journald configuration is such a file). The tools build
/// their policies from constant path tables; tests substitute temporary
/// directories.
#[derive(Debug, Clone)]
pub struct TargetPolicy {
    canonical_file: Option<PathBuf>,
    dropin_dirs: Vec<PathBuf>,
}

impl TargetPolicy {
    /// Policy for a surface with drop-in directories only.
    pub fn dropin_dirs<I, P>(dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        TargetPolicy {
            canonical_file: None,
            dropin_dirs: dirs.into_iter().map(Into::into).collect(),
        }
    }

    /// Policy for a surface that also owns a canonical full-path file.
    pub fn with_canonical_file<P, I, Q>(file: P, dirs: I) -> Self
    where
        P: Into<PathBuf>,
        I: IntoIterator<Item = Q>,
        Q: Into<PathBuf>,
    {
        TargetPolicy {
            canonical_file: Some(file.into()),
            dropin_dirs: dirs.into_iter().map(Into::into).collect(),
        }
    }

    /// True if `base` is the surface's canonical full-path file.
    pub fn is_canonical_file(&self, base: &Path) -> bool {
        self.canonical_file.as_deref() == Some(base)
    }

    fn is_allowed(&self, base: &Path) -> bool {
        self.is_canonical_file(base) || self.dropin_dirs.iter().any(|d| d == base)
    }

    fn allowed_paths(&self) -> Vec<PathBuf> {
        let mut paths = Vec::new();
        if let Some(file) = &self.canonical_file {
            paths.push(file.clone());
        }
        paths.extend(self.dropin_dirs.iter().cloned());
        paths
    }

    /// Check a target path and file name against the policy.
    ///
    /// The path must be in the allowed set, and a non-empty file name
    /// must be present unless the target is the canonical file. Runs
    /// before any filesystem access.
    pub fn validate(&self, base: &Path, file_name: Option<&str>) -> Result<(), ConfigError> {
        if !self.is_allowed(base) {
            return Err(ConfigError::DisallowedPath {
                path: base.to_path_buf(),
                allowed: self.allowed_paths(),
            });
        }
        if !self.is_canonical_file(base) && file_name.is_none_or(|n| n.trim().is_empty()) {
            return Err(ConfigError::MissingFileName);
        }
        Ok(())
    }

    /// Resolve the file a create operation writes to.
    ///
    /// The canonical file is used verbatim and the file name is ignored;
    /// otherwise the name gets the `.conf` suffix appended and the file
    /// lands in `base`.
    pub fn resolve_target(&self, base: &Path, file_name: Option<&str>) -> Result<PathBuf, ConfigError> {
        self.validate(base, file_name)?;
        if self.is_canonical_file(base) {
            return Ok(base.to_path_buf());
        }
        let name = file_name.ok_or(ConfigError::MissingFileName)?;
        Ok(base.join(conf_file_name(name)))
    }
}

/// Derive the on-disk file name from a caller-supplied base name. The
/// `.conf` suffix is appended exactly once.
pub fn conf_file_name(name: &str) -> String {
    format!("{}.conf", name)
}
