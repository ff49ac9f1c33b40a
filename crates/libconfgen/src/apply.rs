//! Filesystem side of the engine: whole-file writes and removes.
//!
//! Every operation here reports a changed flag: whether the filesystem
//! was actually modified. Removing a file that does not exist is a
//! no-op, not an error.

use std::fs;
use std::io;
use std::path::Path;

use log::debug;

use crate::error::ConfigError;
use crate::policy::conf_file_name;

/// Write `contents` as the full content of `path`, creating missing
/// parent directories first. Always a whole-file overwrite, never a
/// merge with what was there before.
pub fn write_config(path: &Path, contents: &str) -> Result<bool, ConfigError> {
    if let Some(parent) = path.parent()
        && !parent.exists()
    {
        fs::create_dir_all(parent).map_err(|e| ConfigError::io(parent, e))?;
    }

    fs::write(path, contents).map_err(|e| ConfigError::io(path, e))?;
    debug!("Wrote {}", path.display());
    Ok(true)
}

/// Remove a single configuration file.
pub fn remove_config(path: &Path) -> Result<bool, ConfigError> {
    match fs::remove_file(path) {
        Ok(()) => {
            debug!("Removed {}", path.display());
            Ok(true)
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(ConfigError::io(path, e)),
    }
}

/// Remove `<name>.conf` under `dir` for every whitespace-separated base
/// name in `names`. Returns true if at least one file was removed.
pub fn remove_configs(dir: &Path, names: &str) -> Result<bool, ConfigError> {
    let mut changed = false;
    for name in names.split_whitespace() {
        if remove_config(&dir.join(conf_file_name(name)))? {
            changed = true;
        }
    }
    Ok(changed)
}
