//! systemd-modules-load-conf — Generate modules-load.d configuration files
//!
//! Writes (or deletes) kernel module lists under the modules-load.d
//! directories, one module name per line, for systemd-modules-load(8)
//! to pick up at boot.
//!
//! Allowed target directories:
//!   /etc/modules-load.d       (default)
//!   /run/modules-load.d
//!   /usr/lib/modules-load.d
//!
//! Example:
//!
//!   systemd-modules-load-conf --file-name my_tunnel \
//!       --modules "ipip sit vti" --state create
//!
//! writes /etc/modules-load.d/my_tunnel.conf containing:
//!
//!   ipip
//!   sit
//!   vti
//!
//! A create always overwrites the whole file; a remove accepts several
//! space-separated names and deletes whichever of them exist. Set
//! SYSTEMD_LOG_LEVEL=info for a report of whether anything changed.

use std::fmt;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use libconfgen::{
    ConfigError, TargetPolicy, conf_file_name, remove_configs, render_flat, write_config,
};

const EXIT_SUCCESS: u8 = 0;
const EXIT_FAILURE: u8 = 1;

/// Default target directory for module list files.
const MODULES_LOAD_SYSTEM_DIR: &str = "/etc/modules-load.d";

/// Directories accepted as targets, as systemd-modules-load searches
/// them.
const MODULES_LOAD_DIRS: &[&str] = &[
    MODULES_LOAD_SYSTEM_DIR,
    "/run/modules-load.d",
    "/usr/lib/modules-load.d",
];

/// systemd-modules-load-conf — Generate modules-load.d configuration files
#[derive(Parser, Debug)]
#[command(name = "systemd-modules-load-conf", version, about)]
struct Cli {
    /// Target directory for the module list file
    #[arg(long, default_value = MODULES_LOAD_SYSTEM_DIR)]
    conf_path: PathBuf,

    /// File name for the module list, written with a .conf suffix
    /// appended. For --state remove this may list several names
    /// separated by spaces.
    #[arg(long)]
    file_name: String,

    /// Whitespace-separated module names to load; required for create
    #[arg(long)]
    modules: Option<String>,

    /// Whether the configuration file should be created or removed
    #[arg(long, value_enum)]
    state: State,

    /// Report what would change without touching the filesystem
    #[arg(long)]
    dry_run: bool,
}

/// Whether to write or delete configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum State {
    Create,
    Remove,
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            State::Create => "create",
            State::Remove => "remove",
        })
    }
}

/// Policy over the well-known modules-load.d locations.
fn modules_load_policy() -> TargetPolicy {
    TargetPolicy::dropin_dirs(MODULES_LOAD_DIRS.iter().copied())
}

/// Apply the requested state and report whether the filesystem changed
/// (with --dry-run, whether it would change).
fn configure(cli: &Cli, policy: &TargetPolicy) -> Result<bool, ConfigError> {
    policy.validate(&cli.conf_path, Some(&cli.file_name))?;

    match cli.state {
        State::Create => {
            let modules = cli
                .modules
                .as_deref()
                .filter(|m| !m.trim().is_empty())
                .ok_or(ConfigError::MissingValue("modules"))?;
            let document = render_flat(modules);
            let target = policy.resolve_target(&cli.conf_path, Some(&cli.file_name))?;
            if cli.dry_run {
                log::info!("Would write {}", target.display());
                return Ok(true);
            }
            write_config(&target, &document)
        }
        State::Remove => {
            if cli.dry_run {
                let changed = cli
                    .file_name
                    .split_whitespace()
                    .any(|name| cli.conf_path.join(conf_file_name(name)).exists());
                return Ok(changed);
            }
            remove_configs(&cli.conf_path, &cli.file_name)
        }
    }
}

fn setup_logging() {
    let level = std::env::var("SYSTEMD_LOG_LEVEL")
        .ok()
        .and_then(|l| match l.to_lowercase().as_str() {
            "debug" | "7" => Some(log::LevelFilter::Debug),
            "info" | "6" => Some(log::LevelFilter::Info),
            "notice" | "5" | "warning" | "4" => Some(log::LevelFilter::Warn),
            "err" | "3" | "crit" | "2" | "alert" | "1" | "emerg" | "0" => {
                Some(log::LevelFilter::Error)
            }
            _ => None,
        })
        .unwrap_or(log::LevelFilter::Warn);

    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{}][systemd-modules-load-conf][{}] {}",
                chrono::Local::now().format("%H:%M:%S"),
                record.level(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stderr())
        .apply()
        .ok();
}

fn run() -> u8 {
    let cli = Cli::parse();
    setup_logging();

    match configure(&cli, &modules_load_policy()) {
        Ok(true) => {
            log::info!("Configuration changed");
            EXIT_SUCCESS
        }
        Ok(false) => {
            log::info!("Nothing changed");
            EXIT_SUCCESS
        }
        Err(e) => {
            eprintln!("systemd-modules-load-conf: {}", e);
            EXIT_FAILURE
        }
    }
}

fn main() -> ExitCode {
    ExitCode::from(run())
}
