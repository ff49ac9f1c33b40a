//! systemd-journald-conf — Generate journald configuration files
//!
//! Writes (or deletes) journald configuration from command-line
//! parameters: either the system-wide configuration file or a named
//! drop-in in one of the journald configuration directories.
//!
//! Allowed target paths:
//!   /etc/systemd/systemd-journald.conf       (system-wide file, default)
//!   /etc/systemd/systemd-journald.conf.d
//!   /usr/lib/systemd/systemd-journald.conf.d
//!   /run/systemd/systemd-journald.conf.d
//!
//! Only the settings given on the command line appear in the output.
//! Nothing is merged with existing file content; a create always
//! overwrites the whole file. Example:
//!
//!   systemd-journald-conf --conf-path /run/systemd/systemd-journald.conf.d \
//!       --file-name test --storage auto --forward-to-syslog yes
//!
//! writes /run/systemd/systemd-journald.conf.d/test.conf containing:
//!
//!   [Journal]
//!   Storage=auto
//!   ForwardToSyslog=yes
//!
//! Concurrent invocations against the same path are not coordinated;
//! the last writer wins. Set SYSTEMD_LOG_LEVEL=info for a report of
//! whether anything changed.

use std::fmt;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use libconfgen::{
    ConfigError, Setting, TargetPolicy, conf_file_name, remove_config, remove_configs,
    render_sectioned, write_config,
};

const EXIT_SUCCESS: u8 = 0;
const EXIT_FAILURE: u8 = 1;

/// System-wide journald configuration file. When this is the target,
/// the file name is ignored and the file itself is written.
const JOURNALD_SYSTEM_CONF: &str = "/etc/systemd/systemd-journald.conf";

/// Drop-in directories accepted as targets for named configuration
/// files, as journald itself searches them.
const JOURNALD_CONF_DIRS: &[&str] = &[
    "/etc/systemd/systemd-journald.conf.d",
    "/usr/lib/systemd/systemd-journald.conf.d",
    "/run/systemd/systemd-journald.conf.d",
];

/// Section header of every rendered document.
const JOURNAL_SECTION: &str = "[Journal]";

/// systemd-journald-conf — Generate journald configuration files
#[derive(Parser, Debug)]
#[command(name = "systemd-journald-conf", version, about)]
struct Cli {
    /// Target path: the system-wide journald configuration file or one
    /// of the journald drop-in directories
    #[arg(long, default_value = JOURNALD_SYSTEM_CONF)]
    conf_path: PathBuf,

    /// Drop-in file name, written with a .conf suffix appended; ignored
    /// when the target is the system-wide file. For --action remove
    /// this may list several names separated by spaces.
    #[arg(long)]
    file_name: Option<String>,

    /// Where to store journal data (Storage=)
    #[arg(long, value_enum)]
    storage: Option<Storage>,

    /// Whether to compress journal objects (Compress=)
    #[arg(long, value_enum)]
    compress: Option<YesNo>,

    /// Rate limit interval with an s/min/h/ms/us unit suffix
    /// (RateLimitIntervalSec=)
    #[arg(long)]
    ratelimit_interval: Option<String>,

    /// Messages allowed within the rate limit interval (RateLimitBurst=)
    #[arg(long)]
    ratelimit_burst: Option<String>,

    /// Forward journal messages to syslog (ForwardToSyslog=)
    #[arg(long, value_enum)]
    forward_to_syslog: Option<YesNo>,

    /// Forward journal messages to the kernel log buffer (ForwardToKMsg=)
    #[arg(long, value_enum)]
    forward_to_kmsg: Option<YesNo>,

    /// Forward journal messages to the system console (ForwardToConsole=)
    #[arg(long, value_enum)]
    forward_to_console: Option<YesNo>,

    /// Forward journal messages as wall messages to logged-in users
    /// (ForwardToWall=)
    #[arg(long, value_enum)]
    forward_to_wall: Option<YesNo>,

    /// Create or remove the configuration file
    #[arg(long, value_enum, default_value_t = Action::Create)]
    action: Action,

    /// Report what would change without touching the filesystem
    #[arg(long)]
    dry_run: bool,
}

/// Value set of `Storage=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Storage {
    Volatile,
    Persistent,
    Auto,
    None,
}

impl fmt::Display for Storage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Storage::Volatile => "volatile",
            Storage::Persistent => "persistent",
            Storage::Auto => "auto",
            Storage::None => "none",
        })
    }
}

/// Boolean switches rendered as journald `yes`/`no` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum YesNo {
    Yes,
    No,
}

impl fmt::Display for YesNo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            YesNo::Yes => "yes",
            YesNo::No => "no",
        })
    }
}

/// Whether to write or delete configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Action {
    Create,
    Remove,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Action::Create => "create",
            Action::Remove => "remove",
        })
    }
}

/// The journald settings in their fixed output order.
fn journal_settings(cli: &Cli) -> Vec<Setting> {
    vec![
        Setting::new("Storage", cli.storage.map(|v| v.to_string())),
        Setting::new("Compress", cli.compress.map(|v| v.to_string())),
        Setting::new("RateLimitIntervalSec", cli.ratelimit_interval.clone()),
        Setting::new("RateLimitBurst", cli.ratelimit_burst.clone()),
        Setting::new("ForwardToSyslog", cli.forward_to_syslog.map(|v| v.to_string())),
        Setting::new("ForwardToKMsg", cli.forward_to_kmsg.map(|v| v.to_string())),
        Setting::new("ForwardToConsole", cli.forward_to_console.map(|v| v.to_string())),
        Setting::new("ForwardToWall", cli.forward_to_wall.map(|v| v.to_string())),
    ]
}

/// Policy over the well-known journald locations.
fn journald_policy() -> TargetPolicy {
    TargetPolicy::with_canonical_file(JOURNALD_SYSTEM_CONF, JOURNALD_CONF_DIRS.iter().copied())
}

/// Apply the requested action and report whether the filesystem changed
/// (with --dry-run, whether it would change).
fn configure(cli: &Cli, policy: &TargetPolicy) -> Result<bool, ConfigError> {
    policy.validate(&cli.conf_path, cli.file_name.as_deref())?;

    match cli.action {
        Action::Create => {
            let document = render_sectioned(JOURNAL_SECTION, &journal_settings(cli));
            let target = policy.resolve_target(&cli.conf_path, cli.file_name.as_deref())?;
            if cli.dry_run {
                log::info!("Would write {}", target.display());
                return Ok(true);
            }
            write_config(&target, &document)
        }
        Action::Remove => {
            if policy.is_canonical_file(&cli.conf_path) {
                if cli.dry_run {
                    return Ok(cli.conf_path.exists());
                }
                remove_config(&cli.conf_path)
            } else {
                let names = cli.file_name.as_deref().ok_or(ConfigError::MissingFileName)?;
                if cli.dry_run {
                    let changed = names
                        .split_whitespace()
                        .any(|name| cli.conf_path.join(conf_file_name(name)).exists());
                    return Ok(changed);
                }
                remove_configs(&cli.conf_path, names)
            }
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
                "[{}][systemd-journald-conf][{}] {}",
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

    match configure(&cli, &journald_policy()) {
        Ok(true) => {
            log::info!("Configuration changed");
            EXIT_SUCCESS
        }
        Ok(false) => {
            log::info!("Nothing changed");
            EXIT_SUCCESS
        }
        Err(e) => {
            eprintln!("systemd-journald-conf: {}", e);
            EXIT_FAILURE
        }
    }
}

fn main() -> ExitCode {
    ExitCode::from(run())
}
