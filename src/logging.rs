// Conditional logging macros - only active in debug builds

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        log::debug!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {{}};
}

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        log::info!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {{}};
}

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

/// Where log records go when the log file cannot be opened.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fallback {
    Stderr,
    /// The terminal is owned by a full-screen UI, so stay silent.
    Silent,
}

fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Install `env_logger`, filtered by `RUST_LOG` (default `warn`).
///
/// Returns true when records are written to `path`.
pub fn init(path: &Path, fallback: Fallback) -> bool {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    builder.format(|buf, record| {
        writeln!(
            buf,
            "{} [{}] {}: {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
            record.level(),
            record.target(),
            record.args()
        )
    });

    let to_file = match open_log_file(path) {
        Ok(file) => {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
            true
        }
        Err(e) => match fallback {
            Fallback::Stderr => {
                eprintln!("Cannot open log file '{}': {e}", path.display());
                builder.target(env_logger::Target::Stderr);
                false
            }
            Fallback::Silent => return false,
        },
    };

    if builder.try_init().is_err() {
        return false;
    }
    to_file
}
