//! Logger installation for the binary.
//!
//! Dialogs own the alternate screen while they run, so log output goes to
//! the file named by `MODALPAD_LOG_FILE`. Without it logging stays off.

use std::env;
use std::fs::OpenOptions;
use std::io;
use std::path::Path;

use env_logger::{Builder, Env, Target};
use log::LevelFilter;

pub const LOG_FILE_ENV: &str = "MODALPAD_LOG_FILE";
const FILTER_ENV: &str = "RUST_LOG";

/// `default_level` applies when `RUST_LOG` is unset.
pub fn init(default_level: &str) -> io::Result<()> {
    match env::var_os(LOG_FILE_ENV) {
        Some(path) if !path.is_empty() => init_file(Path::new(&path), default_level),
        _ => {
            log::set_max_level(LevelFilter::Off);
            Ok(())
        }
    }
}

pub fn init_file(path: &Path, default_level: &str) -> io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let installed = Builder::from_env(Env::default().filter_or(FILTER_ENV, default_level))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init();
    if installed.is_err() {
        log::debug!("logger already installed; keeping the existing one");
    }
    Ok(())
}
