use crate::error::{GraphError, Result};
use simplelog::{CombinedLogger, Config, LevelFilter, WriteLogger};
use std::fs::{self, OpenOptions};
use std::io::{Error, ErrorKind};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Once;

static INIT: Once = Once::new();
static LOGGER_INITIALIZED: AtomicBool = AtomicBool::new(false);

/// `~/.local/share/ctrlgraph/logs`
pub fn log_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| Error::new(ErrorKind::NotFound, "HOME environment variable not set"))?;

    Ok(PathBuf::from(home)
        .join(".local")
        .join("share")
        .join("ctrlgraph")
        .join("logs"))
}

/// Sends `log` records at debug level and above to `app.log` in [`log_dir`].
/// Safe to call more than once; only the first call installs the logger.
pub fn init_logger() -> Result<()> {
    let log_dir = log_dir()?;
    fs::create_dir_all(&log_dir)?;

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join("app.log"))?;

    INIT.call_once(|| {
        let logger = WriteLogger::new(LevelFilter::Debug, Config::default(), log_file);
        if CombinedLogger::init(vec![logger]).is_ok() {
            LOGGER_INITIALIZED.store(true, Ordering::SeqCst);
        }
    });

    if LOGGER_INITIALIZED.load(Ordering::SeqCst) {
        Ok(())
    } else {
        Err(GraphError::Logger)
    }
}
