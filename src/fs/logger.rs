//! Console and file logger.
//!
//! This module implements the [`log`] crate's logging facade, writing each
//! record both to the console and to `firebrand.log`. On the V5 the file
//! lands on the brain's SD card, which is the only way to read back what
//! happened during a match.
//!
//! # Usage
//!
//! Initialize the logger once, before the control loop starts:
//!
//! ```ignore
//! use firebrand::fs::logger;
//! use log::{LevelFilter, info};
//!
//! logger::init(LevelFilter::Debug).expect("Logger init failed");
//! info!("Driver control starting");
//! ```
//!
//! # Log Output
//!
//! Each line holds the level, the time since the program started, the
//! target, and the message:
//!
//! ```text
//! INFO [2m 5s 123ms] firebrand::opcontrol::mode - Control style switched to Arcade
//! WARN [2m 5s 456ms] firebrand::peripherals - Controller State Error: device disconnected
//! ```

use std::{
    fs::{File, OpenOptions},
    io::{BufWriter, Write},
    sync::{Mutex, OnceLock},
    time::Duration,
};

use humantime::{FormattedDuration, format_duration};
use log::{LevelFilter, Metadata, Record, SetLoggerError};

/// Name of the log file, relative to the working directory (the SD card root on a V5).
pub const LOG_FILE: &str = "firebrand.log";

/// A logger that writes to the console and to [`LOG_FILE`].
pub struct FireLogger {
    /// `None` if the file could not be opened (e.g., no SD card present).
    file_writer: Mutex<Option<BufWriter<File>>>,
    #[cfg(not(feature = "vexide"))]
    started:     std::time::Instant,
}

impl FireLogger {
    fn new() -> Self {
        let file_writer = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(LOG_FILE)
            .ok()
            .map(BufWriter::new);

        Self {
            file_writer: Mutex::new(file_writer),
            #[cfg(not(feature = "vexide"))]
            started: std::time::Instant::now(),
        }
    }

    #[cfg(not(feature = "vexide"))]
    fn uptime(&self) -> Duration { self.started.elapsed() }

    #[cfg(feature = "vexide")]
    fn uptime(&self) -> Duration { vexide::time::user_uptime() }
}

/// Formats `line` as `LEVEL [uptime] target - message`.
fn format_line(record: &Record, uptime: FormattedDuration) -> String {
    format!(
        "{} [{}] {} - {}\n",
        record.level(),
        uptime,
        record.target(),
        record.args()
    )
}

/// Drops sub-millisecond precision so log timestamps stay short.
fn truncate_to_millis(duration: Duration) -> Duration {
    Duration::from_millis(duration.as_millis() as u64)
}

impl log::Log for FireLogger {
    fn enabled(&self, metadata: &Metadata) -> bool { metadata.level() <= log::max_level() }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_line(record, format_duration(truncate_to_millis(self.uptime())));

        print!("{}", line);

        if let Ok(mut guard) = self.file_writer.lock() {
            if let Some(writer) = guard.as_mut() {
                let _ = writer.write_all(line.as_bytes());
            }
        }
    }

    fn flush(&self) {
        if let Ok(mut guard) = self.file_writer.lock() {
            if let Some(writer) = guard.as_mut() {
                let _ = writer.flush();
            }
        }
    }
}

static LOGGER: OnceLock<FireLogger> = OnceLock::new();

/// Installs the logger.
///
/// # Arguments
///
/// * `level` - The minimum level to record. [`LevelFilter::Debug`] also
///   records lift transitions and position reports; [`LevelFilter::Info`]
///   keeps style switches, loop start/stop and device warnings.
///
/// # Errors
///
/// Returns [`SetLoggerError`] if a logger has already been set.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    let logger = LOGGER.get_or_init(FireLogger::new);
    log::set_logger(logger).map(|()| log::set_max_level(level))
}
