//! Filesystem utilities for the V5 Brain.
//!
//! # Logging
//!
//! The `logger` submodule provides a logger that writes to the console and
//! to `firebrand.log` on the SD card. This is useful for debugging issues
//! that only occur on the robot, such as a motor dropping off mid-match.
//!
//! # Example
//!
//! ```ignore
//! use firebrand::fs::logger;
//! use log::{LevelFilter, info};
//!
//! logger::init(LevelFilter::Info).expect("Failed to initialize logger");
//! info!("Robot initialized successfully");
//! ```

/// Console and SD-card logging.
pub mod logger;
