//! # Wallplot Settings
//!
//! Configuration handling for the plotter: the `key value` device
//! configuration format the machine ships with, JSON persistence for
//! host-side tooling, and validation. The parsed result is a
//! `PlotterConfig` with the frame parameters fully resolved; the
//! motion engine never sees the text format.

pub mod config;
pub mod device_file;
pub mod error;
pub mod persistence;

pub use config::{PenSettings, PlotterConfig};
pub use device_file::{load_device_file, parse_device_config};
pub use error::{ConfigError, SettingsError};
pub use persistence::{load_json_file, save_json_file};
