//! Parser for the `key value` device configuration format.
//!
//! One parameter per line, key and value separated by whitespace,
//! `#` starts a comment, blank lines are ignored. Recoverable problems
//! (unknown keys, malformed or overlong lines) are reported through
//! the diagnostics sink and the line is skipped; a missing required
//! key or an unparseable value for a known key is fatal, because the
//! machine must not move on a guessed parameter.

use crate::config::PlotterConfig;
use crate::error::{ConfigError, SettingsError};
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;
use tracing::info;
use wallplot_core::{DiagnosticsSink, Warning};
use wallplot_motion::CardinalPoint;

/// Longest accepted configuration line, in bytes.
const MAX_LINE_LEN: usize = 128;

/// Every key that must appear for the configuration to be complete.
const REQUIRED_KEYS: &[&str] = &[
    "span",
    "sheetWidth",
    "sheetHeight",
    "sheetPositionX",
    "sheetPositionY",
    "scaleX",
    "scaleY",
    "offsetX",
    "offsetY",
    "stepsPerUnit",
    "leftDirection",
    "rightDirection",
    "reverseMotors",
    "defaultSpeed",
    "preServoDelay",
    "postServoDelay",
    "servoWritingAngle",
    "servoMovingAngle",
    "initialDelay",
    "initPosition",
    "endPosition",
    "drawingFile",
];

/// Load and validate a device configuration file.
pub fn load_device_file(
    path: impl AsRef<Path>,
    diagnostics: &dyn DiagnosticsSink,
) -> Result<PlotterConfig, SettingsError> {
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);
    let config = parse_device_config(reader, diagnostics)?;
    info!(path = %path.display(), "device configuration loaded");
    Ok(config)
}

/// Parse a device configuration from any line-oriented reader.
pub fn parse_device_config(
    reader: impl BufRead,
    diagnostics: &dyn DiagnosticsSink,
) -> Result<PlotterConfig, SettingsError> {
    let mut config = PlotterConfig::default();
    let mut seen: HashSet<&'static str> = HashSet::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let number = (index + 1) as u32;
        if line.len() > MAX_LINE_LEN {
            diagnostics.warning(&Warning::OverlongConfigLine { line: number });
            continue;
        }
        let text = match line.find('#') {
            Some(pos) => &line[..pos],
            None => line.as_str(),
        };
        let text = text.trim();
        if text.is_empty() {
            continue;
        }
        let (key, value) = match text.split_once(char::is_whitespace) {
            Some((key, value)) => (key, value.trim()),
            None => {
                diagnostics.warning(&Warning::MalformedConfigLine { line: number });
                continue;
            }
        };
        if value.is_empty() {
            diagnostics.warning(&Warning::MalformedConfigLine { line: number });
            continue;
        }
        apply_key(&mut config, key, value, &mut seen, diagnostics)?;
    }

    for key in REQUIRED_KEYS {
        if !seen.contains(key) {
            return Err(ConfigError::MissingKey(key).into());
        }
    }
    config.frame.validate()?;
    Ok(config)
}

fn apply_key(
    config: &mut PlotterConfig,
    key: &str,
    value: &str,
    seen: &mut HashSet<&'static str>,
    diagnostics: &dyn DiagnosticsSink,
) -> Result<(), SettingsError> {
    let frame = &mut config.frame;
    let pen = &mut config.pen;
    let known: &'static str = match key {
        "span" => {
            frame.span = parse_value(key, value)?;
            "span"
        }
        "sheetWidth" => {
            frame.sheet_width = parse_value(key, value)?;
            "sheetWidth"
        }
        "sheetHeight" => {
            frame.sheet_height = parse_value(key, value)?;
            "sheetHeight"
        }
        "sheetPositionX" => {
            frame.sheet_offset_x = parse_value(key, value)?;
            "sheetPositionX"
        }
        "sheetPositionY" => {
            frame.sheet_offset_y = parse_value(key, value)?;
            "sheetPositionY"
        }
        "scaleX" => {
            frame.scale_x = parse_value(key, value)?;
            "scaleX"
        }
        "scaleY" => {
            frame.scale_y = parse_value(key, value)?;
            "scaleY"
        }
        "offsetX" => {
            frame.offset_x = parse_value(key, value)?;
            "offsetX"
        }
        "offsetY" => {
            frame.offset_y = parse_value(key, value)?;
            "offsetY"
        }
        "stepsPerUnit" => {
            frame.steps_per_unit = parse_value(key, value)?;
            "stepsPerUnit"
        }
        "leftDirection" => {
            frame.left_direction = parse_bool(key, value)?;
            "leftDirection"
        }
        "rightDirection" => {
            frame.right_direction = parse_bool(key, value)?;
            "rightDirection"
        }
        "reverseMotors" => {
            frame.reverse_motors = parse_bool(key, value)?;
            "reverseMotors"
        }
        "defaultSpeed" => {
            frame.speed = parse_value(key, value)?;
            "defaultSpeed"
        }
        "preServoDelay" => {
            frame.pre_settle_ms = parse_value(key, value)?;
            "preServoDelay"
        }
        "postServoDelay" => {
            frame.post_settle_ms = parse_value(key, value)?;
            "postServoDelay"
        }
        "maxSegmentLength" => {
            frame.max_segment_length = parse_value(key, value)?;
            "maxSegmentLength"
        }
        "servoWritingAngle" => {
            pen.writing_angle = parse_value(key, value)?;
            "servoWritingAngle"
        }
        "servoMovingAngle" => {
            pen.moving_angle = parse_value(key, value)?;
            "servoMovingAngle"
        }
        "initialDelay" => {
            config.initial_delay_ms = parse_value(key, value)?;
            "initialDelay"
        }
        "initPosition" => {
            config.init_position = parse_position(key, value)?;
            "initPosition"
        }
        "endPosition" => {
            config.end_position = parse_position(key, value)?;
            "endPosition"
        }
        "drawingFile" => {
            config.drawing_file = value.to_string();
            "drawingFile"
        }
        _ => {
            diagnostics.warning(&Warning::UnknownConfigKey {
                key: key.to_string(),
            });
            return Ok(());
        }
    };
    seen.insert(known);
    Ok(())
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value {
        "true" | "yes" => Ok(true),
        "false" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

fn parse_position(key: &str, value: &str) -> Result<CardinalPoint, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}
