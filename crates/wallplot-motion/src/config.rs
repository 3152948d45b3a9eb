//! Frame configuration: the immutable parameters of one installation.
//!
//! A frame is two motor anchors at a known span with a sheet of paper
//! somewhere between them. Everything the motion engine needs to know
//! about the machine lives here; the values are loaded once at startup
//! and never mutated afterwards.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use wallplot_core::{PlotterError, Point, Result};

/// Immutable machine parameters.
///
/// Distances are in surface units (millimeters on the reference
/// hardware); `steps_per_unit` converts them to motor step counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameConfig {
    /// Distance between the two motor anchors.
    pub span: f64,
    /// Width of the drawing sheet.
    pub sheet_width: f64,
    /// Height of the drawing sheet.
    pub sheet_height: f64,
    /// Horizontal distance from the left anchor to the sheet's left edge.
    pub sheet_offset_x: f64,
    /// Vertical distance from the anchor line to the sheet's top edge.
    pub sheet_offset_y: f64,
    /// Horizontal drawing scale applied to every target.
    pub scale_x: f64,
    /// Vertical drawing scale applied to every target.
    pub scale_y: f64,
    /// Horizontal user offset, applied after scaling.
    pub offset_x: f64,
    /// Vertical user offset, applied after scaling.
    pub offset_y: f64,
    /// Motor steps per surface unit of cable.
    pub steps_per_unit: f64,
    /// Direction-encoding polarity of the left motor.
    pub left_direction: bool,
    /// Direction-encoding polarity of the right motor.
    pub right_direction: bool,
    /// Swap the two motor channels (cables crossed at installation).
    pub reverse_motors: bool,
    /// Drawing speed in surface units per second.
    pub speed: f64,
    /// Settling delay before a pen transition, in milliseconds.
    pub pre_settle_ms: u64,
    /// Settling delay after a pen transition, in milliseconds.
    pub post_settle_ms: u64,
    /// Longest straight draw before it is subdivided. Chords between
    /// cable-length targets are not straight lines on the sheet, so
    /// long segments are split to bound the sag.
    pub max_segment_length: f64,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            span: 1000.0,
            sheet_width: 600.0,
            sheet_height: 400.0,
            sheet_offset_x: 200.0,
            sheet_offset_y: 50.0,
            scale_x: 1.0,
            scale_y: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
            steps_per_unit: 10.0,
            left_direction: true,
            right_direction: true,
            reverse_motors: false,
            speed: 20.0,
            pre_settle_ms: 100,
            post_settle_ms: 200,
            max_segment_length: 20.0,
        }
    }
}

impl FrameConfig {
    /// Check that the configuration describes a physically possible
    /// machine.
    pub fn validate(&self) -> Result<()> {
        if self.span < self.sheet_width + self.sheet_offset_x {
            return Err(PlotterError::SpanTooShort {
                span: self.span,
                sheet_width: self.sheet_width,
                sheet_offset_x: self.sheet_offset_x,
            });
        }
        if !(self.speed > 0.0) {
            return Err(PlotterError::InvalidSpeed { speed: self.speed });
        }
        if !(self.steps_per_unit > 0.0) {
            return Err(PlotterError::Configuration(format!(
                "stepsPerUnit must be positive, got {}",
                self.steps_per_unit
            )));
        }
        Ok(())
    }

    /// Length of cable wound or released by one motor step.
    pub fn step_length(&self) -> f64 {
        1.0 / self.steps_per_unit
    }

    /// Per-step delay in microseconds for the faster axis, derived
    /// from the configured drawing speed.
    pub fn base_delay_micros(&self) -> f64 {
        1_000_000.0 * self.step_length() / self.speed
    }
}

/// Named positions on the sheet, used for initial and final pen
/// parking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardinalPoint {
    UpperLeft,
    UpperCenter,
    UpperRight,
    LeftCenter,
    Center,
    RightCenter,
    LowerLeft,
    LowerCenter,
    LowerRight,
}

impl CardinalPoint {
    /// Resolve to surface coordinates on the given frame's sheet.
    pub fn to_point(self, config: &FrameConfig) -> Point {
        let x = match self {
            CardinalPoint::UpperLeft | CardinalPoint::LeftCenter | CardinalPoint::LowerLeft => 0.0,
            CardinalPoint::UpperCenter | CardinalPoint::Center | CardinalPoint::LowerCenter => {
                config.sheet_width / 2.0
            }
            CardinalPoint::UpperRight | CardinalPoint::RightCenter | CardinalPoint::LowerRight => {
                config.sheet_width
            }
        };
        let y = match self {
            CardinalPoint::UpperLeft | CardinalPoint::UpperCenter | CardinalPoint::UpperRight => {
                config.sheet_height
            }
            CardinalPoint::LeftCenter | CardinalPoint::Center | CardinalPoint::RightCenter => {
                config.sheet_height / 2.0
            }
            CardinalPoint::LowerLeft | CardinalPoint::LowerCenter | CardinalPoint::LowerRight => 0.0,
        };
        Point::new(x, y)
    }
}

impl FromStr for CardinalPoint {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "UPPER_LEFT" => Ok(CardinalPoint::UpperLeft),
            "UPPER_CENTER" => Ok(CardinalPoint::UpperCenter),
            "UPPER_RIGHT" => Ok(CardinalPoint::UpperRight),
            "LEFT_CENTER" => Ok(CardinalPoint::LeftCenter),
            "CENTER" => Ok(CardinalPoint::Center),
            "RIGHT_CENTER" => Ok(CardinalPoint::RightCenter),
            "LOWER_LEFT" => Ok(CardinalPoint::LowerLeft),
            "LOWER_CENTER" => Ok(CardinalPoint::LowerCenter),
            "LOWER_RIGHT" => Ok(CardinalPoint::LowerRight),
            _ => Err(format!("unknown position: {}", s)),
        }
    }
}
