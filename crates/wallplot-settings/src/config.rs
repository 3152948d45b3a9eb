//! The resolved plotter configuration.
//!
//! `PlotterConfig` is what the rest of the system consumes: the frame
//! parameters the motion engine needs plus the host-side choices
//! (which drawing to plot, where to park) that surround a plot.

use serde::{Deserialize, Serialize};
use wallplot_motion::{CardinalPoint, FrameConfig};

/// Pen servo angles, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PenSettings {
    /// Servo angle while the pen is on the sheet.
    pub writing_angle: f64,
    /// Servo angle while the pen is lifted.
    pub moving_angle: f64,
}

impl Default for PenSettings {
    fn default() -> Self {
        Self {
            writing_angle: 30.0,
            moving_angle: 60.0,
        }
    }
}

/// Complete configuration for one plotting session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotterConfig {
    /// Machine geometry and motion parameters.
    pub frame: FrameConfig,
    /// Pen servo parameters.
    pub pen: PenSettings,
    /// Name of the drawing file to plot.
    pub drawing_file: String,
    /// Where the pen starts before the plot.
    pub init_position: CardinalPoint,
    /// Where the pen parks after the plot.
    pub end_position: CardinalPoint,
    /// Delay before the first movement, in milliseconds. Gives the
    /// operator time to step away from the sheet.
    pub initial_delay_ms: u64,
}

impl Default for PlotterConfig {
    fn default() -> Self {
        Self {
            frame: FrameConfig::default(),
            pen: PenSettings::default(),
            drawing_file: String::new(),
            init_position: CardinalPoint::Center,
            end_position: CardinalPoint::Center,
            initial_delay_ms: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        assert!(PlotterConfig::default().frame.validate().is_ok());
    }
}
