//! Kinematic transform from surface coordinates to cable lengths.
//!
//! The pen hangs from two cables anchored at the top corners of the
//! frame. For a target point on the sheet, each cable length is the
//! Euclidean distance from its anchor to the (scaled and offset)
//! point, expressed in motor steps.
//!
//! The transform is pure: points outside the sheet still get a length.
//! Clamping to the sheet happens upstream in the engine's segment
//! logic, not here.

use crate::config::FrameConfig;
use wallplot_core::Point;

/// Which motor a cable belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// Precomputed kinematic parameters for one frame.
#[derive(Debug, Clone)]
pub struct Kinematics {
    span: f64,
    sheet_height: f64,
    sheet_offset_x: f64,
    sheet_offset_y: f64,
    scale_x: f64,
    scale_y: f64,
    offset_x: f64,
    offset_y: f64,
    steps_per_unit: f64,
}

impl Kinematics {
    /// Capture the frame parameters the transform depends on.
    pub fn new(config: &FrameConfig) -> Self {
        Self {
            span: config.span,
            sheet_height: config.sheet_height,
            sheet_offset_x: config.sheet_offset_x,
            sheet_offset_y: config.sheet_offset_y,
            scale_x: config.scale_x,
            scale_y: config.scale_y,
            offset_x: config.offset_x,
            offset_y: config.offset_y,
            steps_per_unit: config.steps_per_unit,
        }
    }

    /// Cable length for one side at a surface point, in whole steps.
    ///
    /// Truncates toward zero, matching the integer cast the step
    /// counters use; `MotorState` is compared against these exact
    /// values after every segment.
    pub fn cable_length(&self, side: Side, point: Point) -> i64 {
        let ax = self.scale_x * point.x + self.offset_x;
        let ay = self.scale_y * point.y + self.offset_y;
        let dx = match side {
            Side::Left => self.sheet_offset_x + ax,
            Side::Right => self.span - self.sheet_offset_x - ax,
        };
        let dy = self.sheet_offset_y + self.sheet_height - ay;
        (dx.hypot(dy) * self.steps_per_unit) as i64
    }

    /// Both cable lengths at once.
    pub fn cable_lengths(&self, point: Point) -> (i64, i64) {
        (
            self.cable_length(Side::Left, point),
            self.cable_length(Side::Right, point),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_frame() -> FrameConfig {
        FrameConfig {
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
            ..FrameConfig::default()
        }
    }

    #[test]
    fn test_lengths_nonnegative_across_sheet() {
        let kin = Kinematics::new(&reference_frame());
        for &x in &[0.0, 150.0, 300.0, 450.0, 600.0] {
            for &y in &[0.0, 100.0, 200.0, 300.0, 400.0] {
                let (left, right) = kin.cable_lengths(Point::new(x, y));
                assert!(left >= 0, "left length negative at ({}, {})", x, y);
                assert!(right >= 0, "right length negative at ({}, {})", x, y);
            }
        }
    }

    #[test]
    fn test_left_length_increases_away_from_left_anchor() {
        let kin = Kinematics::new(&reference_frame());
        let mut previous = kin.cable_length(Side::Left, Point::new(0.0, 200.0));
        for &x in &[100.0, 200.0, 300.0, 400.0, 500.0, 600.0] {
            let length = kin.cable_length(Side::Left, Point::new(x, 200.0));
            assert!(length > previous, "left length not increasing at x={}", x);
            previous = length;
        }
    }

    #[test]
    fn test_right_length_decreases_toward_right_anchor() {
        let kin = Kinematics::new(&reference_frame());
        let mut previous = kin.cable_length(Side::Right, Point::new(0.0, 200.0));
        for &x in &[100.0, 200.0, 300.0, 400.0, 500.0, 600.0] {
            let length = kin.cable_length(Side::Right, Point::new(x, 200.0));
            assert!(length < previous, "right length not decreasing at x={}", x);
            previous = length;
        }
    }

    #[test]
    fn test_known_values_at_origin() {
        let kin = Kinematics::new(&reference_frame());
        // Left anchor is 200 units left of and 450 units above the
        // sheet origin: sqrt(200^2 + 450^2) = 492.44..., times 10
        // steps per unit, truncated.
        assert_eq!(kin.cable_length(Side::Left, Point::ORIGIN), 4924);
        // Right anchor: sqrt(800^2 + 450^2) = 917.87...
        assert_eq!(kin.cable_length(Side::Right, Point::ORIGIN), 9178);
    }

    #[test]
    fn test_symmetric_at_sheet_center_of_symmetric_frame() {
        // Sheet centered in the span: both cables are equal at the
        // horizontal center.
        let config = FrameConfig {
            span: 1000.0,
            sheet_width: 600.0,
            sheet_offset_x: 200.0,
            ..reference_frame()
        };
        let kin = Kinematics::new(&config);
        let center = Point::new(300.0, 123.0);
        let (left, right) = kin.cable_lengths(center);
        assert_eq!(left, right);
    }

    #[test]
    fn test_scale_and_offset_applied_before_distance() {
        let config = FrameConfig {
            scale_x: 2.0,
            scale_y: 2.0,
            offset_x: 10.0,
            offset_y: 5.0,
            ..reference_frame()
        };
        let scaled = Kinematics::new(&config);
        let plain = Kinematics::new(&reference_frame());
        // (50, 100) scaled by 2 plus offset lands on (110, 205).
        assert_eq!(
            scaled.cable_length(Side::Left, Point::new(50.0, 100.0)),
            plain.cable_length(Side::Left, Point::new(110.0, 205.0)),
        );
    }
}
