//! The closed path-command model.
//!
//! Each SVG path letter maps to one variant with its coordinate mode;
//! unknown letters never become commands, they are reported to the
//! diagnostics sink and skipped by the scanner.

use wallplot_core::Point;

/// Whether operands are absolute surface coordinates or offsets from
/// the current cursor position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordMode {
    Absolute,
    Relative,
}

/// One parsed path command with its operands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    /// `M`/`m`: lift the pen and travel; starts a new subpath.
    MoveTo { mode: CoordMode, target: Point },
    /// `L`/`l`: straight draw.
    LineTo { mode: CoordMode, target: Point },
    /// `H`/`h`: straight draw holding Y fixed.
    HorizontalTo { mode: CoordMode, x: f64 },
    /// `V`/`v`: straight draw holding X fixed.
    VerticalTo { mode: CoordMode, y: f64 },
    /// `C`/`c`: cubic Bézier with both control points explicit.
    CubicCurveTo {
        mode: CoordMode,
        control1: Point,
        control2: Point,
        target: Point,
    },
    /// `S`/`s`: cubic Bézier whose first control point is inferred
    /// from the previous cubic curve.
    CubicCurveSmoothTo {
        mode: CoordMode,
        control2: Point,
        target: Point,
    },
    /// `Q`/`q`: quadratic Bézier with its control point explicit.
    QuadraticCurveTo {
        mode: CoordMode,
        control: Point,
        target: Point,
    },
    /// `T`/`t`: quadratic Bézier whose control point is inferred from
    /// the previous quadratic curve.
    QuadraticCurveSmoothTo { mode: CoordMode, target: Point },
    /// `A`/`a`: elliptical arc. Unsupported; carried so the
    /// interpreter can signal it explicitly instead of dropping it.
    ArcTo { mode: CoordMode, operands: [f64; 7] },
    /// `Z`/`z`: straight draw back to the subpath start.
    ClosePath,
}

impl PathCommand {
    /// Number of numeric operands one group of the given command
    /// letter carries, or `None` for an unknown letter.
    pub fn operand_count(letter: char) -> Option<usize> {
        match letter.to_ascii_uppercase() {
            'M' | 'L' | 'T' => Some(2),
            'H' | 'V' => Some(1),
            'C' => Some(6),
            'S' | 'Q' => Some(4),
            'A' => Some(7),
            'Z' => Some(0),
            _ => None,
        }
    }

    /// Build a command from its letter and one operand group.
    ///
    /// `operands` must have exactly `operand_count(letter)` entries;
    /// callers guarantee this by construction.
    pub fn from_letter(letter: char, operands: &[f64]) -> Option<PathCommand> {
        let mode = if letter.is_ascii_uppercase() {
            CoordMode::Absolute
        } else {
            CoordMode::Relative
        };
        let command = match letter.to_ascii_uppercase() {
            'M' => PathCommand::MoveTo {
                mode,
                target: Point::new(operands[0], operands[1]),
            },
            'L' => PathCommand::LineTo {
                mode,
                target: Point::new(operands[0], operands[1]),
            },
            'H' => PathCommand::HorizontalTo {
                mode,
                x: operands[0],
            },
            'V' => PathCommand::VerticalTo {
                mode,
                y: operands[0],
            },
            'C' => PathCommand::CubicCurveTo {
                mode,
                control1: Point::new(operands[0], operands[1]),
                control2: Point::new(operands[2], operands[3]),
                target: Point::new(operands[4], operands[5]),
            },
            'S' => PathCommand::CubicCurveSmoothTo {
                mode,
                control2: Point::new(operands[0], operands[1]),
                target: Point::new(operands[2], operands[3]),
            },
            'Q' => PathCommand::QuadraticCurveTo {
                mode,
                control: Point::new(operands[0], operands[1]),
                target: Point::new(operands[2], operands[3]),
            },
            'T' => PathCommand::QuadraticCurveSmoothTo {
                mode,
                target: Point::new(operands[0], operands[1]),
            },
            'A' => PathCommand::ArcTo {
                mode,
                operands: [
                    operands[0],
                    operands[1],
                    operands[2],
                    operands[3],
                    operands[4],
                    operands[5],
                    operands[6],
                ],
            },
            'Z' => PathCommand::ClosePath,
            _ => return None,
        };
        Some(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operand_counts() {
        assert_eq!(PathCommand::operand_count('M'), Some(2));
        assert_eq!(PathCommand::operand_count('c'), Some(6));
        assert_eq!(PathCommand::operand_count('z'), Some(0));
        assert_eq!(PathCommand::operand_count('A'), Some(7));
        assert_eq!(PathCommand::operand_count('X'), None);
    }

    #[test]
    fn test_case_selects_coordinate_mode() {
        let abs = PathCommand::from_letter('L', &[1.0, 2.0]).unwrap();
        let rel = PathCommand::from_letter('l', &[1.0, 2.0]).unwrap();
        assert_eq!(
            abs,
            PathCommand::LineTo {
                mode: CoordMode::Absolute,
                target: Point::new(1.0, 2.0)
            }
        );
        assert_eq!(
            rel,
            PathCommand::LineTo {
                mode: CoordMode::Relative,
                target: Point::new(1.0, 2.0)
            }
        );
    }

    #[test]
    fn test_unknown_letter_builds_nothing() {
        assert_eq!(PathCommand::from_letter('X', &[]), None);
    }
}
