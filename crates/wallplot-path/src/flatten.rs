//! Fixed-resolution Bézier flattening.
//!
//! Curves are reduced to straight segments by sampling the Bézier
//! parameter in steps of 0.01 (101 samples) followed by one exact
//! sample at t = 1 to correct for rounding. The density is fixed, not
//! error-bounded: the machine draws every chord at pen speed anyway,
//! so the sample count only bounds chord length, not drawing time.

use wallplot_core::Point;

const SAMPLE_STEP: f64 = 0.01;
const SAMPLE_COUNT: u32 = 101;

/// Finite lazy sequence of straight-segment endpoints along a cubic
/// Bézier curve.
#[derive(Debug, Clone)]
pub struct CubicSamples {
    p0: Point,
    p1: Point,
    p2: Point,
    p3: Point,
    index: u32,
}

impl Iterator for CubicSamples {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        let index = self.index;
        self.index += 1;
        if index < SAMPLE_COUNT {
            let t = index as f64 * SAMPLE_STEP;
            Some(cubic_at(self.p0, self.p1, self.p2, self.p3, t))
        } else if index == SAMPLE_COUNT {
            // Exact endpoint, immune to floating-point drift in t.
            Some(self.p3)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (SAMPLE_COUNT + 1).saturating_sub(self.index) as usize;
        (remaining, Some(remaining))
    }
}

/// Finite lazy sequence of straight-segment endpoints along a
/// quadratic Bézier curve.
#[derive(Debug, Clone)]
pub struct QuadraticSamples {
    p0: Point,
    p1: Point,
    p2: Point,
    index: u32,
}

impl Iterator for QuadraticSamples {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        let index = self.index;
        self.index += 1;
        if index < SAMPLE_COUNT {
            let t = index as f64 * SAMPLE_STEP;
            Some(quadratic_at(self.p0, self.p1, self.p2, t))
        } else if index == SAMPLE_COUNT {
            Some(self.p2)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (SAMPLE_COUNT + 1).saturating_sub(self.index) as usize;
        (remaining, Some(remaining))
    }
}

/// Flatten a cubic Bézier from `p0` through control points `p1`, `p2`
/// to `p3`.
pub fn flatten_cubic(p0: Point, p1: Point, p2: Point, p3: Point) -> CubicSamples {
    CubicSamples {
        p0,
        p1,
        p2,
        p3,
        index: 0,
    }
}

/// Flatten a quadratic Bézier from `p0` through control point `p1` to
/// `p2`.
pub fn flatten_quadratic(p0: Point, p1: Point, p2: Point) -> QuadraticSamples {
    QuadraticSamples { p0, p1, p2, index: 0 }
}

/// Cubic Bernstein polynomial at `t`.
fn cubic_at(p0: Point, p1: Point, p2: Point, p3: Point, t: f64) -> Point {
    let u = 1.0 - t;
    p0 * (u * u * u) + p1 * (3.0 * t * u * u) + p2 * (3.0 * t * t * u) + p3 * (t * t * t)
}

/// Quadratic Bernstein polynomial at `t`.
fn quadratic_at(p0: Point, p1: Point, p2: Point, t: f64) -> Point {
    let u = 1.0 - t;
    p0 * (u * u) + p1 * (2.0 * t * u) + p2 * (t * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cubic_sample_count_and_endpoints() {
        let samples: Vec<Point> = flatten_cubic(
            Point::new(0.0, 0.0),
            Point::new(10.0, 20.0),
            Point::new(30.0, 20.0),
            Point::new(40.0, 0.0),
        )
        .collect();
        assert_eq!(samples.len(), 102);
        assert_eq!(samples[0], Point::new(0.0, 0.0));
        // Final sample is the exact endpoint, not a t=1.00 evaluation.
        assert_eq!(*samples.last().unwrap(), Point::new(40.0, 0.0));
    }

    #[test]
    fn test_quadratic_sample_count_and_midpoint() {
        let samples: Vec<Point> = flatten_quadratic(
            Point::new(0.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(20.0, 0.0),
        )
        .collect();
        assert_eq!(samples.len(), 102);
        // At t = 0.5 the quadratic passes through
        // 0.25*p0 + 0.5*p1 + 0.25*p2.
        assert!(samples[50].approx_eq(Point::new(10.0, 5.0), 1e-9));
        assert_eq!(*samples.last().unwrap(), Point::new(20.0, 0.0));
    }

    #[test]
    fn test_degenerate_curve_stays_on_point() {
        let p = Point::new(5.0, 5.0);
        for sample in flatten_cubic(p, p, p, p) {
            assert!(sample.approx_eq(p, 1e-12));
        }
    }

    #[test]
    fn test_cubic_with_collinear_controls_is_a_line() {
        let samples: Vec<Point> = flatten_cubic(
            Point::new(0.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(20.0, 20.0),
            Point::new(30.0, 30.0),
        )
        .collect();
        for sample in samples {
            assert!((sample.x - sample.y).abs() < 1e-9);
        }
    }

    #[test]
    fn test_size_hint_tracks_consumption() {
        let mut samples = flatten_quadratic(
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(2.0, 0.0),
        );
        assert_eq!(samples.size_hint(), (102, Some(102)));
        samples.next();
        assert_eq!(samples.size_hint(), (101, Some(101)));
    }
}
