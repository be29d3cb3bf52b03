mod rows;

pub use rows::RowMap;

use std::collections::HashSet;
use tracing::{debug, warn};

use crate::error::{Result, SpiralError};

/// Angular step between samples, in degrees.
pub const DEFAULT_GRANULARITY: f64 = 0.2;

/// Upper bound on angular steps in one sweep.
pub const MAX_STEPS: usize = 10_000_000;

/// Largest radius whose translated coordinates (plus any margin) still fit an `i32`.
pub const MAX_RADIUS: f64 = ((i32::MAX - u16::MAX as i32) / 2) as f64;

/// A rounded grid position. Equal values are the same point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const fn translate(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Convert polar coordinates around the origin to cartesian.
/// `angle`: radians; `radius`: distance from the origin.
#[inline]
fn polar_to_cartesian(angle: f64, radius: f64) -> (f64, f64) {
    (angle.cos() * radius, angle.sin() * radius)
}

/// Parameters for one spiral. The reference width is supplied by the caller
/// (normally the terminal column count) so generation stays pure.
#[derive(Debug, Clone, PartialEq)]
pub struct SpiralParams {
    /// Number of full revolutions; also divides the radius.
    pub circulation_factor: f64,
    /// Degrees between consecutive samples.
    pub granularity: f64,
    /// Horizontal extent of the drawing surface, in columns.
    pub reference_width: u16,
    /// Columns taken off the radius.
    pub inset: f64,
}

impl SpiralParams {
    pub fn new(reference_width: u16) -> Self {
        Self {
            circulation_factor: 1.0,
            granularity: DEFAULT_GRANULARITY,
            reference_width,
            inset: 0.0,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.circulation_factor.is_finite() || self.circulation_factor <= 0.0 {
            return Err(SpiralError::InvalidCirculationFactor(self.circulation_factor));
        }
        if !self.granularity.is_finite() || self.granularity <= 0.0 {
            return Err(SpiralError::InvalidGranularity(self.granularity));
        }
        if self.reference_width == 0 {
            return Err(SpiralError::InvalidWidth);
        }
        if !self.inset.is_finite() {
            return Err(SpiralError::InvalidInset(self.inset));
        }

        let radius = self.unclamped_radius();
        if !radius.is_finite() || radius.abs() > MAX_RADIUS {
            return Err(SpiralError::RadiusOutOfRange(radius));
        }

        let steps = self.sweep_steps();
        if steps > MAX_STEPS as f64 {
            return Err(SpiralError::TooManySteps {
                steps,
                limit: MAX_STEPS,
            });
        }
        Ok(())
    }

    fn unclamped_radius(&self) -> f64 {
        (f64::from(self.reference_width) / 2.0) / self.circulation_factor - self.inset
    }

    fn sweep_steps(&self) -> f64 {
        (360.0 * self.circulation_factor / self.granularity).trunc()
    }

    /// Outer radius reached at the final step, never negative.
    pub fn radius(&self) -> f64 {
        let radius = self.unclamped_radius();
        if radius < 0.0 {
            warn!(
                "Inset {} exceeds the available radius, spiral collapses to a point",
                self.inset
            );
            return 0.0;
        }
        radius
    }

    /// Number of angular steps; the sweep covers `0..=steps`.
    /// Only meaningful once [`validate`](Self::validate) has passed.
    pub fn steps(&self) -> usize {
        self.sweep_steps() as usize
    }
}

/// Trace the spiral from the origin outward, keeping only the first
/// occurrence of each rounded point.
pub fn generate(params: &SpiralParams) -> Result<Vec<Point>> {
    params.validate()?;

    let radius = params.radius();
    let steps = params.steps();
    debug!(
        "Generating spiral: width={}, circulation_factor={}, granularity={}, radius={}, steps={}",
        params.reference_width, params.circulation_factor, params.granularity, radius, steps
    );

    let mut points = Vec::new();
    let mut seen = HashSet::new();

    for angle in 0..=steps {
        let phi = (angle as f64 * params.granularity).to_radians();
        let r = if steps == 0 {
            0.0
        } else {
            radius * angle as f64 / steps as f64
        };

        let (x, y) = polar_to_cartesian(phi, r);
        let (Some(x), Some(y)) = (to_grid(x), to_grid(y)) else {
            return Err(SpiralError::RadiusOutOfRange(radius));
        };
        let point = Point::new(x, y);

        if seen.insert(point) {
            points.push(point);
        }
    }

    debug!("Spiral has {} distinct points", points.len());
    Ok(points)
}

/// Round to the nearest grid line (ties to even). None when the value
/// doesn't fit an `i32`.
fn to_grid(v: f64) -> Option<i32> {
    let rounded = v.round_ties_even();
    if rounded.is_finite() && rounded >= f64::from(i32::MIN) && rounded <= f64::from(i32::MAX) {
        Some(rounded as i32)
    } else {
        None
    }
}

/// Shift every point so the smallest x and y land on zero, then move the
/// whole drawing `margin` columns to the right.
pub fn normalize(points: &[Point], margin: u16) -> Vec<Point> {
    let min_x = points.iter().map(|p| p.x).min();
    let min_y = points.iter().map(|p| p.y).min();

    let (Some(min_x), Some(min_y)) = (min_x, min_y) else {
        return Vec::new();
    };

    let dx = min_x.abs() + i32::from(margin);
    let dy = min_y.abs();
    points.iter().map(|p| p.translate(dx, dy)).collect()
}
