//! Candidate positions for spiral search.
//!
//! Both spirals start at the canvas center and move outward. They are stretched
//! by the canvas aspect ratio (`width / height`) along x, so a wide canvas is
//! swept as an ellipse instead of wasting steps above and below it.
//!
//! A spiral ends after `max_attempts` candidates, or once it has moved far
//! enough that no later candidate center can lie on the canvas.

use serde::{Deserialize, Serialize};

use crate::errors::LayoutError;
use crate::layout::geometry::{Point, Size};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpiralKind {
    /// Radius grows linearly with angle.
    #[default]
    Archimedean,
    /// Expanding square rings; packs boxy labels a little tighter.
    Rectangular,
}

impl std::str::FromStr for SpiralKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "archimedean" => Ok(SpiralKind::Archimedean),
            "rectangular" => Ok(SpiralKind::Rectangular),
            other => Err(format!("unknown spiral kind '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpiralConfig {
    pub kind: SpiralKind,
    /// Archimedean: angle advanced per step, in radians.
    pub angle_step: f32,
    /// Archimedean: radius gained per radian, in pixels.
    pub growth: f32,
    /// Rectangular: vertical distance moved per step, in pixels.
    pub grid_step: f32,
}

impl Default for SpiralConfig {
    fn default() -> Self {
        Self {
            kind: SpiralKind::Archimedean,
            angle_step: 0.1,
            growth: 1.0,
            grid_step: 4.0,
        }
    }
}

impl SpiralConfig {
    pub fn validate(&self) -> Result<(), LayoutError> {
        let positive = |v: f32| v.is_finite() && v > 0.0;
        match self.kind {
            SpiralKind::Archimedean if !positive(self.angle_step) || !positive(self.growth) => {
                Err(LayoutError::InvalidConfig(format!(
                    "archimedean spiral needs positive angle_step and growth, got {} / {}",
                    self.angle_step, self.growth
                )))
            }
            SpiralKind::Rectangular if !positive(self.grid_step) => Err(
                LayoutError::InvalidConfig(format!(
                    "rectangular spiral needs a positive grid_step, got {}",
                    self.grid_step
                )),
            ),
            _ => Ok(()),
        }
    }

    /// Builds the candidate sequence for one term on a canvas of `canvas` size.
    pub fn walk(&self, canvas: Size, max_attempts: u32) -> Spiral {
        let ratio = canvas.width / canvas.height;
        let half_height = canvas.height * 0.5;
        let limit = match self.kind {
            // Half the diagonal of the canvas once x is divided back by `ratio`.
            SpiralKind::Archimedean => half_height * std::f32::consts::SQRT_2,
            SpiralKind::Rectangular => half_height + self.grid_step,
        };
        Spiral {
            config: *self,
            ratio,
            limit,
            max_attempts,
            step: 0,
            cursor: Point::ORIGIN,
        }
    }
}

/// Iterator over candidate glyph centers, relative to the canvas center.
#[derive(Debug, Clone)]
pub struct Spiral {
    config: SpiralConfig,
    ratio: f32,
    limit: f32,
    max_attempts: u32,
    step: u32,
    /// Rectangular walk position in unstretched space.
    cursor: Point,
}

impl Spiral {
    /// Number of candidates produced so far.
    pub fn steps_taken(&self) -> u32 {
        self.step
    }

    fn archimedean(&self, step: u32) -> Option<Point> {
        let theta = step as f32 * self.config.angle_step;
        let radius = theta * self.config.growth;
        if radius > self.limit {
            return None;
        }
        let (sin, cos) = theta.sin_cos();
        Some(Point::new(self.ratio * radius * cos, radius * sin))
    }

    fn rectangular(&mut self, step: u32) -> Option<Point> {
        if step > 0 {
            // Leg lengths run 1, 1, 2, 2, 3, 3, ... so the walk traces square rings.
            let leg = ((1.0 + 4.0 * (step - 1) as f64).sqrt() - 1.0) as u32;
            let d = self.config.grid_step;
            match leg & 3 {
                0 => self.cursor.x += d,
                1 => self.cursor.y += d,
                2 => self.cursor.x -= d,
                _ => self.cursor.y -= d,
            }
        }
        if self.cursor.x.abs().max(self.cursor.y.abs()) > self.limit {
            return None;
        }
        Some(Point::new(self.ratio * self.cursor.x, self.cursor.y))
    }
}

impl Iterator for Spiral {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.step >= self.max_attempts {
            return None;
        }
        let step = self.step;
        let point = match self.config.kind {
            SpiralKind::Archimedean => self.archimedean(step),
            SpiralKind::Rectangular => self.rectangular(step),
        };
        if point.is_some() {
            self.step += 1;
        } else {
            // Exhausted for good; later steps are further out still.
            self.max_attempts = self.step;
        }
        point
    }
}
