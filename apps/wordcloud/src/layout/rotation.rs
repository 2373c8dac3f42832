//! Glyph orientation policy.
//!
//! Randomized rotation draws from an explicit seeded generator that lives for
//! one layout call, so identical inputs always yield identical orientations.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::errors::LayoutError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RotationPolicy {
    /// Every glyph gets the same angle (degrees).
    Fixed { angle: f32 },
    /// Each glyph draws one angle from `angles`, using a generator seeded with `seed`.
    Discrete { angles: Vec<f32>, seed: u64 },
}

impl Default for RotationPolicy {
    fn default() -> Self {
        RotationPolicy::Fixed { angle: 0.0 }
    }
}

impl RotationPolicy {
    pub fn validate(&self) -> Result<(), LayoutError> {
        match self {
            RotationPolicy::Fixed { angle } if !angle.is_finite() => Err(
                LayoutError::InvalidConfig(format!("rotation angle must be finite, got {angle}")),
            ),
            RotationPolicy::Discrete { angles, .. } if angles.is_empty() => Err(
                LayoutError::InvalidConfig("discrete rotation set is empty".to_string()),
            ),
            RotationPolicy::Discrete { angles, .. } if angles.iter().any(|a| !a.is_finite()) => {
                Err(LayoutError::InvalidConfig(format!(
                    "discrete rotation set contains a non-finite angle: {angles:?}"
                )))
            }
            _ => Ok(()),
        }
    }

    /// Starts a fresh picker for one layout call.
    pub fn picker(&self) -> RotationPicker<'_> {
        match self {
            RotationPolicy::Fixed { angle } => RotationPicker::Fixed(*angle),
            RotationPolicy::Discrete { angles, seed } => RotationPicker::Discrete {
                angles,
                rng: StdRng::seed_from_u64(*seed),
            },
        }
    }
}

/// Per-call rotation state. Draws exactly one value per glyph, in attempt order.
pub enum RotationPicker<'a> {
    Fixed(f32),
    Discrete { angles: &'a [f32], rng: StdRng },
}

impl RotationPicker<'_> {
    pub fn next_angle(&mut self) -> f32 {
        match self {
            RotationPicker::Fixed(angle) => *angle,
            RotationPicker::Discrete { angles, rng } => angles[rng.random_range(0..angles.len())],
        }
    }
}
