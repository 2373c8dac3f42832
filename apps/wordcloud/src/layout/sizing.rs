//! Weight → font size mapping.
//!
//! Sizes are normalized over the weight range observed in the current batch,
//! so any input distribution spreads across the full `[min, max]` font range.

use serde::{Deserialize, Serialize};

use crate::errors::LayoutError;

/// Clamp bounds for glyph font sizes, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FontSizeRange {
    pub min: f32,
    pub max: f32,
}

impl Default for FontSizeRange {
    fn default() -> Self {
        Self {
            min: 10.0,
            max: 60.0,
        }
    }
}

impl FontSizeRange {
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn validate(&self) -> Result<(), LayoutError> {
        let finite = self.min.is_finite() && self.max.is_finite();
        if !finite || self.min <= 0.0 || self.min > self.max {
            return Err(LayoutError::InvertedFontSizeRange {
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }

    fn clamp(&self, size: f32) -> f32 {
        size.clamp(self.min, self.max)
    }
}

/// Shape of the weight → size curve. Every variant is strictly increasing on `weight >= 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeScale {
    /// Area grows roughly linearly with weight.
    #[default]
    Sqrt,
    Linear,
    /// `ln(1 + weight)`; compresses long-tailed counts.
    Log,
}

impl SizeScale {
    fn apply(&self, weight: f32) -> f32 {
        match self {
            SizeScale::Sqrt => weight.sqrt(),
            SizeScale::Linear => weight,
            SizeScale::Log => weight.ln_1p(),
        }
    }
}

impl std::str::FromStr for SizeScale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqrt" => Ok(SizeScale::Sqrt),
            "linear" => Ok(SizeScale::Linear),
            "log" => Ok(SizeScale::Log),
            other => Err(format!("unknown size scale '{other}'")),
        }
    }
}

/// Font-size mapping fitted to one batch of weights.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeMapping {
    range: FontSizeRange,
    scale: SizeScale,
    min_scaled: f32,
    max_scaled: f32,
}

impl SizeMapping {
    /// Fits the mapping to the weights of the current batch.
    pub fn fit(weights: impl IntoIterator<Item = f32>, range: FontSizeRange, scale: SizeScale) -> Self {
        let (lo, hi) = weights
            .into_iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), w| {
                (lo.min(w), hi.max(w))
            });
        Self {
            range,
            scale,
            min_scaled: scale.apply(lo.max(0.0)),
            max_scaled: scale.apply(hi.max(0.0)),
        }
    }

    /// True when the scaled batch has no spread, e.g. a single term, equal weights,
    /// or distinct weights that round to the same scaled `f32`.
    fn is_degenerate(&self) -> bool {
        let spread = self.max_scaled - self.min_scaled;
        spread.is_nan() || spread <= 0.0
    }

    /// Font size for `weight`. Pure in `weight` for a fitted mapping.
    ///
    /// A degenerate batch collapses the curve: positive weights map to `range.max`,
    /// zero maps to `range.min`.
    pub fn font_size(&self, weight: f32) -> f32 {
        if self.is_degenerate() {
            return if weight > 0.0 {
                self.range.max
            } else {
                self.range.min
            };
        }
        let t = (self.scale.apply(weight.max(0.0)) - self.min_scaled)
            / (self.max_scaled - self.min_scaled);
        self.range
            .clamp(self.range.min + t * (self.range.max - self.range.min))
    }
}
