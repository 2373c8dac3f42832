//! Word-cloud layout engine.
//!
//! # Algorithm
//! 1. Validate canvas, config and terms. Any failure aborts with `LayoutError`.
//! 2. Order terms per `SortPolicy` (stable, so ties keep input order).
//! 3. Fit the weight → font size mapping to this batch.
//! 4. For each term in order: measure its box, draw a rotation, then walk the
//!    spiral from the canvas center. The first in-bounds candidate that keeps
//!    `padding` clearance from every placed box wins.
//! 5. A term whose spiral is exhausted goes to `unplaced`. This is a normal
//!    outcome, never an error.
//!
//! All working state (glyph arena, collision index, rotation generator) is
//! local to one call.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::errors::LayoutError;
use crate::layout::collision::CollisionIndex;
use crate::layout::font_metrics::{get_metrics, FontFamily, FontMetricTable};
use crate::layout::geometry::{Point, Rect, Size};
use crate::layout::rotation::RotationPolicy;
use crate::layout::sizing::{FontSizeRange, SizeMapping, SizeScale};
use crate::layout::spiral::SpiralConfig;

// ────────────────────────────────────────────────────────────────────────────
// Input types
// ────────────────────────────────────────────────────────────────────────────

/// A weighted label supplied by the weight source.
///
/// Accepts `value` as an alias for `weight` (the dashboard's `{ text, value }` shape).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Term {
    pub text: String,
    #[serde(alias = "value")]
    pub weight: f32,
}

impl Term {
    pub fn new(text: impl Into<String>, weight: f32) -> Self {
        Self {
            text: text.into(),
            weight,
        }
    }
}

/// Drawing surface, in pixels. Placement math puts the origin at its center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Canvas {
    pub width: f32,
    pub height: f32,
}

impl Canvas {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn validate(&self) -> Result<(), LayoutError> {
        let ok = |v: f32| v.is_finite() && v > 0.0;
        if ok(self.width) && ok(self.height) {
            Ok(())
        } else {
            Err(LayoutError::InvalidCanvas {
                width: self.width,
                height: self.height,
            })
        }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    /// `[-width/2, width/2] × [-height/2, height/2]`.
    pub fn bounds(&self) -> Rect {
        Rect::centered(Point::ORIGIN, self.size())
    }
}

/// Order in which terms are offered to the spiral search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortPolicy {
    AsGiven,
    /// Heaviest first, so large glyphs claim the center before space fragments.
    #[default]
    DescendingWeight,
}

impl std::str::FromStr for SortPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "as_given" | "as-given" | "input" => Ok(SortPolicy::AsGiven),
            "descending" | "descending_weight" | "desc" => Ok(SortPolicy::DescendingWeight),
            other => Err(format!("unknown sort policy '{other}'")),
        }
    }
}

/// Layout options. Treated as immutable for the duration of a call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Minimum gap between any two placed boxes, in pixels.
    pub padding: f32,
    pub font_size_range: FontSizeRange,
    pub size_scale: SizeScale,
    pub font: FontFamily,
    pub rotation: RotationPolicy,
    pub spiral: SpiralConfig,
    pub max_attempts_per_term: u32,
    pub sort: SortPolicy,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            padding: 5.0,
            font_size_range: FontSizeRange::default(),
            size_scale: SizeScale::default(),
            font: FontFamily::default(),
            rotation: RotationPolicy::default(),
            spiral: SpiralConfig::default(),
            max_attempts_per_term: 4000,
            sort: SortPolicy::default(),
        }
    }
}

impl LayoutConfig {
    pub fn validate(&self) -> Result<(), LayoutError> {
        if !self.padding.is_finite() || self.padding < 0.0 {
            return Err(LayoutError::InvalidConfig(format!(
                "padding must be a finite value >= 0, got {}",
                self.padding
            )));
        }
        if self.max_attempts_per_term == 0 {
            return Err(LayoutError::InvalidConfig(
                "max_attempts_per_term must be at least 1".to_string(),
            ));
        }
        self.font_size_range.validate()?;
        self.rotation.validate()?;
        self.spiral.validate()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Output types
// ────────────────────────────────────────────────────────────────────────────

/// A sized, rotated and (once placed) positioned term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Glyph {
    /// Index of the source term in the caller's input.
    pub term_index: usize,
    pub text: String,
    pub font_size: f32,
    /// Degrees, clockwise in screen space.
    pub rotation: f32,
    /// Unrotated label box.
    pub text_size: Size,
    /// Axis-aligned box enclosing the rotated label.
    pub bounding_box: Size,
    /// Center relative to the canvas center; `None` until placed.
    pub position: Option<Point>,
    pub placed: bool,
}

impl Glyph {
    fn new(
        term_index: usize,
        term: &Term,
        font_size: f32,
        rotation: f32,
        metrics: &FontMetricTable,
    ) -> Self {
        let text_size = metrics.text_extent(&term.text, font_size);
        Self {
            term_index,
            text: term.text.clone(),
            font_size,
            rotation,
            text_size,
            bounding_box: text_size.rotated_extent(rotation),
            position: None,
            placed: false,
        }
    }

    /// Rotated bounding box at the glyph's position, if placed.
    pub fn bounds(&self) -> Option<Rect> {
        self.position
            .map(|center| Rect::centered(center, self.bounding_box))
    }
}

/// A term the spiral search could not fit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnplacedTerm {
    pub term_index: usize,
    pub term: Term,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LayoutStats {
    /// Spiral candidates evaluated across all terms.
    pub attempts: u64,
    /// Area of placed bounding boxes divided by canvas area.
    pub fill_fraction: f32,
}

/// Every input term appears exactly once, either in `placed` or in `unplaced`,
/// each list in placement-attempt order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LayoutResult {
    pub placed: Vec<Glyph>,
    pub unplaced: Vec<UnplacedTerm>,
    pub stats: LayoutStats,
}

impl LayoutResult {
    pub fn len(&self) -> usize {
        self.placed.len() + self.unplaced.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Diagnostic line for the renderer, e.g. "12 terms omitted for space".
    pub fn omitted_summary(&self) -> Option<String> {
        match self.unplaced.len() {
            0 => None,
            1 => Some("1 term omitted for space".to_string()),
            n => Some(format!("{n} terms omitted for space")),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Engine
// ────────────────────────────────────────────────────────────────────────────

/// A validated configuration that can lay out any number of term batches.
///
/// Holds no mutable state, so one engine can be shared across threads.
#[derive(Debug, Clone)]
pub struct LayoutEngine {
    config: LayoutConfig,
}

impl LayoutEngine {
    pub fn new(config: LayoutConfig) -> Result<Self, LayoutError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn compute(&self, terms: &[Term], canvas: Canvas) -> Result<LayoutResult, LayoutError> {
        canvas.validate()?;
        validate_terms(terms)?;
        Ok(place_all(terms, canvas, &self.config))
    }
}

/// Lays out `terms` on `canvas`. Equivalent to `LayoutEngine::new(config)?.compute(..)`.
pub fn compute_layout(
    terms: &[Term],
    canvas: Canvas,
    config: &LayoutConfig,
) -> Result<LayoutResult, LayoutError> {
    canvas.validate()?;
    config.validate()?;
    validate_terms(terms)?;
    Ok(place_all(terms, canvas, config))
}

fn validate_terms(terms: &[Term]) -> Result<(), LayoutError> {
    for (index, term) in terms.iter().enumerate() {
        if term.text.is_empty() {
            return Err(LayoutError::InvalidTerm {
                index,
                reason: "text is empty".to_string(),
            });
        }
        if !term.weight.is_finite() || term.weight < 0.0 {
            return Err(LayoutError::InvalidTerm {
                index,
                reason: format!("weight must be finite and >= 0, got {}", term.weight),
            });
        }
    }
    Ok(())
}

/// Input indices in placement-attempt order.
pub(crate) fn attempt_order(terms: &[Term], sort: SortPolicy) -> Vec<usize> {
    let mut order: Vec<usize> = (0..terms.len()).collect();
    if sort == SortPolicy::DescendingWeight {
        order.sort_by(|&a, &b| terms[b].weight.total_cmp(&terms[a].weight));
    }
    order
}

/// Runs the placement pass on already-validated inputs.
fn place_all(terms: &[Term], canvas: Canvas, config: &LayoutConfig) -> LayoutResult {
    if terms.is_empty() {
        return LayoutResult::default();
    }

    let metrics = get_metrics(&config.font);
    let mapping = SizeMapping::fit(
        terms.iter().map(|t| t.weight),
        config.font_size_range,
        config.size_scale,
    );
    let mut rotation = config.rotation.picker();

    // Arena indexed by attempt position; owned by this call only.
    let mut glyphs: Vec<Glyph> = attempt_order(terms, config.sort)
        .into_iter()
        .map(|i| {
            let term = &terms[i];
            Glyph::new(
                i,
                term,
                mapping.font_size(term.weight),
                rotation.next_angle(),
                metrics,
            )
        })
        .collect();

    let bounds = canvas.bounds();
    let mut occupied = CollisionIndex::new(canvas.size(), config.padding);
    let mut attempts = 0u64;

    for glyph in glyphs.iter_mut() {
        let (position, steps) = search(glyph, canvas, &bounds, &mut occupied, config);
        attempts += steps as u64;
        match position {
            Some(center) => {
                glyph.position = Some(center);
                glyph.placed = true;
                occupied.insert(Rect::centered(center, glyph.bounding_box));
            }
            None => debug!(
                text = %glyph.text,
                font_size = glyph.font_size,
                steps,
                "Word cloud: no free position for term"
            ),
        }
    }

    let mut result = LayoutResult::default();
    for glyph in glyphs {
        if glyph.placed {
            result.placed.push(glyph);
        } else {
            result.unplaced.push(UnplacedTerm {
                term_index: glyph.term_index,
                term: terms[glyph.term_index].clone(),
            });
        }
    }
    result.stats = LayoutStats {
        attempts,
        fill_fraction: occupied.occupied_area() / canvas.area(),
    };

    if !result.unplaced.is_empty() {
        warn!(
            unplaced = result.unplaced.len(),
            total = terms.len(),
            "Word cloud: terms omitted for space"
        );
    }
    info!(
        placed = result.placed.len(),
        unplaced = result.unplaced.len(),
        fill = result.stats.fill_fraction,
        "Word cloud layout complete"
    );

    result
}

/// Walks the spiral for one glyph. Returns the winning center, if any, and the steps spent.
fn search(
    glyph: &Glyph,
    canvas: Canvas,
    bounds: &Rect,
    occupied: &mut CollisionIndex,
    config: &LayoutConfig,
) -> (Option<Point>, u32) {
    let extent = glyph.bounding_box;
    if extent.width > canvas.width || extent.height > canvas.height {
        return (None, 0);
    }

    let mut spiral = config
        .spiral
        .walk(canvas.size(), config.max_attempts_per_term);
    while let Some(center) = spiral.next() {
        let candidate = Rect::centered(center, extent);
        if bounds.contains_rect(&candidate) && !occupied.collides(&candidate) {
            return (Some(center), spiral.steps_taken());
        }
    }
    (None, spiral.steps_taken())
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
