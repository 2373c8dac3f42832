//! Property-based invariant tests for the word-cloud layout engine.
//!
//! For any valid term batch, canvas and config:
//!
//! 1. Completeness — every input term is reported exactly once
//! 2. No overlap — placed boxes keep `padding` clearance from each other
//! 3. In bounds — placed boxes lie inside `[-w/2, w/2] × [-h/2, h/2]`
//! 4. Monotonic sizing — a heavier term never gets a smaller font
//! 5. Idempotence — identical inputs (and seed) give identical results
//! 6. Overcrowding — a batch whose padded area cannot fit reports unplaced terms
//! 7. Configuration errors — non-positive canvases are rejected

use proptest::prelude::*;
use wordcloud::layout::font_metrics::get_metrics;
use wordcloud::layout::{
    compute_layout, Canvas, FontSizeRange, Glyph, LayoutConfig, LayoutResult, Rect,
    RotationPolicy, SizeScale, SortPolicy, SpiralConfig, SpiralKind, Term,
};
use wordcloud::LayoutError;

/// Axis-aligned boxes can at best tile the (padding-inflated) canvas exactly.
const PACKING_EFFICIENCY: f32 = 1.0;

// ── Strategies ──────────────────────────────────────────────────────────────

fn term_strategy() -> impl Strategy<Value = Term> {
    ("[a-z]{1,10}( [a-z]{1,6})?", 0.0f32..100.0).prop_map(|(text, weight)| Term::new(text, weight))
}

fn canvas_strategy() -> impl Strategy<Value = Canvas> {
    (40.0f32..600.0, 40.0f32..400.0).prop_map(|(w, h)| Canvas::new(w, h))
}

fn config_strategy() -> impl Strategy<Value = LayoutConfig> {
    let rotation = prop_oneof![
        Just(RotationPolicy::Fixed { angle: 0.0 }),
        Just(RotationPolicy::Fixed { angle: 90.0 }),
        any::<u64>().prop_map(|seed| RotationPolicy::Discrete {
            angles: vec![-90.0, 0.0, 90.0],
            seed,
        }),
        any::<u64>().prop_map(|seed| RotationPolicy::Discrete {
            angles: vec![-30.0, 0.0, 45.0],
            seed,
        }),
    ];
    let spiral = prop_oneof![Just(SpiralKind::Archimedean), Just(SpiralKind::Rectangular)];
    let scale = prop_oneof![
        Just(SizeScale::Sqrt),
        Just(SizeScale::Linear),
        Just(SizeScale::Log)
    ];
    let sort = prop_oneof![Just(SortPolicy::DescendingWeight), Just(SortPolicy::AsGiven)];
    (0.0f32..8.0, 6.0f32..20.0, 0.0f32..40.0, rotation, spiral, scale, sort).prop_map(
        |(padding, min_font, extra, rotation, kind, size_scale, sort)| LayoutConfig {
            padding,
            font_size_range: FontSizeRange::new(min_font, min_font + extra),
            size_scale,
            rotation,
            spiral: SpiralConfig {
                kind,
                ..SpiralConfig::default()
            },
            max_attempts_per_term: 1500,
            sort,
            ..LayoutConfig::default()
        },
    )
}

// ── Helpers ─────────────────────────────────────────────────────────────────

fn placed_boxes(result: &LayoutResult) -> Vec<Rect> {
    result.placed.iter().filter_map(Glyph::bounds).collect()
}

// ── Properties ──────────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn every_term_is_reported_exactly_once(
        terms in prop::collection::vec(term_strategy(), 0..24),
        canvas in canvas_strategy(),
        config in config_strategy(),
    ) {
        let result = compute_layout(&terms, canvas, &config).unwrap();
        prop_assert_eq!(result.placed.len() + result.unplaced.len(), terms.len());

        let mut seen: Vec<usize> = result
            .placed
            .iter()
            .map(|g| g.term_index)
            .chain(result.unplaced.iter().map(|u| u.term_index))
            .collect();
        seen.sort_unstable();
        prop_assert_eq!(seen, (0..terms.len()).collect::<Vec<_>>());

        for glyph in &result.placed {
            prop_assert!(glyph.placed);
            prop_assert!(glyph.position.is_some());
            prop_assert_eq!(&glyph.text, &terms[glyph.term_index].text);
        }
        for unplaced in &result.unplaced {
            prop_assert_eq!(&unplaced.term, &terms[unplaced.term_index]);
        }
    }

    #[test]
    fn placed_glyphs_never_overlap(
        terms in prop::collection::vec(term_strategy(), 1..24),
        canvas in canvas_strategy(),
        config in config_strategy(),
    ) {
        let result = compute_layout(&terms, canvas, &config).unwrap();
        let boxes = placed_boxes(&result);
        for (i, a) in boxes.iter().enumerate() {
            for b in &boxes[i + 1..] {
                prop_assert!(
                    !a.collides_with(b, config.padding),
                    "{:?} within {} of {:?}", a, config.padding, b
                );
            }
        }
    }

    #[test]
    fn placed_glyphs_stay_on_canvas(
        terms in prop::collection::vec(term_strategy(), 1..24),
        canvas in canvas_strategy(),
        config in config_strategy(),
    ) {
        let result = compute_layout(&terms, canvas, &config).unwrap();
        let (hw, hh) = (canvas.width / 2.0, canvas.height / 2.0);
        for rect in placed_boxes(&result) {
            prop_assert!(rect.min.x >= -hw && rect.max.x <= hw, "{:?} outside width {}", rect, canvas.width);
            prop_assert!(rect.min.y >= -hh && rect.max.y <= hh, "{:?} outside height {}", rect, canvas.height);
        }
    }

    #[test]
    fn heavier_terms_never_get_smaller_fonts(
        terms in prop::collection::vec(term_strategy(), 2..16),
        config in config_strategy(),
    ) {
        // Large canvas so most terms are placed and carry a size.
        let result = compute_layout(&terms, Canvas::new(2000.0, 1500.0), &config).unwrap();
        let range = config.font_size_range;
        for a in &result.placed {
            prop_assert!(a.font_size >= range.min && a.font_size <= range.max);
            for b in &result.placed {
                let (wa, wb) = (terms[a.term_index].weight, terms[b.term_index].weight);
                if wa > wb {
                    prop_assert!(a.font_size >= b.font_size, "w {} → {}, w {} → {}", wa, a.font_size, wb, b.font_size);
                }
                if wa == wb {
                    prop_assert_eq!(a.font_size, b.font_size);
                }
            }
        }
    }

    #[test]
    fn layout_is_idempotent(
        terms in prop::collection::vec(term_strategy(), 0..20),
        canvas in canvas_strategy(),
        config in config_strategy(),
    ) {
        let first = compute_layout(&terms, canvas, &config).unwrap();
        let second = compute_layout(&terms, canvas, &config).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn overcrowded_batches_report_unplaced_terms(
        count in 20usize..60,
        width in 120.0f32..320.0,
        height in 90.0f32..240.0,
    ) {
        let terms: Vec<Term> = (0..count).map(|i| Term::new(format!("topic{i}"), 5.0)).collect();
        let canvas = Canvas::new(width, height);
        let config = LayoutConfig {
            font_size_range: FontSizeRange::new(10.0, 24.0),
            max_attempts_per_term: 2000,
            ..LayoutConfig::default()
        };

        // Equal weights → every term at max size. Inflating each box by padding / 2
        // makes placed boxes disjoint within a canvas inflated the same way.
        let metrics = get_metrics(&config.font);
        let p = config.padding;
        let demand: f32 = terms
            .iter()
            .map(|t| {
                let e = metrics.text_extent(&t.text, config.font_size_range.max);
                (e.width + p) * (e.height + p)
            })
            .sum();
        let supply = (canvas.width + p) * (canvas.height + p) * PACKING_EFFICIENCY;
        prop_assume!(demand > supply);

        let result = compute_layout(&terms, canvas, &config).unwrap();
        prop_assert!(!result.unplaced.is_empty());
        prop_assert_eq!(result.len(), count);
        let boxes = placed_boxes(&result);
        for (i, a) in boxes.iter().enumerate() {
            for b in &boxes[i + 1..] {
                prop_assert!(!a.collides_with(b, p));
            }
        }
    }

    #[test]
    fn non_positive_canvas_is_rejected(
        terms in prop::collection::vec(term_strategy(), 0..5),
        width in -100.0f32..=0.0,
        height in 1.0f32..400.0,
    ) {
        let err = compute_layout(&terms, Canvas::new(width, height), &LayoutConfig::default());
        prop_assert!(matches!(err, Err(LayoutError::InvalidCanvas { .. })), "expected InvalidCanvas error");
        let err = compute_layout(&terms, Canvas::new(height, width), &LayoutConfig::default());
        prop_assert!(matches!(err, Err(LayoutError::InvalidCanvas { .. })), "expected InvalidCanvas error");
    }
}

// ── Fixed scenarios ─────────────────────────────────────────────────────────

#[test]
fn empty_input_yields_empty_result() {
    let result = compute_layout(&[], Canvas::new(400.0, 300.0), &LayoutConfig::default()).unwrap();
    assert_eq!(result, LayoutResult::default());
}

#[test]
fn single_term_uses_max_size_and_is_placed() {
    let config = LayoutConfig::default();
    let canvas = Canvas::new(400.0, 300.0);
    let result = compute_layout(&[Term::new("insightful", 42.0)], canvas, &config).unwrap();
    assert!(result.unplaced.is_empty());
    let glyph = &result.placed[0];
    assert_eq!(glyph.font_size, config.font_size_range.max);
    assert!(canvas.bounds().contains_rect(&glyph.bounds().unwrap()));
}

#[test]
fn zero_width_canvas_is_a_configuration_error() {
    let terms = vec![Term::new("ok", 1.0)];
    let err = compute_layout(&terms, Canvas::new(0.0, 300.0), &LayoutConfig::default()).unwrap_err();
    assert!(err.is_configuration());
}
