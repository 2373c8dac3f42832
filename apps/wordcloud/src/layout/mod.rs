// Word-cloud layout: size mapping, spiral search, collision testing.
// Placement is a pure synchronous computation; `scheduler` moves it onto the
// blocking pool and drops results overtaken by newer requests.

pub mod collision;
pub mod engine;
pub mod font_metrics;
pub mod geometry;
pub mod rotation;
pub mod scheduler;
pub mod sizing;
pub mod spiral;

// Re-export the public API consumed by the binary and by renderers.
pub use engine::{
    compute_layout, Canvas, Glyph, LayoutConfig, LayoutEngine, LayoutResult, LayoutStats,
    SortPolicy, Term, UnplacedTerm,
};
pub use font_metrics::FontFamily;
pub use geometry::{Point, Rect, Size};
pub use rotation::RotationPolicy;
pub use scheduler::{LayoutOutcome, LayoutScheduler, LayoutTicket};
pub use sizing::{FontSizeRange, SizeScale};
pub use spiral::{SpiralConfig, SpiralKind};
