//! Word-cloud layout engine for the feedback dashboard.
//!
//! Turns weighted terms into non-overlapping, in-bounds glyph placements
//! (position, font size, rotation) for a renderer to draw.

pub mod config;
pub mod errors;
pub mod input;
pub mod layout;

pub use errors::{AppError, LayoutError};
pub use layout::{compute_layout, Canvas, Glyph, LayoutConfig, LayoutEngine, LayoutResult, Term};
