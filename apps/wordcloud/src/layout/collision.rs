//! Occupancy index over placed glyph boxes.
//!
//! Boxes are bucketed into a uniform grid laid over the canvas so a candidate
//! is only tested against boxes registered in the cells it could touch. The
//! answer is identical to testing every placed box; the grid only skips boxes
//! that cannot be within `padding` of the candidate.

use crate::layout::geometry::{Rect, Size};

/// Edge length of one grid cell, in pixels.
pub const DEFAULT_CELL_SIZE: f32 = 32.0;

/// Upper bound on cells per grid axis. Larger canvases get larger cells.
pub const MAX_CELLS_PER_AXIS: usize = 256;

#[derive(Debug)]
pub struct CollisionIndex {
    padding: f32,
    cell_size: f32,
    half_width: f32,
    half_height: f32,
    grid_width: usize,
    grid_height: usize,
    /// Every registered box, in placement order.
    boxes: Vec<Rect>,
    /// Row-major grid cells holding indices into `boxes`.
    buckets: Vec<Vec<u32>>,
    /// Box that rejected the previous candidate; neighbouring spiral steps usually hit it again.
    last_hit: Option<u32>,
}

impl CollisionIndex {
    pub fn new(canvas: Size, padding: f32) -> Self {
        Self::with_cell_size(canvas, padding, DEFAULT_CELL_SIZE)
    }

    pub fn with_cell_size(canvas: Size, padding: f32, cell_size: f32) -> Self {
        let axis_cap = MAX_CELLS_PER_AXIS as f32;
        let cell_size = cell_size
            .max(1.0)
            .max(canvas.width / axis_cap)
            .max(canvas.height / axis_cap);
        let cells = |extent: f32| {
            ((extent / cell_size).ceil() as usize).clamp(1, MAX_CELLS_PER_AXIS)
        };
        let (grid_width, grid_height) = (cells(canvas.width), cells(canvas.height));
        let bucket_count = grid_width.saturating_mul(grid_height);
        Self {
            padding,
            cell_size,
            half_width: canvas.width * 0.5,
            half_height: canvas.height * 0.5,
            grid_width,
            grid_height,
            boxes: Vec::new(),
            buckets: vec![Vec::new(); bucket_count],
            last_hit: None,
        }
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// Total area of the registered boxes.
    pub fn occupied_area(&self) -> f32 {
        self.boxes.iter().map(Rect::area).sum()
    }

    /// Returns true if `candidate` comes closer than `padding` to any registered box.
    pub fn collides(&mut self, candidate: &Rect) -> bool {
        if let Some(hit) = self.last_hit {
            if candidate.collides_with(&self.boxes[hit as usize], self.padding) {
                return true;
            }
        }

        let (x0, y0, x1, y1) = self.cell_range(&candidate.inflate(self.padding));
        for by in y0..=y1 {
            for bx in x0..=x1 {
                for &idx in &self.buckets[by * self.grid_width + bx] {
                    if candidate.collides_with(&self.boxes[idx as usize], self.padding) {
                        self.last_hit = Some(idx);
                        return true;
                    }
                }
            }
        }
        false
    }

    /// Registers a placed box. The caller has already checked it does not collide.
    pub fn insert(&mut self, rect: Rect) {
        let idx = self.boxes.len() as u32;
        self.boxes.push(rect);
        let (x0, y0, x1, y1) = self.cell_range(&rect);
        for by in y0..=y1 {
            for bx in x0..=x1 {
                self.buckets[by * self.grid_width + bx].push(idx);
            }
        }
    }

    /// Inclusive cell range covered by `rect`, clamped to the grid.
    fn cell_range(&self, rect: &Rect) -> (usize, usize, usize, usize) {
        let cell_x = |x: f32| {
            let c = ((x + self.half_width) / self.cell_size).floor();
            (c.max(0.0) as usize).min(self.grid_width - 1)
        };
        let cell_y = |y: f32| {
            let c = ((y + self.half_height) / self.cell_size).floor();
            (c.max(0.0) as usize).min(self.grid_height - 1)
        };
        (
            cell_x(rect.min.x),
            cell_y(rect.min.y),
            cell_x(rect.max.x),
            cell_y(rect.max.y),
        )
    }
}
