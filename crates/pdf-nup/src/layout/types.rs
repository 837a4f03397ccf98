//! Layout data types for multi-up composition
//!
//! These types represent the geometry computed once per generation
//! call, before any source page is rasterized.

use crate::constants::GEOMETRY_EPSILON;

/// Position within the grid (row, column)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridPosition {
    /// Row index (0 = top row)
    pub row: usize,
    /// Column index (0 = leftmost column)
    pub col: usize,
}

impl GridPosition {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// A rectangular area in points, origin bottom-left
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// X position (left edge)
    pub x: f32,
    /// Y position (bottom edge)
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge x coordinate
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Top edge y coordinate
    pub fn top(&self) -> f32 {
        self.y + self.height
    }

    /// Center x coordinate
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Center y coordinate
    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    /// True if the interiors of the two rects intersect.
    /// Shared edges do not count as overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right() - GEOMETRY_EPSILON
            && other.x < self.right() - GEOMETRY_EPSILON
            && self.y < other.top() - GEOMETRY_EPSILON
            && other.y < self.top() - GEOMETRY_EPSILON
    }

    /// True if `other` lies inside this rect (within tolerance)
    pub fn contains(&self, other: &Rect) -> bool {
        other.x >= self.x - GEOMETRY_EPSILON
            && other.y >= self.y - GEOMETRY_EPSILON
            && other.right() <= self.right() + GEOMETRY_EPSILON
            && other.top() <= self.top() + GEOMETRY_EPSILON
    }
}

/// One placement slot of a grid on the output page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slot {
    /// Index in traversal order (row-major, top row first)
    pub index: usize,
    /// Position in grid
    pub grid_pos: GridPosition,
    /// Slot bounds in points
    pub rect: Rect,
}

/// Aspect-preserving fit of a source rectangle into a slot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fit {
    /// Fit scale: slot units per source unit
    pub scale: f32,
    /// Where the source is drawn, centered in the slot
    pub draw: Rect,
}
