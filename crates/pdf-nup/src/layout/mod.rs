//! Layout calculation modules for multi-up composition
//!
//! This module handles all the geometric calculations:
//! - Grid layout (slot rectangles, shared raster/note pages)
//! - Content placement (aspect-preserving fit and centering)

mod grid;
mod placement;
mod types;

pub use grid::*;
pub use placement::*;
pub use types::*;
