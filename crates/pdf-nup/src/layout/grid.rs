//! Grid layout calculation
//!
//! Slot sizes are always derived from the page, margin, gutter and grid
//! shape, so a grid can never overflow the page it was computed for:
//!
//! `columns * slot_width + (columns - 1) * gutter + 2 * margin == page_width`
//!
//! and analogously for rows and height.

use crate::types::{NupError, Result};

use super::{GridPosition, Rect, Slot};

// =============================================================================
// Grid Specification
// =============================================================================

/// Page size, outer margin, inner gutter and grid shape, all in points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSpec {
    pub page_width: f32,
    pub page_height: f32,
    /// Margin between the page edge and the outermost slots
    pub margin: f32,
    /// Space between adjacent slots
    pub gutter: f32,
    pub rows: usize,
    pub columns: usize,
}

impl GridSpec {
    /// Create a grid spec, rejecting shapes whose derived slots would be empty.
    pub fn new(
        page_width: f32,
        page_height: f32,
        margin: f32,
        gutter: f32,
        rows: usize,
        columns: usize,
    ) -> Result<Self> {
        let spec = Self {
            page_width,
            page_height,
            margin,
            gutter,
            rows,
            columns,
        };
        spec.check()?;
        Ok(spec)
    }

    /// Slots per page
    pub fn capacity(&self) -> usize {
        self.rows * self.columns
    }

    /// The page area inside the outer margin
    pub fn usable_area(&self) -> Rect {
        Rect::new(
            self.margin,
            self.margin,
            self.page_width - 2.0 * self.margin,
            self.page_height - 2.0 * self.margin,
        )
    }

    /// Derived (width, height) shared by every slot
    pub fn slot_size(&self) -> (f32, f32) {
        let area = self.usable_area();
        (
            span_share(area.width, self.columns, self.gutter),
            span_share(area.height, self.rows, self.gutter),
        )
    }

    fn check(&self) -> Result<()> {
        if self.rows == 0 || self.columns == 0 {
            return Err(NupError::LayoutInvariant(format!(
                "grid shape {}x{} has no slots",
                self.rows, self.columns
            )));
        }
        if self.margin < 0.0 || self.gutter < 0.0 {
            return Err(NupError::LayoutInvariant(format!(
                "negative margin ({}) or gutter ({})",
                self.margin, self.gutter
            )));
        }
        let (width, height) = self.slot_size();
        if width <= 0.0 || height <= 0.0 {
            return Err(NupError::LayoutInvariant(format!(
                "{}x{} grid on a {}x{}pt page with margin {} and gutter {} leaves {}x{}pt slots",
                self.rows,
                self.columns,
                self.page_width,
                self.page_height,
                self.margin,
                self.gutter,
                width,
                height
            )));
        }
        Ok(())
    }
}

/// Size of one of `count` equal cells sharing `span` with `gutter` between them
fn span_share(span: f32, count: usize, gutter: f32) -> f32 {
    (span - (count as f32 - 1.0) * gutter) / count as f32
}

// =============================================================================
// Slot Calculation
// =============================================================================

/// Compute every slot of a grid in traversal order: row-major, top row
/// first, left to right within a row. Item `n` maps to slot `n % capacity`.
pub fn compute_slots(spec: &GridSpec) -> Result<Vec<Slot>> {
    spec.check()?;
    grid_in_area(spec.usable_area(), spec.rows, spec.columns, spec.gutter)
}

/// Lay a `rows` x `columns` grid over `area` with `gutter` between cells.
pub fn grid_in_area(area: Rect, rows: usize, columns: usize, gutter: f32) -> Result<Vec<Slot>> {
    if rows == 0 || columns == 0 {
        return Err(NupError::LayoutInvariant(format!(
            "grid shape {}x{} has no slots",
            rows, columns
        )));
    }

    let slot_width = span_share(area.width, columns, gutter);
    let slot_height = span_share(area.height, rows, gutter);
    if slot_width <= 0.0 || slot_height <= 0.0 {
        return Err(NupError::LayoutInvariant(format!(
            "{}x{} grid in a {}x{}pt area leaves {}x{}pt slots",
            rows, columns, area.width, area.height, slot_width, slot_height
        )));
    }

    let mut slots = Vec::with_capacity(rows * columns);
    for row in 0..rows {
        for col in 0..columns {
            // Row 0 is at the top, so we need to invert the y calculation
            let x = area.x + col as f32 * (slot_width + gutter);
            let y = area.top() - (row + 1) as f32 * slot_height - row as f32 * gutter;
            slots.push(Slot {
                index: row * columns + col,
                grid_pos: GridPosition::new(row, col),
                rect: Rect::new(x, y, slot_width, slot_height),
            });
        }
    }
    Ok(slots)
}

// =============================================================================
// Shared Page (raster band + note band)
// =============================================================================

/// Which band occupies the top of a shared page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BandOrder {
    /// Raster grid on top, note grid below
    #[default]
    RasterFirst,
    /// Note grid on top, raster grid below
    NotesFirst,
}

/// Two grids sharing one output page
#[derive(Debug, Clone, PartialEq)]
pub struct SharedPageLayout {
    /// Area occupied by the raster grid
    pub raster_band: Rect,
    /// Area occupied by the note grid
    pub note_band: Rect,
    pub raster_slots: Vec<Slot>,
    pub note_slots: Vec<Slot>,
}

/// Split one page between a raster grid and a note grid.
///
/// Both grids share one margin/gutter budget. The raster band is exactly
/// as tall as its rows need at the raster aspect ratio (`height / width`
/// of the cropped region); the note band takes the rest of the usable
/// height minus one inter-band gutter, so the bands never overlap and
/// together fill the usable page height.
pub fn shared_page_layout(
    page: &GridSpec,
    raster_aspect: f32,
    note_rows: usize,
    note_columns: usize,
    order: BandOrder,
) -> Result<SharedPageLayout> {
    page.check()?;
    if !(raster_aspect > 0.0 && raster_aspect.is_finite()) {
        return Err(NupError::LayoutInvariant(format!(
            "raster aspect ratio {} is not positive",
            raster_aspect
        )));
    }

    let usable = page.usable_area();
    let gutter = page.gutter;
    let raster_slot_width = span_share(usable.width, page.columns, gutter);
    let raster_slot_height = raster_slot_width * raster_aspect;
    let raster_height =
        page.rows as f32 * raster_slot_height + (page.rows as f32 - 1.0) * gutter;
    let note_height = usable.height - raster_height - gutter;

    if note_height <= 0.0 {
        return Err(NupError::LayoutInvariant(format!(
            "{} raster rows need {}pt of {}pt usable height, leaving no room for notes",
            page.rows, raster_height, usable.height
        )));
    }

    let (raster_band, note_band) = match order {
        BandOrder::RasterFirst => (
            Rect::new(
                usable.x,
                usable.top() - raster_height,
                usable.width,
                raster_height,
            ),
            Rect::new(usable.x, usable.y, usable.width, note_height),
        ),
        BandOrder::NotesFirst => (
            Rect::new(usable.x, usable.y, usable.width, raster_height),
            Rect::new(
                usable.x,
                usable.top() - note_height,
                usable.width,
                note_height,
            ),
        ),
    };

    Ok(SharedPageLayout {
        raster_slots: grid_in_area(raster_band, page.rows, page.columns, gutter)?,
        note_slots: grid_in_area(note_band, note_rows, note_columns, gutter)?,
        raster_band,
        note_band,
    })
}

// =============================================================================
// Tests
// =============================================================================
