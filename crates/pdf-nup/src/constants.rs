//! Shared constants for multi-up composition
//!
//! Unit conversions and the hand-tuned defaults of the three
//! generation modes live here so no algorithm hardcodes them.

// =============================================================================
// Unit Conversion
// =============================================================================

/// Points per millimeter (1 inch = 72 points, 1 inch = 25.4mm)
pub const POINTS_PER_MM: f32 = 72.0 / 25.4; // ≈ 2.83465

/// Points per inch; render scale is `dpi / POINTS_PER_INCH`
pub const POINTS_PER_INCH: f32 = 72.0;

/// Convert millimeters to points
#[inline]
pub fn mm_to_pt(mm: f32) -> f32 {
    mm * POINTS_PER_MM
}

/// Convert points to millimeters
#[inline]
pub fn pt_to_mm(pt: f32) -> f32 {
    pt / POINTS_PER_MM
}

// =============================================================================
// Rasterization
// =============================================================================

/// Default render resolution: the quality/size tradeoff for label bitmaps
pub const DEFAULT_RENDER_DPI: f32 = 200.0;

/// Lowest and highest resolution accepted by option validation
pub const MIN_RENDER_DPI: f32 = 36.0;
pub const MAX_RENDER_DPI: f32 = 600.0;

/// Default kept region of a label page (points, top-left origin).
/// Tuned against one label template: full A4 width, top 350pt.
pub const DEFAULT_CROP: (f32, f32, f32, f32) = (0.0, 0.0, 595.2756, 350.0);

// =============================================================================
// Page Geometry
// =============================================================================

/// Fallback source page size when a page carries no MediaBox (US Letter)
pub const DEFAULT_PAGE_DIMENSIONS: (f32, f32) = (612.0, 792.0);

/// Outer margin and inner gutter for the label modes (mm)
pub const LABEL_MARGIN_MM: f32 = 10.0;
pub const LABEL_GUTTER_MM: f32 = 7.0;

/// Outer margin and inner gutter for note-only sheets (mm)
pub const NOTE_MARGIN_MM: f32 = 15.0;
pub const NOTE_GUTTER_MM: f32 = 5.0;

/// Tolerance used when comparing derived geometry (points)
pub const GEOMETRY_EPSILON: f32 = 1e-3;

// =============================================================================
// Notes
// =============================================================================

/// Font size and leading of note text (points)
pub const NOTE_FONT_SIZE: f32 = 8.0;
pub const NOTE_LEADING: f32 = 10.0;

/// Text inset from the left and top edges of a note rect (mm)
pub const NOTE_INSET_X_MM: f32 = 5.0;
pub const NOTE_INSET_TOP_MM: f32 = 8.0;

/// Border line width and dash pattern (points)
pub const NOTE_BORDER_WIDTH: f32 = 0.5;
pub const NOTE_BORDER_DASH: (f32, f32) = (1.0, 2.0);

/// Label that precedes the customer name on the source page
pub const DEFAULT_NAME_LABEL: &str = "CUSTOMER ADDRESS";

/// Placeholder prefix for notes whose name could not be extracted
pub const DEFAULT_FALLBACK_PREFIX: &str = "Customer";

/// Resource name of the note font
pub const NOTE_FONT_RESOURCE: &str = "F1";
