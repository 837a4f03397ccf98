use crate::constants::*;
use crate::layout::{BandOrder, GridSpec};
use crate::raster::CropSpec;
use crate::types::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which grids are active on an output page and what fills them
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LayoutKind {
    /// Cropped source regions only
    Raster { rows: usize, columns: usize },
    /// Cropped source regions plus one companion note per item
    Hybrid {
        raster_rows: usize,
        raster_columns: usize,
        note_rows: usize,
        note_columns: usize,
        order: BandOrder,
    },
    /// Companion notes only, one per extracted name
    Notes { rows: usize, columns: usize },
}

impl LayoutKind {
    /// Items per output page
    pub fn capacity(&self) -> usize {
        match *self {
            LayoutKind::Raster { rows, columns } | LayoutKind::Notes { rows, columns } => {
                rows * columns
            }
            LayoutKind::Hybrid {
                raster_rows,
                raster_columns,
                ..
            } => raster_rows * raster_columns,
        }
    }

    /// Grids active on a page, in drawing order
    pub fn sources(&self) -> &'static [ItemSource] {
        match self {
            LayoutKind::Raster { .. } => &[ItemSource::Raster],
            LayoutKind::Hybrid { .. } => &[ItemSource::Raster, ItemSource::Note],
            LayoutKind::Notes { .. } => &[ItemSource::Note],
        }
    }

    pub fn uses(&self, source: ItemSource) -> bool {
        self.sources().contains(&source)
    }

    pub fn name(&self) -> &'static str {
        match self {
            LayoutKind::Raster { .. } => "plain",
            LayoutKind::Hybrid { .. } => "hybrid",
            LayoutKind::Notes { .. } => "notes",
        }
    }

    /// Shape (rows, columns) of the primary grid
    fn primary_shape(&self) -> (usize, usize) {
        match *self {
            LayoutKind::Raster { rows, columns } | LayoutKind::Notes { rows, columns } => {
                (rows, columns)
            }
            LayoutKind::Hybrid {
                raster_rows,
                raster_columns,
                ..
            } => (raster_rows, raster_columns),
        }
    }
}

/// How companion-note names are obtained
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NameOptions {
    /// Text of the line preceding the name on a source page (case-insensitive)
    pub label: String,
    /// Placeholder prefix when no name was found: "{prefix} {page + 1}"
    pub fallback_prefix: String,
    /// Note-only mode: de-duplicate and sort names, dropping empty ones
    pub unique: bool,
}

impl Default for NameOptions {
    fn default() -> Self {
        Self {
            label: DEFAULT_NAME_LABEL.to_string(),
            fallback_prefix: DEFAULT_FALLBACK_PREFIX.to_string(),
            unique: false,
        }
    }
}

impl NameOptions {
    /// Placeholder for the item at 0-based `index`
    pub fn fallback_name(&self, index: usize) -> String {
        format!("{} {}", self.fallback_prefix, index + 1)
    }
}

/// Wording and typography of the companion note
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NoteOptions {
    /// Text lines; `{name}` is replaced by the customer name
    pub lines: Vec<String>,
    pub font_size_pt: f32,
    pub leading_pt: f32,
    /// Dashed cutting border around each note
    pub border: bool,
}

impl Default for NoteOptions {
    fn default() -> Self {
        Self {
            lines: [
                "Thank you {name} ji!",
                "Thank you for your order - it truly means a lot to us!",
                "We hope you love your purchase.",
                "If you're happy with it, we'd be thrilled",
                "if you could leave us a 5-star review.",
                "In case there's anything you're not satisfied with,",
                "please reach out to us directly",
                "and we'll do our best to make it right.",
                "Your feedback helps us improve, and your support means",
                "the world to our small business.",
                "",
                "Thank you once again!",
                "Warm regards",
            ]
            .iter()
            .map(|line| line.to_string())
            .collect(),
            font_size_pt: NOTE_FONT_SIZE,
            leading_pt: NOTE_LEADING,
            border: true,
        }
    }
}

/// Complete configuration of one generation call.
///
/// Passed by value into the driver; nothing here is process-global, so
/// concurrent calls with different options cannot interfere.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GenerationOptions {
    // Output page
    pub paper_size: PaperSize,
    pub orientation: Orientation,
    pub margin_mm: f32,
    pub gutter_mm: f32,

    // Source region and its rasterization
    pub crop: CropSpec,
    pub render_dpi: f32,

    // Grids
    pub layout: LayoutKind,

    // Companion content
    pub names: NameOptions,
    pub note: NoteOptions,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self::plain()
    }
}

impl GenerationOptions {
    /// Cropped labels, 2x2 per A4 page
    pub fn plain() -> Self {
        Self {
            paper_size: PaperSize::A4,
            orientation: Orientation::Portrait,
            margin_mm: LABEL_MARGIN_MM,
            gutter_mm: LABEL_GUTTER_MM,
            crop: CropSpec::default(),
            render_dpi: DEFAULT_RENDER_DPI,
            layout: LayoutKind::Raster {
                rows: 2,
                columns: 2,
            },
            names: NameOptions::default(),
            note: NoteOptions::default(),
        }
    }

    /// Four cropped labels plus their four notes per A4 page
    pub fn hybrid() -> Self {
        Self {
            layout: LayoutKind::Hybrid {
                raster_rows: 2,
                raster_columns: 2,
                note_rows: 2,
                note_columns: 2,
                order: BandOrder::RasterFirst,
            },
            ..Self::plain()
        }
    }

    /// Notes only, 2 columns x 4 rows per A4 page, one per unique name
    pub fn notes() -> Self {
        Self {
            margin_mm: NOTE_MARGIN_MM,
            gutter_mm: NOTE_GUTTER_MM,
            layout: LayoutKind::Notes {
                rows: 4,
                columns: 2,
            },
            names: NameOptions {
                label: "BILL TO / SHIP TO".to_string(),
                unique: true,
                ..NameOptions::default()
            },
            ..Self::plain()
        }
    }

    /// Output page (width, height) in points
    pub fn page_size_pt(&self) -> (f32, f32) {
        let (w, h) = self.paper_size.dimensions_with_orientation(self.orientation);
        (mm_to_pt(w), mm_to_pt(h))
    }

    /// Grid spec of the primary grid (raster grid in hybrid mode)
    pub fn grid_spec(&self) -> Result<GridSpec> {
        let (page_width, page_height) = self.page_size_pt();
        let (rows, columns) = self.layout.primary_shape();
        GridSpec::new(
            page_width,
            page_height,
            mm_to_pt(self.margin_mm),
            mm_to_pt(self.gutter_mm),
            rows,
            columns,
        )
    }

    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options = serde_json::from_slice(&bytes)
            .map_err(|e| NupError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| NupError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        if !(MIN_RENDER_DPI..=MAX_RENDER_DPI).contains(&self.render_dpi) {
            return Err(NupError::Config(format!(
                "Render DPI {} is outside {}..={}",
                self.render_dpi, MIN_RENDER_DPI, MAX_RENDER_DPI
            )));
        }

        if self.margin_mm < 0.0 || self.gutter_mm < 0.0 {
            return Err(NupError::Config(
                "Margin and gutter must not be negative".to_string(),
            ));
        }

        if self.layout.uses(ItemSource::Raster) && !self.crop.is_valid() {
            return Err(NupError::Config(format!(
                "Crop rectangle {:?} must have positive width and height",
                self.crop
            )));
        }

        match self.layout {
            LayoutKind::Raster { rows, columns } | LayoutKind::Notes { rows, columns } => {
                if rows == 0 || columns == 0 {
                    return Err(NupError::Config(
                        "Rows and columns must be at least 1".to_string(),
                    ));
                }
            }
            LayoutKind::Hybrid {
                raster_rows,
                raster_columns,
                note_rows,
                note_columns,
                ..
            } => {
                if raster_rows * raster_columns == 0 || note_rows * note_columns == 0 {
                    return Err(NupError::Config(
                        "Rows and columns must be at least 1".to_string(),
                    ));
                }
                // Item i occupies slot i % capacity in both grids
                if raster_rows * raster_columns != note_rows * note_columns {
                    return Err(NupError::Config(format!(
                        "Hybrid grids must have equal capacity: {}x{} labels vs {}x{} notes",
                        raster_rows, raster_columns, note_rows, note_columns
                    )));
                }
            }
        }

        if self.layout.uses(ItemSource::Note) {
            if self.note.font_size_pt <= 0.0 || self.note.leading_pt <= 0.0 {
                return Err(NupError::Config(
                    "Note font size and leading must be positive".to_string(),
                ));
            }
            if self.names.fallback_prefix.trim().is_empty() {
                return Err(NupError::Config(
                    "Fallback name prefix must not be empty".to_string(),
                ));
            }
        }

        Ok(())
    }
}
