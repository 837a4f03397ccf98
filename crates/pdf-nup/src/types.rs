use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NupError {
    /// The source could not be read, parsed or decrypted
    #[error("Cannot open source document '{}': {reason}", path.display())]
    DocumentOpen { path: PathBuf, reason: String },
    /// A collaborator found nothing usable in a document that opened fine
    #[error("No usable content: {0}")]
    EmptyResult(String),
    /// Internal contract violation; indicates a defect or a misconfigured layout
    #[error("Layout invariant violated: {0}")]
    LayoutInvariant(String),
    #[error("Failed to rasterize page {}: {reason}", page + 1)]
    Render { page: usize, reason: String },
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

impl NupError {
    /// True for errors caused by the caller's input rather than by a defect.
    /// The surrounding system can turn these into a retry prompt.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            NupError::DocumentOpen { .. } | NupError::EmptyResult(_) | NupError::Config(_)
        )
    }

    pub(crate) fn open(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        NupError::DocumentOpen {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, NupError>;

/// Paper orientation
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Portrait: height > width (default for most paper sizes)
    #[default]
    Portrait,
    /// Landscape: width > height
    Landscape,
}

/// Standard paper sizes
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PaperSize {
    A3,
    A4,
    A5,
    Letter,
    Legal,
    Custom { width_mm: f32, height_mm: f32 },
}

impl PaperSize {
    /// Get base dimensions (always portrait: width < height for standard sizes)
    pub fn dimensions_mm(self) -> (f32, f32) {
        match self {
            PaperSize::A3 => (297.0, 420.0),
            PaperSize::A4 => (210.0, 297.0),
            PaperSize::A5 => (148.0, 210.0),
            PaperSize::Letter => (215.9, 279.4),
            PaperSize::Legal => (215.9, 355.6),
            PaperSize::Custom {
                width_mm,
                height_mm,
            } => (width_mm, height_mm),
        }
    }

    /// Get dimensions with orientation applied
    pub fn dimensions_with_orientation(self, orientation: Orientation) -> (f32, f32) {
        let (w, h) = self.dimensions_mm();
        match orientation {
            Orientation::Portrait => (w, h),
            Orientation::Landscape => (h, w),
        }
    }
}

/// Which collaborator fills the slots of a grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemSource {
    /// Cropped, rasterized region of a source page
    Raster,
    /// Companion note drawn from extracted text
    Note,
}

/// Summary of one generation call
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompositionReport {
    /// Number of items placed (source pages, or names in note-only mode)
    pub items: usize,
    /// Items on each emitted output page, in order
    pub occupancy: Vec<usize>,
    /// Notes that used the generated placeholder name
    pub fallback_names: usize,
}

impl CompositionReport {
    pub fn output_pages(&self) -> usize {
        self.occupancy.len()
    }
}

/// Statistics about a composition, computable without opening a document
#[derive(Debug, Clone, PartialEq)]
pub struct CompositionStatistics {
    /// Total number of items to place
    pub items: usize,
    /// Slots per output page
    pub capacity: usize,
    /// Number of output pages
    pub output_pages: usize,
    /// Items on the final page (0 when there are no pages)
    pub last_page_items: usize,
    /// Empty slots left on the final page
    pub unused_slots: usize,
}
