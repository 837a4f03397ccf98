pub mod compose;
pub mod constants;
pub mod layout;
pub mod names;
mod options;
pub mod paginate;
pub mod raster;
pub mod render;
mod source;
mod stats;
mod types;

pub use compose::{LayoutPlan, compose, generate, generate_from, load_source, save_output};
pub use layout::BandOrder;
pub use names::{extract_all_names, extract_name_from_text, extract_names, extract_names_from_text};
pub use options::*;
pub use paginate::Paginator;
pub use raster::{CropSpec, PageRasterizer, RasterBackend, RenderedItem, render_dimensions};
#[cfg(all(feature = "pdfium", not(target_arch = "wasm32")))]
pub use raster::PdfiumBackend;
pub use render::{NoteRenderer, ThankYouNote};
pub use source::SourceDocument;
pub use stats::{calculate_statistics, expected_occupancy, statistics_for};
pub use types::*;
