//! PDF output for composed pages
//!
//! - Image XObjects for rasterized items
//! - Output pages, their resources and the page tree
//! - Companion notes drawn as text

mod image;
mod note;
mod page;

pub use image::image_xobject;
pub use note::{NoteRenderer, ThankYouNote, escape_pdf_string};
pub use page::{OutputBuilder, PageSurface};
