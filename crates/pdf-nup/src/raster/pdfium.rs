//! PDFium-backed rasterization

use super::{CropSpec, PageRasterizer, RasterBackend, RenderedItem, crop_page_bitmap, render_scale};
use crate::source::SourceDocument;
use crate::types::{NupError, Result};
use log::debug;
use pdfium_render::prelude::*;

/// Rasterizes pages with a dynamically bound PDFium library
pub struct PdfiumBackend {
    pdfium: Pdfium,
}

impl PdfiumBackend {
    /// Bind PDFium, searching the current directory, `vendor/pdfium/lib/`,
    /// then the system library paths.
    pub fn bind() -> Result<Self> {
        let bindings = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
            .or_else(|_| {
                Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(
                    "./vendor/pdfium/lib/",
                ))
            })
            .or_else(|_| Pdfium::bind_to_system_library())
            .map_err(|e| {
                NupError::Config(format!(
                    "Failed to load PDFium library; install libpdfium or place it in vendor/pdfium/lib: {:?}",
                    e
                ))
            })?;

        Ok(Self {
            pdfium: Pdfium::new(bindings),
        })
    }
}

impl RasterBackend for PdfiumBackend {
    fn open<'a>(&'a self, source: &'a SourceDocument) -> Result<Box<dyn PageRasterizer + 'a>> {
        let document = self
            .pdfium
            .load_pdf_from_byte_slice(source.bytes(), None)
            .map_err(|e| NupError::open(source.path(), format!("{:?}", e)))?;
        debug!("PDFium opened {}", source.path().display());
        Ok(Box::new(PdfiumPages { document }))
    }
}

struct PdfiumPages<'a> {
    document: PdfDocument<'a>,
}

impl PageRasterizer for PdfiumPages<'_> {
    fn render_region(
        &mut self,
        page_index: usize,
        crop: &CropSpec,
        dpi: f32,
    ) -> Result<RenderedItem> {
        let render_error = |e: PdfiumError| NupError::Render {
            page: page_index,
            reason: format!("{:?}", e),
        };

        let page = self
            .document
            .pages()
            .get(pdfium_page_index(page_index)?)
            .map_err(render_error)?;

        // Whole page at the render scale, then cut the crop region out
        let scale = render_scale(dpi);
        let width = (page.width().value * scale).round() as i32;
        let height = (page.height().value * scale).round() as i32;
        let config = PdfRenderConfig::new()
            .set_target_width(width)
            .set_maximum_height(height);

        let bitmap = page.render_with_config(&config).map_err(render_error)?;
        let full_page = bitmap.as_image().into_rgb8();

        crop_page_bitmap(&full_page, crop, dpi, page_index)
    }
}

/// PDFium addresses pages with a `u16`; larger indices cannot be rendered.
fn pdfium_page_index(page_index: usize) -> Result<u16> {
    u16::try_from(page_index).map_err(|_| NupError::Render {
        page: page_index,
        reason: format!("page index exceeds PDFium's limit of {} pages", u16::MAX as usize + 1),
    })
}
