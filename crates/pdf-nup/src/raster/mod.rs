//! Rasterization of source page regions
//!
//! A backend opens a per-call handle on a [`SourceDocument`]; the handle
//! renders the kept region of each page to an RGB bitmap. Pixel sizes
//! always come from [`render_dimensions`], which is also what the driver
//! checks every bitmap against.

#[cfg(all(feature = "pdfium", not(target_arch = "wasm32")))]
mod pdfium;

#[cfg(all(feature = "pdfium", not(target_arch = "wasm32")))]
pub use pdfium::PdfiumBackend;

use crate::constants::{DEFAULT_CROP, POINTS_PER_INCH};
use crate::source::SourceDocument;
use crate::types::{NupError, Result};
use image::RgbImage;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Region of a source page to keep, in points.
///
/// Coordinates are relative to the untransformed page with the origin at
/// the top-left and Y increasing downward.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CropSpec {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl Default for CropSpec {
    fn default() -> Self {
        let (x0, y0, x1, y1) = DEFAULT_CROP;
        Self { x0, y0, x1, y1 }
    }
}

impl CropSpec {
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }

    /// Height over width
    pub fn aspect(&self) -> f32 {
        self.height() / self.width()
    }

    pub fn is_valid(&self) -> bool {
        self.width() > 0.0 && self.height() > 0.0 && self.x0 >= 0.0 && self.y0 >= 0.0
    }

    /// True if the region lies inside a page of the given size
    pub fn fits_within(&self, page_width: f32, page_height: f32) -> bool {
        self.is_valid() && self.x1 <= page_width && self.y1 <= page_height
    }
}

/// Rasterized crop region of one source page
#[derive(Debug, Clone)]
pub struct RenderedItem {
    pub image: RgbImage,
}

impl RenderedItem {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

/// Linear render scale for a resolution: pixels per point
#[inline]
pub fn render_scale(dpi: f32) -> f32 {
    dpi / POINTS_PER_INCH
}

/// Pixel size of `crop` rendered at `dpi`.
///
/// Rounds to the nearest pixel with a minimum of one. Backends produce
/// exactly this size and the driver rejects anything else.
pub fn render_dimensions(crop: &CropSpec, dpi: f32) -> (u32, u32) {
    let scale = render_scale(dpi);
    (
        to_pixels(crop.width() * scale),
        to_pixels(crop.height() * scale),
    )
}

fn to_pixels(length: f32) -> u32 {
    length.round().max(1.0) as u32
}

/// Cut the crop region out of a full-page bitmap rendered at `dpi`.
///
/// The origin is rounded independently of the size, so it may shift by
/// one pixel to keep the region inside the bitmap; the size never does.
pub fn crop_page_bitmap(
    page: &RgbImage,
    crop: &CropSpec,
    dpi: f32,
    page_index: usize,
) -> Result<RenderedItem> {
    let scale = render_scale(dpi);
    let (width, height) = render_dimensions(crop, dpi);

    if width > page.width() || height > page.height() {
        return Err(NupError::Render {
            page: page_index,
            reason: format!(
                "crop of {}x{}px exceeds the {}x{}px page bitmap",
                width,
                height,
                page.width(),
                page.height()
            ),
        });
    }

    let x = ((crop.x0 * scale).round() as u32).min(page.width() - width);
    let y = ((crop.y0 * scale).round() as u32).min(page.height() - height);
    let image = image::imageops::crop_imm(page, x, y, width, height).to_image();

    Ok(RenderedItem { image })
}

/// Renders regions of the pages of one opened source document
pub trait PageRasterizer {
    fn render_region(&mut self, page_index: usize, crop: &CropSpec, dpi: f32)
    -> Result<RenderedItem>;
}

/// Opens rasterizer handles; the handle is dropped when the call ends,
/// on success and on every error path alike.
pub trait RasterBackend {
    fn open<'a>(&'a self, source: &'a SourceDocument) -> Result<Box<dyn PageRasterizer + 'a>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_render_dimensions_scale_with_dpi() {
        let crop = CropSpec::new(0.0, 0.0, 72.0, 36.0);
        assert_eq!(render_dimensions(&crop, 72.0), (72, 36));
        assert_eq!(render_dimensions(&crop, 144.0), (144, 72));
        assert_eq!(render_dimensions(&crop, 200.0), (200, 100));
    }

    #[test]
    fn test_render_dimensions_round_to_nearest() {
        // 595.2756pt at 200dpi = 1653.54px
        let crop = CropSpec::default();
        assert_eq!(render_dimensions(&crop, 200.0), (1654, 972));
    }

    #[test]
    fn test_render_dimensions_never_zero() {
        let crop = CropSpec::new(0.0, 0.0, 0.1, 0.1);
        assert_eq!(render_dimensions(&crop, 72.0), (1, 1));
    }

    #[test]
    fn test_crop_matches_render_dimensions() {
        let dpi = 150.0;
        let scale = render_scale(dpi);
        let page = RgbImage::from_pixel(
            (595.2756 * scale).round() as u32,
            (841.8898 * scale).round() as u32,
            Rgb([255, 255, 255]),
        );

        for crop in [
            CropSpec::default(),
            CropSpec::new(10.3, 20.7, 300.1, 411.9),
            CropSpec::new(0.0, 491.8898, 595.2756, 841.8898),
        ] {
            let item = crop_page_bitmap(&page, &crop, dpi, 0).unwrap();
            assert_eq!((item.width(), item.height()), render_dimensions(&crop, dpi));
        }
    }

    #[test]
    fn test_crop_takes_region_from_top_left_origin() {
        let mut page = RgbImage::from_pixel(100, 100, Rgb([255, 255, 255]));
        for x in 0..100 {
            for y in 0..10 {
                page.put_pixel(x, y, Rgb([0, 0, 0]));
            }
        }

        let item = crop_page_bitmap(&page, &CropSpec::new(0.0, 0.0, 100.0, 10.0), 72.0, 0).unwrap();
        assert!(item.image.pixels().all(|p| p.0 == [0, 0, 0]));
    }

    #[test]
    fn test_crop_larger_than_bitmap_is_render_error() {
        let page = RgbImage::new(50, 50);
        let result = crop_page_bitmap(&page, &CropSpec::new(0.0, 0.0, 50.0, 80.0), 72.0, 3);
        assert!(matches!(result, Err(NupError::Render { page: 3, .. })));
    }

    #[test]
    fn test_fits_within() {
        let crop = CropSpec::new(0.0, 0.0, 595.0, 350.0);
        assert!(crop.fits_within(595.2756, 841.8898));
        assert!(!crop.fits_within(595.2756, 300.0));
        assert!(!CropSpec::new(10.0, 10.0, 5.0, 20.0).fits_within(100.0, 100.0));
    }
}
