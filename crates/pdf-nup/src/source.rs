//! Read-only access to the multi-page source document

use crate::constants::DEFAULT_PAGE_DIMENSIONS;
use crate::types::{NupError, Result};
use lopdf::{Document, Object, ObjectId};
use std::path::{Path, PathBuf};

/// Page-tree depth limit when resolving inherited attributes
const MAX_INHERITANCE_DEPTH: usize = 32;

/// An opened source PDF: its parsed object graph plus the raw bytes,
/// which rasterizer backends parse on their own.
#[derive(Debug)]
pub struct SourceDocument {
    path: PathBuf,
    bytes: Vec<u8>,
    document: Document,
    page_ids: Vec<ObjectId>,
}

impl SourceDocument {
    /// Open and parse a PDF from disk.
    ///
    /// A missing file, bytes that are not a PDF, or an encrypted document
    /// all fail with [`NupError::DocumentOpen`] naming the path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| NupError::open(path, e))?;
        Self::from_bytes(path, bytes)
    }

    /// Parse a PDF already read into memory; `path` is used in messages only.
    pub fn from_bytes(path: impl Into<PathBuf>, bytes: Vec<u8>) -> Result<Self> {
        let path = path.into();
        let document = Document::load_mem(&bytes).map_err(|e| NupError::open(&path, e))?;

        if document.is_encrypted() {
            return Err(NupError::open(&path, "document is encrypted"));
        }

        let page_ids = document.get_pages().values().copied().collect();
        Ok(Self {
            path,
            bytes,
            document,
            page_ids,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    /// Visible page (width, height) in points: the CropBox clipped to the
    /// MediaBox, both following the page tree for inherited boxes. This is
    /// the area rasterizers draw and top-left crop coordinates refer to.
    /// Pages without a MediaBox are US Letter.
    pub fn page_size(&self, page_index: usize) -> Result<(f32, f32)> {
        let page_id = self.page_id(page_index)?;
        let Some(media_box) = self.inherited_box(page_id, b"MediaBox") else {
            return Ok(DEFAULT_PAGE_DIMENSIONS);
        };
        let visible = match self.inherited_box(page_id, b"CropBox") {
            Some(crop_box) => media_box.intersect(&crop_box),
            None => media_box,
        };
        Ok((visible.width(), visible.height()))
    }

    /// Extracted text of one page
    pub fn page_text(&self, page_index: usize) -> Result<String> {
        self.page_id(page_index)?;
        Ok(self.document.extract_text(&[page_index as u32 + 1])?)
    }

    fn page_id(&self, page_index: usize) -> Result<ObjectId> {
        self.page_ids.get(page_index).copied().ok_or_else(|| {
            NupError::LayoutInvariant(format!(
                "page index {} out of range for {} pages",
                page_index,
                self.page_ids.len()
            ))
        })
    }

    fn inherited_box(&self, page_id: ObjectId, key: &[u8]) -> Option<PageBox> {
        let mut current = page_id;
        for _ in 0..MAX_INHERITANCE_DEPTH {
            let dict = self.document.get_dictionary(current).ok()?;

            if let Ok(page_box) = dict.get(key) {
                return self.page_box(page_box);
            }

            current = dict.get(b"Parent").and_then(Object::as_reference).ok()?;
        }
        None
    }

    fn page_box(&self, obj: &Object) -> Option<PageBox> {
        let obj = match obj {
            Object::Reference(id) => self.document.get_object(*id).ok()?,
            other => other,
        };
        let values: Vec<f32> = obj
            .as_array()
            .ok()?
            .iter()
            .filter_map(extract_number)
            .collect();
        let &[x0, y0, x1, y1] = values.as_slice() else {
            return None;
        };
        Some(PageBox {
            left: x0.min(x1),
            bottom: y0.min(y1),
            right: x0.max(x1),
            top: y0.max(y1),
        })
    }
}

/// A normalized page boundary box in default user space
#[derive(Debug, Clone, Copy)]
struct PageBox {
    left: f32,
    bottom: f32,
    right: f32,
    top: f32,
}

impl PageBox {
    fn intersect(&self, other: &PageBox) -> PageBox {
        PageBox {
            left: self.left.max(other.left),
            bottom: self.bottom.max(other.bottom),
            right: self.right.min(other.right),
            top: self.top.min(other.top),
        }
    }

    fn width(&self) -> f32 {
        (self.right - self.left).max(0.0)
    }

    fn height(&self) -> f32 {
        (self.top - self.bottom).max(0.0)
    }
}

/// Extract numeric value from a PDF object
fn extract_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}
