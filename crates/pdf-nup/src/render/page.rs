//! Output document assembly
//!
//! Pages are built one at a time: items are drawn onto the current
//! [`PageSurface`] and [`OutputBuilder::finish_page`] turns it into a page
//! object with its own content stream and resources.

use crate::constants::NOTE_FONT_RESOURCE;
use crate::layout::Rect;
use crate::raster::RenderedItem;
use crate::types::Result;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

use super::image::image_xobject;

/// Content of the output page under construction
#[derive(Debug, Default)]
pub struct PageSurface {
    ops: Vec<String>,
    xobjects: Dictionary,
    uses_font: bool,
}

impl PageSurface {
    /// Append raw content-stream operators
    pub fn push_op(&mut self, op: impl Into<String>) {
        self.ops.push(op.into());
    }

    /// Register the shared text font on this page, returning its resource name
    pub fn use_font(&mut self) -> &'static str {
        self.uses_font = true;
        NOTE_FONT_RESOURCE
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Content stream of the page so far
    pub fn content(&self) -> String {
        self.ops.join("")
    }

    fn image_count(&self) -> usize {
        self.xobjects.len()
    }
}

/// Builds the output document page by page
pub struct OutputBuilder {
    doc: Document,
    pages_id: ObjectId,
    page_refs: Vec<Object>,
    width: f32,
    height: f32,
    font_id: Option<ObjectId>,
    current: PageSurface,
}

impl OutputBuilder {
    /// Start an empty document whose pages are `width` x `height` points
    pub fn new(width: f32, height: f32) -> Self {
        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();
        Self {
            doc,
            pages_id,
            page_refs: Vec::new(),
            width,
            height,
            font_id: None,
            current: PageSurface::default(),
        }
    }

    pub fn page_size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    /// Finished pages so far
    pub fn page_count(&self) -> usize {
        self.page_refs.len()
    }

    pub fn surface_mut(&mut self) -> &mut PageSurface {
        &mut self.current
    }

    /// Draw a rasterized item so it exactly covers `draw`
    pub fn place_image(&mut self, item: &RenderedItem, draw: &Rect) -> Result<()> {
        let image_id = self.doc.add_object(image_xobject(item)?);
        let name = format!("Im{}", self.current.image_count());
        self.current
            .xobjects
            .set(name.as_bytes(), Object::Reference(image_id));

        // Image space is the unit square, so scale straight to the draw size
        self.current.push_op(format!(
            "q {} 0 0 {} {} {} cm /{} Do Q\n",
            draw.width, draw.height, draw.x, draw.y, name
        ));
        Ok(())
    }

    /// Emit the current surface as a page and start a fresh one
    pub fn finish_page(&mut self) -> ObjectId {
        let surface = std::mem::take(&mut self.current);

        let mut page_dict = Dictionary::new();
        page_dict.set("Type", Object::Name(b"Page".to_vec()));
        page_dict.set("Parent", Object::Reference(self.pages_id));
        page_dict.set(
            "MediaBox",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(self.width),
                Object::Real(self.height),
            ]),
        );

        let content = surface.content();

        let mut resources = Dictionary::new();
        if !surface.xobjects.is_empty() {
            resources.set("XObject", Object::Dictionary(surface.xobjects));
        }
        if surface.uses_font {
            let font_id = self.font();
            let mut fonts = Dictionary::new();
            fonts.set(NOTE_FONT_RESOURCE, Object::Reference(font_id));
            resources.set("Font", Object::Dictionary(fonts));
        }

        let content_id = self
            .doc
            .add_object(Stream::new(Dictionary::new(), content.into_bytes()));

        page_dict.set("Contents", Object::Reference(content_id));
        page_dict.set("Resources", Object::Dictionary(resources));

        let page_id = self.doc.add_object(page_dict);
        self.page_refs.push(Object::Reference(page_id));
        page_id
    }

    /// Close the page tree and return the document.
    ///
    /// Anything drawn after the last [`finish_page`](Self::finish_page) is
    /// discarded; with no finished pages the result is a valid empty document.
    pub fn finish(mut self) -> Document {
        let count = self.page_refs.len() as i64;
        let pages_dict = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Pages".to_vec())),
            ("Kids", Object::Array(self.page_refs)),
            ("Count", Object::Integer(count)),
        ]);
        self.doc
            .objects
            .insert(self.pages_id, Object::Dictionary(pages_dict));

        let catalog_id = self.doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Catalog".to_vec())),
            ("Pages", Object::Reference(self.pages_id)),
        ]));
        self.doc.trailer.set("Root", catalog_id);

        self.doc
    }

    /// Shared Helvetica font object, created on first use
    fn font(&mut self) -> ObjectId {
        if let Some(id) = self.font_id {
            return id;
        }
        let mut font_dict = Dictionary::new();
        font_dict.set("Type", Object::Name(b"Font".to_vec()));
        font_dict.set("Subtype", Object::Name(b"Type1".to_vec()));
        font_dict.set("BaseFont", Object::Name(b"Helvetica".to_vec()));
        font_dict.set("Encoding", Object::Name(b"WinAnsiEncoding".to_vec()));
        let id = self.doc.add_object(font_dict);
        self.font_id = Some(id);
        id
    }
}
