//! Smoke test against a real PDFium library; skipped when none can be bound.
#![cfg(feature = "pdfium")]

use lopdf::{Dictionary, Document, Object, Stream};
use pdf_nup::*;

fn create_label_pdf(num_pages: usize) -> SourceDocument {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let mut kids = Vec::new();
    for _ in 0..num_pages {
        // Black bar across the top of the page
        let content = b"0 0 0 rg 0 792 595 50 re f".to_vec();
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content));

        let page_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            (
                "MediaBox",
                Object::Array(vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(595),
                    Object::Integer(842),
                ]),
            ),
            ("Resources", Object::Dictionary(Dictionary::new())),
            ("Contents", Object::Reference(content_id)),
        ]));
        kids.push(Object::Reference(page_id));
    }

    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Count", Object::Integer(num_pages as i64)),
        ("Kids", Object::Array(kids)),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    SourceDocument::from_bytes("labels.pdf", bytes).unwrap()
}

fn bind_or_skip() -> Option<PdfiumBackend> {
    match PdfiumBackend::bind() {
        Ok(backend) => Some(backend),
        Err(e) => {
            eprintln!("Skipping PDFium test: {}", e);
            None
        }
    }
}

#[test]
fn test_pdfium_renders_exact_dimensions() {
    let Some(backend) = bind_or_skip() else {
        return;
    };
    let source = create_label_pdf(1);
    let crop = CropSpec::new(0.0, 0.0, 595.0, 350.0);

    let mut pages = backend.open(&source).unwrap();
    for dpi in [72.0, 150.0, 200.0] {
        let item = pages.render_region(0, &crop, dpi).unwrap();
        assert_eq!((item.width(), item.height()), render_dimensions(&crop, dpi));
    }

    // Top of the crop is the black bar
    let item = pages.render_region(0, &crop, 72.0).unwrap();
    assert_eq!(item.image.get_pixel(10, 10).0, [0, 0, 0]);
    assert_eq!(item.image.get_pixel(10, 300).0, [255, 255, 255]);
}

#[test]
fn test_pdfium_compose_plain() {
    let Some(backend) = bind_or_skip() else {
        return;
    };
    let source = create_label_pdf(5);
    let mut options = GenerationOptions::plain();
    options.crop = CropSpec::new(0.0, 0.0, 595.0, 350.0);
    options.render_dpi = 72.0;

    let (doc, report) = compose(&source, Some(&backend), &options, &ThankYouNote::default()).unwrap();
    assert_eq!(report.occupancy, vec![4, 1]);
    assert_eq!(doc.get_pages().len(), 2);
}
