use pdf_nup::*;
use std::path::PathBuf;

#[test]
fn test_paper_size_dimensions() {
    let a4 = PaperSize::A4;
    assert_eq!(a4.dimensions_mm(), (210.0, 297.0));

    let a3 = PaperSize::A3;
    assert_eq!(a3.dimensions_mm(), (297.0, 420.0));

    let a5 = PaperSize::A5;
    assert_eq!(a5.dimensions_mm(), (148.0, 210.0));

    let letter = PaperSize::Letter;
    assert_eq!(letter.dimensions_mm(), (215.9, 279.4));

    let legal = PaperSize::Legal;
    assert_eq!(legal.dimensions_mm(), (215.9, 355.6));

    let custom = PaperSize::Custom {
        width_mm: 100.0,
        height_mm: 200.0,
    };
    assert_eq!(custom.dimensions_mm(), (100.0, 200.0));
}

#[test]
fn test_orientation_swaps_dimensions() {
    assert_eq!(
        PaperSize::A4.dimensions_with_orientation(Orientation::Landscape),
        (297.0, 210.0)
    );
    assert_eq!(
        PaperSize::A4.dimensions_with_orientation(Orientation::Portrait),
        (210.0, 297.0)
    );
}

#[test]
fn test_error_classification() {
    let open = NupError::DocumentOpen {
        path: PathBuf::from("labels.pdf"),
        reason: "not a PDF".to_string(),
    };
    assert!(open.is_user_error());
    assert!(open.to_string().contains("labels.pdf"));

    assert!(NupError::EmptyResult("no names".to_string()).is_user_error());
    assert!(NupError::Config("bad dpi".to_string()).is_user_error());
    assert!(!NupError::LayoutInvariant("place on full page".to_string()).is_user_error());
}

#[test]
fn test_render_error_reports_one_based_page() {
    let err = NupError::Render {
        page: 0,
        reason: "boom".to_string(),
    };
    assert_eq!(err.to_string(), "Failed to rasterize page 1: boom");
}

#[test]
fn test_report_output_pages() {
    let report = CompositionReport {
        items: 10,
        occupancy: vec![4, 4, 2],
        fallback_names: 0,
    };
    assert_eq!(report.output_pages(), 3);
    assert_eq!(CompositionReport::default().output_pages(), 0);
}
