use pdf_nup::layout::*;
use pdf_nup::*;

const EPS: f32 = 1e-2;

/// Page sizes, margins and gutters swept by the grid properties
fn grid_specs() -> Vec<GridSpec> {
    let pages = [(595.2756, 841.8898), (612.0, 792.0), (841.8898, 595.2756), (300.0, 200.0)];
    let mut specs = Vec::new();
    for &(w, h) in &pages {
        for margin in [0.0, 5.0, 28.3465, 42.5] {
            for gutter in [0.0, 3.0, 14.17, 19.84] {
                for rows in 1..=9 {
                    for columns in 1..=4 {
                        if let Ok(spec) = GridSpec::new(w, h, margin, gutter, rows, columns) {
                            specs.push(spec);
                        }
                    }
                }
            }
        }
    }
    specs
}

#[test]
fn test_slot_count_matches_shape() {
    let specs = grid_specs();
    assert!(specs.len() > 100);
    for spec in specs {
        let slots = compute_slots(&spec).unwrap();
        assert_eq!(slots.len(), spec.rows * spec.columns);
        for (i, slot) in slots.iter().enumerate() {
            assert_eq!(slot.index, i);
            assert_eq!(slot.grid_pos, GridPosition::new(i / spec.columns, i % spec.columns));
        }
    }
}

#[test]
fn test_slots_never_overlap() {
    for spec in grid_specs() {
        let slots = compute_slots(&spec).unwrap();
        for (i, a) in slots.iter().enumerate() {
            for b in &slots[i + 1..] {
                assert!(
                    !a.rect.overlaps(&b.rect),
                    "{:?} and {:?} overlap in {:?}",
                    a,
                    b,
                    spec
                );
            }
        }
    }
}

#[test]
fn test_slots_stay_inside_margins() {
    for spec in grid_specs() {
        let usable = spec.usable_area();
        for slot in compute_slots(&spec).unwrap() {
            assert!(slot.rect.width > 0.0 && slot.rect.height > 0.0);
            assert!(slot.rect.x >= usable.x - EPS);
            assert!(slot.rect.y >= usable.y - EPS);
            assert!(slot.rect.right() <= usable.right() + EPS);
            assert!(slot.rect.top() <= usable.top() + EPS);
        }
    }
}

#[test]
fn test_slots_are_uniform_and_fill_the_width() {
    for spec in grid_specs() {
        let slots = compute_slots(&spec).unwrap();
        let (w, h) = spec.slot_size();
        for slot in &slots {
            assert!((slot.rect.width - w).abs() < EPS);
            assert!((slot.rect.height - h).abs() < EPS);
        }

        let columns = spec.columns as f32;
        let rows = spec.rows as f32;
        let width = columns * w + (columns - 1.0) * spec.gutter + 2.0 * spec.margin;
        let height = rows * h + (rows - 1.0) * spec.gutter + 2.0 * spec.margin;
        assert!((width - spec.page_width).abs() < EPS);
        assert!((height - spec.page_height).abs() < EPS);
    }
}

#[test]
fn test_fit_preserves_aspect_ratio() {
    let sources = [(1.0, 1.0), (595.28, 350.0), (350.0, 595.28), (1654.0, 972.0), (0.5, 300.0)];
    let slots = [
        Rect::new(0.0, 0.0, 100.0, 100.0),
        Rect::new(28.3, 430.0, 259.4, 381.7),
        Rect::new(10.0, 10.0, 5.0, 400.0),
        Rect::new(-20.0, 3.0, 800.0, 12.0),
    ];

    for &(sw, sh) in &sources {
        for slot in &slots {
            let fitted = fit(sw, sh, slot);
            let source_ratio = sw / sh;
            let drawn_ratio = fitted.draw.width / fitted.draw.height;
            assert!(
                (drawn_ratio - source_ratio).abs() / source_ratio < 1e-4,
                "{}x{} into {:?}",
                sw,
                sh,
                slot
            );

            // Constraining axis touches the slot, the other fits inside
            assert!(fitted.draw.width <= slot.width + EPS);
            assert!(fitted.draw.height <= slot.height + EPS);
            assert!(
                (fitted.draw.width - slot.width).abs() < EPS
                    || (fitted.draw.height - slot.height).abs() < EPS
            );

            // Centered on both axes
            assert!((fitted.draw.center_x() - slot.center_x()).abs() < EPS);
            assert!((fitted.draw.center_y() - slot.center_y()).abs() < EPS);
        }
    }
}

#[test]
fn test_fit_ignores_render_resolution() {
    // Fitting the crop in points gives the same draw rect at any DPI
    let crop = CropSpec::default();
    let slot = Rect::new(28.3465, 430.0, 259.4, 381.7);
    let expected = fit(crop.width(), crop.height(), &slot);

    for dpi in [72.0, 150.0, 200.0, 300.0] {
        let (px_w, px_h) = render_dimensions(&crop, dpi);
        let from_pixels = fit(px_w as f32, px_h as f32, &slot);
        assert!((from_pixels.draw.width - expected.draw.width).abs() < 0.5);
        assert!((from_pixels.draw.height - expected.draw.height).abs() < 0.5);
        assert_eq!(fit(crop.width(), crop.height(), &slot), expected);
    }
}

/// Feed `k` items through a paginator, returning the slot of every item
/// and the item count of every emitted page.
fn run_paginator(k: usize, capacity: usize) -> (Vec<(usize, usize)>, Vec<usize>) {
    let mut paginator = Paginator::new(capacity).unwrap();
    let mut assignments = Vec::new();
    let mut pages = Vec::new();

    for i in 0..k {
        let slot = paginator.place().unwrap();
        assignments.push((pages.len(), slot));
        let placed = paginator.cursor();
        if paginator.flush_if_needed(i + 1 == k) {
            pages.push(placed);
        }
    }
    (assignments, pages)
}

#[test]
fn test_paginator_page_counts() {
    for c in 1..=9 {
        for k in [0, 1, c - 1, c, c + 1, 2 * c, 2 * c + 3] {
            let (_, pages) = run_paginator(k, c);

            assert_eq!(pages.len(), k.div_ceil(c), "k={} c={}", k, c);
            if k > 0 {
                assert_eq!(*pages.last().unwrap(), k - c * ((k - 1) / c));
                assert!(pages[..pages.len() - 1].iter().all(|&n| n == c));
            }
            assert_eq!(pages, expected_occupancy(k, c));
        }
    }
}

#[test]
fn test_paginator_slot_assignment() {
    for c in 1..=9 {
        for k in [0, 1, c - 1, c, c + 1, 2 * c, 2 * c + 3] {
            let (assignments, _) = run_paginator(k, c);
            assert_eq!(assignments.len(), k);
            for (i, &(page, slot)) in assignments.iter().enumerate() {
                assert_eq!(page, i / c);
                assert_eq!(slot, i % c);
            }
        }
    }
}

#[test]
fn test_shared_page_bands_for_presets() {
    let options = GenerationOptions::hybrid();
    let spec = options.grid_spec().unwrap();

    for order in [BandOrder::RasterFirst, BandOrder::NotesFirst] {
        let layout = shared_page_layout(&spec, options.crop.aspect(), 2, 2, order).unwrap();
        let usable = spec.usable_area();

        assert!(usable.contains(&layout.raster_band));
        assert!(usable.contains(&layout.note_band));
        assert!(!layout.raster_band.overlaps(&layout.note_band));
        let total = layout.raster_band.height + layout.note_band.height + spec.gutter;
        assert!((total - usable.height).abs() < EPS);

        for slot in layout.raster_slots.iter().chain(&layout.note_slots) {
            assert!(usable.contains(&slot.rect));
        }
    }
}
