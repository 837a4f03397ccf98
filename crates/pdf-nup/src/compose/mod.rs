//! Multi-up composition
//!
//! One driver serves every layout:
//! 1. Resolve note names (one pass over the source text, before drawing)
//! 2. Rasterize each page's crop region and fit it into its slot
//! 3. Draw the paired note, if the layout has a note grid
//! 4. Close output pages as the paginator fills or input runs out

mod io;
mod plan;

pub use io::{generate, generate_from, load_source, save_output};
pub use plan::LayoutPlan;

use crate::constants::GEOMETRY_EPSILON;
use crate::layout::fit;
use crate::names::{extract_all_names, extract_names, unique_names};
use crate::options::{GenerationOptions, LayoutKind};
use crate::paginate::Paginator;
use crate::raster::{PageRasterizer, RasterBackend, RenderedItem, render_dimensions};
use crate::render::{NoteRenderer, OutputBuilder};
use crate::source::SourceDocument;
use crate::types::*;
use log::{debug, info, warn};
use lopdf::Document;

/// Compose one output document from `source`.
///
/// `backend` is required when the layout has a raster grid. The backend's
/// handle on the source is released before this returns, whatever the
/// outcome. An empty source yields a document with no pages.
pub fn compose(
    source: &SourceDocument,
    backend: Option<&dyn RasterBackend>,
    options: &GenerationOptions,
    notes: &dyn NoteRenderer,
) -> Result<(Document, CompositionReport)> {
    options.validate()?;
    let plan = LayoutPlan::new(options)?;

    let names = if options.layout.uses(ItemSource::Note) {
        Some(resolve_names(source, options)?)
    } else {
        None
    };
    let items = match (&options.layout, &names) {
        (LayoutKind::Notes { .. }, Some(names)) => names.names.len(),
        _ => source.page_count(),
    };

    info!(
        "Composing {} items from {} ({} layout, {} per page)",
        items,
        source.path().display(),
        options.layout.name(),
        plan.capacity
    );

    let mut rasterizer = if options.layout.uses(ItemSource::Raster) {
        let backend = backend.ok_or_else(|| {
            NupError::LayoutInvariant(format!(
                "{} layout needs a raster backend",
                options.layout.name()
            ))
        })?;
        Some(backend.open(source)?)
    } else {
        None
    };
    let expected_size = render_dimensions(&options.crop, options.render_dpi);

    let (page_width, page_height) = options.page_size_pt();
    let mut output = OutputBuilder::new(page_width, page_height);
    let mut paginator = Paginator::new(plan.capacity)?;
    let mut report = CompositionReport {
        items,
        fallback_names: names.as_ref().map_or(0, |n| n.fallbacks),
        ..CompositionReport::default()
    };

    for i in 0..items {
        let slot_index = paginator.place()?;

        if let Some(rasterizer) = rasterizer.as_mut() {
            let item = render_item(source, &mut **rasterizer, options, i, expected_size)?;
            let placement = fit(
                options.crop.width(),
                options.crop.height(),
                &plan.raster_slots[slot_index].rect,
            );
            output.place_image(&item, &placement.draw)?;
        }

        if let Some(names) = &names {
            notes.draw_note(
                output.surface_mut(),
                &names.names[i],
                &plan.note_slots[slot_index].rect,
            );
        }
        debug!("Item {} placed in slot {}", i + 1, slot_index);

        let placed = paginator.cursor();
        if paginator.flush_if_needed(i + 1 == items) {
            output.finish_page();
            report.occupancy.push(placed);
            debug!(
                "Output page {} finished with {} items",
                output.page_count(),
                placed
            );
        }
    }
    drop(rasterizer);

    info!(
        "Composed {} output pages from {} items",
        report.output_pages(),
        items
    );
    Ok((output.finish(), report))
}

/// Names for the note grid, in item order
struct NoteNames {
    names: Vec<String>,
    fallbacks: usize,
}

fn resolve_names(source: &SourceDocument, options: &GenerationOptions) -> Result<NoteNames> {
    if matches!(options.layout, LayoutKind::Notes { .. }) && options.names.unique {
        let names = unique_names(&extract_all_names(source, &options.names));
        if names.is_empty() {
            return Err(NupError::EmptyResult(format!(
                "no names found after '{}' in {}",
                options.names.label,
                source.path().display()
            )));
        }
        return Ok(NoteNames {
            names,
            fallbacks: 0,
        });
    }

    let mut fallbacks = 0;
    let names = extract_names(source, &options.names)
        .into_iter()
        .enumerate()
        .map(|(i, name)| {
            if name.is_empty() {
                fallbacks += 1;
                options.names.fallback_name(i)
            } else {
                name
            }
        })
        .collect();

    if fallbacks > 0 {
        warn!(
            "No name found on {} pages; using '{}' placeholders",
            fallbacks, options.names.fallback_prefix
        );
    }
    Ok(NoteNames { names, fallbacks })
}

/// Rasterize one page's crop region, checking it against the page and the
/// bitmap against the size the fit was computed for.
fn render_item<R: PageRasterizer + ?Sized>(
    source: &SourceDocument,
    rasterizer: &mut R,
    options: &GenerationOptions,
    page_index: usize,
    expected_size: (u32, u32),
) -> Result<RenderedItem> {
    let crop = &options.crop;
    let (page_width, page_height) = source.page_size(page_index)?;
    if !crop.fits_within(page_width + GEOMETRY_EPSILON, page_height + GEOMETRY_EPSILON) {
        return Err(NupError::LayoutInvariant(format!(
            "crop ({}, {}, {}, {}) lies outside page {} ({}x{}pt)",
            crop.x0,
            crop.y0,
            crop.x1,
            crop.y1,
            page_index + 1,
            page_width,
            page_height
        )));
    }

    let item = rasterizer.render_region(page_index, crop, options.render_dpi)?;
    if (item.width(), item.height()) != expected_size {
        return Err(NupError::LayoutInvariant(format!(
            "page {} rendered at {}x{}px, expected {}x{}px",
            page_index + 1,
            item.width(),
            item.height(),
            expected_size.0,
            expected_size.1
        )));
    }
    Ok(item)
}
