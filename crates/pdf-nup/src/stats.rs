use crate::options::GenerationOptions;
use crate::types::*;

/// Calculate page statistics for placing `items` into pages of `capacity`
/// slots, without opening any document.
pub fn calculate_statistics(items: usize, capacity: usize) -> Result<CompositionStatistics> {
    if capacity == 0 {
        return Err(NupError::Config("Grid capacity must be positive".to_string()));
    }

    let output_pages = items.div_ceil(capacity);
    let last_page_items = if items == 0 {
        0
    } else {
        items - capacity * ((items - 1) / capacity)
    };
    let unused_slots = if items == 0 {
        0
    } else {
        capacity - last_page_items
    };

    Ok(CompositionStatistics {
        items,
        capacity,
        output_pages,
        last_page_items,
        unused_slots,
    })
}

/// Statistics for a generation run over `items` with the given options
pub fn statistics_for(items: usize, options: &GenerationOptions) -> Result<CompositionStatistics> {
    calculate_statistics(items, options.layout.capacity())
}

/// Per-page occupancy the paginator will produce for `items`
pub fn expected_occupancy(items: usize, capacity: usize) -> Vec<usize> {
    if capacity == 0 {
        return Vec::new();
    }
    (0..items)
        .step_by(capacity)
        .map(|start| (items - start).min(capacity))
        .collect()
}
