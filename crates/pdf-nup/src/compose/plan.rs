//! Per-call slot geometry

use crate::layout::{Slot, compute_slots, shared_page_layout};
use crate::options::{GenerationOptions, LayoutKind};
use crate::types::Result;

/// Every slot an output page offers, computed once per generation call.
///
/// Raster and note slots with the same index are paired: item `i` uses
/// both `raster_slots[i % capacity]` and `note_slots[i % capacity]`.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutPlan {
    pub capacity: usize,
    pub raster_slots: Vec<Slot>,
    pub note_slots: Vec<Slot>,
}

impl LayoutPlan {
    pub fn new(options: &GenerationOptions) -> Result<Self> {
        let spec = options.grid_spec()?;
        let capacity = spec.capacity();

        let plan = match options.layout {
            LayoutKind::Raster { .. } => Self {
                capacity,
                raster_slots: compute_slots(&spec)?,
                note_slots: Vec::new(),
            },
            LayoutKind::Notes { .. } => Self {
                capacity,
                raster_slots: Vec::new(),
                note_slots: compute_slots(&spec)?,
            },
            LayoutKind::Hybrid {
                note_rows,
                note_columns,
                order,
                ..
            } => {
                let shared =
                    shared_page_layout(&spec, options.crop.aspect(), note_rows, note_columns, order)?;
                Self {
                    capacity,
                    raster_slots: shared.raster_slots,
                    note_slots: shared.note_slots,
                }
            }
        };
        Ok(plan)
    }
}
