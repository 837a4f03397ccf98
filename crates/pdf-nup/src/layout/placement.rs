//! Content placement within slots
//!
//! The fit scale computed here only maps source units onto slot units.
//! It never sees the render resolution: the bitmap is drawn at the
//! fitted size whatever its pixel count, so the two factors compose
//! without leaking into each other.

use super::{Fit, Rect};

/// Fit a `source_width` x `source_height` rectangle into `slot`,
/// preserving aspect ratio and centering it on both axes.
///
/// The constraining axis wins: `scale = min(slot.w / src.w, slot.h / src.h)`.
pub fn fit(source_width: f32, source_height: f32, slot: &Rect) -> Fit {
    let scale = calculate_scale(source_width, source_height, slot.width, slot.height);

    let draw_width = source_width * scale;
    let draw_height = source_height * scale;

    Fit {
        scale,
        draw: Rect::new(
            slot.x + (slot.width - draw_width) / 2.0,
            slot.y + (slot.height - draw_height) / 2.0,
            draw_width,
            draw_height,
        ),
    }
}

/// Calculate scale factor for fitting source to target dimensions.
fn calculate_scale(src_width: f32, src_height: f32, target_width: f32, target_height: f32) -> f32 {
    let scale_w = target_width / src_width;
    let scale_h = target_height / src_height;
    scale_w.min(scale_h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_fit() {
        // Source is 800x600, target is 400x400
        // To fit, we need to scale by 0.5 (width-limited)
        let scale = calculate_scale(800.0, 600.0, 400.0, 400.0);
        assert!((scale - 0.5).abs() < 0.001);

        // Source is 400x800, target is 400x400
        // To fit, we need to scale by 0.5 (height-limited)
        let scale = calculate_scale(400.0, 800.0, 400.0, 400.0);
        assert!((scale - 0.5).abs() < 0.001);
    }

    #[test]
    fn test_fit_centers_on_slack_axis() {
        let slot = Rect::new(10.0, 20.0, 400.0, 400.0);
        let fit = fit(800.0, 600.0, &slot);

        assert!((fit.draw.width - 400.0).abs() < 0.001);
        assert!((fit.draw.height - 300.0).abs() < 0.001);
        assert!((fit.draw.x - 10.0).abs() < 0.001);
        // 100pt of vertical slack split evenly
        assert!((fit.draw.y - 70.0).abs() < 0.001);
    }

    #[test]
    fn test_fit_label_crop_into_quarter_page() {
        // Cropped label strip into a 2x2 A4 slot
        let slot = Rect::new(28.35, 430.86, 259.37, 382.68);
        let fit = fit(595.28, 350.0, &slot);

        assert!((fit.draw.width - slot.width).abs() < 0.01);
        assert!(fit.draw.height < slot.height);
        assert!((fit.draw.center_y() - slot.center_y()).abs() < 0.01);
    }

    #[test]
    fn test_fit_is_idempotent() {
        let slot = Rect::new(3.0, 7.0, 123.4, 56.7);
        let a = fit(595.28, 350.0, &slot);
        let b = fit(595.28, 350.0, &slot);
        assert_eq!(a, b);
    }
}
