//! Label placement and font-size fitting.
//!
//! Shaped text width is not a linear function of font size once kerning
//! and ligatures are in play, so there is no analytic solution for "the
//! largest size that fits". [`fit_label`] commits to an iterative search
//! with a hard iteration cap instead: measure, halve the interval, repeat.
//!
//! Small per-day labels skip the search entirely — their size is fixed by
//! layout policy and measurement is only used to right-align two adjacent
//! runs on a shared top padding.

use serde::Serialize;

use crate::layout::grid::CellRect;
use crate::metrics::{FontDesc, FontMetrics};

/// Upper bound on measure calls per fit; guarantees termination even for
/// pathological metrics implementations.
const MAX_FIT_ITERATIONS: usize = 40;

/// Interval width at which the size search stops refining.
const FIT_TOLERANCE: f32 = 0.25;

/// A placed text run: what to draw, where, and at which size.
///
/// The rectangle is the measured ink box, fully contained within the
/// cells the label spans.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelPlacement {
    pub text: String,
    pub rect: CellRect,
    pub font_size: f32,
}

/// Find the largest font size in `[min_size, max_size]` at which `text`
/// fits `bbox` scaled by `fit_factor`, and center the result in `bbox`.
///
/// `fit_factor` leaves inner padding (0.9 keeps a 5% inset per side).
/// The search never fails: when even `min_size` overflows, the placement
/// is returned at `min_size` anyway and a warning-level diagnostic is
/// logged — label overflow is cosmetic, not fatal.
pub fn fit_label<M: FontMetrics>(
    text: &str,
    bbox: CellRect,
    font: &FontDesc,
    min_size: f32,
    max_size: f32,
    fit_factor: f32,
    metrics: &M,
) -> LabelPlacement {
    let max_width = bbox.width * fit_factor;
    let max_height = bbox.height * fit_factor;
    let fits = |size: f32| {
        let extent = metrics.measure(text, &font.with_size(size));
        extent.width <= max_width && extent.height <= max_height
    };

    let mut iterations = 0usize;
    let size = if fits(max_size) {
        max_size
    } else if !fits(min_size) {
        log::warn!(
            "label {text:?} overflows {:.1}x{:.1} pt box even at minimum size {min_size}",
            bbox.width,
            bbox.height
        );
        min_size
    } else {
        // Invariant: `lo` fits, `hi` does not.
        let mut lo = min_size;
        let mut hi = max_size;
        while hi - lo > FIT_TOLERANCE && iterations < MAX_FIT_ITERATIONS {
            let mid = (lo + hi) / 2.0;
            if fits(mid) {
                lo = mid;
            } else {
                hi = mid;
            }
            iterations += 1;
        }
        lo
    };

    let extent = metrics.measure(text, &font.with_size(size));
    // Center the ink box, not the nominal box: subtract the bearing so
    // the visual glyphs land in the middle.
    let rect = CellRect::new(
        bbox.x + (bbox.width - extent.width) / 2.0 - extent.x_bearing,
        bbox.y + (bbox.height - extent.height) / 2.0 - extent.y_bearing,
        extent.width,
        extent.height,
    );

    LabelPlacement {
        text: text.to_string(),
        rect,
        font_size: size,
    }
}

/// Right-align two adjacent text runs inside `cell`, separated by `gap`
/// and anchored to the same top `padding` so they share a visual
/// baseline. Used for the per-day weekday abbreviation + bold day number.
pub fn align_runs_right<M: FontMetrics>(
    first: (&str, &FontDesc),
    second: (&str, &FontDesc),
    cell: CellRect,
    padding: f32,
    gap: f32,
    metrics: &M,
) -> (LabelPlacement, LabelPlacement) {
    let first_extent = metrics.measure(first.0, first.1);
    let second_extent = metrics.measure(second.0, second.1);

    let total_width = first_extent.width + gap + second_extent.width;
    let start_x = cell.x + cell.width - padding - total_width;
    let top = cell.y + padding;

    let first_placement = LabelPlacement {
        text: first.0.to_string(),
        rect: CellRect::new(start_x, top, first_extent.width, first_extent.height),
        font_size: first.1.size,
    };
    let second_placement = LabelPlacement {
        text: second.0.to_string(),
        rect: CellRect::new(
            start_x + first_extent.width + gap,
            top,
            second_extent.width,
            second_extent.height,
        ),
        font_size: second.1.size,
    };

    (first_placement, second_placement)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp, clippy::panic)]
mod tests {
    use super::*;
    use crate::metrics::{ApproxMetrics, TextExtent};
    use std::cell::Cell;

    struct CountingMetrics {
        calls: Cell<usize>,
    }

    impl FontMetrics for CountingMetrics {
        fn measure(&self, text: &str, font: &FontDesc) -> TextExtent {
            self.calls.set(self.calls.get() + 1);
            TextExtent::sized(text.chars().count() as f32 * font.size * 0.6, font.size)
        }
    }

    #[test]
    fn fits_at_max_when_box_is_large() {
        let bbox = CellRect::new(0.0, 0.0, 1000.0, 1000.0);
        let placement = fit_label(
            "MAR",
            bbox,
            &FontDesc::bold("Sans", 0.0),
            4.0,
            12.0,
            0.9,
            &ApproxMetrics,
        );
        assert_eq!(placement.font_size, 12.0);
    }

    #[test]
    fn shrinks_to_satisfy_width_constraint() {
        // "2024" at size s measures 2.4*s wide; 90% of 200 = 180.
        let bbox = CellRect::new(0.0, 0.0, 200.0, 50.0);
        let placement = fit_label(
            "2024",
            bbox,
            &FontDesc::bold("Sans", 0.0),
            10.0,
            200.0,
            0.9,
            &ApproxMetrics,
        );

        let width = placement.font_size * 2.4;
        assert!(width <= 180.0, "width {width} exceeds fit budget");
        assert!(placement.font_size >= 10.0);
        assert!(placement.font_size <= 200.0);
        // Height budget is the binding constraint here: 1.2*s <= 45, so
        // the search should land just under 37.5.
        assert!(placement.font_size > 35.0);
    }

    #[test]
    fn returns_min_size_on_overflow() {
        let bbox = CellRect::new(0.0, 0.0, 10.0, 10.0);
        let placement = fit_label(
            "SEPTEMBER",
            bbox,
            &FontDesc::bold("Sans", 0.0),
            6.0,
            40.0,
            0.9,
            &ApproxMetrics,
        );
        assert_eq!(placement.font_size, 6.0);
    }

    #[test]
    fn measure_calls_stay_within_cap() {
        let metrics = CountingMetrics {
            calls: Cell::new(0),
        };
        let bbox = CellRect::new(0.0, 0.0, 200.0, 50.0);
        fit_label(
            "2024",
            bbox,
            &FontDesc::bold("Sans", 0.0),
            0.01,
            10_000.0,
            0.9,
            &metrics,
        );
        // Probe calls plus one bounded bisection plus the final placement
        // measurement.
        assert!(metrics.calls.get() <= MAX_FIT_ITERATIONS + 3);
    }

    #[test]
    fn placement_is_centered_inside_box() {
        let bbox = CellRect::new(100.0, 200.0, 200.0, 50.0);
        let placement = fit_label(
            "2024",
            bbox,
            &FontDesc::bold("Sans", 0.0),
            10.0,
            20.0,
            0.9,
            &ApproxMetrics,
        );
        assert!(bbox.contains(&placement.rect));
        let left_gap = placement.rect.x - bbox.x;
        let right_gap = (bbox.x + bbox.width) - (placement.rect.x + placement.rect.width);
        assert!((left_gap - right_gap).abs() < 0.01);
    }

    #[test]
    fn runs_share_top_padding_and_right_align() {
        let cell = CellRect::new(0.0, 0.0, 100.0, 40.0);
        let font = FontDesc::regular("Sans", 4.0);
        let bold = FontDesc::bold("Sans", 4.0);
        let (weekday, day) =
            align_runs_right(("MON", &font), ("15", &bold), cell, 2.0, 1.0, &ApproxMetrics);

        assert_eq!(weekday.rect.y, day.rect.y);
        assert_eq!(
            day.rect.x,
            weekday.rect.x + weekday.rect.width + 1.0
        );
        // Right edge of the second run sits `padding` from the cell edge.
        assert!((day.rect.x + day.rect.width - (cell.width - 2.0)).abs() < 0.01);
    }
}
