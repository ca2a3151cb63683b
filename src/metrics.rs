//! Text measurement boundary.
//!
//! The engine never shapes text itself; it asks a [`FontMetrics`]
//! implementation for the pixel extent of a string at a given font and
//! treats the answer as an opaque, deterministic query. Shaping backends
//! (Pango, HarfBuzz, canvas `measureText`) plug in behind this trait.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;

/// Font weight for a text run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

/// A font request: family, weight, and size in points.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct FontDesc {
    pub family: String,
    pub weight: FontWeight,
    pub size: f32,
}

impl FontDesc {
    /// Regular-weight font of the given family and size.
    pub fn regular(family: &str, size: f32) -> Self {
        Self {
            family: family.to_string(),
            weight: FontWeight::Normal,
            size,
        }
    }

    /// Bold font of the given family and size.
    pub fn bold(family: &str, size: f32) -> Self {
        Self {
            family: family.to_string(),
            weight: FontWeight::Bold,
            size,
        }
    }

    /// Same font at a different size.
    pub fn with_size(&self, size: f32) -> Self {
        Self {
            family: self.family.clone(),
            weight: self.weight,
            size,
        }
    }
}

impl fmt::Display for FontDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.weight {
            FontWeight::Normal => write!(f, "{} {}", self.family, self.size),
            FontWeight::Bold => write!(f, "{} bold {}", self.family, self.size),
        }
    }
}

/// Measured extent of a shaped text run.
///
/// `x_bearing`/`y_bearing` are the ink-origin offsets: the distance from
/// the nominal draw position to the visual glyph box. Centering math uses
/// them so the ink, not the nominal box, ends up centered. Backends
/// without bearing information leave them at zero.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextExtent {
    pub width: f32,
    pub height: f32,
    pub x_bearing: f32,
    pub y_bearing: f32,
}

impl TextExtent {
    /// Extent with zero bearings.
    pub fn sized(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            x_bearing: 0.0,
            y_bearing: 0.0,
        }
    }
}

/// Trait for text measurement providers.
///
/// Implementations must be deterministic for a fixed backend and locale:
/// the same (text, font) pair always measures the same.
pub trait FontMetrics {
    /// Measure `text` when shaped with `font`.
    fn measure(&self, text: &str, font: &FontDesc) -> TextExtent;
}

/// Memoizing wrapper around any [`FontMetrics`].
///
/// The same short strings (weekday abbreviations, three-letter months)
/// recur hundreds of times per layout run; caching by (text, font string)
/// avoids re-shaping them. Purely a performance optimization.
pub struct MemoizedMetrics<M> {
    inner: M,
    cache: RefCell<HashMap<(String, String), TextExtent>>,
}

impl<M: FontMetrics> MemoizedMetrics<M> {
    pub fn new(inner: M) -> Self {
        Self {
            inner,
            cache: RefCell::new(HashMap::new()),
        }
    }

    /// Number of distinct (text, font) pairs measured so far.
    pub fn cached_entries(&self) -> usize {
        self.cache.borrow().len()
    }
}

impl<M: FontMetrics> FontMetrics for MemoizedMetrics<M> {
    fn measure(&self, text: &str, font: &FontDesc) -> TextExtent {
        let key = (text.to_string(), font.to_string());
        if let Some(extent) = self.cache.borrow().get(&key) {
            return *extent;
        }
        let extent = self.inner.measure(text, font);
        self.cache.borrow_mut().insert(key, extent);
        extent
    }
}

/// Deterministic proportional metrics: every character advances
/// `size * 0.6`, line height is `size * 1.2`.
///
/// Good enough for instruction-list generation when no shaping backend is
/// attached (CLI dumps, tests); real output should plug in a shaping
/// implementation instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApproxMetrics;

impl FontMetrics for ApproxMetrics {
    fn measure(&self, text: &str, font: &FontDesc) -> TextExtent {
        let chars = text.chars().count() as f32;
        TextExtent::sized(chars * font.size * 0.6, font.size * 1.2)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn font_desc_display() {
        assert_eq!(FontDesc::regular("Sans", 4.0).to_string(), "Sans 4");
        assert_eq!(FontDesc::bold("Sans", 4.5).to_string(), "Sans bold 4.5");
    }

    #[test]
    fn approx_metrics_proportional() {
        let extent = ApproxMetrics.measure("2024", &FontDesc::regular("Sans", 10.0));
        assert_eq!(extent.width, 24.0);
        assert_eq!(extent.height, 12.0);
    }

    #[test]
    fn memoized_metrics_caches_by_text_and_font() {
        let metrics = MemoizedMetrics::new(ApproxMetrics);
        let font = FontDesc::regular("Sans", 8.0);

        let first = metrics.measure("MON", &font);
        let second = metrics.measure("MON", &font);
        assert_eq!(first, second);
        assert_eq!(metrics.cached_entries(), 1);

        metrics.measure("MON", &FontDesc::bold("Sans", 8.0));
        assert_eq!(metrics.cached_entries(), 2);
    }
}
