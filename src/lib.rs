//! calgrid - continuous date-grid layout engine
//!
//! Lays an inclusive date range onto a fixed-column page grid, one cell
//! per day, preserving weekday alignment across month and year
//! boundaries:
//! - Leading padding shifts the first day into its weekday column
//! - A one-week reserved block before each new year keeps columns
//!   aligned; the block carries a fitted year label
//! - Output is an ordered draw-instruction list consumed by any
//!   [`render::RenderBackend`]
//!
//! # Usage
//!
//! ```
//! use calgrid::config::LayoutConfig;
//! use calgrid::date_range::DateRange;
//! use calgrid::engine::LayoutEngine;
//! use calgrid::metrics::ApproxMetrics;
//!
//! # fn main() -> calgrid::Result<()> {
//! let range = DateRange::full_year(2024)?;
//! let config = LayoutConfig::default();
//! let metrics = ApproxMetrics;
//! let run = LayoutEngine::new(&config, &metrics).layout(range)?;
//! assert!(!run.instructions.is_empty());
//! # Ok(())
//! # }
//! ```

// Model modules
pub mod config;
pub mod date_range;
pub mod error;
pub mod metrics;

// Layout and output modules
pub mod engine;
pub mod layout;
pub mod render;

// Re-export the main entry points
pub use engine::{LayoutEngine, LayoutRun, PlacedCell};
pub use error::{CalgridError, Result};

/// Get the library version
#[must_use]
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
