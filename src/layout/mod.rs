//! Grid placement: geometry, date-to-cell mapping, label fitting.
//!
//! This module handles:
//! - Computing row count and per-cell rectangles for a fixed-column grid
//! - Assigning cell indices to dates with alignment-preserving padding
//! - Fitting label text into constrained boxes via bounded size search

mod grid;
mod labels;
mod mapper;

pub use grid::{CellRect, GridSpec};
pub use labels::{align_runs_right, fit_label, LabelPlacement};
pub use mapper::{map_dates, CellAssignment, DateGridMap, PaddingBlock};
