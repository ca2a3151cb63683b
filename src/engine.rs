//! Layout engine: composes mapping, geometry, and label fitting into an
//! ordered draw-instruction list.
//!
//! A run walks fixed stages — map dates, compute the grid, place cells,
//! resolve labels, emit instructions — each a pure function over the
//! previous stage's output. Any hard error aborts the whole run before
//! emission begins, so no partial instruction list is ever produced, and
//! retrying with identical inputs would only reproduce it. The finalized
//! [`LayoutRun`] is immutable; a new run starts from a new engine value.

use chrono::{Datelike, NaiveDate};

use crate::config::LayoutConfig;
use crate::date_range::DateRange;
use crate::error::Result;
use crate::layout::{
    align_runs_right, fit_label, map_dates, CellAssignment, CellRect, DateGridMap, GridSpec,
    LabelPlacement, PaddingBlock,
};
use crate::metrics::{FontDesc, FontMetrics};
use crate::render::{DrawInstruction, RenderBackend};

/// A cell with its absolute page rectangle resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedCell {
    pub assignment: CellAssignment,
    pub rect: CellRect,
}

/// Finalized output of one layout run. Immutable, read-only handoff.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutRun {
    /// Page size the run was computed for (points).
    pub page_width: f32,
    pub page_height: f32,
    /// Grid geometry.
    pub grid: GridSpec,
    /// Every cell, dated and padding, with absolute rectangles.
    pub cells: Vec<PlacedCell>,
    /// Alignment padding blocks, leading block first.
    pub padding_blocks: Vec<PaddingBlock>,
    /// Fitted year labels, one per non-empty padding block.
    pub year_labels: Vec<LabelPlacement>,
    /// Ordered draw instructions for the render backend.
    pub instructions: Vec<DrawInstruction>,
}

impl LayoutRun {
    /// Hand the finished run to a backend: one page, all instructions.
    ///
    /// # Errors
    /// Propagates backend errors unchanged.
    pub fn render_to<B: RenderBackend>(&self, backend: &mut B) -> Result<()> {
        backend.begin_page(self.page_width, self.page_height)?;
        backend.render(&self.instructions)?;
        backend.finish()
    }
}

/// One-shot layout engine bound to a configuration and a metrics
/// provider. Consumed by [`LayoutEngine::layout`].
pub struct LayoutEngine<'a, M: FontMetrics> {
    config: &'a LayoutConfig,
    metrics: &'a M,
}

impl<'a, M: FontMetrics> LayoutEngine<'a, M> {
    pub fn new(config: &'a LayoutConfig, metrics: &'a M) -> Self {
        Self { config, metrics }
    }

    /// Compute the full layout for `range`.
    ///
    /// # Errors
    /// Returns [`crate::CalgridError::InvalidGrid`] or
    /// [`crate::CalgridError::Config`] before any cell is placed; range
    /// validity is already guaranteed by [`DateRange`].
    pub fn layout(self, range: DateRange) -> Result<LayoutRun> {
        self.config.validate()?;

        log::info!(
            "laying out {} .. {} ({} days)",
            range.start(),
            range.end(),
            range.num_days()
        );

        let map = map_dates(
            range,
            self.config.columns,
            self.config.week_start,
            self.config.align_years,
        )?;
        let grid = GridSpec::compute(
            map.total_cells,
            self.config.columns,
            self.config.available_width(),
            self.config.available_height(),
        )?;

        let cells = self.place_cells(&grid, &map);
        let year_labels = self.resolve_year_labels(&grid, &map);
        let instructions = self.emit(&cells, &year_labels);

        log::info!(
            "finished layout: {} cells in {} rows, {} instructions",
            grid.total_cells(),
            grid.rows(),
            instructions.len()
        );

        Ok(LayoutRun {
            page_width: self.config.page.width,
            page_height: self.config.page.height,
            grid,
            cells,
            padding_blocks: map.padding_blocks,
            year_labels,
            instructions,
        })
    }

    /// Resolve every assignment to an absolute page rectangle
    /// (grid-relative rectangle shifted by the safety margin).
    fn place_cells(&self, grid: &GridSpec, map: &DateGridMap) -> Vec<PlacedCell> {
        map.assignments
            .iter()
            .map(|assignment| {
                let rect = grid.cell_rect(assignment.cell_index);
                PlacedCell {
                    assignment: assignment.clone(),
                    rect: CellRect::new(
                        self.config.margin + rect.x,
                        self.config.margin + rect.y,
                        rect.width,
                        rect.height,
                    ),
                }
            })
            .collect()
    }

    /// Fit a year label into the first-row span of each non-empty
    /// padding block.
    fn resolve_year_labels(&self, grid: &GridSpec, map: &DateGridMap) -> Vec<LabelPlacement> {
        let style = &self.config.style;
        let font = FontDesc::bold(&self.config.font_family, style.year_label_max_size);
        map.padding_blocks
            .iter()
            .filter(|block| block.cell_count > 0)
            .map(|block| {
                let bbox = self.block_bbox(grid, block);
                fit_label(
                    &block.label,
                    bbox,
                    &font,
                    style.year_label_min_size,
                    style.year_label_max_size,
                    style.fit_factor,
                    self.metrics,
                )
            })
            .collect()
    }

    /// Bounding box of the run of block cells that share the block's
    /// starting row. A block may wrap to the next row; the label only
    /// spans the first segment so its rectangle stays inside cells the
    /// block actually reserves.
    fn block_bbox(&self, grid: &GridSpec, block: &PaddingBlock) -> CellRect {
        let row_end = (block.start_cell_index / grid.columns() + 1) * grid.columns();
        let segment_end = (block.start_cell_index + block.cell_count).min(row_end);
        let segment_len = segment_end - block.start_cell_index;

        let first = grid.cell_rect(block.start_cell_index);
        CellRect::new(
            self.config.margin + first.x,
            self.config.margin + first.y,
            first.width * segment_len as f32,
            first.height,
        )
    }

    /// Emit draw instructions in paint order: weekend fill, border, and
    /// per-day text for each dated cell (month flag on month starts),
    /// then the fitted year labels.
    fn emit(&self, cells: &[PlacedCell], year_labels: &[LabelPlacement]) -> Vec<DrawInstruction> {
        let style = &self.config.style;
        let mut instructions = Vec::with_capacity(cells.len() * 4 + year_labels.len());

        for cell in cells {
            let Some(date) = cell.assignment.date else {
                continue;
            };

            if cell.assignment.is_weekend {
                instructions.push(DrawInstruction::Rect {
                    rect: cell.rect,
                    fill: Some(style.weekend_fill),
                    stroke: None,
                    stroke_width: 0.0,
                });
            }

            instructions.push(DrawInstruction::Rect {
                rect: cell.rect,
                fill: None,
                stroke: Some(style.border_color),
                stroke_width: style.border_width,
            });

            self.emit_day_text(&mut instructions, cell.rect, date);

            if cell.assignment.is_month_start {
                self.emit_month_flag(&mut instructions, cell.rect, date);
            }
        }

        let year_font_family = &self.config.font_family;
        for label in year_labels {
            instructions.push(DrawInstruction::Text {
                text: label.text.clone(),
                x: label.rect.x,
                y: label.rect.y,
                font: FontDesc::bold(year_font_family, label.font_size),
                color: style.text_muted,
            });
        }

        instructions
    }

    /// Weekday abbreviation and bold day number in the top-right corner,
    /// right-aligned on a shared top padding.
    fn emit_day_text(
        &self,
        instructions: &mut Vec<DrawInstruction>,
        rect: CellRect,
        date: NaiveDate,
    ) {
        let style = &self.config.style;
        let size = style.day_text_size;
        let padding = size * 0.5;
        let gap = padding * 0.5;

        let weekday_font = FontDesc::regular(&self.config.font_family, size);
        let day_font = FontDesc::bold(&self.config.font_family, size);
        let weekday_str = self.config.labels.weekday(date);
        let day_str = date.day().to_string();

        let (weekday, day) = align_runs_right(
            (weekday_str, &weekday_font),
            (&day_str, &day_font),
            rect,
            padding,
            gap,
            self.metrics,
        );

        instructions.push(DrawInstruction::Text {
            text: weekday.text,
            x: weekday.rect.x,
            y: weekday.rect.y,
            font: weekday_font,
            color: style.text_secondary,
        });
        instructions.push(DrawInstruction::Text {
            text: day.text,
            x: day.rect.x,
            y: day.rect.y,
            font: day_font,
            color: style.text_primary,
        });
    }

    /// Month flag at the cell's top-left: a pole down the left edge, a
    /// filled flag sized from the measured abbreviation, light text. The
    /// flag text shares the day text's top padding so both runs sit on
    /// the same visual baseline.
    fn emit_month_flag(
        &self,
        instructions: &mut Vec<DrawInstruction>,
        rect: CellRect,
        date: NaiveDate,
    ) {
        let style = &self.config.style;
        let size = style.month_label_size;
        let font = FontDesc::bold(&self.config.font_family, size);
        let month_str = self.config.labels.month(date);
        let extent = self.metrics.measure(month_str, &font);

        let padding_x = size * 0.4;
        let padding_y = size * 0.2;
        let text_padding = style.day_text_size * 0.5;
        let flag_y = text_padding - padding_y;
        let pole_inset = style.border_width / 2.0;

        instructions.push(DrawInstruction::Line {
            x1: rect.x,
            y1: rect.y + pole_inset,
            x2: rect.x,
            y2: rect.y + rect.height - pole_inset,
            color: style.flag_color,
            width: style.flag_pole_width,
        });

        instructions.push(DrawInstruction::Rect {
            rect: CellRect::new(
                rect.x,
                rect.y + pole_inset,
                extent.width + 2.0 * padding_x,
                extent.height + 2.0 * padding_y + flag_y - pole_inset,
            ),
            fill: Some(style.flag_color),
            stroke: None,
            stroke_width: 0.0,
        });

        instructions.push(DrawInstruction::Text {
            text: month_str.to_string(),
            x: rect.x + padding_x,
            y: rect.y + flag_y + padding_y,
            font,
            color: style.text_light,
        });
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp, clippy::indexing_slicing, clippy::panic)]
mod tests {
    use super::*;
    use crate::metrics::ApproxMetrics;

    fn d(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn run_for(range: DateRange) -> LayoutRun {
        let config = LayoutConfig::default();
        let metrics = ApproxMetrics;
        LayoutEngine::new(&config, &metrics).layout(range).unwrap()
    }

    #[test]
    fn cells_are_offset_by_margin() {
        let run = run_for(DateRange::new(d(2024, 1, 1), d(2024, 1, 31)).unwrap());
        let config = LayoutConfig::default();
        let first = &run.cells[0];
        assert_eq!(first.rect.x, config.margin);
        assert_eq!(first.rect.y, config.margin);
    }

    #[test]
    fn one_border_per_dated_cell() {
        let range = DateRange::new(d(2024, 1, 1), d(2024, 1, 31)).unwrap();
        let run = run_for(range);
        let borders = run
            .instructions
            .iter()
            .filter(|inst| {
                matches!(
                    inst,
                    DrawInstruction::Rect {
                        stroke: Some(_),
                        ..
                    }
                )
            })
            .count();
        assert_eq!(borders, 31);
    }

    #[test]
    fn year_label_per_nonempty_block() {
        // Feb 1, 2024 is a Thursday: leading block is non-empty.
        let run = run_for(DateRange::new(d(2024, 2, 1), d(2025, 1, 31)).unwrap());
        assert_eq!(run.year_labels.len(), 2);
        assert_eq!(run.year_labels[0].text, "2024");
        assert_eq!(run.year_labels[1].text, "2025");
    }

    #[test]
    fn invalid_config_aborts_without_output() {
        let config = LayoutConfig {
            columns: 0,
            ..LayoutConfig::default()
        };
        let metrics = ApproxMetrics;
        let range = DateRange::new(d(2024, 1, 1), d(2024, 1, 31)).unwrap();
        let result = LayoutEngine::new(&config, &metrics).layout(range);
        assert!(result.is_err());
    }
}
