//! Date-to-cell mapping.
//!
//! Assigns a linear row-major cell index to every day of a range,
//! inserting dateless padding cells so weekday columns stay aligned:
//! a leading run that shifts the first day into its proper column, and a
//! one-week block before each in-range January 1 when year alignment is
//! requested. The block is exactly one week because a week is the grid's
//! periodicity — any other length would shift alignment again at the next
//! row boundary.

use chrono::{Datelike, NaiveDate, Weekday};

use crate::date_range::{is_weekend, weekday_offset, DateRange};
use crate::error::Result;

/// One grid cell: either a calendar day or reserved padding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellAssignment {
    /// Linear row-major cell index (0-based).
    pub cell_index: usize,
    /// The day this cell carries; `None` for padding cells.
    pub date: Option<NaiveDate>,
    /// True on the first day of a month.
    pub is_month_start: bool,
    /// True on ISO weekdays 6 and 7.
    pub is_weekend: bool,
}

impl CellAssignment {
    fn padding(cell_index: usize) -> Self {
        Self {
            cell_index,
            date: None,
            is_month_start: false,
            is_weekend: false,
        }
    }

    fn day(cell_index: usize, date: NaiveDate) -> Self {
        Self {
            cell_index,
            date: Some(date),
            is_month_start: date.day() == 1,
            is_weekend: is_weekend(date),
        }
    }
}

/// A reserved run of dateless cells carrying a year label.
///
/// Zero-length blocks are recorded but draw no label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaddingBlock {
    /// Index of the first reserved cell.
    pub start_cell_index: usize,
    /// Number of reserved cells (may be 0).
    pub cell_count: usize,
    /// Year number shown inside the block.
    pub label: String,
}

/// Result of a mapping run: one assignment per cell, the padding blocks,
/// and the total cell count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateGridMap {
    pub assignments: Vec<CellAssignment>,
    pub padding_blocks: Vec<PaddingBlock>,
    pub total_cells: usize,
}

impl DateGridMap {
    /// Reconstruct the date carried by `cell_index` from the padding
    /// blocks alone, without consulting the assignment list. `None` for
    /// padding cells and out-of-range indices.
    pub fn date_at(&self, cell_index: usize, start: NaiveDate) -> Option<NaiveDate> {
        if cell_index >= self.total_cells {
            return None;
        }
        let mut reserved_before = 0usize;
        for block in &self.padding_blocks {
            let block_end = block.start_cell_index + block.cell_count;
            if cell_index >= block.start_cell_index && cell_index < block_end {
                return None;
            }
            if cell_index >= block_end {
                reserved_before += block.cell_count;
            }
        }
        let day_offset = cell_index - reserved_before;
        start.checked_add_days(chrono::Days::new(day_offset as u64))
    }
}

/// Map every day of `range` to a cell index.
///
/// Weekday alignment (leading padding and mid-year blocks) applies only
/// when `columns` is a whole number of weeks; a 25-column grid has no
/// weekday periodicity, so its days simply flow from index 0.
///
/// Pure and deterministic: identical inputs produce identical maps.
///
/// # Errors
/// Range validity (`end >= start`) is enforced by [`DateRange`]
/// construction; this function itself does not fail on any valid range.
pub fn map_dates(
    range: DateRange,
    columns: usize,
    week_start: Weekday,
    align_years: bool,
) -> Result<DateGridMap> {
    let aligned = columns != 0 && columns % 7 == 0;
    let leading = if aligned {
        weekday_offset(range.start(), week_start)
    } else {
        0
    };

    let mut assignments = Vec::with_capacity(leading + range.num_days() + 7);
    let mut padding_blocks = Vec::new();

    for index in 0..leading {
        assignments.push(CellAssignment::padding(index));
    }
    padding_blocks.push(PaddingBlock {
        start_cell_index: 0,
        cell_count: leading,
        label: range.start().year().to_string(),
    });

    let mut next_index = leading;
    for day in range.iter_days() {
        // One-week reserved run right before each new year keeps weekday
        // columns vertically aligned across the transition.
        if aligned && align_years && day.month() == 1 && day.day() == 1 && day != range.start() {
            padding_blocks.push(PaddingBlock {
                start_cell_index: next_index,
                cell_count: 7,
                label: day.year().to_string(),
            });
            for _ in 0..7 {
                assignments.push(CellAssignment::padding(next_index));
                next_index += 1;
            }
        }
        assignments.push(CellAssignment::day(next_index, day));
        next_index += 1;
    }

    log::debug!(
        "mapped {} days onto {} cells ({} leading padding, {} blocks)",
        range.num_days(),
        next_index,
        leading,
        padding_blocks.len()
    );

    Ok(DateGridMap {
        assignments,
        padding_blocks,
        total_cells: next_index,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing, clippy::panic)]
mod tests {
    use super::*;

    fn d(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn january_2024_monday_grid() {
        // Jan 1, 2024 is a Monday: no leading padding.
        let range = DateRange::new(d(2024, 1, 1), d(2024, 1, 31)).unwrap();
        let map = map_dates(range, 7, Weekday::Mon, true).unwrap();

        assert_eq!(map.total_cells, 31);
        assert_eq!(map.padding_blocks[0].cell_count, 0);
        assert_eq!(map.assignments.len(), 31);
        assert_eq!(map.assignments[0].date, Some(d(2024, 1, 1)));
    }

    #[test]
    fn leading_padding_shifts_first_day() {
        // Feb 1, 2024 is a Thursday: three padding cells before it.
        let range = DateRange::new(d(2024, 2, 1), d(2024, 2, 29)).unwrap();
        let map = map_dates(range, 7, Weekday::Mon, true).unwrap();

        assert_eq!(map.padding_blocks[0].cell_count, 3);
        assert_eq!(map.padding_blocks[0].label, "2024");
        assert_eq!(map.assignments[3].date, Some(d(2024, 2, 1)));
        assert_eq!(map.total_cells, 3 + 29);
    }

    #[test]
    fn mid_year_block_before_january_first() {
        let range = DateRange::new(d(2024, 4, 1), d(2025, 3, 31)).unwrap();
        let map = map_dates(range, 7, Weekday::Mon, true).unwrap();

        // Apr 1, 2024 is a Monday.
        let leading = map.padding_blocks[0].cell_count;
        assert_eq!(leading, 0);

        let mid = &map.padding_blocks[1];
        assert_eq!(mid.cell_count, 7);
        assert_eq!(mid.label, "2025");
        // 275 days from Apr 1 through Dec 31, 2024.
        assert_eq!(mid.start_cell_index, leading + 275);

        let jan_first = map
            .assignments
            .iter()
            .find(|a| a.date == Some(d(2025, 1, 1)))
            .unwrap();
        assert_eq!(jan_first.cell_index, mid.start_cell_index + 7);
    }

    #[test]
    fn no_mid_block_when_alignment_disabled() {
        let range = DateRange::new(d(2024, 4, 1), d(2025, 3, 31)).unwrap();
        let map = map_dates(range, 7, Weekday::Mon, false).unwrap();
        assert_eq!(map.padding_blocks.len(), 1);
        assert_eq!(map.total_cells, range.num_days());
    }

    #[test]
    fn unaligned_columns_flow_continuously() {
        let range = DateRange::new(d(2024, 4, 1), d(2025, 3, 31)).unwrap();
        let map = map_dates(range, 25, Weekday::Mon, true).unwrap();
        assert_eq!(map.padding_blocks.len(), 1);
        assert_eq!(map.padding_blocks[0].cell_count, 0);
        assert_eq!(map.total_cells, range.num_days());
    }

    #[test]
    fn indices_strictly_increase_with_dates() {
        let range = DateRange::new(d(2023, 11, 15), d(2024, 2, 15)).unwrap();
        let map = map_dates(range, 7, Weekday::Mon, true).unwrap();

        let dated: Vec<_> = map
            .assignments
            .iter()
            .filter(|a| a.date.is_some())
            .collect();
        assert_eq!(dated.len(), range.num_days());
        for pair in dated.windows(2) {
            assert!(pair[0].cell_index < pair[1].cell_index);
            assert!(pair[0].date < pair[1].date);
        }
    }

    #[test]
    fn date_reconstruction_round_trip() {
        let range = DateRange::new(d(2024, 4, 1), d(2025, 3, 31)).unwrap();
        let map = map_dates(range, 7, Weekday::Mon, true).unwrap();

        for assignment in &map.assignments {
            let rebuilt = map.date_at(assignment.cell_index, range.start());
            assert_eq!(rebuilt, assignment.date);
        }
        assert_eq!(map.date_at(map.total_cells, range.start()), None);
    }

    #[test]
    fn mapping_is_idempotent() {
        let range = DateRange::new(d(2024, 4, 1), d(2025, 3, 31)).unwrap();
        let first = map_dates(range, 7, Weekday::Mon, true).unwrap();
        let second = map_dates(range, 7, Weekday::Mon, true).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn month_start_and_weekend_flags() {
        let range = DateRange::new(d(2024, 1, 1), d(2024, 1, 31)).unwrap();
        let map = map_dates(range, 7, Weekday::Mon, true).unwrap();

        let starts: Vec<_> = map
            .assignments
            .iter()
            .filter(|a| a.is_month_start)
            .collect();
        assert_eq!(starts.len(), 1);
        assert_eq!(starts[0].date, Some(d(2024, 1, 1)));

        let weekends = map.assignments.iter().filter(|a| a.is_weekend).count();
        // January 2024 has four full weekends plus Sat/Sun twice more.
        assert_eq!(weekends, 8);
    }

    #[test]
    fn single_day_range_produces_one_assignment() {
        // Jun 15, 2024 is a Saturday: five cells after a Monday row start.
        let range = DateRange::new(d(2024, 6, 15), d(2024, 6, 15)).unwrap();
        let map = map_dates(range, 7, Weekday::Mon, true).unwrap();

        assert_eq!(map.padding_blocks[0].cell_count, 5);
        assert_eq!(map.total_cells, 6);
        let dated: Vec<_> = map
            .assignments
            .iter()
            .filter(|a| a.date.is_some())
            .collect();
        assert_eq!(dated.len(), 1);
    }

    #[test]
    fn multi_year_range_gets_block_per_transition() {
        let range = DateRange::new(d(2023, 12, 1), d(2026, 1, 31)).unwrap();
        let map = map_dates(range, 7, Weekday::Mon, true).unwrap();

        let labels: Vec<_> = map
            .padding_blocks
            .iter()
            .skip(1)
            .map(|b| b.label.as_str())
            .collect();
        assert_eq!(labels, vec!["2024", "2025", "2026"]);
        assert!(map.padding_blocks.iter().skip(1).all(|b| b.cell_count == 7));
    }
}
