//! Per-run layout configuration.
//!
//! One immutable structure passed into the engine's entry point — a
//! single source of truth per run, replacing any process-wide state. The
//! engine reads it; it never touches the environment or the filesystem.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;

use crate::error::{CalgridError, Result};
use crate::render::Color;

/// Points per millimeter (1 pt = 1/72 inch).
pub const MM: f32 = 72.0 / 25.4;
/// Points per centimeter.
pub const CM: f32 = MM * 10.0;
/// Points per inch.
pub const INCH: f32 = 72.0;

/// Supported paper formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PaperSize {
    A5,
    A4,
    A3,
    A2,
    A1,
    A0,
    UsLetter,
    UsTabloid,
    UsLedger,
}

impl PaperSize {
    /// Portrait dimensions in points (width, height).
    pub fn dimensions(self) -> (f32, f32) {
        match self {
            PaperSize::A5 => (14.8 * CM, 21.0 * CM),
            PaperSize::A4 => (21.0 * CM, 29.7 * CM),
            PaperSize::A3 => (29.7 * CM, 42.0 * CM),
            PaperSize::A2 => (42.0 * CM, 59.4 * CM),
            PaperSize::A1 => (59.4 * CM, 84.1 * CM),
            PaperSize::A0 => (84.1 * CM, 118.9 * CM),
            PaperSize::UsLetter => (8.5 * INCH, 11.0 * INCH),
            PaperSize::UsTabloid | PaperSize::UsLedger => (11.0 * INCH, 17.0 * INCH),
        }
    }

    /// Parse a paper name as written on the command line (`A4`,
    /// `USLetter`, ...).
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_uppercase().as_str() {
            "A5" => Some(PaperSize::A5),
            "A4" => Some(PaperSize::A4),
            "A3" => Some(PaperSize::A3),
            "A2" => Some(PaperSize::A2),
            "A1" => Some(PaperSize::A1),
            "A0" => Some(PaperSize::A0),
            "USLETTER" => Some(PaperSize::UsLetter),
            "USTABLOID" => Some(PaperSize::UsTabloid),
            "USLEDGER" => Some(PaperSize::UsLedger),
            _ => None,
        }
    }
}

/// Page orientation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum Orientation {
    Portrait,
    #[default]
    Landscape,
}

/// Final page dimensions in points, orientation applied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PageDimensions {
    pub width: f32,
    pub height: f32,
}

impl PageDimensions {
    /// Page of the given paper format and orientation.
    pub fn of(paper: PaperSize, orientation: Orientation) -> Self {
        let (w, h) = paper.dimensions();
        match orientation {
            Orientation::Portrait => Self {
                width: w,
                height: h,
            },
            Orientation::Landscape => Self {
                width: h,
                height: w,
            },
        }
    }
}

/// Visual policy for one run: colors, line widths, font sizes.
///
/// Defaults match the continuous-grid layout's look: light weekend fill,
/// thin gray borders, dark flags, small day text.
#[derive(Debug, Clone, PartialEq)]
pub struct StylePolicy {
    /// Weekend cell background.
    pub weekend_fill: Color,
    /// Cell border color.
    pub border_color: Color,
    /// Cell border width in points.
    pub border_width: f32,
    /// Month flag background and pole color.
    pub flag_color: Color,
    /// Flag pole width in points.
    pub flag_pole_width: f32,
    /// Day numbers.
    pub text_primary: Color,
    /// Weekday abbreviations.
    pub text_secondary: Color,
    /// Year labels in padding blocks.
    pub text_muted: Color,
    /// Text on flag backgrounds.
    pub text_light: Color,
    /// Per-day text size in points (fixed, no fitting).
    pub day_text_size: f32,
    /// Month flag text size in points (fixed, no fitting).
    pub month_label_size: f32,
    /// Year label size search bounds in points.
    pub year_label_min_size: f32,
    pub year_label_max_size: f32,
    /// Width/height safety factor for the font-fit search.
    pub fit_factor: f32,
}

impl Default for StylePolicy {
    fn default() -> Self {
        Self {
            weekend_fill: Color::rgb(0.92, 0.92, 0.92),
            border_color: Color::rgb(0.7, 0.7, 0.7),
            border_width: 0.2 * MM,
            flag_color: Color::rgb(0.3, 0.3, 0.3),
            flag_pole_width: 0.5 * MM,
            text_primary: Color::rgb(0.1, 0.1, 0.1),
            text_secondary: Color::rgb(0.4, 0.4, 0.4),
            text_muted: Color::rgb(0.2, 0.2, 0.2),
            text_light: Color::WHITE,
            day_text_size: 4.0,
            month_label_size: 4.0,
            year_label_min_size: 6.0,
            year_label_max_size: 60.0,
            fit_factor: 0.9,
        }
    }
}

/// Locale-dependent label strings, supplied as plain values.
///
/// Defaults are the uppercased English abbreviations; callers with a
/// localized backend substitute their own tables.
#[derive(Debug, Clone, PartialEq)]
pub struct LocaleLabels {
    /// Monday-first weekday abbreviations.
    pub weekdays: [String; 7],
    /// January-first month abbreviations.
    pub months: [String; 12],
}

impl Default for LocaleLabels {
    fn default() -> Self {
        Self {
            weekdays: [
                "MON", "TUE", "WED", "THU", "FRI", "SAT", "SUN",
            ]
            .map(str::to_string),
            months: [
                "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV",
                "DEC",
            ]
            .map(str::to_string),
        }
    }
}

impl LocaleLabels {
    /// Abbreviation for the weekday of `date`.
    pub fn weekday(&self, date: NaiveDate) -> &str {
        let index = date.weekday().num_days_from_monday() as usize;
        self.weekdays.get(index).map_or("", String::as_str)
    }

    /// Abbreviation for the month of `date`.
    pub fn month(&self, date: NaiveDate) -> &str {
        let index = date.month0() as usize;
        self.months.get(index).map_or("", String::as_str)
    }
}

/// Everything one layout run needs, immutable.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    /// Page size with orientation already applied.
    pub page: PageDimensions,
    /// Printer safety margin in points, applied on all four sides.
    pub margin: f32,
    /// Cells per grid row.
    pub columns: usize,
    /// Weekday anchoring column 0 of each row.
    pub week_start: Weekday,
    /// Insert one-week padding blocks at year transitions.
    pub align_years: bool,
    /// Font family for every text run.
    pub font_family: String,
    /// Visual policy.
    pub style: StylePolicy,
    /// Label strings.
    pub labels: LocaleLabels,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            page: PageDimensions::of(PaperSize::A4, Orientation::Landscape),
            margin: 5.0 * MM,
            columns: 21,
            week_start: Weekday::Mon,
            align_years: true,
            font_family: "Sans".to_string(),
            style: StylePolicy::default(),
            labels: LocaleLabels::default(),
        }
    }
}

impl LayoutConfig {
    /// Grid width after margins.
    pub fn available_width(&self) -> f32 {
        self.page.width - 2.0 * self.margin
    }

    /// Grid height after margins.
    pub fn available_height(&self) -> f32 {
        self.page.height - 2.0 * self.margin
    }

    /// Check values the grid computation cannot see itself.
    ///
    /// # Errors
    /// Returns [`CalgridError::Config`] for a margin that consumes the
    /// whole page or an empty font family.
    pub fn validate(&self) -> Result<()> {
        if !(self.available_width() > 0.0 && self.available_height() > 0.0) {
            return Err(CalgridError::Config(format!(
                "margin {} pt leaves no drawable area on a {} x {} pt page",
                self.margin, self.page.width, self.page.height
            )));
        }
        if self.font_family.is_empty() {
            return Err(CalgridError::Config("font family is empty".to_string()));
        }
        Ok(())
    }
}
