//! Render backend trait for pluggable rendering implementations.
//!
//! The engine never draws: it produces an ordered [`DrawInstruction`]
//! list, and a [`RenderBackend`] (PDF, SVG, raster, test recorder)
//! consumes it. Output format is entirely the backend's concern.

use serde::Serialize;

use crate::error::Result;
use crate::layout::CellRect;
use crate::metrics::FontDesc;

/// RGB color with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
}

/// One drawing operation, in paint order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum DrawInstruction {
    /// Fill and/or stroke an axis-aligned rectangle.
    #[serde(rename_all = "camelCase")]
    Rect {
        rect: CellRect,
        fill: Option<Color>,
        stroke: Option<Color>,
        stroke_width: f32,
    },
    /// A straight line segment (month-flag pole).
    #[serde(rename_all = "camelCase")]
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        color: Color,
        width: f32,
    },
    /// A single text run anchored at its top-left ink position.
    #[serde(rename_all = "camelCase")]
    Text {
        text: String,
        x: f32,
        y: f32,
        font: FontDesc,
        color: Color,
    },
}

/// Trait for render backends.
///
/// Implementations handle the actual drawing for different output
/// technologies; the instruction list they receive is already fully
/// resolved to absolute page coordinates.
pub trait RenderBackend {
    /// Prepare a surface of the given page size (points).
    fn begin_page(&mut self, width: f32, height: f32) -> Result<()>;

    /// Execute the instructions in order.
    fn render(&mut self, instructions: &[DrawInstruction]) -> Result<()>;

    /// Flush and finish the page.
    fn finish(&mut self) -> Result<()>;
}

/// Recording backend: keeps the instructions it was asked to draw.
///
/// Used by tests and by the CLI's JSON dump.
#[derive(Debug, Default)]
pub struct InstructionLog {
    pub page: Option<(f32, f32)>,
    pub instructions: Vec<DrawInstruction>,
    pub finished: bool,
}

impl RenderBackend for InstructionLog {
    fn begin_page(&mut self, width: f32, height: f32) -> Result<()> {
        self.page = Some((width, height));
        Ok(())
    }

    fn render(&mut self, instructions: &[DrawInstruction]) -> Result<()> {
        self.instructions.extend_from_slice(instructions);
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.finished = true;
        Ok(())
    }
}
