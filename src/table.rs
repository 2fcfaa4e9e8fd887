//! Windowed row selection for the data table.

use crate::data_types::DataPoint;
use crate::utils::date_formatter::format_time;

pub const ROW_HEIGHT: f32 = 35.0;
pub const VISIBLE_ROWS: usize = 20;

/// The slice of rows to materialise for a scroll position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TableWindow {
    pub start: usize,
    pub end: usize,
    /// Vertical offset of the first materialised row.
    pub offset_y: f32,
    /// Height of the full, unvirtualised table.
    pub total_height: f32,
}

impl TableWindow {
    pub fn compute(row_count: usize, scroll_top: f32) -> Self {
        let start = if scroll_top.is_finite() && scroll_top > 0.0 {
            ((scroll_top / ROW_HEIGHT).floor() as usize).min(row_count)
        } else {
            0
        };
        let end = (start + VISIBLE_ROWS).min(row_count);
        Self {
            start,
            end,
            offset_y: start as f32 * ROW_HEIGHT,
            total_height: row_count as f32 * ROW_HEIGHT,
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// One formatted table row.
#[derive(Clone, Debug, PartialEq)]
pub struct TableRow {
    pub index: usize,
    pub time: String,
    pub value: String,
    pub category: &'static str,
}

impl TableRow {
    pub fn from_point(index: usize, point: &DataPoint) -> Self {
        Self {
            index,
            time: format_time(point.timestamp),
            value: format!("{:.2}", point.value),
            category: point.category.as_str(),
        }
    }
}

/// Scroll state of a virtualised table.
#[derive(Clone, Debug, Default)]
pub struct VirtualTable {
    scroll_top: f32,
}

impl VirtualTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scroll_top(&self) -> f32 {
        self.scroll_top
    }

    /// Scrolls by `delta` pixels, clamped to the content.
    pub fn scroll_by(&mut self, delta: f32, row_count: usize) {
        let max = (row_count.saturating_sub(VISIBLE_ROWS)) as f32 * ROW_HEIGHT;
        self.scroll_top = (self.scroll_top + delta).clamp(0.0, max.max(0.0));
    }

    pub fn window(&self, row_count: usize) -> TableWindow {
        TableWindow::compute(row_count, self.scroll_top)
    }

    pub fn visible_rows(&self, rows: &[DataPoint]) -> Vec<TableRow> {
        let window = self.window(rows.len());
        rows[window.start..window.end]
            .iter()
            .enumerate()
            .map(|(i, p)| TableRow::from_point(window.start + i, p))
            .collect()
    }
}
