//! Terminal UI components.
//!
//! This module contains all UI-related code including:
//! - [`viewport`]: Scroll state of the editing surface
//! - [`style`]: Colors for markdown source and preview HTML

pub mod style;
pub mod viewport;

mod overlays;
mod render;
mod status;

use ratatui::layout::{Constraint, Layout, Rect};

pub use render::{preview_line_count, render};

/// Screen areas, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Regions {
    pub toolbar: Rect,
    pub surface: Rect,
    /// Zero height when no toast is shown.
    pub toast: Rect,
    pub status: Rect,
}

/// Split `area` into toolbar, surface, toast and status rows.
///
/// The surface asks for at least `min_rows`; on a terminal too small for
/// that it gets whatever is left.
pub fn regions(area: Rect, min_rows: u16, toast: bool) -> Regions {
    let [toolbar, surface, toast, status] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(min_rows),
        Constraint::Length(u16::from(toast)),
        Constraint::Length(1),
    ])
    .areas(area);
    Regions {
        toolbar,
        surface,
        toast,
        status,
    }
}

/// Columns taken by the line number gutter, separator included.
pub const fn gutter_width(total_lines: usize) -> u16 {
    let digits = if total_lines < 10 {
        1
    } else if total_lines < 100 {
        2
    } else if total_lines < 1_000 {
        3
    } else if total_lines < 10_000 {
        4
    } else if total_lines < 100_000 {
        5
    } else {
        6
    };
    digits + 1
}

#[cfg(test)]
mod tests;
