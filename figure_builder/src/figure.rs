//! The figure specification handed to the rendering surface.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A complete chart specification: panels, traces, annotations.
///
/// Panels stack vertically; each trace names the panel it draws on. A
/// figure with no traces and one annotation is the graceful empty state.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Figure {
    pub title: Option<String>,
    pub panels: Vec<Panel>,
    pub traces: Vec<Trace>,
    pub annotations: Vec<Annotation>,
    pub show_legend: bool,
    /// Visible x-window; the surface clips to it without re-requesting data.
    pub x_range: Option<(DateTime<Utc>, DateTime<Utc>)>,
}

impl Figure {
    /// An empty-but-valid figure carrying a placeholder message.
    pub fn empty_state(title: Option<String>, message: &str) -> Self {
        Figure {
            title,
            annotations: vec![Annotation::centered(message)],
            ..Figure::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.traces.is_empty()
    }
}

/// One vertical panel with its y-axis title and relative height.
#[derive(Debug, Clone, Serialize)]
pub struct Panel {
    pub y_title: String,
    pub height_fraction: f64,
}

/// Line dash styles mirrored by the rendering surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Dash {
    Solid,
    Dash,
    Dot,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Trace {
    Line {
        name: String,
        panel: usize,
        x: Vec<DateTime<Utc>>,
        y: Vec<f64>,
        color: String,
        width: f64,
        dash: Dash,
        /// rgba fill color for an area under the line, when requested.
        fill: Option<String>,
    },
    Candlestick {
        name: String,
        panel: usize,
        x: Vec<DateTime<Utc>>,
        open: Vec<f64>,
        high: Vec<f64>,
        low: Vec<f64>,
        close: Vec<f64>,
    },
    Bar {
        name: String,
        panel: usize,
        x: Vec<DateTime<Utc>>,
        y: Vec<f64>,
        /// Per-bar colors (e.g. up/down volume); a single entry colors all.
        colors: Vec<String>,
    },
}

/// Free-floating text, positioned in figure-fraction coordinates.
#[derive(Debug, Clone, Serialize)]
pub struct Annotation {
    pub text: String,
    pub x: f64,
    pub y: f64,
}

impl Annotation {
    pub fn centered(text: &str) -> Self {
        Self {
            text: text.to_string(),
            x: 0.5,
            y: 0.5,
        }
    }
}
