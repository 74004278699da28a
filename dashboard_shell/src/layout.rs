//! The serializable layout tree a dashboard hands to the rendering surface.

use serde::Serialize;

use figure_builder::figure::Figure;

/// A complete rendered dashboard: a title plus a vertical stack of panes.
#[derive(Debug, Clone, Serialize)]
pub struct Layout {
    pub title: String,
    pub panes: Vec<Pane>,
}

impl Layout {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            panes: Vec::new(),
        }
    }

    pub fn push(&mut self, pane: Pane) {
        self.panes.push(pane);
    }
}

/// One cell of the layout tree.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Pane {
    /// Markdown-formatted text block.
    Markdown { text: String },
    /// A chart specification built by `figure_builder`.
    Figure { figure: Figure },
    /// Horizontally adjacent children, equal widths.
    Row { children: Vec<Pane> },
    /// Visual separator.
    Divider,
}

impl Pane {
    pub fn markdown(text: impl Into<String>) -> Self {
        Pane::Markdown { text: text.into() }
    }

    pub fn figure(figure: Figure) -> Self {
        Pane::Figure { figure }
    }

    pub fn row(children: Vec<Pane>) -> Self {
        Pane::Row { children }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panes_serialize_with_a_type_tag() {
        let mut layout = Layout::new("Overview");
        layout.push(Pane::markdown("# hello"));
        layout.push(Pane::Divider);
        let json = serde_json::to_value(&layout).unwrap();
        assert_eq!(json["panes"][0]["type"], "markdown");
        assert_eq!(json["panes"][1]["type"], "divider");
    }
}
