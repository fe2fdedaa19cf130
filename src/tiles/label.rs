use std::fmt;

use crossterm::style::{ContentStyle, StyledContent};
use smallvec::SmallVec;

/// A short run of styled text painted into one tile cell.
///
/// Width is measured on the bare text, so escape sequences added by styling
/// never count against the cell.
#[derive(Debug, Clone, Default)]
pub struct Label {
    spans: SmallVec<[StyledContent<String>; 2]>,
}

impl Label {
    pub fn blank(width: usize) -> Self {
        Self::plain(" ".repeat(width))
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::styled(ContentStyle::new(), text)
    }

    pub fn styled(style: ContentStyle, text: impl Into<String>) -> Self {
        let mut label = Self::default();
        label.push(style, text);
        label
    }

    pub fn push(&mut self, style: ContentStyle, text: impl Into<String>) -> &mut Self {
        self.spans.push(StyledContent::new(style, text.into()));
        self
    }

    pub fn width(&self) -> usize {
        self.spans
            .iter()
            .map(|span| span.content().chars().count())
            .sum()
    }

    /// The label without any styling.
    pub fn text(&self) -> String {
        self.spans.iter().map(|span| span.content().as_str()).collect()
    }

    pub fn spans(&self) -> &[StyledContent<String>] {
        &self.spans
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for span in &self.spans {
            write!(f, "{span}")?;
        }
        Ok(())
    }
}
