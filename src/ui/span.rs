use crate::ui::style::Style;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub style: Style,
    /// Element identifier a click on this span is routed to.
    pub element: Option<String>,
}

impl Span {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: Style::default(),
            element: None,
        }
    }

    pub fn styled(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
            element: None,
        }
    }

    pub fn clickable(mut self, element: impl Into<String>) -> Self {
        self.element = Some(element.into());
        self
    }
}

pub type SpanLine = Vec<Span>;
