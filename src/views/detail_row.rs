use super::{escape, Markup};

/// A label paired with either a plain value or nested markup.
///
/// Nested content wins: when both are set only the children are rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailRow {
    label: String,
    value: Option<String>,
    children: Option<Markup>,
}

impl DetailRow {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn children(mut self, children: Markup) -> Self {
        self.children = Some(children);
        self
    }

    pub fn render(&self) -> Markup {
        let content = match (&self.children, &self.value) {
            (Some(children), _) => children.clone(),
            (None, Some(value)) => Markup::text(value),
            (None, None) => Markup::default(),
        };

        Markup::raw(format!(
            "<div class=\"detail-row\"><dt>{}</dt><dd>{}</dd></div>",
            escape(&self.label),
            content
        ))
    }
}

pub fn detail_list(rows: &[DetailRow]) -> Markup {
    let mut out = Markup::raw("<dl class=\"detail-list\">");
    for row in rows {
        out.push(row.render());
    }
    out.push(Markup::raw("</dl>"));
    out
}
