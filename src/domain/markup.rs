//! HTML document flattened into start-tag / text / end-tag events

use scraper::{ElementRef, Html};

/// One event of a document walked in source order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupEvent<'a> {
    Start {
        name: &'a str,
        attrs: Vec<(&'a str, &'a str)>,
    },
    End {
        name: &'a str,
    },
    Text(&'a str),
}

impl<'a> MarkupEvent<'a> {
    /// Value of an attribute on a start tag
    pub fn attr(&self, key: &str) -> Option<&'a str> {
        match self {
            MarkupEvent::Start { attrs, .. } => attrs
                .iter()
                .find(|(name, _)| name.eq_ignore_ascii_case(key))
                .map(|(_, value)| *value),
            _ => None,
        }
    }
}

/// Parsed page, kept alive while its events are borrowed
pub struct MarkupDocument {
    html: Html,
}

impl MarkupDocument {
    pub fn parse(source: &str) -> Self {
        MarkupDocument {
            html: Html::parse_document(source),
        }
    }

    /// Every element and text node below the root, in document order
    pub fn events(&self) -> Vec<MarkupEvent<'_>> {
        let mut out = Vec::new();
        walk(self.html.root_element(), &mut out);
        out
    }
}

fn walk<'a>(element: ElementRef<'a>, out: &mut Vec<MarkupEvent<'a>>) {
    let value = element.value();
    out.push(MarkupEvent::Start {
        name: value.name(),
        attrs: value.attrs().collect(),
    });

    for child in element.children() {
        if let Some(child_element) = ElementRef::wrap(child) {
            walk(child_element, out);
        } else if let Some(text) = child.value().as_text() {
            let text: &'a str = text;
            out.push(MarkupEvent::Text(text));
        }
    }

    out.push(MarkupEvent::End { name: value.name() });
}
