use hookui_core::*;

pub fn div() -> Element { Element::new(Tag::Div) }

pub fn header() -> Element { Element::new(Tag::Header) }

/// `level` is clamped to the headings the runtime knows about
pub fn heading(level: u8) -> Element {
    Element::new(match level {
        0 | 1 => Tag::H1,
        2 => Tag::H2,
        _ => Tag::H3,
    })
}

/// a div with a single child, the usual way to put a control on its own line
pub fn line(child: impl Into<Node>) -> Element { div().child(child) }
