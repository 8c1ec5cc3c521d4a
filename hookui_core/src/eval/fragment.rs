use crate::{util::format_helpers::escape_markup, CallbackContext};
use derivative::Derivative;
use smallvec::SmallVec;
use std::{
    fmt::{self, Display, Formatter},
    rc::Rc,
};

/*
The general flow of an update in hookui:
queued state updates -> render pass(es) -> commit -> effects

1. Render
the component function turns the current state into a tree of Nodes. A render
pass that queues state updates is thrown away and the component is rendered
again with the updates applied.

2. Commit
the final tree replaces the previously rendered one and debug values are
published.

3. Effects
effects whose dependencies changed run in declaration order.
 */

pub type ClickHandler = Rc<dyn Fn(&CallbackContext)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Div,
    Header,
    H1,
    H2,
    H3,
    Button,
}

impl Tag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tag::Div => "div",
            Tag::Header => "header",
            Tag::H1 => "h1",
            Tag::H2 => "h2",
            Tag::H3 => "h3",
            Tag::Button => "button",
        }
    }
}

#[derive(Clone, Derivative)]
#[derivative(Debug)]
pub struct Element {
    pub tag: Tag,
    pub classes: SmallVec<[&'static str; 2]>,
    /// how interactions and tests address the element; not rendered
    pub name: Option<&'static str>,
    #[derivative(Debug = "ignore")]
    pub on_click: Option<ClickHandler>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: Tag) -> Self {
        Self { tag, classes: SmallVec::new(), name: None, on_click: None, children: vec![] }
    }

    pub fn class(mut self, class: &'static str) -> Self {
        self.classes.push(class);
        self
    }

    pub fn name(mut self, name: &'static str) -> Self {
        self.name = Some(name);
        self
    }

    pub fn on_click(mut self, on_click: impl Fn(&CallbackContext) + 'static) -> Self {
        self.on_click = Some(Rc::new(on_click));
        self
    }

    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }
}

/// The visual output of a component.
#[derive(Debug, Clone)]
pub enum Node {
    Element(Element),
    Text(Rc<String>),
}

impl From<Element> for Node {
    fn from(element: Element) -> Self { Node::Element(element) }
}

impl Node {
    pub fn text(text: impl ToString) -> Self { Node::Text(Rc::new(text.to_string())) }

    /// depth first search for the element with the given name
    pub fn find(&self, name: &str) -> Option<&Element> {
        match self {
            Node::Text(_) => None,
            Node::Element(element) if element.name == Some(name) => Some(element),
            Node::Element(element) => element.children.iter().find_map(|child| child.find(name)),
        }
    }

    /// all text below this node, concatenated
    pub fn text_content(&self) -> String {
        let mut content = String::new();
        self.collect_text(&mut content);
        content
    }

    fn collect_text(&self, content: &mut String) {
        match self {
            Node::Text(text) => content.push_str(text),
            Node::Element(element) => {
                for child in &element.children {
                    child.collect_text(content);
                }
            }
        }
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Node::Text(text) => escape_markup(text, f),
            Node::Element(element) => {
                write!(f, "<{}", element.tag.as_str())?;
                if !element.classes.is_empty() {
                    write!(f, " class=\"{}\"", element.classes.join(" "))?;
                }
                write!(f, ">")?;
                for child in &element.children {
                    write!(f, "{}", child)?;
                }
                write!(f, "</{}>", element.tag.as_str())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Node {
        Element::new(Tag::Div)
            .class("App")
            .child(Element::new(Tag::H1).name("title").child(Node::text("a < b")))
            .child(Element::new(Tag::Button).class("btn").class("btn-success").child(Node::text("+")))
            .into()
    }

    #[test]
    fn renders_markup() {
        assert_eq!(
            sample().to_string(),
            "<div class=\"App\"><h1>a &lt; b</h1><button class=\"btn btn-success\">+</button></div>"
        );
    }

    #[test]
    fn finds_named_elements() {
        let node = sample();
        assert_eq!(node.find("title").map(|element| element.tag), Some(Tag::H1));
        assert!(node.find("missing").is_none());
    }

    #[test]
    fn children_are_appended_in_order() {
        let node: Node = Element::new(Tag::Div)
            .child(Node::text("a"))
            .children(vec![Node::text("b"), Node::text("c")])
            .into();
        assert_eq!(node.to_string(), "<div>abc</div>");
    }

    #[test]
    fn collects_text() {
        assert_eq!(sample().text_content(), "a < b+");
    }
}
