use hookui_core::*;

/// Semantic flavour of a button, rendered as css classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonVariant {
    Primary,
    Success,
    Danger,
}

impl ButtonVariant {
    pub fn class(&self) -> &'static str {
        match self {
            ButtonVariant::Primary => "btn-primary",
            ButtonVariant::Success => "btn-success",
            ButtonVariant::Danger => "btn-danger",
        }
    }
}

impl Default for ButtonVariant {
    fn default() -> Self { ButtonVariant::Primary }
}

pub fn button(
    variant: ButtonVariant,
    name: &'static str,
    on_click: impl Fn(&CallbackContext) + 'static,
    children: impl Into<Node>,
) -> Element {
    Element::new(Tag::Button)
        .class("btn")
        .class(variant.class())
        .name(name)
        .on_click(on_click)
        .child(children)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text;

    #[test]
    fn success_button_markup() {
        let node: Node = button(ButtonVariant::Success, "inc", |_| {}, text("+")).into();
        assert_eq!(node.to_string(), "<button class=\"btn btn-success\">+</button>");
        assert!(node.find("inc").and_then(|element| element.on_click.as_ref()).is_some());
    }
}
