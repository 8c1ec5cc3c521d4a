use hookui_core::Node;

pub fn text(children: impl ToString) -> Node { Node::text(children) }
