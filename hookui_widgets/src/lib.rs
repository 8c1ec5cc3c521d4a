mod controls;
pub use controls::*;

mod layout;
pub use layout::*;

#[path = "text.rs"]
mod text_widget;
pub use text_widget::*;
