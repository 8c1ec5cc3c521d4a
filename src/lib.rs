pub mod panel;

pub use hookui_core::*;
pub use hookui_widgets::*;
