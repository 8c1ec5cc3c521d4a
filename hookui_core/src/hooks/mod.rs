pub(crate) mod after_frame;
pub use after_frame::*;

pub(crate) mod debug_value;
pub use debug_value::*;

pub(crate) mod effect;
pub use effect::*;

pub(crate) mod listenable;
pub use listenable::*;
