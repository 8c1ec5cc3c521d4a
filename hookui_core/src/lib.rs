mod config;
mod context;
mod error;
pub(crate) mod eval;
pub mod hooks;
mod util;

pub use config::RenderConfig;
pub use context::{CallbackContext, HookKey, Key, PatchTreeEntry, PatchedTree, WidgetContext};
pub use error::Error;
pub use eval::{delta_eval::Evaluator, fragment::*};
pub use hooks::*;
