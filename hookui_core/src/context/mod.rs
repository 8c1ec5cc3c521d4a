pub(crate) mod context;
pub(crate) mod key;
pub(crate) mod patched_tree;

pub use context::{CallbackContext, WidgetContext};
pub use key::{HookKey, Key};
pub use patched_tree::{PatchTreeEntry, PatchedTree};
