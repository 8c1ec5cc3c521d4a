use super::{
    key::{HookKey, Key},
    patched_tree::PatchedTree,
};
use crate::hooks::effect::{EffectStore, PendingEffect};
use derivative::Derivative;
use std::sync::Arc;


// Context types
// widget access (while rendering)
//   - create listenable / state
//   - listen
//   - shout (queued, applied before the next render pass)
//   - register effects and debug values
// callback access (click handlers, effects)
//   - shout
//   - spy

/// Everything a render pass produced besides the tree itself. It only takes
/// effect if the pass gets committed; a pass that is thrown away because it
/// queued state updates also throws away its commit queue.
#[derive(Derivative, Default)]
#[derivative(Debug)]
pub(crate) struct CommitQueue {
    #[derivative(Debug(format_with = "crate::util::format_helpers::print_vec_len"))]
    pub(crate) effects: Vec<PendingEffect>,
    pub(crate) debug_values: Vec<(u16, String)>,
}

#[derive(Derivative)]
#[derivative(Debug)]
pub struct WidgetContext<'a> {
    pub widget_local: WidgetLocalContext,
    #[derivative(Debug = "ignore")]
    pub tree: Arc<PatchedTree>,
    pub(crate) effects: &'a EffectStore,
    pub(crate) commit: &'a mut CommitQueue,
}

impl<'a> WidgetContext<'a> {
    pub(crate) fn for_component(
        key: Key,
        tree: Arc<PatchedTree>,
        effects: &'a EffectStore,
        commit: &'a mut CommitQueue,
    ) -> Self {
        WidgetContext { widget_local: WidgetLocalContext::for_key(key), tree, effects, commit }
    }

    /// Hooks are identified by the order they are called in, so every render
    /// of a component has to call the same hooks in the same order.
    pub fn key_for_hook(&mut self) -> HookKey {
        let counter = self.widget_local.hook_counter;
        self.widget_local.hook_counter += 1;
        log::trace!("creating hook: {:?}:{}", self.widget_local.key, counter);
        (self.widget_local.key, counter)
    }

    pub fn callback_context(&self) -> CallbackContext {
        CallbackContext { tree: self.tree.clone(), key: self.widget_local.key }
    }
}

#[derive(Clone, Derivative)]
#[derivative(Debug)]
pub struct CallbackContext {
    #[derivative(Debug = "ignore")]
    pub(crate) tree: Arc<PatchedTree>,
    pub key: Key,
}

#[derive(Clone, Debug)]
pub struct WidgetLocalContext {
    pub key: Key,
    pub hook_counter: u16,
}

impl WidgetLocalContext {
    pub fn for_key(key: Key) -> Self { Self { key, hook_counter: 0 } }
}
