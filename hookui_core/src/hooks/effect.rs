use crate::{CallbackContext, WidgetContext};
use derivative::Derivative;
use std::{any::Any, collections::BTreeMap};

type EffectCallback = Box<dyn FnOnce(&CallbackContext) -> Box<dyn Any>>;

/// An effect that a render pass asked for. It runs after the pass is
/// committed, in the order the effects were declared.
#[derive(Derivative)]
#[derivative(Debug)]
pub(crate) struct PendingEffect {
    pub(crate) hook: u16,
    #[derivative(Debug = "ignore")]
    pub(crate) deps: Option<Box<dyn Any>>,
    #[derivative(Debug = "ignore")]
    pub(crate) callback: EffectCallback,
}

#[derive(Default)]
struct EffectSlot {
    // `None` means the effect runs after every commit
    deps: Option<Box<dyn Any>>,
    // whatever the effect returned; dropping it is the cleanup
    handle: Option<Box<dyn Any>>,
}

/// The committed state of all effects of one component.
#[derive(Derivative, Default)]
#[derivative(Debug)]
pub(crate) struct EffectStore {
    #[derivative(Debug(format_with = "crate::util::format_helpers::print_map_len"))]
    slots: BTreeMap<u16, EffectSlot>,
}

impl EffectStore {
    pub(crate) fn is_stale<D: PartialEq + 'static>(&self, hook: u16, deps: &D) -> bool {
        match self.slots.get(&hook).and_then(|slot| slot.deps.as_ref()) {
            None => true,
            Some(old) => {
                old.downcast_ref::<D>().expect("effect dependencies changed their type") != deps
            }
        }
    }

    pub(crate) fn run(&mut self, effect: PendingEffect, context: &CallbackContext) {
        let slot = self.slots.entry(effect.hook).or_default();
        if let Some(handle) = slot.handle.take() {
            log::trace!("cleaning up effect {:?}:{}", context.key, effect.hook);
            drop(handle);
        }
        log::trace!("running effect {:?}:{}", context.key, effect.hook);
        slot.handle = Some((effect.callback)(context));
        slot.deps = effect.deps;
    }

    /// drop all effect handles in declaration order, running their cleanups
    pub(crate) fn clear(&mut self) {
        for (hook, slot) in std::mem::take(&mut self.slots) {
            if slot.handle.is_some() {
                log::trace!("cleaning up effect {} on unmount", hook);
            }
            drop(slot);
        }
    }

    pub(crate) fn len(&self) -> usize { self.slots.len() }
}

pub trait ContextEffect {
    /// Run `callback` after the first commit and after every commit in which
    /// `deps` differs from the deps of the last run. With `()` as deps the
    /// callback runs exactly once after mount. The value the callback returns
    /// is kept alive until the effect runs again or the component unmounts;
    /// return a [`Cleanup`] to do something at that point.
    fn effect<T: 'static>(
        &mut self,
        callback: impl FnOnce(&CallbackContext) -> T + 'static,
        deps: impl PartialEq + 'static,
    );
}

impl<'a> ContextEffect for WidgetContext<'a> {
    fn effect<T: 'static>(
        &mut self,
        callback: impl FnOnce(&CallbackContext) -> T + 'static,
        deps: impl PartialEq + 'static,
    ) {
        let hook = self.key_for_hook().1;
        if self.effects.is_stale(hook, &deps) {
            self.schedule_effect(hook, Some(Box::new(deps)), callback);
        }
    }
}

impl<'a> WidgetContext<'a> {
    pub(crate) fn schedule_effect<T: 'static>(
        &mut self,
        hook: u16,
        deps: Option<Box<dyn Any>>,
        callback: impl FnOnce(&CallbackContext) -> T + 'static,
    ) {
        self.commit.effects.push(PendingEffect {
            hook,
            deps,
            callback: Box::new(move |context| Box::new(callback(context)) as Box<dyn Any>),
        });
    }
}

/// Runs the wrapped closure when dropped. Returning one from an effect turns
/// it into the effect's cleanup.
pub struct Cleanup<T: FnOnce()> {
    callback: Option<T>,
}
impl<T: FnOnce()> Cleanup<T> {
    pub fn new(callback: T) -> Cleanup<T> { Self { callback: Some(callback) } }
}
impl<T: FnOnce()> Drop for Cleanup<T> {
    fn drop(&mut self) {
        if let Some(callback) = self.callback.take() {
            callback()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Key, PatchedTree};
    use std::{cell::RefCell, rc::Rc, sync::Arc};

    fn pending(hook: u16, deps: i32, log: Rc<RefCell<Vec<String>>>) -> PendingEffect {
        PendingEffect {
            hook,
            deps: Some(Box::new(deps)),
            callback: Box::new(move |_| {
                log.borrow_mut().push(format!("run {}", deps));
                let log = log.clone();
                Box::new(Cleanup::new(move || log.borrow_mut().push(format!("cleanup {}", deps))))
                    as Box<dyn Any>
            }),
        }
    }

    #[test]
    fn stale_until_deps_match() {
        let context = CallbackContext { tree: Arc::new(PatchedTree::default()), key: Key::fresh() };
        let log = Rc::new(RefCell::new(vec![]));
        let mut store = EffectStore::default();

        assert!(store.is_stale(0, &1));
        store.run(pending(0, 1, log.clone()), &context);
        assert!(!store.is_stale(0, &1));
        assert!(store.is_stale(0, &2));
    }

    #[test]
    fn rerun_cleans_up_the_previous_run_first() {
        let context = CallbackContext { tree: Arc::new(PatchedTree::default()), key: Key::fresh() };
        let log = Rc::new(RefCell::new(vec![]));
        let mut store = EffectStore::default();

        store.run(pending(0, 1, log.clone()), &context);
        store.run(pending(0, 2, log.clone()), &context);
        assert_eq!(*log.borrow(), vec!["run 1", "cleanup 1", "run 2"]);
    }

    #[test]
    fn clear_cleans_up_in_declaration_order() {
        let context = CallbackContext { tree: Arc::new(PatchedTree::default()), key: Key::fresh() };
        let log = Rc::new(RefCell::new(vec![]));
        let mut store = EffectStore::default();

        store.run(pending(4, 2, log.clone()), &context);
        store.run(pending(1, 1, log.clone()), &context);
        log.borrow_mut().clear();

        store.clear();
        assert_eq!(*log.borrow(), vec!["cleanup 1", "cleanup 2"]);
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn debug_output_counts_slots() {
        let context = CallbackContext { tree: Arc::new(PatchedTree::default()), key: Key::fresh() };
        let log = Rc::new(RefCell::new(vec![]));
        let mut store = EffectStore::default();
        store.run(pending(0, 1, log.clone()), &context);
        store.run(pending(3, 1, log), &context);
        assert_eq!(format!("{:?}", store), "EffectStore { slots: BTreeMap { len() = 2 } }");
    }

    #[test]
    fn cleanup_runs_once() {
        let count = Rc::new(RefCell::new(0));
        let cleanup = {
            let count = count.clone();
            Cleanup::new(move || *count.borrow_mut() += 1)
        };
        drop(cleanup);
        assert_eq!(*count.borrow(), 1);
    }
}
