use crate::{CallbackContext, HookKey, PatchTreeEntry, PatchedTree, WidgetContext};
use std::{marker::PhantomData, ops::Deref};

/// A typed handle to one state slot of a component. It is `Copy`, so it can be
/// moved into as many click handlers and effects as needed.
pub struct Listenable<T> {
    pub(crate) key: HookKey,
    phantom_data: PhantomData<T>,
}
impl<T> Clone for Listenable<T> {
    fn clone(&self) -> Self { Self { key: self.key, phantom_data: Default::default() } }
}
impl<T> Copy for Listenable<T> {}
impl<T> std::fmt::Debug for Listenable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Listenable({:?}:{})", self.key.0, self.key.1)
    }
}

pub struct ListenableGuard<'l, T> {
    entry: PatchTreeEntry<'l>,
    phantom: PhantomData<T>,
}
impl<'l, T: 'static> Deref for ListenableGuard<'l, T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        self.entry.downcast_ref().expect("state slot holds a value of a different type")
    }
}

/// Partial updates for record-like state. Merging overwrites the fields the
/// patch carries and keeps every other field as it was.
pub trait Merge {
    type Patch;

    fn merge(&mut self, patch: Self::Patch);
}

pub trait ContextListenable {
    fn listenable<T: Send + Sync + 'static>(&mut self, initial: T) -> Listenable<T>;
    fn listenable_with<T: Send + Sync + 'static>(
        &mut self,
        initial: impl FnOnce() -> T,
    ) -> Listenable<T>;

    fn listen<T: Clone + Send + Sync + 'static>(&self, listenable: Listenable<T>) -> T;
    fn listen_ref<T: Send + Sync + 'static>(&self, listenable: Listenable<T>) -> ListenableGuard<T>;

    /// the current value together with the handle to change it
    fn state<T: Clone + Send + Sync + 'static>(&mut self, initial: T) -> (T, Listenable<T>) {
        let listenable = self.listenable(initial);
        (self.listen(listenable), listenable)
    }
}

impl<'a> ContextListenable for WidgetContext<'a> {
    fn listenable<T: Send + Sync + 'static>(&mut self, initial: T) -> Listenable<T> {
        self.listenable_with(move || initial)
    }

    fn listenable_with<T: Send + Sync + 'static>(
        &mut self,
        initial: impl FnOnce() -> T,
    ) -> Listenable<T> {
        let key = self.key_for_hook();
        self.tree.initialize_with(key, || Box::new(initial()));
        Listenable { key, phantom_data: Default::default() }
    }

    fn listen<T: Clone + Send + Sync + 'static>(&self, listenable: Listenable<T>) -> T {
        T::clone(&self.listen_ref(listenable))
    }

    fn listen_ref<T: Send + Sync + 'static>(&self, listenable: Listenable<T>) -> ListenableGuard<T> {
        ListenableGuard { entry: self.tree.get_unpatched(listenable.key), phantom: Default::default() }
    }
}

/// Writing state. Writes are queued: neither a render pass nor a callback ever
/// sees its own write through `listen`, only the next render pass does.
pub trait ContextShout {
    fn patched_tree(&self) -> &PatchedTree;

    /// replace the value of the slot
    fn shout<T: Send + Sync + 'static>(&self, listenable: Listenable<T>, new_value: T) {
        self.patched_tree().set(listenable.key, Box::new(new_value));
    }

    /// compute the new value from the newest queued (or committed) one
    fn shout_with<T: Send + Sync + 'static>(
        &self,
        listenable: Listenable<T>,
        update: impl FnOnce(&T) -> T,
    ) {
        self.patched_tree().update(listenable.key, |old| {
            Box::new(update(old.downcast_ref().expect("state slot holds a value of a different type")))
        });
    }

    /// merge a partial update into record-like state
    fn shout_merge<T: Merge + Clone + Send + Sync + 'static>(
        &self,
        listenable: Listenable<T>,
        patch: T::Patch,
    ) {
        self.shout_with(listenable, move |old| {
            let mut new = old.clone();
            new.merge(patch);
            new
        });
    }

    /// the newest value of the slot, including queued updates
    fn spy<T: Clone + Send + Sync + 'static>(&self, listenable: Listenable<T>) -> T {
        self.patched_tree()
            .get_patched(listenable.key)
            .downcast_ref::<T>()
            .expect("state slot holds a value of a different type")
            .clone()
    }
}

impl<'a> ContextShout for WidgetContext<'a> {
    fn patched_tree(&self) -> &PatchedTree { &self.tree }
}

impl ContextShout for CallbackContext {
    fn patched_tree(&self) -> &PatchedTree { &self.tree }
}
