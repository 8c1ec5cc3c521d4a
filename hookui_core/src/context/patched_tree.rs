use super::key::{HookKey, Key};
use dashmap::DashMap;
use hashbrown::HashMap;
use parking_lot::{MappedRwLockReadGuard, RwLock, RwLockReadGuard};
use std::{any::Any, ops::Deref};

pub type TreeItem = Box<dyn Any + Send + Sync>;

type FxDashMap<K, V> = DashMap<K, V, ahash::RandomState>;
type FxHashMap<K, V> = HashMap<K, V, ahash::RandomState>;

/// Storage of all state slots. Writes never touch the committed data
/// directly: they are collected as a patch that the evaluator applies right
/// before the next render pass, so a render always observes one consistent
/// snapshot.
#[derive(Debug, Default)]
pub struct PatchedTree {
    data: RwLock<FxHashMap<HookKey, TreeItem>>,
    patch: FxDashMap<HookKey, TreeItem>,
}

type DataRef<'a> = MappedRwLockReadGuard<'a, TreeItem>;
type HashPatchRef<'a> = dashmap::mapref::one::Ref<'a, HookKey, TreeItem, ahash::RandomState>;

pub struct PatchTreeEntry<'a> {
    patched_entry: Option<HashPatchRef<'a>>,
    unpatched_entry: Option<DataRef<'a>>,
}

impl<'a> PatchTreeEntry<'a> {
    fn new(patched_entry: Option<HashPatchRef<'a>>, unpatched_entry: Option<DataRef<'a>>) -> Self {
        Self { patched_entry, unpatched_entry }
    }
}

impl<'a> Deref for PatchTreeEntry<'a> {
    type Target = TreeItem;

    fn deref(&self) -> &Self::Target {
        match &self.patched_entry {
            Some(p) => p.value(),
            None => match &self.unpatched_entry {
                Some(v) => &**v,
                None => unreachable!(),
            },
        }
    }
}

impl PatchedTree {
    /// the newest value, including updates that were queued but not applied
    /// yet
    pub fn get_patched(&self, key: HookKey) -> PatchTreeEntry {
        match self.patch.get(&key) {
            None => self.get_unpatched(key),
            Some(patch) => PatchTreeEntry::new(Some(patch), None),
        }
    }

    /// the value the current render pass sees
    pub fn get_unpatched(&self, key: HookKey) -> PatchTreeEntry {
        PatchTreeEntry::new(
            None,
            Some(RwLockReadGuard::map(self.data.read(), |data| match data.get(&key) {
                Some(item) => item,
                None => panic!("state slot {:?}:{} was read before it was initialized", key.0, key.1),
            })),
        )
    }

    pub fn contains(&self, key: HookKey) -> bool { self.data.read().contains_key(&key) }

    pub fn initialize_with(&self, key: HookKey, gen: impl FnOnce() -> TreeItem) -> HookKey {
        let mut data = self.data.write();
        if !data.contains_key(&key) {
            log::trace!("initializing state slot {:?}:{}", key.0, key.1);
            data.insert(key, gen());
        }
        key
    }

    /// queue a whole-value replacement
    pub fn set(&self, key: HookKey, value: TreeItem) { self.patch.insert(key, value); }

    /// queue an update computed from the newest value of the slot. Several
    /// updates queued before the next render pass build on each other.
    pub fn update(&self, key: HookKey, update: impl FnOnce(&TreeItem) -> TreeItem) {
        let value = {
            let current = self.get_patched(key);
            update(&current)
        };
        self.patch.insert(key, value);
    }

    pub fn set_unconditional(&self, key: HookKey, value: TreeItem) {
        self.data.write().insert(key, value);
    }

    pub fn has_patches(&self) -> bool { !self.patch.is_empty() }

    pub fn remove_widget(&self, key: &Key) {
        self.patch.retain(|hook, _| hook.0 != *key);
        self.data.write().retain(|hook, _| hook.0 != *key);
    }

    // apply the patch to the tree starting a new render pass
    pub fn update_tree(&self) -> impl Iterator<Item = HookKey> + '_ {
        let keys: Vec<HookKey> = self.patch.iter().map(|kv| *kv.key()).collect();

        keys.into_iter().filter_map(move |key| {
            let (key, value) = self.patch.remove(&key)?;
            self.set_unconditional(key, value);
            Some(key)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read<T: Clone + 'static>(entry: PatchTreeEntry) -> T {
        entry.downcast_ref::<T>().unwrap().clone()
    }

    #[test]
    fn patches_are_invisible_until_applied() {
        let tree = PatchedTree::default();
        let key = (Key::fresh(), 0);
        tree.initialize_with(key, || Box::new(1i64));

        tree.set(key, Box::new(2i64));
        assert_eq!(read::<i64>(tree.get_unpatched(key)), 1);
        assert_eq!(read::<i64>(tree.get_patched(key)), 2);

        let touched: Vec<_> = tree.update_tree().collect();
        assert_eq!(touched, vec![key]);
        assert_eq!(read::<i64>(tree.get_unpatched(key)), 2);
        assert!(!tree.has_patches());
    }

    #[test]
    fn queued_updates_build_on_each_other() {
        let tree = PatchedTree::default();
        let key = (Key::fresh(), 0);
        tree.initialize_with(key, || Box::new(10i64));

        for _ in 0..3 {
            tree.update(key, |old| Box::new(old.downcast_ref::<i64>().unwrap() + 1));
        }
        tree.update_tree().count();
        assert_eq!(read::<i64>(tree.get_unpatched(key)), 13);
    }

    #[test]
    fn initialization_happens_once() {
        let tree = PatchedTree::default();
        let key = (Key::fresh(), 3);
        tree.initialize_with(key, || Box::new("first".to_string()));
        tree.initialize_with(key, || Box::new("second".to_string()));
        assert_eq!(read::<String>(tree.get_unpatched(key)), "first");
    }

    #[test]
    fn removing_a_widget_drops_its_slots_and_patches() {
        let tree = PatchedTree::default();
        let (gone, kept) = (Key::fresh(), Key::fresh());
        tree.initialize_with((gone, 0), || Box::new(0u8));
        tree.initialize_with((kept, 0), || Box::new(0u8));
        tree.set((gone, 0), Box::new(1u8));

        tree.remove_widget(&gone);
        assert!(!tree.contains((gone, 0)));
        assert!(tree.contains((kept, 0)));
        assert!(!tree.has_patches());
    }
}
