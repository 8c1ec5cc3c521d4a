use std::{
    fmt::{Debug, Formatter},
    hash::Hash,
    sync::atomic::{AtomicU32, Ordering},
};

type KeyInner = u32;

/// Identifies one mounted component instance. Keys are unique for the whole
/// process, so inspection tooling can tell instances of different evaluators
/// apart.
#[derive(Clone, Copy, PartialEq, Hash, Eq)]
pub struct Key(pub(crate) KeyInner);

static NEXT_KEY: AtomicU32 = AtomicU32::new(1);

impl Key {
    pub(crate) fn fresh() -> Self { Key(NEXT_KEY.fetch_add(1, Ordering::Relaxed)) }

    pub fn id(&self) -> u32 { self.0 }
}

impl Debug for Key {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result { write!(f, "component#{}", self.0) }
}

// the second part is the position of the hook in the render function
pub type HookKey = (Key, u16);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_keys_are_distinct() {
        let a = Key::fresh();
        let b = Key::fresh();
        assert_ne!(a, b);
        assert!(b.id() > a.id());
    }

    #[test]
    fn debug_names_the_component() {
        assert_eq!(format!("{:?}", Key(7)), "component#7");
    }
}
