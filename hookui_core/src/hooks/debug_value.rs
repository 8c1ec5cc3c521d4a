use crate::{ContextListenable, Key, Listenable, WidgetContext};
use hashbrown::HashMap;
use parking_lot::RwLock;
use smallvec::SmallVec;
use std::fmt::Display;

/// A human readable value a component exposes to inspection tooling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebugValue {
    pub hook: u16,
    pub label: String,
    /// how often the label was computed for a commit
    pub revision: u64,
}

lazy_static::lazy_static! {
    static ref INSPECTOR: RwLock<HashMap<Key, SmallVec<[DebugValue; 4]>>> = RwLock::new(HashMap::new());
}

/// all debug values of a mounted component, in hook order
pub fn inspect(key: Key) -> Vec<DebugValue> {
    INSPECTOR.read().get(&key).map(|values| values.to_vec()).unwrap_or_default()
}

pub(crate) fn publish(key: Key, hook: u16, label: String) {
    let mut inspector = INSPECTOR.write();
    let values = inspector.entry(key).or_default();
    match values.iter_mut().find(|value| value.hook == hook) {
        Some(value) => {
            value.label = label;
            value.revision += 1;
        }
        None => {
            let position = values.iter().position(|value| value.hook > hook).unwrap_or(values.len());
            values.insert(position, DebugValue { hook, label, revision: 1 })
        }
    }
}

pub(crate) fn forget(key: Key) { INSPECTOR.write().remove(&key); }

pub trait ContextDebugValue {
    /// Attach a label to the component for inspection tooling. The label is
    /// published when the render pass gets committed.
    fn debug_value(&mut self, value: impl Display);

    /// Like [`ContextListenable::state`], but the slot additionally shows up
    /// as `"{label}: {value}"` in inspection tooling.
    fn labeled_state<T: Clone + Display + Send + Sync + 'static>(
        &mut self,
        initial: T,
        label: &str,
    ) -> (T, Listenable<T>);
}

impl<'a> ContextDebugValue for WidgetContext<'a> {
    fn debug_value(&mut self, value: impl Display) {
        let hook = self.key_for_hook().1;
        self.commit.debug_values.push((hook, value.to_string()));
    }

    fn labeled_state<T: Clone + Display + Send + Sync + 'static>(
        &mut self,
        initial: T,
        label: &str,
    ) -> (T, Listenable<T>) {
        let (value, listenable) = self.state(initial);
        self.debug_value(format_args!("{}: {}", label, value));
        (value, listenable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn publishing_twice_bumps_the_revision() {
        let key = Key::fresh();
        publish(key, 2, "firstName: Mario".to_string());
        publish(key, 2, "firstName: Juha".to_string());
        assert_eq!(
            inspect(key),
            vec![DebugValue { hook: 2, label: "firstName: Juha".to_string(), revision: 2 }]
        );
    }

    #[test]
    fn values_are_kept_in_hook_order() {
        let key = Key::fresh();
        publish(key, 5, "b".to_string());
        publish(key, 1, "a".to_string());
        let hooks: Vec<u16> = inspect(key).iter().map(|value| value.hook).collect();
        assert_eq!(hooks, vec![1, 5]);
    }

    #[test]
    fn forgetting_removes_everything() {
        let key = Key::fresh();
        publish(key, 0, "x".to_string());
        forget(key);
        assert!(inspect(key).is_empty());
    }
}
