use crate::{
    context::context::CommitQueue,
    hooks::{debug_value, effect::EffectStore},
    CallbackContext,
    DebugValue,
    Error,
    Key,
    Node,
    PatchedTree,
    RenderConfig,
    WidgetContext,
};
use derivative::Derivative;
use std::sync::Arc;

type ComponentFn = Box<dyn Fn(&mut WidgetContext) -> Node>;

/// Drives one mounted component: applies queued state updates, renders,
/// commits and runs effects. Everything happens synchronously on the calling
/// thread; an update cycle only starts when `update` (or `click`) is called.
#[derive(Derivative)]
#[derivative(Debug)]
pub struct Evaluator {
    key: Key,
    config: RenderConfig,
    #[derivative(Debug = "ignore")]
    gen: ComponentFn,
    #[derivative(Debug = "ignore")]
    tree: Arc<PatchedTree>,
    effects: EffectStore,
    rendered: Option<Node>,
    commits: u64,
}

impl Evaluator {
    /// mount `component` and commit its first render
    pub fn new(component: impl Fn(&mut WidgetContext) -> Node + 'static) -> Result<Self, Error> {
        Self::with_config(component, RenderConfig::default())
    }

    pub fn with_config(
        component: impl Fn(&mut WidgetContext) -> Node + 'static,
        config: RenderConfig,
    ) -> Result<Self, Error> {
        let mut evaluator = Self {
            key: Key::fresh(),
            config,
            gen: Box::new(component),
            tree: Arc::new(Default::default()),
            effects: Default::default(),
            rendered: None,
            commits: 0,
        };
        log::debug!("mounting {:?}", evaluator.key);
        evaluator.commit()?;
        evaluator.settle()?;
        Ok(evaluator)
    }

    pub fn key(&self) -> Key { self.key }

    /// the tree of the last commit, `None` after unmount
    pub fn rendered(&self) -> Option<&Node> { self.rendered.as_ref() }

    pub fn is_mounted(&self) -> bool { self.rendered.is_some() }

    /// how many render passes were committed so far
    pub fn commits(&self) -> u64 { self.commits }

    pub fn debug_values(&self) -> Vec<DebugValue> { debug_value::inspect(self.key) }

    pub fn callback_context(&self) -> CallbackContext {
        CallbackContext { tree: self.tree.clone(), key: self.key }
    }

    /// Apply queued state updates and re-render if there were any. Returns
    /// whether anything was committed.
    pub fn update(&mut self) -> Result<bool, Error> {
        self.ensure_mounted()?;
        if !self.tree.has_patches() {
            return Ok(false);
        }
        self.settle()?;
        Ok(true)
    }

    /// dispatch a click to the element named `target`, then run an update
    /// cycle
    pub fn click(&mut self, target: &str) -> Result<bool, Error> {
        self.ensure_mounted()?;
        let on_click = self
            .rendered
            .as_ref()
            .and_then(|node| node.find(target))
            .and_then(|element| element.on_click.clone())
            .ok_or_else(|| Error::NoSuchTarget(target.to_string()))?;

        log::trace!("clicked {:?} of {:?}", target, self.key);
        on_click(&self.callback_context());
        self.update()
    }

    /// run all effect cleanups and throw away the component's state
    pub fn unmount(&mut self) -> Result<(), Error> {
        self.ensure_mounted()?;
        self.teardown();
        Ok(())
    }

    fn ensure_mounted(&self) -> Result<(), Error> {
        if self.is_mounted() {
            Ok(())
        } else {
            Err(Error::Unmounted)
        }
    }

    // commit until effects stop queueing updates
    fn settle(&mut self) -> Result<(), Error> {
        let mut commits = 0;
        while self.tree.has_patches() {
            commits += 1;
            if commits > self.config.max_render_passes {
                return Err(Error::TooManyRenderPasses { limit: self.config.max_render_passes });
            }
            let touched = self.tree.update_tree().count();
            log::trace!("applied {} queued updates to {:?}", touched, self.key);
            self.commit()?;
        }
        Ok(())
    }

    fn render(&mut self) -> Result<(Node, CommitQueue), Error> {
        let mut passes = 0;
        loop {
            passes += 1;
            if passes > self.config.max_render_passes {
                return Err(Error::TooManyRenderPasses { limit: self.config.max_render_passes });
            }

            let mut queue = CommitQueue::default();
            let node = {
                let mut context = WidgetContext::for_component(
                    self.key,
                    self.tree.clone(),
                    &self.effects,
                    &mut queue,
                );
                (self.gen)(&mut context)
            };

            if !self.tree.has_patches() {
                return Ok((node, queue));
            }

            let touched = self.tree.update_tree().count();
            log::trace!(
                "render pass {} of {:?} queued {} updates, rendering again",
                passes,
                self.key,
                touched
            );
        }
    }

    fn commit(&mut self) -> Result<(), Error> {
        let (node, queue) = self.render()?;
        self.rendered = Some(node);
        self.commits += 1;
        log::debug!("committed render {} of {:?}", self.commits, self.key);

        for (hook, label) in queue.debug_values {
            debug_value::publish(self.key, hook, label);
        }

        let context = self.callback_context();
        for effect in queue.effects {
            self.effects.run(effect, &context);
        }
        Ok(())
    }

    fn teardown(&mut self) {
        log::debug!("unmounting {:?} with {} effects", self.key, self.effects.len());
        self.effects.clear();
        debug_value::forget(self.key);
        self.tree.remove_widget(&self.key);
        self.rendered = None;
    }
}

impl Drop for Evaluator {
    fn drop(&mut self) {
        if self.is_mounted() {
            self.teardown();
        }
    }
}
