use crate::{CallbackContext, WidgetContext};

pub trait ContextAfterFrame {
    /// Run `callback` after every commit of the component, including the
    /// first one. Like with [`ContextEffect::effect`](crate::ContextEffect),
    /// the returned value is dropped right before the next run or on unmount.
    fn after_frame<T: 'static>(&mut self, callback: impl FnOnce(&CallbackContext) -> T + 'static);
}
impl<'b> ContextAfterFrame for WidgetContext<'b> {
    fn after_frame<T: 'static>(&mut self, callback: impl FnOnce(&CallbackContext) -> T + 'static) {
        let hook = self.key_for_hook().1;
        self.schedule_effect(hook, None, callback)
    }
}
