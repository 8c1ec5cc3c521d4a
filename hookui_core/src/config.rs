/// Knobs of the evaluator's render loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderConfig {
    /// How often a component may be rendered again because it queued state
    /// updates while rendering, before the evaluator gives up. The same limit
    /// bounds the number of commits a single update cycle may run when effects
    /// keep queueing updates.
    pub max_render_passes: usize,
}

impl RenderConfig {
    pub const DEFAULT_MAX_RENDER_PASSES: usize = 25;

    pub fn with_max_render_passes(self, max_render_passes: usize) -> Self {
        Self { max_render_passes, ..self }
    }
}

impl Default for RenderConfig {
    fn default() -> Self { Self { max_render_passes: Self::DEFAULT_MAX_RENDER_PASSES } }
}
