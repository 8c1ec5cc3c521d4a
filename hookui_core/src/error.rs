#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("component did not settle after {limit} render passes; is state updated unconditionally while rendering?")]
    TooManyRenderPasses { limit: usize },
    #[error("no clickable element named {0:?} in the rendered tree")]
    NoSuchTarget(String),
    #[error("the component was already unmounted")]
    Unmounted,
}
