use crate::source::SourceError;

/// Errors of a check run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The current item was given up, after reporting the reason. The run itself can continue.
    #[error("check skipped")]
    Continue,
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),
    #[error("source error: {0}")]
    Source(#[source] SourceError),
}

impl Error {
    /// Check if the run can continue with the next item.
    pub fn is_continue(&self) -> bool {
        matches!(self, Self::Continue)
    }
}
