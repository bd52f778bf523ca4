use thiserror::Error;

/// Errors a translation can end with.
///
/// Malformed markup is never an error: unterminated styles are closed at end
/// of input, unmatched closers are emitted verbatim, and broken template
/// expressions degrade to a sentinel value. `NotEnoughMemory` is the one
/// recoverable outcome — the caller retries with a larger arena.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("not enough memory in the translation arena")]
    NotEnoughMemory,
    /// Reserved; the core currently degrades gracefully instead of using it.
    #[error("bad markup")]
    BadMarkup,
    /// A state-machine invariant was violated. Should never escape a correct
    /// build; it flags an engine bug, not a markup problem.
    #[error("internal parser state error")]
    Internal,
    /// Error raised by a plugin, autoconvert, or hook callback.
    #[error("callback error: {0}")]
    Callback(String),
}

pub type EngineResult<T> = Result<T, EngineError>;
