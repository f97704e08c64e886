use thiserror::Error;

/// The failure value of this crate.
///
/// Parsing has exactly one failure shape: a human readable message. There is
/// no structured source location — a parser here consumes opaque tokens, not
/// positioned bytes, so location tracking (if wanted) belongs to the token
/// type or to the layer producing the tokens.
///
/// A `ParseError` is produced in two places:
///
/// * by the driver, when a parser reports [`Step::Error`][crate::Step::Error]
///   and no enclosing combinator recovers from it, and
/// * by [`Parser::extract`][crate::Parser::extract], when the input ends
///   before the parser has committed to a result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("parse error: {msg}")]
pub struct ParseError {
    /// Description of what went wrong.
    pub msg: String,
}

impl ParseError {
    /// Creates a `ParseError` from a message.
    #[cold]
    pub fn new(msg: impl Into<String>) -> Self {
        ParseError { msg: msg.into() }
    }
}
