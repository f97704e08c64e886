/// Command returned by a single [`Parser::step`][crate::Parser::step] call.
///
/// The driver feeds one token per step and interprets the returned command to
/// move its cursor, trim its backtrack buffer or finish the parse. All counts
/// are token offsets relative to the position just past the token that was
/// fed.
///
/// Two of the commands commit: after a parser has returned [`Commit`] or
/// [`CommitRewind`] once, it must never return [`Error`] from any later step,
/// and its [`extract`][crate::Parser::extract] must succeed for every state
/// reachable from that point on. The driver relies on this to discard
/// buffered tokens; an enclosing [`alt`][crate::alt] relies on it to bound
/// how much input it has to keep replayable.
///
/// [`Commit`]: Step::Commit
/// [`CommitRewind`]: Step::CommitRewind
/// [`Error`]: Step::Error
#[derive(Debug, PartialEq, Eq)]
pub enum Step<S, B> {
    /// Commit: a result is extractable from here on. The driver may drop all
    /// buffered tokens except the `n` most recent ones before the cursor.
    Commit(usize, S),
    /// Commit as in [`Commit`][Step::Commit], then move the cursor back over
    /// the `n` retained tokens so they are fed again.
    CommitRewind(usize, S),
    /// No commit: the token was processed, move the cursor back by `n`
    /// tokens. `n = 0` simply asks for the next token. `n` must not reach
    /// back past the last commit point.
    Continue(usize, S),
    /// Success: the parse is finished. The `n` trailing tokens — counting
    /// the token that was just fed, if unused — are handed back as leftover.
    Done(usize, B),
    /// Failure: the driver rewinds to the start of the uncommitted region,
    /// where an enclosing alternative may take over; at the top level this
    /// becomes a [`ParseError`][crate::ParseError].
    Error(String),
}

impl<S, B> Step<S, B> {
    /// Applies `f` to the result carried by [`Done`][Step::Done], passing
    /// every other command through unchanged.
    #[inline]
    pub fn map_result<C>(self, f: impl FnOnce(B) -> C) -> Step<S, C> {
        match self {
            Step::Commit(n, s) => Step::Commit(n, s),
            Step::CommitRewind(n, s) => Step::CommitRewind(n, s),
            Step::Continue(n, s) => Step::Continue(n, s),
            Step::Done(n, b) => Step::Done(n, f(b)),
            Step::Error(msg) => Step::Error(msg),
        }
    }

    /// Applies `f` to the state carried by the non-terminal commands,
    /// passing [`Done`][Step::Done] and [`Error`][Step::Error] through
    /// unchanged.
    #[inline]
    pub fn map_state<S2>(self, f: impl FnOnce(S) -> S2) -> Step<S2, B> {
        match self {
            Step::Commit(n, s) => Step::Commit(n, f(s)),
            Step::CommitRewind(n, s) => Step::CommitRewind(n, f(s)),
            Step::Continue(n, s) => Step::Continue(n, f(s)),
            Step::Done(n, b) => Step::Done(n, b),
            Step::Error(msg) => Step::Error(msg),
        }
    }
}
