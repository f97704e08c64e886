//! Sequential composition of two parsers.

use crate::{ParseError, Parser, Step};

/// State of [`split_with`]: running the left parser, or running the right
/// parser with the left result in hand.
pub enum SplitWithState<SL, BL, SR> {
    /// The left parser is still consuming input.
    Left(SL),
    /// The left result is captured; the right parser is consuming input.
    Right(BL, SR),
}

/// See [`split_with`].
pub struct SplitWith<L, R, F> {
    left: L,
    right: R,
    combine: F,
}

/// Runs `left`, then `right` on the remaining input, combining both results
/// with `combine`.
///
/// The composite stays uncommitted while the left parser runs: even commits
/// of the left parser are withheld from the driver, so an enclosing
/// [`alt`][crate::alt] can still rewind over the whole left run. Only once
/// the right parser is active do commits pass through.
///
/// Every composition layer inspects every token it forwards, so a long chain
/// of `split_with`/`then` calls pays for its depth on each token.
pub fn split_with<T, L, R, F, C>(combine: F, left: L, right: R) -> SplitWith<L, R, F>
where
    L: Parser<T>,
    R: Parser<T>,
    F: FnMut(L::Output, R::Output) -> C,
{
    SplitWith { left, right, combine }
}

impl<T, L, R, F, C> Parser<T> for SplitWith<L, R, F>
where
    L: Parser<T>,
    R: Parser<T>,
    F: FnMut(L::Output, R::Output) -> C,
{
    type Output = C;
    type State = SplitWithState<L::State, L::Output, R::State>;

    fn init(&mut self) -> Self::State {
        SplitWithState::Left(self.left.init())
    }

    fn step(&mut self, state: Self::State, token: T) -> Step<Self::State, C> {
        match state {
            SplitWithState::Left(sl) => match self.left.step(sl, token) {
                Step::Commit(_, sl) => Step::Continue(0, SplitWithState::Left(sl)),
                Step::CommitRewind(n, sl) => Step::Continue(n, SplitWithState::Left(sl)),
                Step::Continue(n, sl) => Step::Continue(n, SplitWithState::Left(sl)),
                Step::Done(n, b) => {
                    // The n unused tokens replay into the right parser.
                    Step::Continue(n, SplitWithState::Right(b, self.right.init()))
                }
                Step::Error(msg) => Step::Error(msg),
            },
            SplitWithState::Right(b, sr) => match self.right.step(sr, token) {
                Step::Commit(n, sr) => Step::Commit(n, SplitWithState::Right(b, sr)),
                Step::CommitRewind(n, sr) => {
                    Step::CommitRewind(n, SplitWithState::Right(b, sr))
                }
                Step::Continue(n, sr) => Step::Continue(n, SplitWithState::Right(b, sr)),
                Step::Done(n, c) => Step::Done(n, (self.combine)(b, c)),
                Step::Error(msg) => Step::Error(msg),
            },
        }
    }

    fn extract(&mut self, state: Self::State) -> Result<C, ParseError> {
        // When the input ends mid-left, both parsers still finalize: the
        // right parser runs on zero tokens.
        match state {
            SplitWithState::Left(sl) => {
                let b = self.left.extract(sl)?;
                let sr = self.right.init();
                let c = self.right.extract(sr)?;
                Ok((self.combine)(b, c))
            }
            SplitWithState::Right(b, sr) => {
                let c = self.right.extract(sr)?;
                Ok((self.combine)(b, c))
            }
        }
    }
}

/// State of [`then`].
pub enum ThenState<SL, SR> {
    /// The left parser is still consuming input.
    Left(SL),
    /// The left result is discarded; the right parser is consuming input.
    Right(SR),
}

/// See [`then`].
pub struct Then<L, R> {
    left: L,
    right: R,
}

/// Runs `left`, then `right`, keeping only the right result.
///
/// Equivalent to `split_with(|_, b| b, left, right)` with a state that does
/// not carry the discarded left result.
pub fn then<T, L, R>(left: L, right: R) -> Then<L, R>
where
    L: Parser<T>,
    R: Parser<T>,
{
    Then { left, right }
}

impl<T, L, R> Parser<T> for Then<L, R>
where
    L: Parser<T>,
    R: Parser<T>,
{
    type Output = R::Output;
    type State = ThenState<L::State, R::State>;

    fn init(&mut self) -> Self::State {
        ThenState::Left(self.left.init())
    }

    fn step(&mut self, state: Self::State, token: T) -> Step<Self::State, R::Output> {
        match state {
            ThenState::Left(sl) => match self.left.step(sl, token) {
                Step::Commit(_, sl) => Step::Continue(0, ThenState::Left(sl)),
                Step::CommitRewind(n, sl) => Step::Continue(n, ThenState::Left(sl)),
                Step::Continue(n, sl) => Step::Continue(n, ThenState::Left(sl)),
                Step::Done(n, _) => Step::Continue(n, ThenState::Right(self.right.init())),
                Step::Error(msg) => Step::Error(msg),
            },
            ThenState::Right(sr) => self.right.step(sr, token).map_state(ThenState::Right),
        }
    }

    fn extract(&mut self, state: Self::State) -> Result<R::Output, ParseError> {
        match state {
            ThenState::Left(sl) => {
                self.left.extract(sl)?;
                let sr = self.right.init();
                self.right.extract(sr)
            }
            ThenState::Right(sr) => self.right.extract(sr),
        }
    }
}
