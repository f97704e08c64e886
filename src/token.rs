//! Leaf parsers over individual tokens.
//!
//! These are the protocol-level building blocks: each one documents, through
//! its choice of [`Step`] commands, when a parser may commit. A leaf commits
//! a token only once no later failure is possible — `take_eq` for example
//! stays uncommitted over its whole run because it can still fail at end of
//! input, while `take_while` commits every token it accepts.

use std::marker::PhantomData;

use crate::{Fold, ParseError, Parser, Step};

/// See [`satisfy`].
pub struct Satisfy<F> {
    pred: F,
}

/// Consumes a single token matching `pred`; fails on a mismatch or on end
/// of input.
pub fn satisfy<T, F: FnMut(&T) -> bool>(pred: F) -> Satisfy<F> {
    Satisfy { pred }
}

impl<T, F: FnMut(&T) -> bool> Parser<T> for Satisfy<F> {
    type Output = T;
    type State = ();

    fn init(&mut self) -> Self::State {}

    fn step(&mut self, _state: Self::State, token: T) -> Step<Self::State, T> {
        if (self.pred)(&token) {
            Step::Done(0, token)
        } else {
            Step::Error("satisfy: token rejected by predicate".into())
        }
    }

    fn extract(&mut self, _state: Self::State) -> Result<T, ParseError> {
        Err(ParseError::new("satisfy: end of input"))
    }
}

/// See [`peek`].
pub struct Peek<T> {
    _token: PhantomData<fn() -> T>,
}

/// Returns the next token without consuming it; fails on end of input.
pub fn peek<T>() -> Peek<T> {
    Peek { _token: PhantomData }
}

impl<T> Parser<T> for Peek<T> {
    type Output = T;
    type State = ();

    fn init(&mut self) -> Self::State {}

    fn step(&mut self, _state: Self::State, token: T) -> Step<Self::State, T> {
        Step::Done(1, token)
    }

    fn extract(&mut self, _state: Self::State) -> Result<T, ParseError> {
        Err(ParseError::new("peek: end of input"))
    }
}

/// See [`eof`].
pub struct Eof;

/// Succeeds exactly when no input is left.
pub fn eof() -> Eof {
    Eof
}

impl<T> Parser<T> for Eof {
    type Output = ();
    type State = ();

    fn init(&mut self) -> Self::State {}

    fn step(&mut self, _state: Self::State, _token: T) -> Step<Self::State, ()> {
        Step::Error("eof: expected end of input".into())
    }

    fn extract(&mut self, _state: Self::State) -> Result<(), ParseError> {
        Ok(())
    }
}

/// See [`from_fold`].
pub struct FromFold<F> {
    fold: F,
}

/// Runs a fold over the entire input.
///
/// Never fails and commits every token; the result is whatever the fold
/// accumulated when the input ends.
pub fn from_fold<T, F: Fold<T>>(fold: F) -> FromFold<F> {
    FromFold { fold }
}

impl<T, F: Fold<T>> Parser<T> for FromFold<F> {
    type Output = F::Output;
    type State = F::State;

    fn init(&mut self) -> Self::State {
        self.fold.init()
    }

    fn step(&mut self, state: Self::State, token: T) -> Step<Self::State, F::Output> {
        Step::Commit(0, self.fold.step(state, token))
    }

    fn extract(&mut self, state: Self::State) -> Result<F::Output, ParseError> {
        Ok(self.fold.extract(state))
    }
}

/// See [`take`].
pub struct Take<F> {
    limit: usize,
    fold: F,
}

/// Folds up to `limit` tokens.
///
/// Never fails: on shorter input the accumulation of what was available is
/// the result. Use [`take_eq`] to require the full count.
pub fn take<T, F: Fold<T>>(limit: usize, fold: F) -> Take<F> {
    Take { limit, fold }
}

impl<T, F: Fold<T>> Parser<T> for Take<F> {
    type Output = F::Output;
    type State = (usize, F::State);

    fn init(&mut self) -> Self::State {
        (0, self.fold.init())
    }

    fn step(&mut self, (taken, acc): Self::State, token: T) -> Step<Self::State, F::Output> {
        if taken == self.limit {
            // Only reachable for limit 0: the very first token is unused.
            return Step::Done(1, self.fold.extract(acc));
        }
        let acc = self.fold.step(acc, token);
        let taken = taken + 1;
        if taken == self.limit {
            Step::Done(0, self.fold.extract(acc))
        } else {
            Step::Commit(0, (taken, acc))
        }
    }

    fn extract(&mut self, (_, acc): Self::State) -> Result<F::Output, ParseError> {
        Ok(self.fold.extract(acc))
    }
}

/// See [`take_eq`].
pub struct TakeEq<F> {
    limit: usize,
    fold: F,
}

/// Folds exactly `limit` tokens; fails when the input ends earlier.
///
/// Stays uncommitted over its whole run — under [`alt`][crate::alt] a short
/// input backtracks to the alternative.
pub fn take_eq<T, F: Fold<T>>(limit: usize, fold: F) -> TakeEq<F> {
    TakeEq { limit, fold }
}

impl<T, F: Fold<T>> Parser<T> for TakeEq<F> {
    type Output = F::Output;
    type State = (usize, F::State);

    fn init(&mut self) -> Self::State {
        (0, self.fold.init())
    }

    fn step(&mut self, (taken, acc): Self::State, token: T) -> Step<Self::State, F::Output> {
        if taken == self.limit {
            return Step::Done(1, self.fold.extract(acc));
        }
        let acc = self.fold.step(acc, token);
        let taken = taken + 1;
        if taken == self.limit {
            Step::Done(0, self.fold.extract(acc))
        } else {
            Step::Continue(0, (taken, acc))
        }
    }

    fn extract(&mut self, (taken, acc): Self::State) -> Result<F::Output, ParseError> {
        if taken == self.limit {
            Ok(self.fold.extract(acc))
        } else {
            Err(ParseError::new(format!(
                "take_eq: expected {} tokens, input ended after {}",
                self.limit, taken
            )))
        }
    }
}

/// See [`take_ge`].
pub struct TakeGe<F> {
    min: usize,
    fold: F,
}

/// Folds all remaining input, failing unless at least `min` tokens were
/// available.
///
/// Uncommitted until the minimum is reached, committed afterwards.
pub fn take_ge<T, F: Fold<T>>(min: usize, fold: F) -> TakeGe<F> {
    TakeGe { min, fold }
}

impl<T, F: Fold<T>> Parser<T> for TakeGe<F> {
    type Output = F::Output;
    type State = (usize, F::State);

    fn init(&mut self) -> Self::State {
        (0, self.fold.init())
    }

    fn step(&mut self, (taken, acc): Self::State, token: T) -> Step<Self::State, F::Output> {
        let acc = self.fold.step(acc, token);
        let taken = taken + 1;
        if taken >= self.min {
            Step::Commit(0, (taken, acc))
        } else {
            Step::Continue(0, (taken, acc))
        }
    }

    fn extract(&mut self, (taken, acc): Self::State) -> Result<F::Output, ParseError> {
        if taken >= self.min {
            Ok(self.fold.extract(acc))
        } else {
            Err(ParseError::new(format!(
                "take_ge: expected at least {} tokens, input ended after {}",
                self.min, taken
            )))
        }
    }
}

/// See [`take_while`].
pub struct TakeWhile<P, F> {
    pred: P,
    fold: F,
}

/// Folds the longest prefix of tokens matching `pred`.
///
/// Never fails; the first rejected token is handed back unused.
pub fn take_while<T, P, F>(pred: P, fold: F) -> TakeWhile<P, F>
where
    P: FnMut(&T) -> bool,
    F: Fold<T>,
{
    TakeWhile { pred, fold }
}

impl<T, P, F> Parser<T> for TakeWhile<P, F>
where
    P: FnMut(&T) -> bool,
    F: Fold<T>,
{
    type Output = F::Output;
    type State = F::State;

    fn init(&mut self) -> Self::State {
        self.fold.init()
    }

    fn step(&mut self, acc: Self::State, token: T) -> Step<Self::State, F::Output> {
        if (self.pred)(&token) {
            Step::Commit(0, self.fold.step(acc, token))
        } else {
            Step::Done(1, self.fold.extract(acc))
        }
    }

    fn extract(&mut self, acc: Self::State) -> Result<F::Output, ParseError> {
        Ok(self.fold.extract(acc))
    }
}

/// See [`take_while1`].
pub struct TakeWhile1<P, F> {
    pred: P,
    fold: F,
}

/// Like [`take_while`], but fails unless at least one token matches.
pub fn take_while1<T, P, F>(pred: P, fold: F) -> TakeWhile1<P, F>
where
    P: FnMut(&T) -> bool,
    F: Fold<T>,
{
    TakeWhile1 { pred, fold }
}

impl<T, P, F> Parser<T> for TakeWhile1<P, F>
where
    P: FnMut(&T) -> bool,
    F: Fold<T>,
{
    type Output = F::Output;
    type State = (bool, F::State);

    fn init(&mut self) -> Self::State {
        (false, self.fold.init())
    }

    fn step(&mut self, (matched, acc): Self::State, token: T) -> Step<Self::State, F::Output> {
        if (self.pred)(&token) {
            Step::Commit(0, (true, self.fold.step(acc, token)))
        } else if matched {
            Step::Done(1, self.fold.extract(acc))
        } else {
            Step::Error("take_while1: first token rejected by predicate".into())
        }
    }

    fn extract(&mut self, (matched, acc): Self::State) -> Result<F::Output, ParseError> {
        if matched {
            Ok(self.fold.extract(acc))
        } else {
            Err(ParseError::new("take_while1: end of input"))
        }
    }
}

/// See [`slice_sep_by`].
pub struct SliceSepBy<P, F> {
    is_sep: P,
    fold: F,
}

/// Folds tokens up to the first separator; the separator is consumed and
/// dropped.
///
/// Never fails: input ending without a separator yields the accumulation of
/// everything read.
pub fn slice_sep_by<T, P, F>(is_sep: P, fold: F) -> SliceSepBy<P, F>
where
    P: FnMut(&T) -> bool,
    F: Fold<T>,
{
    SliceSepBy { is_sep, fold }
}

impl<T, P, F> Parser<T> for SliceSepBy<P, F>
where
    P: FnMut(&T) -> bool,
    F: Fold<T>,
{
    type Output = F::Output;
    type State = F::State;

    fn init(&mut self) -> Self::State {
        self.fold.init()
    }

    fn step(&mut self, acc: Self::State, token: T) -> Step<Self::State, F::Output> {
        if (self.is_sep)(&token) {
            Step::Done(0, self.fold.extract(acc))
        } else {
            Step::Commit(0, self.fold.step(acc, token))
        }
    }

    fn extract(&mut self, acc: Self::State) -> Result<F::Output, ParseError> {
        Ok(self.fold.extract(acc))
    }
}

/// See [`look_ahead`].
pub struct LookAhead<P> {
    parser: P,
}

/// Runs `parser` and hands every consumed token back, so the result is
/// produced without advancing the input.
///
/// Commits of the inner parser are suppressed to keep the whole run
/// replayable; a failure of the inner parser is a failure of `look_ahead`.
/// When the input ends mid-run there is no command left to hand tokens
/// back with, so the inner parser's own extract decides the outcome and the
/// consumed tokens stay consumed.
pub fn look_ahead<T, P: Parser<T>>(parser: P) -> LookAhead<P> {
    LookAhead { parser }
}

impl<T, P: Parser<T>> Parser<T> for LookAhead<P> {
    type Output = P::Output;
    type State = (usize, P::State);

    fn init(&mut self) -> Self::State {
        (0, self.parser.init())
    }

    fn step(&mut self, (held, inner): Self::State, token: T) -> Step<Self::State, P::Output> {
        match self.parser.step(inner, token) {
            Step::Commit(_, inner) => Step::Continue(0, (held + 1, inner)),
            Step::CommitRewind(n, inner) | Step::Continue(n, inner) => {
                let (held, overflow) = (held + 1).overflowing_sub(n);
                if overflow {
                    Self::rewound_out();
                }
                Step::Continue(n, (held, inner))
            }
            Step::Done(_, b) => Step::Done(held + 1, b),
            Step::Error(msg) => Step::Error(msg),
        }
    }

    fn extract(&mut self, (_, inner): Self::State) -> Result<P::Output, ParseError> {
        self.parser.extract(inner)
    }
}

impl<P> LookAhead<P> {
    #[cold]
    #[inline(never)]
    fn rewound_out() -> ! {
        panic!("parser under look_ahead rewound past the start of the look-ahead");
    }
}
