//! Fold-driven repetition of a parser.

use crate::{Fold, ParseError, Parser, Step};

/// Iteration state shared by [`split_many`] and [`split_some`].
pub struct RepeatState<SP, SF> {
    /// State of the in-flight iteration of the repeated parser.
    inner: SP,
    /// Tokens consumed by the in-flight iteration and not yet committed.
    held: usize,
    /// Accumulation state of the companion fold.
    acc: SF,
    /// Whether at least one iteration has completed.
    succeeded: bool,
}

/// See [`split_many`].
pub struct SplitMany<P, F> {
    parser: P,
    fold: F,
}

/// Runs `parser` zero or more times, folding every result into `fold`.
///
/// Each completed iteration commits: its tokens are released and the
/// leftover tokens of the iteration replay into the next one. When an
/// iteration fails instead, the tokens it consumed are handed back and the
/// accumulated result so far is the result of the repetition. Accumulation
/// is strict; there is no lazy variant.
pub fn split_many<T, P, F>(fold: F, parser: P) -> SplitMany<P, F>
where
    P: Parser<T>,
    F: Fold<P::Output>,
{
    SplitMany { parser, fold }
}

/// See [`split_some`].
pub struct SplitSome<P, F> {
    parser: P,
    fold: F,
}

/// Runs `parser` one or more times, folding every result into `fold`.
///
/// Identical to [`split_many`] except that a failure before the first
/// completed iteration fails the whole repetition.
pub fn split_some<T, P, F>(fold: F, parser: P) -> SplitSome<P, F>
where
    P: Parser<T>,
    F: Fold<P::Output>,
{
    SplitSome { parser, fold }
}

/// One step of the shared repetition machine.
///
/// `min_one` selects the failure behavior before the first completed
/// iteration: propagate (`split_some`) or finish with the accumulation so
/// far (`split_many`).
fn repeat_step<T, P, F>(
    parser: &mut P,
    fold: &mut F,
    state: RepeatState<P::State, F::State>,
    token: T,
    min_one: bool,
) -> Step<RepeatState<P::State, F::State>, F::Output>
where
    P: Parser<T>,
    F: Fold<P::Output>,
{
    let RepeatState {
        inner,
        held,
        acc,
        succeeded,
    } = state;

    match parser.step(inner, token) {
        Step::Commit(_, inner) => Step::Continue(
            0,
            RepeatState {
                inner,
                held: held + 1,
                acc,
                succeeded,
            },
        ),
        Step::CommitRewind(n, inner) | Step::Continue(n, inner) => {
            let (held, overflow) = (held + 1).overflowing_sub(n);
            if overflow {
                rewound_out();
            }
            Step::Continue(
                n,
                RepeatState {
                    inner,
                    held,
                    acc,
                    succeeded,
                },
            )
        }
        Step::Done(n, b) => {
            // Commit the finished iteration and replay its leftover tokens
            // into a fresh one.
            let acc = fold.step(acc, b);
            Step::CommitRewind(
                n,
                RepeatState {
                    inner: parser.init(),
                    held: 0,
                    acc,
                    succeeded: true,
                },
            )
        }
        Step::Error(msg) => {
            if min_one && !succeeded {
                Step::Error(msg)
            } else {
                Step::Done(held + 1, fold.extract(acc))
            }
        }
    }
}

/// Final extract of the shared repetition machine.
///
/// A partial last iteration that can finalize contributes its value; one
/// that cannot is dropped and the accumulation so far is returned — except
/// for `split_some` before any success, where the failure propagates.
fn repeat_extract<T, P, F>(
    parser: &mut P,
    fold: &mut F,
    state: RepeatState<P::State, F::State>,
    min_one: bool,
) -> Result<F::Output, ParseError>
where
    P: Parser<T>,
    F: Fold<P::Output>,
{
    let RepeatState {
        inner,
        acc,
        succeeded,
        ..
    } = state;

    match parser.extract(inner) {
        Ok(b) => {
            let acc = fold.step(acc, b);
            Ok(fold.extract(acc))
        }
        Err(err) if min_one && !succeeded => Err(err),
        Err(_) => Ok(fold.extract(acc)),
    }
}

#[cold]
#[inline(never)]
fn rewound_out() -> ! {
    panic!("repeated parser rewound past the start of its iteration");
}

impl<T, P, F> Parser<T> for SplitMany<P, F>
where
    P: Parser<T>,
    F: Fold<P::Output>,
{
    type Output = F::Output;
    type State = RepeatState<P::State, F::State>;

    fn init(&mut self) -> Self::State {
        RepeatState {
            inner: self.parser.init(),
            held: 0,
            acc: self.fold.init(),
            succeeded: false,
        }
    }

    fn step(&mut self, state: Self::State, token: T) -> Step<Self::State, F::Output> {
        repeat_step(&mut self.parser, &mut self.fold, state, token, false)
    }

    fn extract(&mut self, state: Self::State) -> Result<F::Output, ParseError> {
        repeat_extract(&mut self.parser, &mut self.fold, state, false)
    }
}

impl<T, P, F> Parser<T> for SplitSome<P, F>
where
    P: Parser<T>,
    F: Fold<P::Output>,
{
    type Output = F::Output;
    type State = RepeatState<P::State, F::State>;

    fn init(&mut self) -> Self::State {
        RepeatState {
            inner: self.parser.init(),
            held: 0,
            acc: self.fold.init(),
            succeeded: false,
        }
    }

    fn step(&mut self, state: Self::State, token: T) -> Step<Self::State, F::Output> {
        repeat_step(&mut self.parser, &mut self.fold, state, token, true)
    }

    fn extract(&mut self, state: Self::State) -> Result<F::Output, ParseError> {
        repeat_extract(&mut self.parser, &mut self.fold, state, true)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::token::satisfy;
    use crate::{fold, parse};

    fn below(limit: u8) -> impl Parser<u8, Output = u8> {
        satisfy(move |&t: &u8| t < limit)
    }

    #[test]
    fn many_collects_the_matching_prefix() {
        let mut parser = split_many(fold::collect(), below(5));
        let result = parse(&mut parser, [1u8, 2, 3, 5, 6]);
        assert_eq!(result, Ok((vec![1, 2, 3], vec![5, 6])));
    }

    #[test]
    fn many_accepts_zero_iterations() {
        let mut parser = split_many(fold::collect(), below(5));
        assert_eq!(parse(&mut parser, [9u8, 9]), Ok((vec![], vec![9, 9])));
        assert_eq!(parse(&mut parser, [0u8; 0]), Ok((vec![], vec![])));
    }

    #[test]
    fn some_requires_one_iteration() {
        let mut parser = split_some(fold::collect(), below(5));
        assert_matches!(parse(&mut parser, [9u8]), Err(..));
        assert_matches!(parse(&mut parser, [0u8; 0]), Err(..));
    }

    #[test]
    fn some_behaves_like_many_after_one_success() {
        let mut parser = split_some(fold::collect(), below(5));
        assert_eq!(parse(&mut parser, [1u8, 9]), Ok((vec![1], vec![9])));
    }

    #[test]
    fn partial_last_iteration_is_dropped_at_end_of_input() {
        use crate::split_with;
        // Each iteration needs two tokens; the input ends after the first
        // token of the third iteration.
        let pair = |a, b| (a, b);
        let item = || split_with(pair, below(5), below(5));
        let mut parser = split_many(fold::collect(), item());
        let result = parse(&mut parser, [1u8, 2, 3, 4, 1]);
        assert_eq!(result, Ok((vec![(1, 2), (3, 4)], vec![])));
    }

    #[test]
    fn finalizable_last_iteration_contributes_at_end_of_input() {
        use crate::token::take_while;
        // take_while finalizes cleanly mid-iteration, so the trailing run
        // is folded in.
        let mut parser = split_many(
            fold::collect(),
            crate::then(below(5), take_while(|&t: &u8| t >= 5, fold::collect())),
        );
        let result = parse(&mut parser, [1u8, 7, 8, 2, 9]);
        assert_eq!(result, Ok((vec![vec![7, 8], vec![9]], vec![])));
    }

    #[test]
    fn iteration_count_is_unbounded_by_the_buffer() {
        // Every iteration commits, so a long input stays cheap; this mostly
        // guards against the commit being dropped by accident.
        let tokens = vec![1u8; 10_000];
        let mut parser = split_many(fold::count(), below(5));
        assert_eq!(parse(&mut parser, tokens), Ok((10_000, vec![])));
    }
}
