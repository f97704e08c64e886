//! Monadic sequencing: the follow-up parser is built from the first result.

use crate::{ParseError, Parser, Step};

/// State of [`concat_map`]: the first parser, or the dynamically built
/// second parser together with its state.
pub enum ConcatMapState<SP, Q, SQ> {
    /// The first parser is consuming input.
    First(SP),
    /// The second parser was built from the first result and is consuming
    /// input.
    Second(Q, SQ),
}

/// See [`concat_map`].
pub struct ConcatMap<P, K> {
    parser: P,
    k: K,
}

/// Runs `parser`, builds a second parser from its result with `k`, and
/// continues with that.
///
/// The second parser is constructed once, when the first one finishes, and
/// lives inside the combinator state from then on. Like
/// [`split_with`][crate::split_with], the composite stays uncommitted while
/// the first parser runs, and every layer of nesting inspects every token it
/// forwards.
pub fn concat_map<T, P, K, Q>(k: K, parser: P) -> ConcatMap<P, K>
where
    P: Parser<T>,
    K: FnMut(P::Output) -> Q,
    Q: Parser<T>,
{
    ConcatMap { parser, k }
}

impl<T, P, K, Q> Parser<T> for ConcatMap<P, K>
where
    P: Parser<T>,
    K: FnMut(P::Output) -> Q,
    Q: Parser<T>,
{
    type Output = Q::Output;
    type State = ConcatMapState<P::State, Q, Q::State>;

    fn init(&mut self) -> Self::State {
        ConcatMapState::First(self.parser.init())
    }

    fn step(&mut self, state: Self::State, token: T) -> Step<Self::State, Q::Output> {
        match state {
            ConcatMapState::First(sp) => match self.parser.step(sp, token) {
                Step::Commit(_, sp) => Step::Continue(0, ConcatMapState::First(sp)),
                Step::CommitRewind(n, sp) | Step::Continue(n, sp) => {
                    Step::Continue(n, ConcatMapState::First(sp))
                }
                Step::Done(n, b) => {
                    let mut q = (self.k)(b);
                    let sq = q.init();
                    Step::Continue(n, ConcatMapState::Second(q, sq))
                }
                Step::Error(msg) => Step::Error(msg),
            },
            ConcatMapState::Second(mut q, sq) => q
                .step(sq, token)
                .map_state(|sq| ConcatMapState::Second(q, sq)),
        }
    }

    fn extract(&mut self, state: Self::State) -> Result<Q::Output, ParseError> {
        match state {
            ConcatMapState::First(sp) => {
                let b = self.parser.extract(sp)?;
                let mut q = (self.k)(b);
                let sq = q.init();
                q.extract(sq)
            }
            ConcatMapState::Second(mut q, sq) => q.extract(sq),
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::token::{satisfy, take};
    use crate::{fold, parse};

    fn any() -> impl Parser<u8, Output = u8> {
        satisfy(|_: &u8| true)
    }

    #[test]
    fn second_parser_depends_on_first_result() {
        // Length-prefixed run: the first token says how many to take.
        let mut parser = concat_map(|n: u8| take(n as usize, fold::collect()), any());
        let result = parse(&mut parser, [3u8, 10, 11, 12, 13]);
        assert_eq!(result, Ok((vec![10, 11, 12], vec![13])));
    }

    #[test]
    fn first_failure_propagates() {
        let mut parser = concat_map(|n: u8| take(n as usize, fold::collect()), satisfy(|&t: &u8| t > 100));
        assert_matches!(parse(&mut parser, [1u8, 2]), Err(..));
    }

    #[test]
    fn extract_builds_the_second_parser_mid_first() {
        use crate::pure;
        let mut parser = concat_map::<u8, _, _, _>(|n: u8| pure(n * 2), pure(21u8));
        assert_eq!(parse(&mut parser, [0u8; 0]), Ok((42, vec![])));
    }

    #[test]
    fn associativity_is_observational() {
        // (p >>= f) >>= g against p >>= (x -> f x >>= g), over inputs where
        // the chain succeeds and where it fails.
        let f = |n: u8| take(n as usize, fold::count());
        let g = |c: usize| take(c, fold::collect());

        let mut lhs = concat_map(g, concat_map(f, any()));
        let mut rhs = concat_map(move |x: u8| concat_map(g, f(x)), any());

        let input = [2u8, 9, 9, 7, 8, 5];
        assert_eq!(parse(&mut lhs, input), parse(&mut rhs, input));

        let short = [2u8, 9];
        assert_eq!(parse(&mut lhs, short), parse(&mut rhs, short));
    }
}
