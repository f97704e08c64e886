//! Choice between two parsers with automatic backtracking.

use crate::{ParseError, Parser, Step};

/// State of [`alt`]: the left parser with its uncommitted-token count, or
/// the right parser after the left one failed.
pub enum AltState<SL, SR> {
    /// The left parser runs; the counter tracks how many tokens it has
    /// consumed without committing, i.e. how far the driver must rewind to
    /// hand the same input to the right parser.
    Left(usize, SL),
    /// The left parser failed; the right parser runs on the replayed input.
    Right(SR),
}

/// See [`alt`].
pub struct Alt<L, R> {
    left: L,
    right: R,
}

/// Tries `left`; if it fails before committing, runs `right` on the same
/// input.
///
/// While the left parser has not committed, every token it consumes stays
/// buffered. On a left failure the driver rewinds over all of them and the
/// right parser sees the input from the position where the alternative
/// began. Once the left parser commits, the choice is resolved: buffered
/// history is released and a later left failure is a contract violation
/// (see [`Step`]), not a reason to try `right`.
pub fn alt<T, L, R>(left: L, right: R) -> Alt<L, R>
where
    L: Parser<T>,
    R: Parser<T, Output = L::Output>,
{
    Alt { left, right }
}

impl<T, L, R> Parser<T> for Alt<L, R>
where
    L: Parser<T>,
    R: Parser<T, Output = L::Output>,
{
    type Output = L::Output;
    type State = AltState<L::State, R::State>;

    fn init(&mut self) -> Self::State {
        AltState::Left(0, self.left.init())
    }

    fn step(&mut self, state: Self::State, token: T) -> Step<Self::State, L::Output> {
        match state {
            AltState::Left(held, sl) => match self.left.step(sl, token) {
                Step::Commit(n, sl) => Step::Commit(n, AltState::Left(0, sl)),
                Step::CommitRewind(n, sl) => Step::CommitRewind(n, AltState::Left(0, sl)),
                Step::Continue(n, sl) => {
                    let (held, overflow) = (held + 1).overflowing_sub(n);
                    if overflow {
                        Self::rewound_out();
                    }
                    Step::Continue(n, AltState::Left(held, sl))
                }
                Step::Done(n, b) => Step::Done(n, b),
                Step::Error(_) => {
                    // Replay everything the left parser consumed, including
                    // the token that just failed, into the right parser.
                    Step::Continue(held + 1, AltState::Right(self.right.init()))
                }
            },
            AltState::Right(sr) => self.right.step(sr, token).map_state(AltState::Right),
        }
    }

    fn extract(&mut self, state: Self::State) -> Result<L::Output, ParseError> {
        match state {
            AltState::Left(_, sl) => self.left.extract(sl).or_else(|_| {
                // End of input failed the left branch without consuming
                // anything the right branch could want replayed; give the
                // right parser its zero-token parse.
                let sr = self.right.init();
                self.right.extract(sr)
            }),
            AltState::Right(sr) => self.right.extract(sr),
        }
    }
}

impl<L, R> Alt<L, R> {
    #[cold]
    #[inline(never)]
    fn rewound_out() -> ! {
        panic!("left branch of alt rewound past the start of the alternative");
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::token::satisfy;
    use crate::{fail, parse, pure, split_with};

    fn eq(want: u8) -> impl Parser<u8, Output = u8> {
        satisfy(move |&t: &u8| t == want)
    }

    #[test]
    fn first_success_wins() {
        let mut parser = alt(eq(1), eq(2));
        assert_eq!(parse(&mut parser, [1u8, 9]), Ok((1, vec![9])));
    }

    #[test]
    fn falls_through_to_the_right() {
        let mut parser = alt(eq(1), eq(2));
        assert_eq!(parse(&mut parser, [2u8, 9]), Ok((2, vec![9])));
    }

    #[test]
    fn replays_every_left_token_into_the_right() {
        // Left consumes a 1, then rejects the 2; right must see [1, 2] from
        // the start.
        let pair = |a, b| (a, b);
        let mut parser = alt(
            split_with(pair, eq(1), eq(9)),
            split_with(pair, eq(1), eq(2)),
        );
        assert_eq!(parse(&mut parser, [1u8, 2]), Ok(((1, 2), vec![])));
    }

    #[test]
    fn left_identity_of_failure() {
        let mut parser = alt(fail("no"), eq(2));
        assert_eq!(parse(&mut parser, [2u8]), Ok((2, vec![])));
    }

    #[test]
    fn failing_left_on_empty_input_extracts_the_right() {
        let mut parser = alt::<u8, _, _>(fail("no"), pure(5u8));
        assert_eq!(parse(&mut parser, [0u8; 0]), Ok((5, vec![])));
    }

    #[test]
    fn both_failing_fails() {
        let mut parser = alt(eq(1), eq(2));
        assert_matches!(parse(&mut parser, [3u8]), Err(..));
    }
}
