use crate::{ParseError, Parser, ReplayReader, Step};

/// Runs `parser` over the tokens of `reader`, leaving leftover input in the
/// reader.
///
/// This is the streaming entry point: the reader survives the parse, so a
/// sequence of parsers can consume one token source back to back. On success
/// the unused trailing tokens stay buffered in the reader and are the first
/// tokens the next parse sees. On failure the cursor is rewound to the start
/// of the uncommitted region, so the tokens a failed speculative parse
/// consumed can be inspected or retried.
///
/// The loop feeds one token per [`Parser::step`] call and interprets the
/// returned [`Step`]; when the source is exhausted, [`Parser::extract`]
/// produces the final result.
pub fn parse_with<T, P, I>(parser: &mut P, reader: &mut ReplayReader<I>) -> Result<P::Output, ParseError>
where
    T: Clone,
    P: Parser<T>,
    I: Iterator<Item = T>,
{
    let mut state = parser.init();

    while let Some(token) = reader.next_token() {
        match parser.step(state, token) {
            Step::Commit(keep, next) => {
                reader.commit(keep);
                state = next;
            }
            Step::CommitRewind(keep, next) => {
                reader.commit(keep);
                reader.rewind(keep);
                state = next;
            }
            Step::Continue(back, next) => {
                reader.rewind(back);
                state = next;
            }
            Step::Done(unused, value) => {
                reader.rewind(unused);
                reader.commit(0);
                return Ok(value);
            }
            Step::Error(msg) => {
                reader.rewind(reader.cursor());
                return Err(ParseError::new(msg));
            }
        }
    }

    let value = parser.extract(state)?;
    reader.commit(0);
    Ok(value)
}

/// Runs `parser` over a finite token collection, returning the result and
/// the leftover tokens.
///
/// The leftover is everything the parser did not consume: the unused
/// trailing tokens of [`Step::Done`] followed by the untouched rest of the
/// input.
pub fn parse<T, P, I>(parser: &mut P, input: I) -> Result<(P::Output, Vec<T>), ParseError>
where
    T: Clone,
    P: Parser<T>,
    I: IntoIterator<Item = T>,
{
    let mut reader = ReplayReader::new(input.into_iter());
    let value = parse_with(parser, &mut reader)?;
    let (mut leftover, rest) = reader.finish();
    leftover.extend(rest);
    Ok((value, leftover))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use crate::token::{satisfy, take_while};
    use crate::{fold, parse, parse_with, pure, ReplayReader};

    #[test]
    fn leftover_stays_in_reader_between_parses() {
        let mut reader = ReplayReader::new([1u8, 1, 2, 2, 3].into_iter());
        let mut ones = take_while(|&t: &u8| t == 1, fold::collect());
        let mut twos = take_while(|&t: &u8| t == 2, fold::collect());

        assert_eq!(parse_with(&mut ones, &mut reader), Ok(vec![1, 1]));
        assert_eq!(parse_with(&mut twos, &mut reader), Ok(vec![2, 2]));
        assert_eq!(reader.buffered(), &[3]);
    }

    #[test]
    fn failure_rewinds_the_uncommitted_region() {
        let mut reader = ReplayReader::new([1u8, 2, 3].into_iter());
        let mut wants_nine = satisfy(|&t: &u8| t == 9);

        assert_matches!(parse_with(&mut wants_nine, &mut reader), Err(..));
        // The failed parse consumed one token speculatively; it is back.
        assert_eq!(reader.buffered(), &[1]);
        let (tail, rest) = reader.finish();
        assert_eq!(tail, vec![1]);
        assert_eq!(rest.collect::<Vec<_>>(), vec![2, 3]);
    }

    #[test]
    fn parse_collects_leftover_from_reader_and_source() {
        let result = parse(&mut pure('x'), [1, 2, 3]);
        assert_eq!(result, Ok(('x', vec![1, 2, 3])));
    }

    #[test]
    fn extract_runs_on_exhausted_input() {
        let mut all = take_while(|_: &u8| true, fold::collect());
        assert_eq!(parse(&mut all, [1u8, 2]), Ok((vec![1, 2], vec![])));
    }
}
