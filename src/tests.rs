//! End-to-end tests combining the driver, the combinators and the leaf
//! parsers.

use std::collections::VecDeque;

use assert_matches::assert_matches;

use crate::producer::{cross, from_seq, simplify};
use crate::token::{
    eof, look_ahead, peek, satisfy, slice_sep_by, take, take_eq, take_while, take_while1,
};
use crate::{
    alt, concat_map, fail, fold, map, parse, parse_with, pure, split_many, split_some, split_with,
    then, ParseError, Parser, ReplayReader,
};

fn eq(want: u8) -> impl Parser<u8, Output = u8> {
    satisfy(move |&t: &u8| t == want)
}

fn pair<A, B>(a: A, b: B) -> (A, B) {
    (a, b)
}

#[test]
fn sequencing_scenario() {
    let mut parser = split_with(pair, eq(1), eq(2));
    assert_eq!(parse(&mut parser, [1u8, 2, 3]), Ok(((1, 2), vec![3])));
}

#[test]
fn alternative_rewind_scenario() {
    let mut parser = alt(
        split_with(pair, eq(1), eq(9)),
        split_with(pair, eq(1), eq(2)),
    );
    assert_eq!(parse(&mut parser, [1u8, 2]), Ok(((1, 2), vec![])));
}

#[test]
fn many_scenario() {
    let mut parser = split_many(fold::collect(), satisfy(|&t: &u8| t < 5));
    let result = parse(&mut parser, [1u8, 2, 3, 5, 6]);
    assert_eq!(result, Ok((vec![1, 2, 3], vec![5, 6])));
}

#[test]
fn some_failure_scenario() {
    let mut parser = split_some(fold::collect(), satisfy(|&t: &u8| t < 5));
    assert_matches!(parse(&mut parser, [9u8]), Err(..));
}

#[test]
fn producer_cross_scenario() {
    let seed: VecDeque<u32> = [1, 2, 3, 4].into_iter().collect();
    let items: Vec<_> = simplify(cross(from_seq(), from_seq()), seed).collect();
    assert_eq!(items, vec![(1, 2), (1, 3), (1, 4)]);
}

#[test]
fn slice_sep_by_scenario() {
    let mut parser = slice_sep_by(|&t: &u8| t == 1, fold::collect());
    assert_eq!(parse(&mut parser, [0u8, 0, 1, 0]), Ok((vec![0, 0], vec![0])));
}

#[test]
fn fold_equivalence() {
    // Driving a fold through the parser machinery changes nothing about
    // what it accumulates.
    let xs = [5u8, 1, 4, 1, 5, 9, 2, 6];
    let via_parser = parse(&mut crate::token::from_fold(fold::collect()), xs).unwrap();
    assert_eq!(via_parser, (xs.to_vec(), vec![]));

    let via_parser = parse(&mut crate::token::from_fold(fold::count()), xs).unwrap();
    assert_eq!(via_parser, (xs.len(), vec![]));
}

#[test]
fn pure_and_fail_are_constant() {
    for xs in [vec![], vec![1u8], vec![1u8, 2, 3]] {
        assert_eq!(
            parse(&mut pure('v'), xs.clone()),
            Ok(('v', xs.clone())),
        );
        assert_eq!(
            parse(&mut fail::<char>("boom"), xs.clone()),
            Err(ParseError::new("boom")),
        );
    }
}

#[test]
fn peek_leaves_the_input_alone() {
    let xs = [7u8, 8, 9];
    assert_eq!(parse(&mut peek(), xs), Ok((7, xs.to_vec())));
}

#[test]
fn eof_matches_empty_input_only() {
    assert_eq!(parse(&mut eof(), [0u8; 0]), Ok(((), vec![])));
    assert_matches!(parse(&mut eof(), [1u8]), Err(..));
}

#[test]
fn alternative_identities() {
    // A successful left branch makes the right branch irrelevant.
    let mut left_wins = alt(eq(1), fail("unused"));
    assert_eq!(parse(&mut left_wins, [1u8, 7]), Ok((1, vec![7])));

    // A failing left branch is invisible, on any input.
    for xs in [vec![1u8, 7], vec![2u8], vec![]] {
        let mut right = alt(fail("no"), alt(eq(1), pure(0u8)));
        let mut bare = alt(eq(1), pure(0u8));
        assert_eq!(parse(&mut right, xs.clone()), parse(&mut bare, xs));
    }
}

#[test]
fn alternative_replays_from_the_start() {
    // The left branch consumes three tokens before failing; the right
    // branch must observe all of them.
    let seen = std::cell::RefCell::new(Vec::new());
    let recording = satisfy(|&t: &u8| {
        seen.borrow_mut().push(t);
        true
    });
    let left = then(take_eq(3, fold::drain()), fail::<Vec<u8>>("nope"));
    let right = take(4, fold::collect());
    let mut parser = alt(left, then(recording, right));

    let result = parse(&mut parser, [10u8, 20, 30, 40]);
    assert_eq!(result, Ok((vec![20, 30, 40], vec![])));
    assert_eq!(*seen.borrow(), vec![10]);
}

#[test]
fn look_ahead_is_idempotent() {
    let probe = || look_ahead(take_eq(2, fold::collect()));
    let mut parser = split_with(pair, probe(), probe());
    let (result, leftover) = parse(&mut parser, [1u8, 2, 3]).unwrap();
    assert_eq!(result.0, result.1);
    assert_eq!(leftover, vec![1, 2, 3]);
}

#[test]
fn bind_is_associative_observationally() {
    let f = |n: u8| take(n as usize, fold::count());
    let g = |c: usize| take(c, fold::collect());

    for xs in [
        vec![2u8, 9, 9, 7, 8, 5],
        vec![0u8, 1],
        vec![3u8, 1],
        vec![],
    ] {
        let mut nested_left = concat_map(g, concat_map(f, satisfy(|_| true)));
        let mut nested_right =
            concat_map(move |x: u8| concat_map(g, f(x)), satisfy(|_| true));
        assert_eq!(
            parse(&mut nested_left, xs.clone()),
            parse(&mut nested_right, xs),
        );
    }
}

#[test]
fn parsers_compose_into_a_word_splitter() {
    // Words of non-space bytes, separators folded away, one parse.
    let word = || {
        split_with(
            |w, _| w,
            take_while1(|&t: &u8| t != b' ', fold::collect()),
            alt(map(satisfy(|&t: &u8| t == b' '), |_| ()), eof()),
        )
    };
    let mut parser = split_many(fold::collect(), word());
    let (words, leftover) = parse(&mut parser, b"ab c def".iter().copied()).unwrap();
    assert_eq!(
        words,
        vec![b"ab".to_vec(), b"c".to_vec(), b"def".to_vec()],
    );
    assert_eq!(leftover, vec![]);
}

#[test]
fn streaming_session_reuses_leftover() {
    // One reader, three parsers, no tokens lost in between.
    let mut reader = ReplayReader::new(b"12:34 tail".iter().copied());

    let number = || take_while1(u8::is_ascii_digit, fold::decimal::<u32>());
    let mut colon = satisfy(|&t: &u8| t == b':');

    let hours = parse_with(&mut number(), &mut reader).unwrap();
    parse_with(&mut colon, &mut reader).unwrap();
    let minutes = parse_with(&mut number(), &mut reader).unwrap();

    assert_eq!((hours, minutes), (Some(12), Some(34)));
    let (leftover, rest) = reader.finish();
    let tail: Vec<u8> = leftover.into_iter().chain(rest).collect();
    assert_eq!(tail, b" tail".to_vec());
}

#[test]
fn unread_prepends_tokens_for_the_next_parse() {
    let mut reader = ReplayReader::new(b"34".iter().copied());
    reader.unread(b"12".to_vec());
    let mut all = take_while(|_: &u8| true, fold::collect());
    assert_eq!(parse_with(&mut all, &mut reader), Ok(b"1234".to_vec()));
}

#[test]
fn speculative_prefix_commits_only_on_success() {
    // A classic longest-match choice: "let " keyword vs. an identifier that
    // merely starts with the same letters.
    let letters = || take_while1(|t: &u8| t.is_ascii_alphabetic(), fold::collect());
    let lhs = split_with(pair, eq(b'l'), then(eq(b'e'), then(eq(b't'), eq(b' '))));
    let mut parser = alt(map(lhs, |_| b"<let>".to_vec()), letters());

    assert_eq!(
        parse(&mut parser, b"let x".iter().copied()),
        Ok((b"<let>".to_vec(), b"x".to_vec())),
    );
    assert_eq!(
        parse(&mut parser, b"letter".iter().copied()),
        Ok((b"letter".to_vec(), vec![])),
    );
}
