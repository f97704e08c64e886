//! Schleuse is a library for streaming parsers that can backtrack.
//!
//! It grew out of a particular combination of constraints for which the
//! existing parser combinator libraries were not a comfortable fit:
//!
//! * _Streaming_: input arrives one token at a time from a pull source and
//!   is parsed as it arrives. Memory use is bounded by how far the parser
//!   may still backtrack, never by the input length: the moment a parser
//!   commits, the history before the commit point is released.
//!
//! * _Backtracking with an explicit cost model_: alternatives replay input
//!   from a buffer instead of re-reading the source. How much history a
//!   parser keeps alive is visible in its step protocol, not hidden in the
//!   library — a parser that never commits announces, through that same
//!   protocol, that it needs the whole input retained.
//!
//! * _Suspendable_: a parse can stop at any token boundary. When the source
//!   runs dry mid-parse, the parser's extract produces the result of what
//!   was consumed so far (or a [`ParseError`] when there is none), and
//!   leftover tokens stay available for the next parse over the same
//!   reader.
//!
//! The pieces fit together as follows. A [`Parser`] is a state machine
//! whose step function consumes one token and answers with a [`Step`]
//! command: commit, continue, rewind, finish or fail. The driver —
//! [`parse`] or [`parse_with`] — owns a [`ReplayReader`], feeds tokens
//! through the step function and obeys the commands, trimming or replaying
//! its buffer. Combinators ([`split_with`], [`alt`], [`split_many`],
//! [`concat_map`], …) never touch the buffer themselves; they translate the
//! commands of their children, which is what makes their backtracking
//! behavior composable and auditable.
//!
//! Repetition and the slicing leaf parsers accumulate through a
//! [`Fold`](fold::Fold) — a non-failing accumulator with the same
//! init/step/extract shape as a parser. The [`producer`] module is the dual
//! construction: a resumable generator whose paused state can surrender its
//! seed.
//!
//! ```rust
//! use schleuse::{fold, parse, split_many, then, token};
//!
//! // Whitespace-separated decimal numbers, parsed from a byte stream.
//! let number = || {
//!     then(
//!         token::take_while(u8::is_ascii_whitespace, fold::drain()),
//!         token::take_while1(u8::is_ascii_digit, fold::decimal::<u32>()),
//!     )
//! };
//! let mut numbers = split_many(fold::collect(), number());
//!
//! let (values, leftover) = parse(&mut numbers, b" 12 345 6 !".iter().copied()).unwrap();
//! assert_eq!(values, vec![Some(12), Some(345), Some(6)]);
//! assert_eq!(leftover, b" !".to_vec());
//! ```
//!
//! A note on cost: sequential composition layers are interpreted, not
//! fused. Every [`split_with`]/[`then`]/[`concat_map`] layer re-dispatches
//! each token it forwards, so a chain of `k` compositions costs `O(k)` per
//! token. Keep chains shallow or group them behind a single parser where
//! that matters.

#![warn(missing_docs)]

mod alt;
mod bind;
mod driver;
mod error;
mod parser;
mod reader;
mod repeat;
mod seq;
mod step;

pub mod fold;
pub mod producer;
pub mod token;

pub use alt::{alt, Alt, AltState};
pub use bind::{concat_map, ConcatMap, ConcatMapState};
pub use driver::{parse, parse_with};
pub use error::ParseError;
pub use fold::Fold;
pub use parser::{fail, fail_with, map, pure, pure_with, Fail, FailWith, Map, Parser, Pure, PureWith};
pub use reader::ReplayReader;
pub use repeat::{split_many, split_some, RepeatState, SplitMany, SplitSome};
pub use seq::{split_with, then, SplitWith, SplitWithState, Then, ThenState};
pub use step::Step;

#[cfg(test)]
mod tests;
