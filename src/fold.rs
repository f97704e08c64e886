//! Accumulators consumed by the repetition combinators and the slicing leaf
//! parsers.
//!
//! A fold is the non-failing sibling of a [`Parser`][crate::Parser]: it has
//! the same init/step/extract shape but its step returns a plain successor
//! state instead of a driver command — a fold can neither fail nor stop
//! early. [`split_many`][crate::split_many] and friends feed every parsed
//! value into a fold and finalize it when the repetition ends.

use std::marker::PhantomData;

use num_traits::{
    ops::overflowing::{OverflowingAdd, OverflowingMul},
    FromPrimitive, Zero,
};

/// A total accumulator over values of type `B`.
pub trait Fold<B> {
    /// The accumulated result.
    type Output;
    /// The internal accumulation state.
    type State;

    /// Produces a fresh accumulation state.
    fn init(&mut self) -> Self::State;

    /// Folds one value into the state.
    fn step(&mut self, state: Self::State, item: B) -> Self::State;

    /// Finalizes the accumulation.
    fn extract(&mut self, state: Self::State) -> Self::Output;
}

/// See [`collect`].
pub struct Collect<B> {
    _item: PhantomData<fn(B)>,
}

/// Accumulates every value into a `Vec`, in order.
pub fn collect<B>() -> Collect<B> {
    Collect { _item: PhantomData }
}

impl<B> Fold<B> for Collect<B> {
    type Output = Vec<B>;
    type State = Vec<B>;

    fn init(&mut self) -> Self::State {
        Vec::new()
    }

    fn step(&mut self, mut state: Self::State, item: B) -> Self::State {
        state.push(item);
        state
    }

    fn extract(&mut self, state: Self::State) -> Self::Output {
        state
    }
}

/// See [`drain`].
pub struct Drain<B> {
    _item: PhantomData<fn(B)>,
}

/// Discards every value.
pub fn drain<B>() -> Drain<B> {
    Drain { _item: PhantomData }
}

impl<B> Fold<B> for Drain<B> {
    type Output = ();
    type State = ();

    fn init(&mut self) -> Self::State {}

    fn step(&mut self, _state: Self::State, _item: B) -> Self::State {}

    fn extract(&mut self, _state: Self::State) -> Self::Output {}
}

/// See [`count`].
pub struct Count<B> {
    _item: PhantomData<fn(B)>,
}

/// Counts the values, discarding them.
pub fn count<B>() -> Count<B> {
    Count { _item: PhantomData }
}

impl<B> Fold<B> for Count<B> {
    type Output = usize;
    type State = usize;

    fn init(&mut self) -> Self::State {
        0
    }

    fn step(&mut self, state: Self::State, _item: B) -> Self::State {
        state + 1
    }

    fn extract(&mut self, state: Self::State) -> Self::Output {
        state
    }
}

/// See [`decimal`].
pub struct Decimal<I> {
    _value: PhantomData<fn() -> I>,
}

/// Accumulates ASCII digit bytes into a decimal number.
///
/// Produces `None` when the accumulated value overflows `I`. The bytes are
/// assumed to be ASCII digits; pair this with a digit predicate on the
/// parser side, e.g. `take_while1(u8::is_ascii_digit, decimal())`.
pub fn decimal<I>() -> Decimal<I>
where
    I: Zero + FromPrimitive + OverflowingAdd + OverflowingMul,
{
    Decimal { _value: PhantomData }
}

impl<I> Fold<u8> for Decimal<I>
where
    I: Zero + FromPrimitive + OverflowingAdd + OverflowingMul,
{
    type Output = Option<I>;
    type State = (I, bool);

    fn init(&mut self) -> Self::State {
        (I::zero(), false)
    }

    fn step(&mut self, (value, mut overflow): Self::State, digit: u8) -> Self::State {
        let (value, overflowed) = value.overflowing_mul(&I::from_u8(10).unwrap());
        overflow |= overflowed;

        let (value, overflowed) = value.overflowing_add(&I::from_u8(digit - b'0').unwrap());
        overflow |= overflowed;

        (value, overflow)
    }

    fn extract(&mut self, (value, overflow): Self::State) -> Self::Output {
        (!overflow).then(|| value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run<B, F: Fold<B>>(fold: &mut F, items: impl IntoIterator<Item = B>) -> F::Output {
        let mut state = fold.init();
        for item in items {
            state = fold.step(state, item);
        }
        fold.extract(state)
    }

    #[test]
    fn collect_keeps_order() {
        assert_eq!(run(&mut collect(), [3, 1, 2]), vec![3, 1, 2]);
    }

    #[test]
    fn count_counts() {
        assert_eq!(run(&mut count(), ["a", "b", "c"]), 3);
    }

    #[test]
    fn decimal_accumulates() {
        assert_eq!(run(&mut decimal::<u32>(), b"1234".iter().copied()), Some(1234));
        assert_eq!(run(&mut decimal::<u32>(), b"".iter().copied()), Some(0));
    }

    #[test]
    fn decimal_reports_overflow() {
        assert_eq!(run(&mut decimal::<u8>(), b"256".iter().copied()), None);
    }
}
