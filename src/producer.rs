//! Resumable generators with extractable seeds.
//!
//! A producer is a generator whose paused state can surrender the seed it
//! was built from: [`Producer::extract`] turns an in-flight iteration back
//! into a seed value, so the remaining work can be handed to other code —
//! most importantly to the inner loop of [`cross`] and [`concat`], which
//! thread one seed through two nested producers. [`simplify`] forgets this
//! ability and leaves an ordinary [`Iterator`].

use std::collections::VecDeque;
use std::marker::PhantomData;

/// Command returned by a single [`Producer::step`] call.
#[derive(Debug, PartialEq, Eq)]
pub enum ProducerStep<S, A, B> {
    /// An output value and the successor state.
    Yield(B, S),
    /// No output this step; continue from the successor state.
    Skip(S),
    /// The generator is finished, optionally surrendering a residual seed.
    Stop(Option<A>),
}

/// A resumable generator producing values of type `Self::Output` from a
/// seed of type `A`.
pub trait Producer<A> {
    /// The values produced.
    type Output;
    /// The internal iteration state.
    type State;

    /// Starts an iteration from a seed.
    fn inject(&mut self, seed: A) -> Self::State;

    /// Advances the iteration by one step.
    fn step(&mut self, state: Self::State) -> ProducerStep<Self::State, A, Self::Output>;

    /// Surrenders the seed of a paused iteration, if one can be
    /// reconstructed.
    fn extract(&mut self, state: Self::State) -> Option<A>;
}

/// See [`simplify`].
pub struct Simplified<P, A>
where
    P: Producer<A>,
{
    producer: P,
    state: Option<P::State>,
}

/// Runs `producer` from `seed` as a plain iterator, discarding the ability
/// to extract the seed.
pub fn simplify<A, P: Producer<A>>(mut producer: P, seed: A) -> Simplified<P, A> {
    let state = producer.inject(seed);
    Simplified {
        producer,
        state: Some(state),
    }
}

impl<A, P: Producer<A>> Iterator for Simplified<P, A> {
    type Item = P::Output;

    fn next(&mut self) -> Option<P::Output> {
        loop {
            match self.producer.step(self.state.take()?) {
                ProducerStep::Yield(b, state) => {
                    self.state = Some(state);
                    return Some(b);
                }
                ProducerStep::Skip(state) => self.state = Some(state),
                ProducerStep::Stop(_) => return None,
            }
        }
    }
}

/// See [`from_seq`].
pub struct FromSeq<B> {
    _item: PhantomData<fn(B) -> B>,
}

/// Produces the elements of a [`VecDeque`] front to back; the seed is the
/// queue itself and extracting surrenders whatever is left of it.
pub fn from_seq<B>() -> FromSeq<B> {
    FromSeq { _item: PhantomData }
}

impl<B> Producer<VecDeque<B>> for FromSeq<B> {
    type Output = B;
    type State = VecDeque<B>;

    fn inject(&mut self, seed: VecDeque<B>) -> Self::State {
        seed
    }

    fn step(&mut self, mut state: Self::State) -> ProducerStep<Self::State, VecDeque<B>, B> {
        match state.pop_front() {
            Some(b) => ProducerStep::Yield(b, state),
            None => ProducerStep::Stop(None),
        }
    }

    fn extract(&mut self, state: Self::State) -> Option<VecDeque<B>> {
        Some(state)
    }
}

/// See [`from_iter`].
pub struct FromIter<I> {
    _iter: PhantomData<fn(I) -> I>,
}

/// Embeds an external iterator: the iterator value is its own seed, and
/// extracting hands the partially consumed iterator back.
pub fn from_iter<I: Iterator>() -> FromIter<I> {
    FromIter { _iter: PhantomData }
}

impl<I: Iterator> Producer<I> for FromIter<I> {
    type Output = I::Item;
    type State = I;

    fn inject(&mut self, seed: I) -> Self::State {
        seed
    }

    fn step(&mut self, mut state: Self::State) -> ProducerStep<Self::State, I, I::Item> {
        match state.next() {
            Some(b) => ProducerStep::Yield(b, state),
            None => ProducerStep::Stop(None),
        }
    }

    fn extract(&mut self, state: Self::State) -> Option<I> {
        Some(state)
    }
}

/// See [`unfoldr`].
pub struct Unfoldr<F> {
    f: F,
}

/// The classic anamorphism: `f` maps a seed to an output plus the next
/// seed, or to `None` to finish.
pub fn unfoldr<A, B, F: FnMut(A) -> Option<(B, A)>>(f: F) -> Unfoldr<F> {
    Unfoldr { f }
}

impl<A, B, F: FnMut(A) -> Option<(B, A)>> Producer<A> for Unfoldr<F> {
    type Output = B;
    type State = A;

    fn inject(&mut self, seed: A) -> Self::State {
        seed
    }

    fn step(&mut self, state: Self::State) -> ProducerStep<Self::State, A, B> {
        match (self.f)(state) {
            Some((b, seed)) => ProducerStep::Yield(b, seed),
            None => ProducerStep::Stop(None),
        }
    }

    fn extract(&mut self, state: Self::State) -> Option<A> {
        Some(state)
    }
}

/// See [`translate`].
pub struct Translate<P, F, G> {
    producer: P,
    into_inner: F,
    into_outer: G,
}

/// Changes the seed type of `producer` through a bijection: `into_inner`
/// maps the new seed type into the producer's, `into_outer` maps surrendered
/// seeds back out.
pub fn translate<A, A2, P, F, G>(into_inner: F, into_outer: G, producer: P) -> Translate<P, F, G>
where
    P: Producer<A>,
    F: FnMut(A2) -> A,
    G: FnMut(A) -> A2,
{
    Translate {
        producer,
        into_inner,
        into_outer,
    }
}

impl<A, A2, P, F, G> Producer<A2> for Translate<P, F, G>
where
    P: Producer<A>,
    F: FnMut(A2) -> A,
    G: FnMut(A) -> A2,
{
    type Output = P::Output;
    type State = P::State;

    fn inject(&mut self, seed: A2) -> Self::State {
        self.producer.inject((self.into_inner)(seed))
    }

    fn step(&mut self, state: Self::State) -> ProducerStep<Self::State, A2, P::Output> {
        match self.producer.step(state) {
            ProducerStep::Yield(b, s) => ProducerStep::Yield(b, s),
            ProducerStep::Skip(s) => ProducerStep::Skip(s),
            ProducerStep::Stop(residual) => {
                ProducerStep::Stop(residual.map(&mut self.into_outer))
            }
        }
    }

    fn extract(&mut self, state: Self::State) -> Option<A2> {
        self.producer.extract(state).map(&mut self.into_outer)
    }
}

/// See [`lmap`].
pub struct Lmap<P, F> {
    producer: P,
    f: F,
}

/// Pre-transforms the seed with an endofunction before injecting it.
///
/// The transformation applies on the way in only; surrendered seeds come
/// back untransformed. (A seed-type-changing version would have no way to
/// hand seeds back — use [`translate`] for that.)
pub fn lmap<A, P, F>(f: F, producer: P) -> Lmap<P, F>
where
    P: Producer<A>,
    F: FnMut(A) -> A,
{
    Lmap { producer, f }
}

impl<A, P, F> Producer<A> for Lmap<P, F>
where
    P: Producer<A>,
    F: FnMut(A) -> A,
{
    type Output = P::Output;
    type State = P::State;

    fn inject(&mut self, seed: A) -> Self::State {
        self.producer.inject((self.f)(seed))
    }

    fn step(&mut self, state: Self::State) -> ProducerStep<Self::State, A, P::Output> {
        self.producer.step(state)
    }

    fn extract(&mut self, state: Self::State) -> Option<A> {
        self.producer.extract(state)
    }
}

/// See [`map`].
pub struct Map<P, F> {
    producer: P,
    f: F,
}

/// Post-transforms every produced value with `f`.
pub fn map<A, P, F, C>(f: F, producer: P) -> Map<P, F>
where
    P: Producer<A>,
    F: FnMut(P::Output) -> C,
{
    Map { producer, f }
}

impl<A, P, F, C> Producer<A> for Map<P, F>
where
    P: Producer<A>,
    F: FnMut(P::Output) -> C,
{
    type Output = C;
    type State = P::State;

    fn inject(&mut self, seed: A) -> Self::State {
        self.producer.inject(seed)
    }

    fn step(&mut self, state: Self::State) -> ProducerStep<Self::State, A, C> {
        match self.producer.step(state) {
            ProducerStep::Yield(b, s) => ProducerStep::Yield((self.f)(b), s),
            ProducerStep::Skip(s) => ProducerStep::Skip(s),
            ProducerStep::Stop(residual) => ProducerStep::Stop(residual),
        }
    }

    fn extract(&mut self, state: Self::State) -> Option<A> {
        self.producer.extract(state)
    }
}

/// State of [`cross`].
pub enum CrossState<S1, B, S2> {
    /// The outer producer is looking for its next value.
    Outer(S1),
    /// The inner producer runs over the seed the outer one surrendered,
    /// pairing its values with the captured outer value.
    Inner(B, S2),
}

/// See [`cross`].
pub struct Cross<P, Q> {
    outer: P,
    inner: Q,
}

/// Pairs each value of `outer` with every value `inner` produces from the
/// seed the outer iteration surrenders.
///
/// After the outer producer yields, its `extract` surrenders the seed and
/// the inner producer is injected with it; when the inner producer stops
/// with a residual seed, the outer producer resumes from that residual.
/// When the seed is gone — outer `extract` returns `None`, or the inner
/// stop carries no residual — the iteration stops.
pub fn cross<A, P, Q>(outer: P, inner: Q) -> Cross<P, Q>
where
    P: Producer<A>,
    Q: Producer<A>,
    P::Output: Clone,
{
    Cross { outer, inner }
}

impl<A, P, Q> Producer<A> for Cross<P, Q>
where
    P: Producer<A>,
    Q: Producer<A>,
    P::Output: Clone,
{
    type Output = (P::Output, Q::Output);
    type State = CrossState<P::State, P::Output, Q::State>;

    fn inject(&mut self, seed: A) -> Self::State {
        CrossState::Outer(self.outer.inject(seed))
    }

    fn step(&mut self, state: Self::State) -> ProducerStep<Self::State, A, Self::Output> {
        match state {
            CrossState::Outer(s1) => match self.outer.step(s1) {
                ProducerStep::Yield(b, s1) => match self.outer.extract(s1) {
                    Some(seed) => {
                        ProducerStep::Skip(CrossState::Inner(b, self.inner.inject(seed)))
                    }
                    // TODO revisit once it is clear whether a seedless outer
                    // yield should be an error instead of a stop.
                    None => ProducerStep::Stop(None),
                },
                ProducerStep::Skip(s1) => ProducerStep::Skip(CrossState::Outer(s1)),
                ProducerStep::Stop(residual) => ProducerStep::Stop(residual),
            },
            CrossState::Inner(b, s2) => match self.inner.step(s2) {
                ProducerStep::Yield(c, s2) => {
                    ProducerStep::Yield((b.clone(), c), CrossState::Inner(b, s2))
                }
                ProducerStep::Skip(s2) => ProducerStep::Skip(CrossState::Inner(b, s2)),
                ProducerStep::Stop(residual) => match residual {
                    Some(seed) => ProducerStep::Skip(CrossState::Outer(self.outer.inject(seed))),
                    None => ProducerStep::Stop(None),
                },
            },
        }
    }

    fn extract(&mut self, state: Self::State) -> Option<A> {
        match state {
            CrossState::Outer(s1) => self.outer.extract(s1),
            CrossState::Inner(_, s2) => self.inner.extract(s2),
        }
    }
}

/// Seed of [`concat`]: either an outer seed, or an outer seed paired with an
/// in-flight inner seed.
pub enum NestedSeed<A, B> {
    /// Resume (or start) the outer loop.
    Outer(A),
    /// Resume the outer loop with an inner iteration in flight.
    Inner(A, B),
}

/// State of [`concat`].
pub enum ConcatState<S1, S2> {
    /// The outer producer is looking for the next inner seed.
    Outer(S1),
    /// The inner producer runs while the outer state is parked.
    Inner(S1, S2),
}

/// See [`concat`].
pub struct Concat<P, Q> {
    outer: P,
    inner: Q,
}

/// Flattens a producer of seeds: every value of `outer` seeds one full run
/// of `inner`, whose values are the output.
///
/// When the inner producer stops, its residual seed is discarded and the
/// outer loop resumes from its parked state. Extraction reassembles a
/// [`NestedSeed`] from both loops, so a paused nested iteration can be
/// resumed in place.
pub fn concat<A, P, Q>(outer: P, inner: Q) -> Concat<P, Q>
where
    P: Producer<A>,
    Q: Producer<P::Output>,
{
    Concat { outer, inner }
}

impl<A, P, Q> Producer<NestedSeed<A, P::Output>> for Concat<P, Q>
where
    P: Producer<A>,
    Q: Producer<P::Output>,
{
    type Output = Q::Output;
    type State = ConcatState<P::State, Q::State>;

    fn inject(&mut self, seed: NestedSeed<A, P::Output>) -> Self::State {
        match seed {
            NestedSeed::Outer(a) => ConcatState::Outer(self.outer.inject(a)),
            NestedSeed::Inner(a, b) => {
                ConcatState::Inner(self.outer.inject(a), self.inner.inject(b))
            }
        }
    }

    fn step(&mut self, state: Self::State) -> ProducerStep<Self::State, NestedSeed<A, P::Output>, Q::Output> {
        match state {
            ConcatState::Outer(s1) => match self.outer.step(s1) {
                ProducerStep::Yield(b, s1) => {
                    ProducerStep::Skip(ConcatState::Inner(s1, self.inner.inject(b)))
                }
                ProducerStep::Skip(s1) => ProducerStep::Skip(ConcatState::Outer(s1)),
                ProducerStep::Stop(residual) => {
                    ProducerStep::Stop(residual.map(NestedSeed::Outer))
                }
            },
            ConcatState::Inner(s1, s2) => match self.inner.step(s2) {
                ProducerStep::Yield(c, s2) => {
                    ProducerStep::Yield(c, ConcatState::Inner(s1, s2))
                }
                ProducerStep::Skip(s2) => ProducerStep::Skip(ConcatState::Inner(s1, s2)),
                // TODO decide whether a residual inner seed deserves better
                // than being dropped here.
                ProducerStep::Stop(_) => ProducerStep::Skip(ConcatState::Outer(s1)),
            },
        }
    }

    fn extract(&mut self, state: Self::State) -> Option<NestedSeed<A, P::Output>> {
        match state {
            ConcatState::Outer(s1) => self.outer.extract(s1).map(NestedSeed::Outer),
            ConcatState::Inner(s1, s2) => {
                let inner = self.inner.extract(s2);
                let outer = self.outer.extract(s1)?;
                Some(match inner {
                    Some(b) => NestedSeed::Inner(outer, b),
                    None => NestedSeed::Outer(outer),
                })
            }
        }
    }
}
