//! A logged computation that may have failed.
//!
//! `NomadEither<E, L, R>` is a [`Nomad`] whose value is an [`Either`]. Success-only
//! transformations (`map`, `chain`, `ap`, `effect_on_right`) are skipped once the
//! value is a `Left`; the effect log keeps growing through every effect attacher
//! that applies regardless of the variant.
//!
//! Two families of combinators are provided:
//!
//! - the plain ones, where the first failure short-circuits (`ap`, `alt`);
//! - the validation ones, where two failures are merged through a combining
//!   rule (`ap_validation`, `alt_validation`).
//!
//! # Example
//!
//! ```rust
//! use nomad::{Either, NomadEither};
//!
//! fn parse(input: &str) -> NomadEither<String, String, i32> {
//!     NomadEither::from_result(input.parse::<i32>().map_err(|e| e.to_string()))
//!         .effect(format!("parse {}", input))
//! }
//!
//! let total = parse("40")
//!     .chain(|a| parse("2").map(move |b| a + b))
//!     .effect_on_right(|sum| format!("sum {}", sum));
//!
//! assert_eq!(total.value(), &Either::right(42));
//! assert_eq!(total.effects(), &["parse 40", "parse 2", "sum 42"]);
//! ```

use crate::{Either, Monoid, Nomad, Semigroup};

/// A [`Nomad`] holding an [`Either`] result.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct NomadEither<E, L, R>(Nomad<E, Either<L, R>>);

impl<E, L> NomadEither<E, L, ()> {
    /// Starting point for do-notation: a success holding `()` and no effects.
    #[inline]
    pub fn unit() -> Self {
        NomadEither::right(())
    }
}

impl<E, L, R> NomadEither<E, L, R> {
    // ========== Constructors ==========

    /// A failure with an empty log.
    #[inline]
    pub fn left(value: L) -> Self {
        NomadEither(Nomad::pure(Either::Left(value)))
    }

    /// A success with an empty log.
    #[inline]
    pub fn right(value: R) -> Self {
        NomadEither(Nomad::pure(Either::Right(value)))
    }

    /// Alias of [`right`](NomadEither::right).
    #[inline]
    pub fn of(value: R) -> Self {
        NomadEither::right(value)
    }

    /// Lift an `Either` with an empty log.
    #[inline]
    pub fn from_either(either: Either<L, R>) -> Self {
        NomadEither(Nomad::pure(either))
    }

    /// Lift a `Result` with an empty log; `Err` becomes `Left`.
    #[inline]
    pub fn from_result(result: Result<R, L>) -> Self {
        NomadEither::from_either(Either::from_result(result))
    }

    /// Wrap an existing `Nomad` whose value is already an `Either`.
    #[inline]
    pub fn from_nomad(nomad: Nomad<E, Either<L, R>>) -> Self {
        NomadEither(nomad)
    }

    /// A failure carrying the log of `nomad`.
    #[inline]
    pub fn left_nomad(nomad: Nomad<E, L>) -> Self {
        NomadEither(nomad.map(Either::Left))
    }

    /// A success carrying the log of `nomad`.
    ///
    /// ```rust
    /// use nomad::{Either, Nomad, NomadEither};
    ///
    /// let ne: NomadEither<&str, (), i32> = NomadEither::right_nomad(Nomad::pure(1).effect("e"));
    /// assert_eq!(ne.into_parts(), (vec!["e"], Either::right(1)));
    /// ```
    #[inline]
    pub fn right_nomad(nomad: Nomad<E, R>) -> Self {
        NomadEither(nomad.map(Either::Right))
    }

    // ========== Accessors ==========

    /// The collected effects, in append order.
    #[inline]
    pub fn effects(&self) -> &[E] {
        self.0.effects()
    }

    /// The held result.
    #[inline]
    pub fn value(&self) -> &Either<L, R> {
        self.0.value()
    }

    /// Returns `true` if the held result is a success.
    #[inline]
    pub fn is_right(&self) -> bool {
        self.value().is_right()
    }

    /// Returns `true` if the held result is a failure.
    #[inline]
    pub fn is_left(&self) -> bool {
        self.value().is_left()
    }

    /// Unwrap into the underlying `Nomad`.
    #[inline]
    pub fn into_nomad(self) -> Nomad<E, Either<L, R>> {
        self.0
    }

    /// Split into the effect log and the result.
    #[inline]
    pub fn into_parts(self) -> (Vec<E>, Either<L, R>) {
        self.0.into_parts()
    }

    /// Discard the log and keep the result.
    #[inline]
    pub fn into_either(self) -> Either<L, R> {
        self.0.into_value()
    }

    /// Discard the log and convert the result into a `Result`.
    #[inline]
    pub fn into_result(self) -> Result<R, L> {
        self.into_either().into_result()
    }

    // ========== Effect attachers ==========

    /// Append one effect, whatever the variant.
    #[inline]
    pub fn effect(self, effect: E) -> Self {
        NomadEither(self.0.effect(effect))
    }

    /// Append several effects, whatever the variant.
    #[inline]
    pub fn effect_many<I>(self, effects: I) -> Self
    where
        I: IntoIterator<Item = E>,
    {
        NomadEither(self.0.effect_many(effects))
    }

    /// Append the effect produced by `thunk`, which runs once, right now.
    #[inline]
    pub fn effect_lazy<F>(self, thunk: F) -> Self
    where
        F: FnOnce() -> E,
    {
        NomadEither(self.0.effect_lazy(thunk))
    }

    /// Append an effect computed from the success payload, only on success.
    ///
    /// ```rust
    /// use nomad::NomadEither;
    ///
    /// let ok: NomadEither<String, &str, i32> = NomadEither::right(3);
    /// assert_eq!(ok.effect_on_right(|r| format!("ok {}", r)).effects(), &["ok 3"]);
    ///
    /// let err: NomadEither<String, &str, i32> = NomadEither::left("bad");
    /// assert!(err.effect_on_right(|r| format!("ok {}", r)).effects().is_empty());
    /// ```
    #[inline]
    pub fn effect_on_right<F>(self, f: F) -> Self
    where
        F: FnOnce(&R) -> E,
    {
        match self.value() {
            Either::Right(r) => {
                let effect = f(r);
                self.effect(effect)
            }
            Either::Left(_) => self,
        }
    }

    /// Append an effect computed from the failure payload, only on failure.
    #[inline]
    pub fn effect_on_left<F>(self, f: F) -> Self
    where
        F: FnOnce(&L) -> E,
    {
        match self.value() {
            Either::Left(l) => {
                let effect = f(l);
                self.effect(effect)
            }
            Either::Right(_) => self,
        }
    }

    // ========== Functor / Bifunctor ==========

    /// Transform the success payload.
    #[inline]
    pub fn map<R2, F>(self, f: F) -> NomadEither<E, L, R2>
    where
        F: FnOnce(R) -> R2,
    {
        NomadEither(self.0.map(|either| either.map(f)))
    }

    /// Transform the failure payload.
    #[inline]
    pub fn map_left<L2, F>(self, f: F) -> NomadEither<E, L2, R>
    where
        F: FnOnce(L) -> L2,
    {
        NomadEither(self.0.map(|either| either.map_left(f)))
    }

    /// Transform whichever payload is present.
    #[inline]
    pub fn bimap<L2, R2, F, G>(self, on_left: F, on_right: G) -> NomadEither<E, L2, R2>
    where
        F: FnOnce(L) -> L2,
        G: FnOnce(R) -> R2,
    {
        NomadEither(self.0.map(|either| either.bimap(on_left, on_right)))
    }

    /// Exchange failure and success.
    #[inline]
    pub fn swap(self) -> NomadEither<E, R, L> {
        NomadEither(self.0.map(Either::swap))
    }

    // ========== Monad ==========

    /// Sequence a computation on the success payload.
    ///
    /// A failure passes through without calling `f`.
    ///
    /// ```rust
    /// use nomad::{Either, NomadEither};
    ///
    /// let failed: NomadEither<&str, &str, i32> = NomadEither::left("nope");
    /// let out = failed.chain(|_| -> NomadEither<&str, &str, i32> { unreachable!() });
    /// assert_eq!(out.into_either(), Either::left("nope"));
    /// ```
    #[inline]
    pub fn chain<R2, F>(self, f: F) -> NomadEither<E, L, R2>
    where
        F: FnOnce(R) -> NomadEither<E, L, R2>,
    {
        NomadEither(self.0.chain(|either| match either {
            Either::Left(l) => Nomad::pure(Either::Left(l)),
            Either::Right(r) => f(r).0,
        }))
    }

    /// Run `f` on the success payload for its effects and failure, keeping
    /// the current payload.
    #[inline]
    pub fn chain_first<R2, F>(self, f: F) -> Self
    where
        F: FnOnce(&R) -> NomadEither<E, L, R2>,
    {
        self.chain(|r| f(&r).map(|_| r))
    }

    /// Add a named binding to a record under construction.
    ///
    /// ```rust
    /// use nomad::{Either, NomadEither};
    ///
    /// #[derive(Debug, PartialEq)]
    /// struct Record {
    ///     key: &'static str,
    /// }
    ///
    /// let done = NomadEither::<(), (), ()>::unit()
    ///     .bind(|_| NomadEither::right("value"), |(), key| Record { key });
    /// assert_eq!(done.into_parts(), (vec![], Either::right(Record { key: "value" })));
    /// ```
    #[inline]
    pub fn bind<B, C, F, M>(self, f: F, merge: M) -> NomadEither<E, L, C>
    where
        F: FnOnce(&R) -> NomadEither<E, L, B>,
        M: FnOnce(R, B) -> C,
    {
        self.chain(|r| f(&r).map(|b| merge(r, b)))
    }

    /// Keep this payload, sequencing `other` through [`ap`](NomadEither::ap).
    ///
    /// `other`'s effects come first; this side's failure wins.
    #[inline]
    pub fn ap_first<R2>(self, other: NomadEither<E, L, R2>) -> Self {
        self.map(|a| move |_: R2| a).ap(other)
    }

    /// Keep `other`'s payload, sequencing through [`ap`](NomadEither::ap).
    #[inline]
    pub fn ap_second<R2>(self, other: NomadEither<E, L, R2>) -> NomadEither<E, L, R2> {
        self.map(|_| |b: R2| b).ap(other)
    }

    // ========== Recovery ==========

    /// Recover from a failure with another logged result.
    ///
    /// The replacement's log is appended after the existing one. A success
    /// passes through unchanged.
    #[inline]
    pub fn or_else<L2, F>(self, f: F) -> NomadEither<E, L2, R>
    where
        F: FnOnce(L) -> NomadEither<E, L2, R>,
    {
        NomadEither(self.0.chain(|either| match either {
            Either::Left(l) => f(l).0,
            Either::Right(r) => Nomad::pure(Either::Right(r)),
        }))
    }

    /// Keep this success, or fall back to the result of `that`.
    ///
    /// `that` is never called when `self` is a success. When both fail, the
    /// second failure wins: the failure of `that` is returned and both logs
    /// are kept.
    ///
    /// ```rust
    /// use nomad::{Either, NomadEither};
    ///
    /// let ok: NomadEither<&str, &str, i32> = NomadEither::right(1);
    /// assert_eq!(ok.alt(|| panic!("not evaluated")).into_either(), Either::right(1));
    ///
    /// let a: NomadEither<&str, &str, i32> = NomadEither::left("a").effect("first");
    /// let out = a.alt(|| NomadEither::left("b").effect("second"));
    /// assert_eq!(out.into_parts(), (vec!["first", "second"], Either::left("b")));
    /// ```
    #[inline]
    pub fn alt<F>(self, that: F) -> Self
    where
        F: FnOnce() -> Self,
    {
        NomadEither(self.0.chain(|either| match either {
            Either::Left(_) => that().0,
            Either::Right(r) => Nomad::pure(Either::Right(r)),
        }))
    }

    // ========== Destructors ==========

    /// Eliminate the failure channel; the branch's log is appended.
    #[inline]
    pub fn fold<T, F, G>(self, on_left: F, on_right: G) -> Nomad<E, T>
    where
        F: FnOnce(L) -> Nomad<E, T>,
        G: FnOnce(R) -> Nomad<E, T>,
    {
        self.0.chain(|either| either.fold(on_left, on_right))
    }

    /// Return the success payload, or compute one from the failure.
    ///
    /// ```rust
    /// use nomad::{Nomad, NomadEither};
    ///
    /// let failed: NomadEither<&str, &str, usize> = NomadEither::left("four");
    /// let n = failed.get_or_else(|l| Nomad::pure(l.len()).effect("fallback"));
    /// assert_eq!(n.into_parts(), (vec!["fallback"], 4));
    /// ```
    #[inline]
    pub fn get_or_else<F>(self, on_left: F) -> Nomad<E, R>
    where
        F: FnOnce(L) -> Nomad<E, R>,
    {
        self.fold(on_left, Nomad::pure)
    }

    // ========== Validation ==========

    /// Like [`alt`](NomadEither::alt), but two failures are merged with
    /// `combine(first, second)`.
    #[inline]
    pub fn alt_validation_with<F, C>(self, that: F, combine: C) -> Self
    where
        F: FnOnce() -> Self,
        C: FnOnce(L, L) -> L,
    {
        if self.is_right() {
            return self;
        }
        let (mut effects, first) = self.into_parts();
        let (that_effects, second) = that().into_parts();
        effects.extend(that_effects);
        let value = first.alt_validation_with(|| second, combine);
        NomadEither(Nomad::new(effects, value))
    }

    // ========== Combining two results ==========

    /// Left-most success wins; two successes merge with `combine`.
    ///
    /// Logs are always concatenated, `self` first.
    #[inline]
    pub fn combine_first_success_with<C>(self, other: Self, combine: C) -> Self
    where
        C: FnOnce(R, R) -> R,
    {
        NomadEither(
            self.0
                .combine_with(other.0, |a, b| a.combine_first_success_with(b, combine)),
        )
    }

    /// Left-most failure wins; two successes merge with `combine`.
    #[inline]
    pub fn combine_first_failure_with<C>(self, other: Self, combine: C) -> Self
    where
        C: FnOnce(R, R) -> R,
    {
        NomadEither(
            self.0
                .combine_with(other.0, |a, b| a.combine_first_failure_with(b, combine)),
        )
    }

    /// Put `prefix` in front of the current log.
    #[inline]
    pub(crate) fn after(self, prefix: Vec<E>) -> Self {
        NomadEither(self.0.after(prefix))
    }

    /// Structural equality with caller-supplied equality per component.
    pub fn eq_by<FE, FL, FR>(&self, other: &Self, eq_effect: FE, eq_left: FL, eq_right: FR) -> bool
    where
        FE: Fn(&E, &E) -> bool,
        FL: FnOnce(&L, &L) -> bool,
        FR: FnOnce(&R, &R) -> bool,
    {
        self.0.eq_by(&other.0, eq_effect, |a, b| match (a, b) {
            (Either::Left(x), Either::Left(y)) => eq_left(x, y),
            (Either::Right(x), Either::Right(y)) => eq_right(x, y),
            _ => false,
        })
    }
}

impl<E, L, F> NomadEither<E, L, F> {
    /// Apply the held function to the payload of `fa`.
    ///
    /// Logs concatenate as `fa ++ self`. When both sides failed, the function
    /// side's failure is kept.
    ///
    /// ```rust
    /// use nomad::{Either, NomadEither};
    ///
    /// let f = NomadEither::<&str, &str, _>::right(|x: i32| x * 2).effect("fn");
    /// let a = NomadEither::right(21).effect("arg");
    /// assert_eq!(f.ap(a).into_parts(), (vec!["arg", "fn"], Either::right(42)));
    /// ```
    #[inline]
    pub fn ap<A, B>(self, fa: NomadEither<E, L, A>) -> NomadEither<E, L, B>
    where
        F: FnOnce(A) -> B,
    {
        NomadEither(self.0.map(|fab| move |a: Either<L, A>| fab.ap(a)).ap(fa.0))
    }

    /// Like [`ap`](NomadEither::ap), but two failures are merged with
    /// `combine(function_failure, argument_failure)`.
    #[inline]
    pub fn ap_validation_with<A, B, C>(self, fa: NomadEither<E, L, A>, combine: C) -> NomadEither<E, L, B>
    where
        F: FnOnce(A) -> B,
        C: FnOnce(L, L) -> L,
    {
        NomadEither(
            self.0
                .map(|fab| move |a: Either<L, A>| fab.ap_validation_with(a, combine))
                .ap(fa.0),
        )
    }
}

impl<E, L: Semigroup, F> NomadEither<E, L, F> {
    /// [`ap_validation_with`](NomadEither::ap_validation_with) using `L`'s semigroup.
    ///
    /// ```rust
    /// use nomad::{Either, NomadEither};
    /// use nomad::monoid::Sum;
    ///
    /// let f = NomadEither::<&str, _, fn(i32) -> i32>::left(Sum(952)).effect("two");
    /// let a = NomadEither::left(Sum(17)).effect("one");
    /// assert_eq!(f.ap_validation(a).into_parts(), (vec!["one", "two"], Either::left(Sum(969))));
    /// ```
    #[inline]
    pub fn ap_validation<A, B>(self, fa: NomadEither<E, L, A>) -> NomadEither<E, L, B>
    where
        F: FnOnce(A) -> B,
    {
        self.ap_validation_with(fa, L::combine)
    }
}

impl<E, L: Semigroup, R> NomadEither<E, L, R> {
    /// [`alt_validation_with`](NomadEither::alt_validation_with) using `L`'s semigroup.
    #[inline]
    pub fn alt_validation<F>(self, that: F) -> Self
    where
        F: FnOnce() -> Self,
    {
        self.alt_validation_with(that, L::combine)
    }
}

impl<E, L, R: Semigroup> NomadEither<E, L, R> {
    /// [`combine_first_success_with`](NomadEither::combine_first_success_with) using `R`'s semigroup.
    #[inline]
    pub fn combine_first_success(self, other: Self) -> Self {
        self.combine_first_success_with(other, R::combine)
    }

    /// [`combine_first_failure_with`](NomadEither::combine_first_failure_with) using `R`'s semigroup.
    #[inline]
    pub fn combine_first_failure(self, other: Self) -> Self {
        self.combine_first_failure_with(other, R::combine)
    }
}

impl<E, L, R: Monoid> NomadEither<E, L, R> {
    /// Fold with [`combine_first_success`](NomadEither::combine_first_success),
    /// starting from `right(R::empty())`.
    ///
    /// ```rust
    /// use nomad::{Either, NomadEither};
    /// use nomad::monoid::Sum;
    ///
    /// let all = NomadEither::<&str, &str, _>::concat_all_first_success(vec![
    ///     NomadEither::right(Sum(952)).effect("a"),
    ///     NomadEither::left("skipped").effect("b"),
    ///     NomadEither::right(Sum(17)).effect("c"),
    /// ]);
    /// assert_eq!(all.into_parts(), (vec!["a", "b", "c"], Either::right(Sum(969))));
    /// ```
    pub fn concat_all_first_success<I>(items: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        items
            .into_iter()
            .fold(NomadEither::right(R::empty()), Self::combine_first_success)
    }

    /// Fold with [`combine_first_failure`](NomadEither::combine_first_failure),
    /// starting from `right(R::empty())`.
    pub fn concat_all_first_failure<I>(items: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        items
            .into_iter()
            .fold(NomadEither::right(R::empty()), Self::combine_first_failure)
    }
}

impl<E, L, R> NomadEither<E, L, NomadEither<E, L, R>> {
    /// Remove one level of nesting.
    #[inline]
    pub fn flatten(self) -> NomadEither<E, L, R> {
        self.chain(|inner| inner)
    }
}

impl<E, L, R> From<Nomad<E, Either<L, R>>> for NomadEither<E, L, R> {
    fn from(nomad: Nomad<E, Either<L, R>>) -> Self {
        NomadEither(nomad)
    }
}

impl<E, L, R> From<NomadEither<E, L, R>> for Nomad<E, Either<L, R>> {
    fn from(ne: NomadEither<E, L, R>) -> Self {
        ne.0
    }
}

impl<E, L, R> From<Either<L, R>> for NomadEither<E, L, R> {
    fn from(either: Either<L, R>) -> Self {
        NomadEither::from_either(either)
    }
}

impl<E, L, R> From<Result<R, L>> for NomadEither<E, L, R> {
    fn from(result: Result<R, L>) -> Self {
        NomadEither::from_result(result)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    type Ne = NomadEither<u8, i8, i32>;

    fn ne_strategy() -> impl Strategy<Value = Ne> {
        (
            prop::collection::vec(any::<u8>(), 0..6),
            prop_oneof![
                any::<i8>().prop_map(Either::Left),
                any::<i32>().prop_map(Either::Right),
            ],
        )
            .prop_map(|(effects, value)| NomadEither::from_nomad(Nomad::new(effects, value)))
    }

    fn step(x: i32) -> Ne {
        if x % 3 == 0 {
            NomadEither::left(3).effect(1)
        } else {
            NomadEither::right(x.wrapping_add(1)).effect(2)
        }
    }

    fn other_step(x: i32) -> Ne {
        NomadEither::right(x.wrapping_mul(2)).effect(4).effect(5)
    }

    fn left_strategy() -> impl Strategy<Value = Ne> {
        (prop::collection::vec(any::<u8>(), 0..6), any::<i8>())
            .prop_map(|(effects, l)| NomadEither::left(l).effect_many(effects))
    }

    fn pick(a: i32) -> fn(i32) -> i32 {
        if a % 2 == 0 {
            |x| x.wrapping_add(1)
        } else {
            |x| x.wrapping_mul(3)
        }
    }

    proptest! {
        #[test]
        fn prop_swap_involution(ne in ne_strategy()) {
            prop_assert_eq!(ne.clone().swap().swap(), ne);
        }

        #[test]
        fn prop_functor_identity(ne in ne_strategy()) {
            prop_assert_eq!(ne.clone().map(|x| x), ne);
        }

        #[test]
        fn prop_monad_left_identity(a in any::<i32>()) {
            prop_assert_eq!(Ne::right(a).chain(step), step(a));
        }

        #[test]
        fn prop_monad_right_identity(ne in ne_strategy()) {
            prop_assert_eq!(ne.clone().chain(NomadEither::right), ne);
        }

        #[test]
        fn prop_monad_associativity(ne in ne_strategy()) {
            let left = ne.clone().chain(step).chain(other_step);
            let right = ne.chain(|a| step(a).chain(other_step));
            prop_assert_eq!(left, right);
        }

        #[test]
        fn prop_applicative_identity(ne in ne_strategy()) {
            let id = NomadEither::<u8, i8, _>::right(|x: i32| x);
            prop_assert_eq!(id.ap(ne.clone()), ne);
        }

        #[test]
        fn prop_applicative_homomorphism(a in any::<i32>(), selector in any::<i32>()) {
            let f = pick(selector);
            prop_assert_eq!(Ne::right(f(a)), NomadEither::right(f).ap(Ne::right(a)));
        }

        #[test]
        fn prop_applicative_interchange(ne in ne_strategy(), y in any::<i32>()) {
            let u = ne.map(pick);
            let left = u.clone().ap(Ne::right(y));
            let right = NomadEither::right(move |f: fn(i32) -> i32| f(y)).ap(u);
            prop_assert_eq!(left, right);
        }

        #[test]
        fn prop_applicative_identity_keeps_failed_log(x in left_strategy()) {
            let id = NomadEither::<u8, i8, _>::right(|v: i32| v).effect(9);
            let mut expected = x.effects().to_vec();
            expected.push(9);
            let out = id.ap(x.clone());
            prop_assert_eq!(out.effects(), &expected[..]);
            prop_assert_eq!(out.value(), x.value());
        }

        #[test]
        fn prop_applicative_failed_function_logs_after_argument(
            fn_log in prop::collection::vec(any::<u8>(), 0..6),
            l in any::<i8>(),
            x in ne_strategy(),
        ) {
            let failed = NomadEither::<u8, i8, fn(i32) -> i32>::left(l).effect_many(fn_log.clone());
            let mut expected = x.effects().to_vec();
            expected.extend(fn_log);
            let out = failed.ap(x);
            prop_assert_eq!(out.effects(), &expected[..]);
            prop_assert_eq!(out.value(), &Either::Left(l));
        }
    }
}
