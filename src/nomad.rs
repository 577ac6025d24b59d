//! A value paired with the ordered log of effects collected while computing it.
//!
//! `Nomad<E, V>` is the base layer every other type in this crate builds on.
//! Effects are opaque caller-defined annotations (log lines, timings, metrics);
//! the library only appends them and never inspects them.
//!
//! Every combinator consumes `self` and returns a new `Nomad`. Logs only ever
//! grow, and two logs always concatenate as `existing ++ new`.
//!
//! # Example
//!
//! ```rust
//! use nomad::Nomad;
//!
//! #[derive(Debug, Clone, PartialEq)]
//! enum Event {
//!     Parsed(i32),
//!     Doubled,
//! }
//!
//! let result = Nomad::pure(21)
//!     .effect_from_value(|n| Event::Parsed(*n))
//!     .map(|n| n * 2)
//!     .effect(Event::Doubled);
//!
//! assert_eq!(result.value(), &42);
//! assert_eq!(result.effects(), &[Event::Parsed(21), Event::Doubled]);
//! ```

use crate::{Monoid, Semigroup};

/// A value together with its accumulated effect log.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Nomad<E, V> {
    effects: Vec<E>,
    value: V,
}

impl<E> Nomad<E, ()> {
    /// Starting point for do-notation: no effects and an empty record.
    ///
    /// ```rust
    /// use nomad::Nomad;
    ///
    /// let record = Nomad::<&str, _>::unit()
    ///     .bind(|_| Nomad::pure("value"), |(), key| key);
    /// assert_eq!(record, Nomad::pure("value"));
    /// ```
    #[inline]
    pub fn unit() -> Self {
        Nomad::pure(())
    }
}

impl<E, V> Nomad<E, V> {
    /// Build a `Nomad` from an existing log and value.
    #[inline]
    pub fn new(effects: Vec<E>, value: V) -> Self {
        Nomad { effects, value }
    }

    /// Wrap a value with an empty effect log.
    ///
    /// ```rust
    /// use nomad::Nomad;
    ///
    /// let n: Nomad<String, i32> = Nomad::pure(1);
    /// assert!(n.effects().is_empty());
    /// ```
    #[inline]
    pub fn pure(value: V) -> Self {
        Nomad {
            effects: Vec::new(),
            value,
        }
    }

    /// The collected effects, in append order.
    #[inline]
    pub fn effects(&self) -> &[E] {
        &self.effects
    }

    /// The held value.
    #[inline]
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Split into the effect log and the value.
    #[inline]
    pub fn into_parts(self) -> (Vec<E>, V) {
        (self.effects, self.value)
    }

    /// Discard the log and keep the value.
    #[inline]
    pub fn into_value(self) -> V {
        self.value
    }

    /// Discard the value and keep the log.
    #[inline]
    pub fn into_effects(self) -> Vec<E> {
        self.effects
    }

    // ========== Effect attachers ==========

    /// Append one effect.
    #[inline]
    pub fn effect(mut self, effect: E) -> Self {
        self.effects.push(effect);
        self
    }

    /// Append several effects, keeping their order.
    ///
    /// ```rust
    /// use nomad::Nomad;
    ///
    /// let n = Nomad::pure(()).effect("a").effect_many(vec!["b", "c"]);
    /// assert_eq!(n.effects(), &["a", "b", "c"]);
    /// ```
    #[inline]
    pub fn effect_many<I>(mut self, effects: I) -> Self
    where
        I: IntoIterator<Item = E>,
    {
        self.effects.extend(effects);
        self
    }

    /// Append the effect produced by `thunk`, which runs exactly once, right now.
    #[inline]
    pub fn effect_lazy<F>(self, thunk: F) -> Self
    where
        F: FnOnce() -> E,
    {
        let effect = thunk();
        self.effect(effect)
    }

    /// Append an effect computed from the current value.
    #[inline]
    pub fn effect_from_value<F>(self, f: F) -> Self
    where
        F: FnOnce(&V) -> E,
    {
        let effect = f(&self.value);
        self.effect(effect)
    }

    // ========== Functor / Monad ==========

    /// Transform the value; the log is untouched.
    #[inline]
    pub fn map<V2, F>(self, f: F) -> Nomad<E, V2>
    where
        F: FnOnce(V) -> V2,
    {
        Nomad {
            effects: self.effects,
            value: f(self.value),
        }
    }

    /// Sequence a computation that depends on the value.
    ///
    /// The continuation's effects are appended after the current ones.
    ///
    /// ```rust
    /// use nomad::Nomad;
    ///
    /// let n = Nomad::pure(2)
    ///     .effect("start")
    ///     .chain(|x| Nomad::pure(x * 10).effect("scaled"));
    /// assert_eq!(n.into_parts(), (vec!["start", "scaled"], 20));
    /// ```
    #[inline]
    pub fn chain<V2, F>(self, f: F) -> Nomad<E, V2>
    where
        F: FnOnce(V) -> Nomad<E, V2>,
    {
        let Nomad { mut effects, value } = self;
        let next = f(value);
        effects.extend(next.effects);
        Nomad {
            effects,
            value: next.value,
        }
    }

    /// Run `f` for its effects and keep the current value.
    #[inline]
    pub fn chain_first<V2, F>(self, f: F) -> Self
    where
        F: FnOnce(&V) -> Nomad<E, V2>,
    {
        let next = f(&self.value);
        self.effect_many(next.effects)
    }

    /// Add a named binding to a record under construction.
    ///
    /// `f` sees the record built so far; `merge` folds the new binding into it.
    /// Effects from `f` are appended.
    ///
    /// ```rust
    /// use nomad::Nomad;
    ///
    /// #[derive(Debug, PartialEq)]
    /// struct Record {
    ///     key: &'static str,
    /// }
    ///
    /// let done: Nomad<(), Record> = Nomad::unit()
    ///     .bind(|_| Nomad::pure("value"), |(), key| Record { key });
    /// assert_eq!(done.value(), &Record { key: "value" });
    /// assert!(done.effects().is_empty());
    /// ```
    #[inline]
    pub fn bind<B, C, F, M>(self, f: F, merge: M) -> Nomad<E, C>
    where
        F: FnOnce(&V) -> Nomad<E, B>,
        M: FnOnce(V, B) -> C,
    {
        let Nomad { mut effects, value } = self;
        let bound = f(&value);
        effects.extend(bound.effects);
        Nomad {
            effects,
            value: merge(value, bound.value),
        }
    }

    /// Keep this value, sequencing `other` through [`ap`](Nomad::ap).
    ///
    /// Because this is derived from `ap`, `other`'s effects come first.
    #[inline]
    pub fn ap_first<V2>(self, other: Nomad<E, V2>) -> Nomad<E, V> {
        self.map(|a| move |_: V2| a).ap(other)
    }

    /// Keep `other`'s value, sequencing through [`ap`](Nomad::ap).
    #[inline]
    pub fn ap_second<V2>(self, other: Nomad<E, V2>) -> Nomad<E, V2> {
        self.map(|_| |b: V2| b).ap(other)
    }

    /// Merge two instances: logs as `self ++ other`, values through `combine`.
    #[inline]
    pub fn combine_with<F>(self, other: Self, combine: F) -> Self
    where
        F: FnOnce(V, V) -> V,
    {
        let Nomad { mut effects, value } = self;
        effects.extend(other.effects);
        Nomad {
            effects,
            value: combine(value, other.value),
        }
    }

    /// Put `prefix` in front of the current log.
    #[inline]
    pub(crate) fn after(self, mut prefix: Vec<E>) -> Self {
        prefix.extend(self.effects);
        Nomad {
            effects: prefix,
            value: self.value,
        }
    }

    /// Structural equality with caller-supplied equality for effects and values.
    ///
    /// Two instances are equal iff their logs are pairwise equal in order and
    /// their values are equal.
    ///
    /// ```rust
    /// use nomad::Nomad;
    ///
    /// let a = Nomad::pure(1.0_f64).effect("x");
    /// let b = Nomad::pure(1.0000001_f64).effect("x");
    /// assert!(a.eq_by(&b, |x, y| x == y, |x, y| (x - y).abs() < 1e-3));
    /// ```
    pub fn eq_by<FE, FV>(&self, other: &Self, eq_effect: FE, eq_value: FV) -> bool
    where
        FE: Fn(&E, &E) -> bool,
        FV: FnOnce(&V, &V) -> bool,
    {
        self.effects.len() == other.effects.len()
            && self
                .effects
                .iter()
                .zip(other.effects.iter())
                .all(|(a, b)| eq_effect(a, b))
            && eq_value(&self.value, &other.value)
    }
}

impl<E, F> Nomad<E, F> {
    /// Apply the held function to the value held by `fa`.
    ///
    /// The argument's effects come before the function's.
    ///
    /// ```rust
    /// use nomad::Nomad;
    ///
    /// let f = Nomad::pure(|x: i32| x + 1).effect("fn");
    /// let a = Nomad::pure(1).effect("arg");
    /// assert_eq!(f.ap(a).into_parts(), (vec!["arg", "fn"], 2));
    /// ```
    #[inline]
    pub fn ap<A, B>(self, fa: Nomad<E, A>) -> Nomad<E, B>
    where
        F: FnOnce(A) -> B,
    {
        let Nomad { mut effects, value } = fa;
        effects.extend(self.effects);
        Nomad {
            effects,
            value: (self.value)(value),
        }
    }
}

impl<E, V> Nomad<E, Nomad<E, V>> {
    /// Remove one level of nesting, appending the inner log.
    #[inline]
    pub fn flatten(self) -> Nomad<E, V> {
        self.chain(|inner| inner)
    }
}

impl<E, V: Semigroup> Semigroup for Nomad<E, V> {
    fn combine(self, other: Self) -> Self {
        self.combine_with(other, V::combine)
    }
}

impl<E, V: Monoid> Monoid for Nomad<E, V> {
    fn empty() -> Self {
        Nomad::pure(V::empty())
    }
}

impl<E, V> From<V> for Nomad<E, V> {
    fn from(value: V) -> Self {
        Nomad::pure(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monoid::{fold_all, Sum};

    #[test]
    fn test_pure_has_no_effects() {
        let n: Nomad<&str, i32> = Nomad::pure(1);
        assert_eq!(n.into_parts(), (vec![], 1));
    }

    #[test]
    fn test_effects_keep_append_order() {
        let n = Nomad::pure(0).effect("a").effect("b");
        assert_eq!(n.effects(), &["a", "b"]);
    }

    #[test]
    fn test_effect_lazy_runs_once() {
        let mut calls = 0;
        let n = Nomad::pure(0).effect_lazy(|| {
            calls += 1;
            "lazy"
        });
        assert_eq!(calls, 1);
        assert_eq!(n.effects(), &["lazy"]);
    }

    #[test]
    fn test_effect_from_value() {
        let n = Nomad::pure(5).effect_from_value(|v| format!("saw {}", v));
        assert_eq!(n.effects(), &["saw 5".to_string()]);
        assert_eq!(n.value(), &5);
    }

    #[test]
    fn test_map_keeps_log() {
        let n = Nomad::pure(2).effect("e").map(|x| x * 3);
        assert_eq!(n.into_parts(), (vec!["e"], 6));
    }

    #[test]
    fn test_ap_logs_argument_then_function() {
        let fab = Nomad::pure(|x: i32| x * 2).effect("fn");
        let fa = Nomad::pure(4).effect("arg");
        assert_eq!(fab.ap(fa).into_parts(), (vec!["arg", "fn"], 8));
    }

    #[test]
    fn test_ap_first_and_second() {
        let a = Nomad::pure(1).effect("a");
        let b = Nomad::pure("b").effect("b");
        assert_eq!(a.clone().ap_first(b.clone()).into_parts(), (vec!["b", "a"], 1));
        assert_eq!(a.ap_second(b).into_parts(), (vec!["b", "a"], "b"));
    }

    #[test]
    fn test_chain_concatenates() {
        let n = Nomad::pure(1)
            .effect("one")
            .chain(|x| Nomad::pure(x + 1).effect("two"));
        assert_eq!(n.into_parts(), (vec!["one", "two"], 2));
    }

    #[test]
    fn test_chain_first_keeps_value() {
        let n = Nomad::pure(3).chain_first(|x| Nomad::pure(x * 100).effect("side"));
        assert_eq!(n.into_parts(), (vec!["side"], 3));
    }

    #[test]
    fn test_flatten() {
        let nested = Nomad::pure(Nomad::pure(1).effect("inner")).effect("outer");
        assert_eq!(nested.flatten().into_parts(), (vec!["outer", "inner"], 1));
    }

    #[test]
    fn test_do_notation() {
        #[derive(Debug, PartialEq)]
        struct Record {
            key: String,
        }

        let record = Nomad::<String, ()>::unit().bind(
            |_| Nomad::pure("value".to_string()),
            |(), key| Record { key },
        );
        assert_eq!(
            record,
            Nomad::pure(Record {
                key: "value".to_string()
            })
        );
    }

    #[test]
    fn test_semigroup_and_monoid() {
        let a = Nomad::pure(Sum(952)).effect("a");
        let b = Nomad::pure(Sum(17)).effect("b");
        assert_eq!(a.clone().combine(b.clone()).into_parts(), (vec!["a", "b"], Sum(969)));
        assert_eq!(fold_all(vec![a, b]), Nomad::new(vec!["a", "b"], Sum(969)));
    }

    #[test]
    fn test_eq_by() {
        let a = Nomad::pure(1).effect("x");
        let b = Nomad::pure(2).effect("x");
        assert!(!a.eq_by(&b, |x, y| x == y, |x, y| x == y));
        assert!(a.eq_by(&b, |x, y| x == y, |_, _| true));
        let c = Nomad::pure(1).effect("x").effect("y");
        assert!(!a.eq_by(&c, |x, y| x == y, |x, y| x == y));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn nomad_strategy() -> impl Strategy<Value = Nomad<u8, i32>> {
        (prop::collection::vec(any::<u8>(), 0..8), any::<i32>())
            .prop_map(|(effects, value)| Nomad::new(effects, value))
    }

    fn step(x: i32) -> Nomad<u8, i32> {
        Nomad::pure(x.wrapping_add(1)).effect((x & 0xff) as u8)
    }

    fn other_step(x: i32) -> Nomad<u8, i32> {
        Nomad::pure(x.wrapping_mul(3)).effect(7).effect(9)
    }

    proptest! {
        #[test]
        fn prop_functor_identity(n in nomad_strategy()) {
            prop_assert_eq!(n.clone().map(|x| x), n);
        }

        #[test]
        fn prop_functor_composition(n in nomad_strategy()) {
            let f = |x: i32| x.wrapping_add(1);
            let g = |x: i32| x.wrapping_mul(2);
            prop_assert_eq!(n.clone().map(f).map(g), n.map(|x| g(f(x))));
        }

        #[test]
        fn prop_monad_left_identity(a in any::<i32>()) {
            prop_assert_eq!(Nomad::pure(a).chain(step), step(a));
        }

        #[test]
        fn prop_monad_right_identity(n in nomad_strategy()) {
            prop_assert_eq!(n.clone().chain(Nomad::pure), n);
        }

        #[test]
        fn prop_monad_associativity(n in nomad_strategy()) {
            let left = n.clone().chain(step).chain(other_step);
            let right = n.chain(|a| step(a).chain(other_step));
            prop_assert_eq!(left, right);
        }

        #[test]
        fn prop_applicative_identity(n in nomad_strategy()) {
            prop_assert_eq!(Nomad::pure(|x: i32| x).ap(n.clone()), n);
        }

        #[test]
        fn prop_applicative_homomorphism(a in any::<i32>()) {
            let f = |x: i32| x.wrapping_sub(5);
            prop_assert_eq!(
                Nomad::<u8, _>::pure(f).ap(Nomad::pure(a)),
                Nomad::pure(f(a))
            );
        }
    }
}
