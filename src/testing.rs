//! Testing utilities for code built on nomad's types.
//!
//! Assertion macros that accept an [`Either`], a [`NomadEither`] or a
//! `Result`, and (with the `proptest` feature) `Arbitrary` implementations
//! for [`Either`] and [`Nomad`](crate::Nomad).
//!
//! # Example
//!
//! ```rust
//! use nomad::{assert_effects, assert_left, assert_right, NomadEither};
//!
//! let ok = NomadEither::<&str, String, i32>::right(42).effect("computed");
//! assert_effects!(ok, ["computed"]);
//! assert_right!(ok, 42);
//!
//! let failed = NomadEither::<&str, &str, i32>::left("nope");
//! assert_left!(failed);
//! ```

use crate::{Either, NomadEither};

/// Conversion used by the assertion macros to inspect a result.
#[doc(hidden)]
pub trait IntoEither<L, R> {
    /// The underlying result.
    fn into_either(self) -> Either<L, R>;
}

impl<L, R> IntoEither<L, R> for Either<L, R> {
    fn into_either(self) -> Either<L, R> {
        self
    }
}

impl<E, L, R> IntoEither<L, R> for NomadEither<E, L, R> {
    fn into_either(self) -> Either<L, R> {
        NomadEither::into_either(self)
    }
}

impl<L, R> IntoEither<L, R> for Result<R, L> {
    fn into_either(self) -> Either<L, R> {
        Either::from_result(self)
    }
}

/// Assert that a result is a success, optionally with a given payload.
///
/// Accepts an [`Either`], a [`NomadEither`] or a `Result`.
///
/// ```rust
/// use nomad::{assert_right, Either};
///
/// assert_right!(Either::<String, _>::right(1));
/// assert_right!(Either::<String, _>::right(1), 1);
/// ```
#[macro_export]
macro_rules! assert_right {
    ($value:expr) => {
        match $crate::testing::IntoEither::into_either($value) {
            $crate::Either::Right(_) => {}
            $crate::Either::Left(l) => {
                panic!("Expected Right, got Left: {:?}", l);
            }
        }
    };
    ($value:expr, $expected:expr) => {
        match $crate::testing::IntoEither::into_either($value) {
            $crate::Either::Right(r) => {
                assert_eq!(r, $expected);
            }
            $crate::Either::Left(l) => {
                panic!("Expected Right({:?}), got Left: {:?}", $expected, l);
            }
        }
    };
}

/// Assert that a result is a failure, optionally with a given payload.
///
/// ```rust
/// use nomad::{assert_left, NomadEither};
///
/// let failed = NomadEither::<(), _, i32>::left("boom");
/// assert_left!(failed.clone());
/// assert_left!(failed, "boom");
/// ```
#[macro_export]
macro_rules! assert_left {
    ($value:expr) => {
        match $crate::testing::IntoEither::into_either($value) {
            $crate::Either::Left(_) => {}
            $crate::Either::Right(r) => {
                panic!("Expected Left, got Right: {:?}", r);
            }
        }
    };
    ($value:expr, $expected:expr) => {
        match $crate::testing::IntoEither::into_either($value) {
            $crate::Either::Left(l) => {
                assert_eq!(l, $expected);
            }
            $crate::Either::Right(r) => {
                panic!("Expected Left({:?}), got Right: {:?}", $expected, r);
            }
        }
    };
}

/// Assert the effect log of a [`Nomad`](crate::Nomad) or [`NomadEither`].
///
/// The value is only borrowed.
///
/// ```rust
/// use nomad::{assert_effects, Nomad};
///
/// let n = Nomad::pure(1).effect("a").effect("b");
/// assert_effects!(n, ["a", "b"]);
/// assert_effects!(n, vec!["a", "b"]);
/// ```
#[macro_export]
macro_rules! assert_effects {
    ($value:expr, $expected:expr) => {
        assert_eq!($value.effects(), &$expected[..], "effect log mismatch");
    };
}

#[cfg(feature = "proptest")]
use proptest::prelude::*;

#[cfg(feature = "proptest")]
impl<L, R> Arbitrary for Either<L, R>
where
    L: Arbitrary + 'static,
    R: Arbitrary + 'static,
    L::Strategy: 'static,
    R::Strategy: 'static,
{
    type Parameters = (L::Parameters, R::Parameters);
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(args: Self::Parameters) -> Self::Strategy {
        let (l_params, r_params) = args;
        prop_oneof![
            any_with::<L>(l_params).prop_map(Either::Left),
            any_with::<R>(r_params).prop_map(Either::Right),
        ]
        .boxed()
    }
}

#[cfg(feature = "proptest")]
impl<E, V> Arbitrary for crate::Nomad<E, V>
where
    E: Arbitrary + 'static,
    V: Arbitrary + 'static,
    E::Strategy: 'static,
    V::Strategy: 'static,
{
    type Parameters = (E::Parameters, V::Parameters);
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(args: Self::Parameters) -> Self::Strategy {
        let (e_params, v_params) = args;
        (
            proptest::collection::vec(any_with::<E>(e_params), 0..8),
            any_with::<V>(v_params),
        )
            .prop_map(|(effects, value)| crate::Nomad::new(effects, value))
            .boxed()
    }
}

#[cfg(test)]
mod tests {
    use crate::{Either, Nomad, NomadEither};

    #[test]
    fn assert_right_macro() {
        assert_right!(Either::<String, _>::right(42));
        assert_right!(NomadEither::<(), String, _>::right(42), 42);
        assert_right!(Ok::<_, String>(1), 1);
    }

    #[test]
    fn assert_left_macro() {
        assert_left!(Either::<_, i32>::left("error"));
        assert_left!(NomadEither::<(), _, i32>::left("error"), "error");
        assert_left!(Err::<i32, _>("error"), "error");
    }

    #[test]
    fn assert_effects_macro() {
        let n = Nomad::pure(0).effect("a").effect("b");
        assert_effects!(n, ["a", "b"]);
        let ne = NomadEither::<_, (), i32>::right(0).effect(1);
        assert_effects!(ne, vec![1]);
    }

    #[test]
    #[should_panic(expected = "Expected Right, got Left")]
    fn assert_right_panics_on_left() {
        assert_right!(Either::<_, i32>::left("error"));
    }

    #[test]
    #[should_panic(expected = "Expected Left, got Right")]
    fn assert_left_panics_on_right() {
        assert_left!(Either::<String, _>::right(42));
    }

    #[test]
    #[should_panic(expected = "Expected Right(1), got Left")]
    fn assert_right_with_value_panics_on_left() {
        assert_right!(Either::<_, i32>::left("error"), 1);
    }

    #[test]
    #[should_panic(expected = "effect log mismatch")]
    fn assert_effects_panics_on_mismatch() {
        let n = Nomad::pure(0).effect("a");
        assert_effects!(n, ["b"]);
    }

    #[cfg(feature = "proptest")]
    mod proptest_tests {
        use crate::{Either, Nomad};
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn either_arbitrary_generates_valid_instances(e in any::<Either<String, i32>>()) {
                prop_assert_ne!(e.is_left(), e.is_right());
            }

            #[test]
            fn nomad_arbitrary_keeps_log_bounded(n in any::<Nomad<u8, i32>>()) {
                prop_assert!(n.effects().len() < 8);
            }
        }
    }
}
