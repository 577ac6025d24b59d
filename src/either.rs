//! The two-variant result carried by the logged result layers.
//!
//! `Either<L, R>` is right-biased: `Right` is the success path and `Left` holds
//! the failure payload. Every success-only transformation (`map`, `and_then`,
//! `ap`) passes a `Left` through untouched.
//!
//! Besides the usual accessors this module owns the *result-level* combining
//! rules that the logged layers lift:
//!
//! | rule | two `Left`s | two `Right`s |
//! |---|---|---|
//! | [`Either::ap`] | function side wins | apply |
//! | [`Either::ap_validation_with`] | combined | apply |
//! | [`Either::alt_validation_with`] | combined | first |
//! | [`Either::combine_first_success`] | first | combined |
//! | [`Either::combine_first_failure`] | first | combined |
//!
//! # Examples
//!
//! ```rust
//! use nomad::Either;
//!
//! fn parse(input: &str) -> Either<String, i32> {
//!     input
//!         .parse::<i32>()
//!         .map_err(|e| format!("{}: {}", input, e))
//!         .into()
//! }
//!
//! assert_eq!(parse("21").map(|n| n * 2), Either::right(42));
//! assert!(parse("x").map(|n| n * 2).is_left());
//! ```

use crate::Semigroup;

/// A value that is either a failure `Left(L)` or a success `Right(R)`.
///
/// # Example
///
/// ```rust
/// use nomad::Either;
///
/// let ok: Either<&str, i32> = Either::right(1);
/// let message = ok.fold(
///     |err| format!("failed: {}", err),
///     |n| format!("got {}", n),
/// );
/// assert_eq!(message, "got 1");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Either<L, R> {
    /// The failure variant
    Left(L),
    /// The success variant
    Right(R),
}

impl<L, R> Either<L, R> {
    // ========== Constructors ==========

    /// Create a `Left` (failure) value.
    ///
    /// ```rust
    /// use nomad::Either;
    ///
    /// let e: Either<&str, i32> = Either::left("boom");
    /// assert!(e.is_left());
    /// ```
    #[inline]
    pub fn left(value: L) -> Self {
        Either::Left(value)
    }

    /// Create a `Right` (success) value.
    #[inline]
    pub fn right(value: R) -> Self {
        Either::Right(value)
    }

    /// Convert a `Result`, mapping `Ok` to `Right` and `Err` to `Left`.
    ///
    /// ```rust
    /// use nomad::Either;
    ///
    /// let e: Either<String, i32> = Either::from_result(Err("no".to_string()));
    /// assert_eq!(e, Either::left("no".to_string()));
    /// ```
    #[inline]
    pub fn from_result(result: Result<R, L>) -> Self {
        match result {
            Ok(r) => Either::Right(r),
            Err(l) => Either::Left(l),
        }
    }

    // ========== Predicates ==========

    /// Returns `true` if this is a `Left` value.
    #[inline]
    pub fn is_left(&self) -> bool {
        matches!(self, Either::Left(_))
    }

    /// Returns `true` if this is a `Right` value.
    #[inline]
    pub fn is_right(&self) -> bool {
        matches!(self, Either::Right(_))
    }

    // ========== Extractors ==========

    /// Returns the failure payload if present, consuming self.
    ///
    /// ```rust
    /// use nomad::Either;
    ///
    /// assert_eq!(Either::<i32, &str>::left(3).into_left(), Some(3));
    /// assert_eq!(Either::<i32, &str>::right("a").into_left(), None);
    /// ```
    #[inline]
    pub fn into_left(self) -> Option<L> {
        match self {
            Either::Left(l) => Some(l),
            Either::Right(_) => None,
        }
    }

    /// Returns the success payload if present, consuming self.
    #[inline]
    pub fn into_right(self) -> Option<R> {
        match self {
            Either::Left(_) => None,
            Either::Right(r) => Some(r),
        }
    }

    /// Borrow both payloads.
    #[inline]
    pub fn as_ref(&self) -> Either<&L, &R> {
        match self {
            Either::Left(l) => Either::Left(l),
            Either::Right(r) => Either::Right(r),
        }
    }

    /// Convert into a `Result`, mapping `Right` to `Ok` and `Left` to `Err`.
    ///
    /// ```rust
    /// use nomad::Either;
    ///
    /// let e: Either<String, i32> = Either::right(5);
    /// assert_eq!(e.into_result(), Ok(5));
    /// ```
    #[inline]
    pub fn into_result(self) -> Result<R, L> {
        match self {
            Either::Left(l) => Err(l),
            Either::Right(r) => Ok(r),
        }
    }

    /// Return the success payload or compute one from the failure.
    ///
    /// ```rust
    /// use nomad::Either;
    ///
    /// let e: Either<&str, usize> = Either::left("four");
    /// assert_eq!(e.right_or_else(|s| s.len()), 4);
    /// ```
    #[inline]
    pub fn right_or_else<F>(self, f: F) -> R
    where
        F: FnOnce(L) -> R,
    {
        match self {
            Either::Left(l) => f(l),
            Either::Right(r) => r,
        }
    }

    // ========== Transformations ==========

    /// Transform the success payload.
    ///
    /// ```rust
    /// use nomad::Either;
    ///
    /// let e: Either<&str, i32> = Either::right(2);
    /// assert_eq!(e.map(|x| x + 1), Either::right(3));
    ///
    /// let e: Either<&str, i32> = Either::left("err");
    /// assert_eq!(e.map(|x| x + 1), Either::left("err"));
    /// ```
    #[inline]
    pub fn map<R2, F>(self, f: F) -> Either<L, R2>
    where
        F: FnOnce(R) -> R2,
    {
        match self {
            Either::Left(l) => Either::Left(l),
            Either::Right(r) => Either::Right(f(r)),
        }
    }

    /// Transform the failure payload.
    #[inline]
    pub fn map_left<L2, F>(self, f: F) -> Either<L2, R>
    where
        F: FnOnce(L) -> L2,
    {
        match self {
            Either::Left(l) => Either::Left(f(l)),
            Either::Right(r) => Either::Right(r),
        }
    }

    /// Transform whichever payload is present.
    ///
    /// ```rust
    /// use nomad::Either;
    ///
    /// let e: Either<i32, i32> = Either::left(1);
    /// assert_eq!(e.bimap(|l| l * 10, |r| r + 1), Either::left(10));
    /// ```
    #[inline]
    pub fn bimap<L2, R2, F, G>(self, on_left: F, on_right: G) -> Either<L2, R2>
    where
        F: FnOnce(L) -> L2,
        G: FnOnce(R) -> R2,
    {
        match self {
            Either::Left(l) => Either::Left(on_left(l)),
            Either::Right(r) => Either::Right(on_right(r)),
        }
    }

    /// Exchange the roles of failure and success.
    ///
    /// ```rust
    /// use nomad::Either;
    ///
    /// let e: Either<&str, i32> = Either::right(7);
    /// assert_eq!(e.swap(), Either::left(7));
    /// assert_eq!(e.swap().swap(), e);
    /// ```
    #[inline]
    pub fn swap(self) -> Either<R, L> {
        match self {
            Either::Left(l) => Either::Right(l),
            Either::Right(r) => Either::Left(r),
        }
    }

    /// Eliminate the `Either` by handling both variants.
    #[inline]
    pub fn fold<T, F, G>(self, on_left: F, on_right: G) -> T
    where
        F: FnOnce(L) -> T,
        G: FnOnce(R) -> T,
    {
        match self {
            Either::Left(l) => on_left(l),
            Either::Right(r) => on_right(r),
        }
    }

    /// Chain a computation on the success payload.
    ///
    /// ```rust
    /// use nomad::Either;
    ///
    /// let half = |x: i32| {
    ///     if x % 2 == 0 { Either::right(x / 2) } else { Either::left("odd") }
    /// };
    /// assert_eq!(Either::right(8).and_then(half), Either::right(4));
    /// assert_eq!(Either::right(3).and_then(half), Either::left("odd"));
    /// ```
    #[inline]
    pub fn and_then<R2, F>(self, f: F) -> Either<L, R2>
    where
        F: FnOnce(R) -> Either<L, R2>,
    {
        match self {
            Either::Left(l) => Either::Left(l),
            Either::Right(r) => f(r),
        }
    }

    /// Recover from a failure with another `Either`.
    #[inline]
    pub fn or_else<L2, F>(self, f: F) -> Either<L2, R>
    where
        F: FnOnce(L) -> Either<L2, R>,
    {
        match self {
            Either::Left(l) => f(l),
            Either::Right(r) => Either::Right(r),
        }
    }

    // ========== Combining rules ==========

    /// Apply a held function to the argument `fa`, first failure wins.
    ///
    /// The function side is inspected first, so when both sides failed the
    /// function's failure is kept.
    ///
    /// ```rust
    /// use nomad::Either;
    ///
    /// let f: Either<&str, fn(i32) -> i32> = Either::right(|x| x + 1);
    /// assert_eq!(f.ap(Either::right(1)), Either::right(2));
    ///
    /// let f: Either<&str, fn(i32) -> i32> = Either::left("fn");
    /// assert_eq!(f.ap(Either::left("arg")), Either::left("fn"));
    /// ```
    #[inline]
    pub fn ap<A, B>(self, fa: Either<L, A>) -> Either<L, B>
    where
        R: FnOnce(A) -> B,
    {
        match (self, fa) {
            (Either::Left(l), _) => Either::Left(l),
            (Either::Right(_), Either::Left(l)) => Either::Left(l),
            (Either::Right(f), Either::Right(a)) => Either::Right(f(a)),
        }
    }

    /// Apply a held function, combining two failures with `combine`.
    ///
    /// `combine` receives the function side's failure first.
    ///
    /// ```rust
    /// use nomad::Either;
    ///
    /// let f: Either<i32, fn(i32) -> i32> = Either::left(952);
    /// assert_eq!(f.ap_validation_with(Either::left(17), |a, b| a + b), Either::left(969));
    /// ```
    #[inline]
    pub fn ap_validation_with<A, B, C>(self, fa: Either<L, A>, combine: C) -> Either<L, B>
    where
        R: FnOnce(A) -> B,
        C: FnOnce(L, L) -> L,
    {
        match (self, fa) {
            (Either::Left(l1), Either::Left(l2)) => Either::Left(combine(l1, l2)),
            (Either::Left(l), Either::Right(_)) => Either::Left(l),
            (Either::Right(_), Either::Left(l)) => Either::Left(l),
            (Either::Right(f), Either::Right(a)) => Either::Right(f(a)),
        }
    }

    /// Keep the first success, combining two failures with `combine`.
    ///
    /// `that` is only evaluated when `self` is a failure.
    ///
    /// ```rust
    /// use nomad::Either;
    ///
    /// let first: Either<Vec<&str>, i32> = Either::left(vec!["a"]);
    /// let result = first.alt_validation_with(|| Either::left(vec!["b"]), |mut a, b| {
    ///     a.extend(b);
    ///     a
    /// });
    /// assert_eq!(result, Either::left(vec!["a", "b"]));
    /// ```
    #[inline]
    pub fn alt_validation_with<T, C>(self, that: T, combine: C) -> Either<L, R>
    where
        T: FnOnce() -> Either<L, R>,
        C: FnOnce(L, L) -> L,
    {
        match self {
            Either::Right(r) => Either::Right(r),
            Either::Left(l1) => match that() {
                Either::Left(l2) => Either::Left(combine(l1, l2)),
                Either::Right(r) => Either::Right(r),
            },
        }
    }

    /// Left-most success wins; two successes combine with `combine`.
    ///
    /// Two failures keep the first.
    #[inline]
    pub fn combine_first_success_with<C>(self, other: Self, combine: C) -> Self
    where
        C: FnOnce(R, R) -> R,
    {
        match (self, other) {
            (Either::Right(a), Either::Right(b)) => Either::Right(combine(a, b)),
            (Either::Right(a), Either::Left(_)) => Either::Right(a),
            (Either::Left(_), Either::Right(b)) => Either::Right(b),
            (Either::Left(a), Either::Left(_)) => Either::Left(a),
        }
    }

    /// Left-most failure wins; two successes combine with `combine`.
    #[inline]
    pub fn combine_first_failure_with<C>(self, other: Self, combine: C) -> Self
    where
        C: FnOnce(R, R) -> R,
    {
        match (self, other) {
            (Either::Left(a), _) => Either::Left(a),
            (Either::Right(_), Either::Left(b)) => Either::Left(b),
            (Either::Right(a), Either::Right(b)) => Either::Right(combine(a, b)),
        }
    }
}

impl<L, R: Semigroup> Either<L, R> {
    /// [`combine_first_success_with`](Either::combine_first_success_with) using `R`'s semigroup.
    ///
    /// ```rust
    /// use nomad::Either;
    /// use nomad::monoid::Sum;
    ///
    /// let a: Either<&str, Sum<i32>> = Either::left("a");
    /// let b: Either<&str, Sum<i32>> = Either::right(Sum(2));
    /// assert_eq!(a.combine_first_success(b), Either::right(Sum(2)));
    /// ```
    #[inline]
    pub fn combine_first_success(self, other: Self) -> Self {
        self.combine_first_success_with(other, R::combine)
    }

    /// [`combine_first_failure_with`](Either::combine_first_failure_with) using `R`'s semigroup.
    #[inline]
    pub fn combine_first_failure(self, other: Self) -> Self {
        self.combine_first_failure_with(other, R::combine)
    }
}

impl<L: Semigroup, R> Either<L, R> {
    /// [`ap_validation_with`](Either::ap_validation_with) using `L`'s semigroup.
    #[inline]
    pub fn ap_validation<A, B>(self, fa: Either<L, A>) -> Either<L, B>
    where
        R: FnOnce(A) -> B,
    {
        self.ap_validation_with(fa, L::combine)
    }

    /// [`alt_validation_with`](Either::alt_validation_with) using `L`'s semigroup.
    #[inline]
    pub fn alt_validation<T>(self, that: T) -> Either<L, R>
    where
        T: FnOnce() -> Either<L, R>,
    {
        self.alt_validation_with(that, L::combine)
    }
}

impl<L, R> Either<L, Either<L, R>> {
    /// Remove one level of nesting.
    #[inline]
    pub fn flatten(self) -> Either<L, R> {
        self.and_then(|inner| inner)
    }
}

impl<L, R> From<Result<R, L>> for Either<L, R> {
    fn from(result: Result<R, L>) -> Self {
        Either::from_result(result)
    }
}

impl<L, R> From<Either<L, R>> for Result<R, L> {
    fn from(either: Either<L, R>) -> Self {
        either.into_result()
    }
}
