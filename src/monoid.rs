//! Monoid trait and numeric combining rules
//!
//! A `Monoid` is a [`Semigroup`] with an identity element. The logged types
//! need an identity in two places: folding many logged values into one
//! (`Nomad` is a monoid whenever its value is), and seeding the
//! `concat_all_*` folds of the result layers with `right(M::empty())`.
//!
//! # Laws
//!
//! ```text
//! a.combine(M::empty()) == a           (right identity)
//! M::empty().combine(a) == a           (left identity)
//! ```
//!
//! # Numeric rules
//!
//! Numbers combine in more than one lawful way, so they are wrapped:
//!
//! ```
//! use nomad::monoid::{fold_all, Product, Sum};
//!
//! assert_eq!(fold_all(vec![Sum(1), Sum(2), Sum(3)]), Sum(6));
//! assert_eq!(fold_all(vec![Product(2), Product(3)]), Product(6));
//! ```

use std::ops::{Add, Mul};

use crate::Semigroup;

/// A `Semigroup` with an identity element.
///
/// ```rust
/// use nomad::{Monoid, Semigroup};
///
/// let v = vec![1, 2, 3];
/// let empty: Vec<i32> = Monoid::empty();
/// assert_eq!(v.clone().combine(empty), v);
/// ```
pub trait Monoid: Semigroup {
    /// The identity element for this monoid.
    fn empty() -> Self;
}

impl<T> Monoid for Vec<T> {
    fn empty() -> Self {
        Vec::new()
    }
}

impl Monoid for String {
    fn empty() -> Self {
        String::new()
    }
}

impl<T: Semigroup> Monoid for Option<T> {
    fn empty() -> Self {
        None
    }
}

macro_rules! impl_monoid_tuple {
    ($($T:ident),+) => {
        impl<$($T: Monoid),+> Monoid for ($($T,)+) {
            fn empty() -> Self {
                ($($T::empty(),)+)
            }
        }
    };
}

impl_monoid_tuple!(T1, T2);
impl_monoid_tuple!(T1, T2, T3);
impl_monoid_tuple!(T1, T2, T3, T4);
impl_monoid_tuple!(T1, T2, T3, T4, T5);
impl_monoid_tuple!(T1, T2, T3, T4, T5, T6);

/// Numbers under addition. Identity: `0`.
///
/// ```
/// use nomad::monoid::Sum;
/// use nomad::Semigroup;
///
/// assert_eq!(Sum(952).combine(Sum(17)), Sum(969));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Sum<T>(pub T);

impl<T: Add<Output = T>> Semigroup for Sum<T> {
    fn combine(self, other: Self) -> Self {
        Sum(self.0 + other.0)
    }
}

impl<T: Add<Output = T> + Default> Monoid for Sum<T> {
    fn empty() -> Self {
        Sum(T::default())
    }
}

/// Numbers under multiplication. Identity: `1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Product<T>(pub T);

/// Types with a multiplicative identity.
pub trait One {
    /// Returns `1` for this type.
    fn one() -> Self;
}

macro_rules! impl_one {
    ($one:expr => $($t:ty),+) => {
        $(
            impl One for $t {
                fn one() -> Self {
                    $one
                }
            }
        )+
    };
}

impl_one!(1 => i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
impl_one!(1.0 => f32, f64);

impl<T: Mul<Output = T>> Semigroup for Product<T> {
    fn combine(self, other: Self) -> Self {
        Product(self.0 * other.0)
    }
}

impl<T: Mul<Output = T> + One> Monoid for Product<T> {
    fn empty() -> Self {
        Product(T::one())
    }
}

/// Keeps the larger value. Semigroup only; use `Option<Max<T>>` for an identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Max<T>(pub T);

impl<T: Ord> Semigroup for Max<T> {
    fn combine(self, other: Self) -> Self {
        Max(self.0.max(other.0))
    }
}

/// Keeps the smaller value. Semigroup only; use `Option<Min<T>>` for an identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Min<T>(pub T);

impl<T: Ord> Semigroup for Min<T> {
    fn combine(self, other: Self) -> Self {
        Min(self.0.min(other.0))
    }
}

/// Keeps the first operand.
///
/// Useful as a failure rule that reproduces "first failure wins" under
/// validation semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct First<T>(pub T);

impl<T> Semigroup for First<T> {
    fn combine(self, _other: Self) -> Self {
        self
    }
}

/// Keeps the last operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Last<T>(pub T);

impl<T> Semigroup for Last<T> {
    fn combine(self, other: Self) -> Self {
        other
    }
}

/// Fold an iterator with the monoid, starting from `empty()`.
///
/// ```
/// use nomad::monoid::fold_all;
///
/// let result: Vec<i32> = fold_all(vec![vec![1, 2], vec![3], vec![]]);
/// assert_eq!(result, vec![1, 2, 3]);
/// ```
pub fn fold_all<M, I>(iter: I) -> M
where
    M: Monoid,
    I: IntoIterator<Item = M>,
{
    iter.into_iter().fold(M::empty(), |acc, x| acc.combine(x))
}
