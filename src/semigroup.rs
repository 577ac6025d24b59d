//! Semigroup trait for associative combining rules
//!
//! A Semigroup is a type with an associative binary operation. The logged
//! computation types use it wherever two payloads have to be merged into one:
//! combining two success values (`Nomad` as a semigroup, `combine_first_success`)
//! or merging two failures under validation semantics (`ap_validation`,
//! `alt_validation`).
//!
//! # Mathematical Properties
//!
//! For a type to be a valid Semigroup, the `combine` operation must be associative:
//! ```text
//! a.combine(b).combine(c) == a.combine(b.combine(c))
//! ```
//!
//! # Examples
//!
//! ```
//! use nomad::Semigroup;
//!
//! let v1 = vec![1, 2, 3];
//! let v2 = vec![4, 5, 6];
//! assert_eq!(v1.combine(v2), vec![1, 2, 3, 4, 5, 6]);
//!
//! let t1 = (vec![1], "a".to_string());
//! let t2 = (vec![2], "b".to_string());
//! assert_eq!(t1.combine(t2), (vec![1, 2], "ab".to_string()));
//! ```
//!
//! Primitive numbers have more than one lawful rule (sum, product, max...),
//! so they go through the wrappers in [`crate::monoid`].

/// A type that supports an associative binary operation
///
/// # Laws
///
/// ```text
/// a.combine(b).combine(c) == a.combine(b.combine(c))
/// ```
///
/// `combine` takes `self` by value; clone first if the operands are still needed.
pub trait Semigroup: Sized {
    /// Combine this value with another value associatively
    ///
    /// ```
    /// use nomad::Semigroup;
    ///
    /// assert_eq!(vec![1, 2].combine(vec![3, 4]), vec![1, 2, 3, 4]);
    /// ```
    fn combine(self, other: Self) -> Self;
}

impl<T> Semigroup for Vec<T> {
    #[inline]
    fn combine(mut self, other: Self) -> Self {
        self.extend(other);
        self
    }
}

impl Semigroup for String {
    #[inline]
    fn combine(mut self, other: Self) -> Self {
        self.push_str(&other);
        self
    }
}

/// `None` is neutral; two `Some`s combine their contents.
impl<T: Semigroup> Semigroup for Option<T> {
    #[inline]
    fn combine(self, other: Self) -> Self {
        match (self, other) {
            (Some(a), Some(b)) => Some(a.combine(b)),
            (Some(a), None) => Some(a),
            (None, b) => b,
        }
    }
}

macro_rules! impl_semigroup_tuple {
    ($($idx:tt $T:ident),+) => {
        impl<$($T: Semigroup),+> Semigroup for ($($T,)+) {
            #[inline]
            fn combine(self, other: Self) -> Self {
                (
                    $(self.$idx.combine(other.$idx)),+
                )
            }
        }
    };
}

impl_semigroup_tuple!(0 T1, 1 T2);
impl_semigroup_tuple!(0 T1, 1 T2, 2 T3);
impl_semigroup_tuple!(0 T1, 1 T2, 2 T3, 3 T4);
impl_semigroup_tuple!(0 T1, 1 T2, 2 T3, 3 T4, 4 T5);
impl_semigroup_tuple!(0 T1, 1 T2, 2 T3, 3 T4, 4 T5, 5 T6);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec_semigroup_keeps_order() {
        assert_eq!(vec![1, 2].combine(vec![3]), vec![1, 2, 3]);
        assert_eq!(Vec::<i32>::new().combine(vec![1]), vec![1]);
    }

    #[test]
    fn test_string_semigroup() {
        assert_eq!("Hello, ".to_string().combine("World!".to_string()), "Hello, World!");
    }

    #[test]
    fn test_option_semigroup() {
        assert_eq!(Some(vec![1]).combine(Some(vec![2])), Some(vec![1, 2]));
        assert_eq!(Some(vec![1]).combine(None), Some(vec![1]));
        assert_eq!(None.combine(Some(vec![2])), Some(vec![2]));
        assert_eq!(None::<Vec<i32>>.combine(None), None);
    }

    #[test]
    fn test_tuple_semigroup() {
        let t1 = (vec![1], "a".to_string(), vec!["x"]);
        let t2 = (vec![2], "b".to_string(), vec!["y"]);
        assert_eq!(
            t1.combine(t2),
            (vec![1, 2], "ab".to_string(), vec!["x", "y"])
        );
    }
}
