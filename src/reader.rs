//! A function from a dependency to a result.
//!
//! `Reader<Dep, T>` is the plumbing under [`AsyncNomad`](crate::AsyncNomad):
//! it threads a dependency value, supplied once at the outer boundary, into
//! every step that needs it. It is also the return type of the branches given
//! to [`AsyncNomad::fold`](crate::AsyncNomad::fold) and
//! [`AsyncNomad::get_or_else`](crate::AsyncNomad::get_or_else).
//!
//! # Example
//!
//! ```rust
//! use nomad::Reader;
//!
//! #[derive(Clone)]
//! struct Config {
//!     greeting: String,
//! }
//!
//! let greet = Reader::asks(|c: Config| c.greeting).map(|g| format!("{}, world", g));
//! assert_eq!(greet.run(Config { greeting: "hello".into() }), "hello, world");
//! ```

use std::sync::Arc;

type ReaderFn<Dep, T> = Arc<dyn Fn(Dep) -> T + Send + Sync>;

/// A cloneable computation that reads a `Dep` to produce a `T`.
pub struct Reader<Dep, T> {
    f: ReaderFn<Dep, T>,
}

impl<Dep, T> Clone for Reader<Dep, T> {
    fn clone(&self) -> Self {
        Reader {
            f: Arc::clone(&self.f),
        }
    }
}

impl<Dep, T> std::fmt::Debug for Reader<Dep, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reader").field("f", &"<function>").finish()
    }
}

impl<Dep: 'static> Reader<Dep, Dep> {
    /// The dependency itself.
    pub fn ask() -> Self {
        Reader::new(|dep| dep)
    }
}

impl<Dep: 'static, T: 'static> Reader<Dep, T> {
    /// Wrap a function of the dependency.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(Dep) -> T + Send + Sync + 'static,
    {
        Reader { f: Arc::new(f) }
    }

    /// Ignore the dependency and return a copy of `value`.
    pub fn of(value: T) -> Self
    where
        T: Clone + Send + Sync,
    {
        Reader::new(move |_| value.clone())
    }

    /// Project a value out of the dependency.
    pub fn asks<F>(f: F) -> Self
    where
        F: Fn(Dep) -> T + Send + Sync + 'static,
    {
        Reader::new(f)
    }

    /// Supply the dependency.
    pub fn run(&self, dep: Dep) -> T {
        (self.f)(dep)
    }

    /// Transform the produced value.
    pub fn map<U, F>(self, f: F) -> Reader<Dep, U>
    where
        U: 'static,
        F: Fn(T) -> U + Send + Sync + 'static,
    {
        Reader::new(move |dep| f(self.run(dep)))
    }

    /// Sequence a reader that depends on the produced value; both see the same
    /// dependency.
    pub fn chain<U, F>(self, f: F) -> Reader<Dep, U>
    where
        Dep: Clone,
        U: 'static,
        F: Fn(T) -> Reader<Dep, U> + Send + Sync + 'static,
    {
        Reader::new(move |dep: Dep| f(self.run(dep.clone())).run(dep))
    }

    /// Adapt to a larger dependency through `project`.
    ///
    /// ```rust
    /// use nomad::Reader;
    ///
    /// let port = Reader::asks(|port: u16| port + 1);
    /// let from_pair = port.local(|(_, port): (String, u16)| port);
    /// assert_eq!(from_pair.run(("localhost".to_string(), 8079)), 8080);
    /// ```
    pub fn local<Dep0, P>(self, project: P) -> Reader<Dep0, T>
    where
        Dep0: 'static,
        P: Fn(Dep0) -> Dep + Send + Sync + 'static,
    {
        Reader::new(move |dep| self.run(project(dep)))
    }
}
