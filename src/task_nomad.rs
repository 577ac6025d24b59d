//! Deferred logged computations.
//!
//! A `TaskNomad<E, V>` is a zero-argument asynchronous computation that, each
//! time it is run, produces one [`Nomad<E, V>`](crate::Nomad). Nothing happens
//! until [`run`](TaskNomad::run) is called, and every call starts the work
//! again from scratch: results are never cached.
//!
//! Combinators wrap the computation and return a new one; the resolved
//! `Nomad` goes through the same rules as the synchronous layer.
//!
//! # Example
//!
//! ```
//! use nomad::{Nomad, TaskNomad};
//!
//! # tokio_test::block_on(async {
//! let task = TaskNomad::<&str, _>::pure(20)
//!     .effect("start")
//!     .map(|x| x + 1)
//!     .chain(|x| TaskNomad::pure(x * 2).effect("doubled"));
//!
//! assert_eq!(task.run().await, Nomad::new(vec!["start", "doubled"], 42));
//! # });
//! ```

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::{Monoid, Nomad, Semigroup};

/// A boxed future that is Send
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Function type for TaskNomad internals
type TaskFn<E, V> = Arc<dyn Fn() -> BoxFuture<'static, Nomad<E, V>> + Send + Sync>;

/// A re-runnable asynchronous computation producing a [`Nomad`].
///
/// Cloning is cheap: clones share the same underlying function.
pub struct TaskNomad<E, V> {
    run_fn: TaskFn<E, V>,
}

impl<E, V> Clone for TaskNomad<E, V> {
    fn clone(&self) -> Self {
        TaskNomad {
            run_fn: Arc::clone(&self.run_fn),
        }
    }
}

// Manual Debug implementation since Fn is not Debug
impl<E, V> std::fmt::Debug for TaskNomad<E, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskNomad")
            .field("run_fn", &"<function>")
            .finish()
    }
}

impl<E> TaskNomad<E, ()>
where
    E: Send + 'static,
{
    /// Starting point for do-notation.
    pub fn unit() -> Self {
        TaskNomad::new(|| async { Nomad::pure(()) })
    }
}

impl<E, V> TaskNomad<E, V>
where
    E: Send + 'static,
    V: Send + 'static,
{
    /// Create from a function that starts a fresh computation on every call.
    ///
    /// ```
    /// use std::sync::atomic::{AtomicUsize, Ordering};
    /// use std::sync::Arc;
    /// use nomad::{Nomad, TaskNomad};
    ///
    /// # tokio_test::block_on(async {
    /// let runs = Arc::new(AtomicUsize::new(0));
    /// let counter = Arc::clone(&runs);
    /// let task: TaskNomad<(), usize> = TaskNomad::new(move || {
    ///     let n = counter.fetch_add(1, Ordering::SeqCst);
    ///     async move { Nomad::pure(n) }
    /// });
    ///
    /// assert_eq!(task.run().await.into_value(), 0);
    /// assert_eq!(task.run().await.into_value(), 1);
    /// assert_eq!(runs.load(Ordering::SeqCst), 2);
    /// # });
    /// ```
    pub fn new<F, Fut>(f: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Nomad<E, V>> + Send + 'static,
    {
        TaskNomad {
            run_fn: Arc::new(move || Box::pin(f())),
        }
    }

    /// Start the computation and return a future of its result.
    pub fn run(&self) -> BoxFuture<'static, Nomad<E, V>> {
        (self.run_fn)()
    }

    /// A computation that resolves to `value` with no effects.
    pub fn pure(value: V) -> Self
    where
        V: Clone + Sync,
    {
        TaskNomad::new(move || futures::future::ready(Nomad::pure(value.clone())))
    }

    /// A computation that resolves to a copy of `nomad`.
    pub fn from_nomad(nomad: Nomad<E, V>) -> Self
    where
        E: Clone + Sync,
        V: Clone + Sync,
    {
        TaskNomad::new(move || futures::future::ready(nomad.clone()))
    }

    /// Lift a plain asynchronous function; the log starts empty.
    ///
    /// ```
    /// use nomad::TaskNomad;
    ///
    /// # tokio_test::block_on(async {
    /// let task = TaskNomad::<(), _>::from_task(|| async { 7 });
    /// assert_eq!(task.run().await.into_value(), 7);
    /// # });
    /// ```
    pub fn from_task<F, Fut>(f: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = V> + Send + 'static,
    {
        TaskNomad::new(move || {
            let fut = f();
            async move { Nomad::pure(fut.await) }
        })
    }

    // ========== Effect attachers ==========

    /// Append one effect after the computation resolves.
    pub fn effect(self, effect: E) -> Self
    where
        E: Clone + Sync,
    {
        TaskNomad::new(move || {
            let fut = self.run();
            let effect = effect.clone();
            async move { fut.await.effect(effect) }
        })
    }

    /// Append several effects after the computation resolves.
    pub fn effect_many<I>(self, effects: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Clone + Sync,
    {
        let effects: Vec<E> = effects.into_iter().collect();
        TaskNomad::new(move || {
            let fut = self.run();
            let effects = effects.clone();
            async move { fut.await.effect_many(effects) }
        })
    }

    /// Append the effect produced by `thunk`, evaluated once per run after
    /// the computation resolves.
    pub fn effect_lazy<F>(self, thunk: F) -> Self
    where
        F: Fn() -> E + Send + Sync + 'static,
    {
        let thunk = Arc::new(thunk);
        TaskNomad::new(move || {
            let fut = self.run();
            let thunk = Arc::clone(&thunk);
            async move { fut.await.effect_lazy(|| thunk()) }
        })
    }

    /// Append an effect computed from the resolved value.
    pub fn effect_from_value<F>(self, f: F) -> Self
    where
        F: Fn(&V) -> E + Send + Sync + 'static,
    {
        let f = Arc::new(f);
        TaskNomad::new(move || {
            let fut = self.run();
            let f = Arc::clone(&f);
            async move { fut.await.effect_from_value(|v| f(v)) }
        })
    }

    // ========== Functor / Monad ==========

    /// Transform the resolved value.
    pub fn map<V2, F>(self, f: F) -> TaskNomad<E, V2>
    where
        V2: Send + 'static,
        F: Fn(V) -> V2 + Send + Sync + 'static,
    {
        let f = Arc::new(f);
        TaskNomad::new(move || {
            let fut = self.run();
            let f = Arc::clone(&f);
            async move { fut.await.map(|v| f(v)) }
        })
    }

    /// Sequence a computation that depends on the resolved value.
    ///
    /// The continuation starts only after this computation resolved; its log
    /// is appended after the current one.
    pub fn chain<V2, F>(self, f: F) -> TaskNomad<E, V2>
    where
        V2: Send + 'static,
        F: Fn(V) -> TaskNomad<E, V2> + Send + Sync + 'static,
    {
        let f = Arc::new(f);
        TaskNomad::new(move || {
            let fut = self.run();
            let f = Arc::clone(&f);
            async move {
                let (effects, value) = fut.await.into_parts();
                let next = f(value).run().await;
                next.after(effects)
            }
        })
    }

    /// Run `f` for its effects, keeping the current value.
    pub fn chain_first<V2, F>(self, f: F) -> Self
    where
        V2: Send + 'static,
        F: Fn(&V) -> TaskNomad<E, V2> + Send + Sync + 'static,
    {
        let f = Arc::new(f);
        TaskNomad::new(move || {
            let fut = self.run();
            let f = Arc::clone(&f);
            async move {
                let first = fut.await;
                let next = f(first.value()).run().await;
                first.effect_many(next.into_effects())
            }
        })
    }

    /// Add a named binding to a record under construction.
    ///
    /// ```
    /// use nomad::{Nomad, TaskNomad};
    ///
    /// #[derive(Debug, PartialEq)]
    /// struct Record {
    ///     key: String,
    /// }
    ///
    /// # tokio_test::block_on(async {
    /// let task = TaskNomad::<(), _>::unit().bind(
    ///     |_| TaskNomad::pure("value".to_string()),
    ///     |(), key| Record { key },
    /// );
    /// assert_eq!(task.run().await, Nomad::pure(Record { key: "value".to_string() }));
    /// # });
    /// ```
    pub fn bind<B, C, F, M>(self, f: F, merge: M) -> TaskNomad<E, C>
    where
        B: Send + 'static,
        C: Send + 'static,
        F: Fn(&V) -> TaskNomad<E, B> + Send + Sync + 'static,
        M: Fn(V, B) -> C + Send + Sync + 'static,
    {
        let f = Arc::new(f);
        let merge = Arc::new(merge);
        TaskNomad::new(move || {
            let fut = self.run();
            let f = Arc::clone(&f);
            let merge = Arc::clone(&merge);
            async move {
                let (effects, value) = fut.await.into_parts();
                let bound = f(&value).run().await;
                bound.map(|b| merge(value, b)).after(effects)
            }
        })
    }

    /// Keep this value, sequencing `other` through [`ap`](TaskNomad::ap).
    pub fn ap_first<V2>(self, other: TaskNomad<E, V2>) -> Self
    where
        V2: Send + 'static,
    {
        self.map(|a| move |_: V2| a).ap(other)
    }

    /// Keep `other`'s value, sequencing through [`ap`](TaskNomad::ap).
    pub fn ap_second<V2>(self, other: TaskNomad<E, V2>) -> TaskNomad<E, V2>
    where
        V2: Send + 'static,
    {
        self.map(|_| |b: V2| b).ap(other)
    }

    /// Run both computations concurrently and merge them: logs as
    /// `self ++ other`, values through `combine`.
    pub fn combine_with<F>(self, other: Self, combine: F) -> Self
    where
        F: Fn(V, V) -> V + Send + Sync + 'static,
    {
        let combine = Arc::new(combine);
        TaskNomad::new(move || {
            let first = self.run();
            let second = other.run();
            let combine = Arc::clone(&combine);
            async move {
                let (first, second) = futures::join!(first, second);
                first.combine_with(second, |a, b| combine(a, b))
            }
        })
    }
}

impl<E, F> TaskNomad<E, F>
where
    E: Send + 'static,
    F: Send + 'static,
{
    /// Apply the held function to the value produced by `fa`.
    ///
    /// Both computations are started together and awaited concurrently. The
    /// log is always `fa ++ self`, whichever finishes first.
    ///
    /// ```
    /// use nomad::{Nomad, TaskNomad};
    ///
    /// # tokio_test::block_on(async {
    /// let fab = TaskNomad::pure(|x: i32| x + 1).effect("fn");
    /// let fa = TaskNomad::pure(1).effect("arg");
    /// assert_eq!(fab.ap(fa).run().await, Nomad::new(vec!["arg", "fn"], 2));
    /// # });
    /// ```
    pub fn ap<A, B>(self, fa: TaskNomad<E, A>) -> TaskNomad<E, B>
    where
        F: FnOnce(A) -> B,
        A: Send + 'static,
        B: Send + 'static,
    {
        TaskNomad::new(move || {
            let fab = self.run();
            let fa = fa.run();
            async move {
                let (fab, fa) = futures::join!(fab, fa);
                fab.ap(fa)
            }
        })
    }
}

impl<E, V> TaskNomad<E, TaskNomad<E, V>>
where
    E: Send + 'static,
    V: Send + 'static,
{
    /// Remove one level of nesting.
    pub fn flatten(self) -> TaskNomad<E, V> {
        self.chain(|inner| inner)
    }
}

impl<E, V> Semigroup for TaskNomad<E, V>
where
    E: Send + 'static,
    V: Semigroup + Send + 'static,
{
    fn combine(self, other: Self) -> Self {
        self.combine_with(other, V::combine)
    }
}

impl<E, V> Monoid for TaskNomad<E, V>
where
    E: Send + 'static,
    V: Monoid + Send + 'static,
{
    fn empty() -> Self {
        TaskNomad::new(|| async { Nomad::pure(V::empty()) })
    }
}
