//! Dependency-injected asynchronous logged computations.
//!
//! `AsyncNomad<Dep, E, L, R>` is a function from a dependency `Dep` to a
//! [`TaskNomadEither<E, L, R>`](crate::TaskNomadEither). The dependency is
//! supplied once, at the outer boundary, through [`execute`](AsyncNomad::execute),
//! [`evaluate`](AsyncNomad::evaluate) or [`provide`](AsyncNomad::provide), and
//! every step of the pipeline sees the same value. Dependencies wrapped in an
//! `Arc` keep their identity across steps.
//!
//! Nothing runs until a runner is called, and every call runs the whole
//! pipeline again.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use nomad::{AsyncNomad, Either};
//!
//! struct Catalog {
//!     price_of_apple: u32,
//! }
//!
//! # tokio_test::block_on(async {
//! let order = AsyncNomad::<Arc<Catalog>, String, String, u32>::asks(|c| c.price_of_apple)
//!     .effect("priced".to_string())
//!     .chain(|price| AsyncNomad::right(price * 4).effect("multiplied".to_string()));
//!
//! let catalog = Arc::new(Catalog { price_of_apple: 3 });
//! let result = order.execute(catalog).await;
//! assert_eq!(result.value(), &Either::right(12));
//! assert_eq!(result.effects(), &["priced", "multiplied"]);
//! # });
//! ```

use std::future::Future;
use std::sync::Arc;

use crate::task_nomad::BoxFuture;
use crate::{Either, Monoid, Nomad, NomadEither, Reader, Semigroup, TaskNomad, TaskNomadEither};

/// A re-runnable asynchronous computation that reads a `Dep` and produces a
/// [`NomadEither`].
pub struct AsyncNomad<Dep, E, L, R>(Reader<Dep, TaskNomadEither<E, L, R>>);

impl<Dep, E, L, R> Clone for AsyncNomad<Dep, E, L, R> {
    fn clone(&self) -> Self {
        AsyncNomad(self.0.clone())
    }
}

impl<Dep, E, L, R> std::fmt::Debug for AsyncNomad<Dep, E, L, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AsyncNomad")
            .field("run_fn", &"<function>")
            .finish()
    }
}

impl<Dep, E, L> AsyncNomad<Dep, E, L, ()>
where
    Dep: Clone + Send + Sync + 'static,
    E: Send + 'static,
    L: Send + 'static,
{
    /// Starting point for do-notation.
    pub fn unit() -> Self {
        AsyncNomad::new(|_| TaskNomadEither::unit())
    }
}

impl<Dep, E, L> AsyncNomad<Dep, E, L, Dep>
where
    Dep: Clone + Send + Sync + 'static,
    E: Send + 'static,
    L: Send + 'static,
{
    /// Succeed with the dependency itself.
    pub fn ask() -> Self {
        AsyncNomad::new(TaskNomadEither::right)
    }
}

impl<Dep, E, L, R> AsyncNomad<Dep, E, L, R>
where
    Dep: Clone + Send + Sync + 'static,
    E: Send + 'static,
    L: Send + 'static,
    R: Send + 'static,
{
    // ========== Constructors ==========

    /// Create from a function of the dependency.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(Dep) -> TaskNomadEither<E, L, R> + Send + Sync + 'static,
    {
        AsyncNomad(Reader::new(f))
    }

    /// Wrap an existing reader.
    pub fn from_reader(reader: Reader<Dep, TaskNomadEither<E, L, R>>) -> Self {
        AsyncNomad(reader)
    }

    /// Unwrap into the underlying reader.
    pub fn into_reader(self) -> Reader<Dep, TaskNomadEither<E, L, R>> {
        self.0
    }

    /// Ignore the dependency and run `task`.
    pub fn from_task_nomad_either(task: TaskNomadEither<E, L, R>) -> Self {
        AsyncNomad::new(move |_| task.clone())
    }

    /// A computation that always fails with `value`.
    pub fn left(value: L) -> Self
    where
        L: Clone + Sync,
    {
        AsyncNomad::from_task_nomad_either(TaskNomadEither::left(value))
    }

    /// A computation that always succeeds with `value`.
    pub fn right(value: R) -> Self
    where
        R: Clone + Sync,
    {
        AsyncNomad::from_task_nomad_either(TaskNomadEither::right(value))
    }

    /// Alias of [`right`](AsyncNomad::right).
    pub fn of(value: R) -> Self
    where
        R: Clone + Sync,
    {
        AsyncNomad::right(value)
    }

    /// A computation resolving to `either` with no effects.
    pub fn from_either(either: Either<L, R>) -> Self
    where
        L: Clone + Sync,
        R: Clone + Sync,
    {
        AsyncNomad::from_task_nomad_either(TaskNomadEither::from_either(either))
    }

    /// A computation resolving to a copy of `ne`.
    pub fn from_nomad_either(ne: NomadEither<E, L, R>) -> Self
    where
        E: Clone + Sync,
        L: Clone + Sync,
        R: Clone + Sync,
    {
        AsyncNomad::from_task_nomad_either(TaskNomadEither::from_nomad_either(ne))
    }

    /// A failure carrying the log of `nomad`.
    pub fn left_nomad(nomad: Nomad<E, L>) -> Self
    where
        E: Clone + Sync,
        L: Clone + Sync,
    {
        AsyncNomad::from_task_nomad_either(TaskNomadEither::left_nomad(nomad))
    }

    /// A success carrying the log of `nomad`.
    pub fn right_nomad(nomad: Nomad<E, R>) -> Self
    where
        E: Clone + Sync,
        R: Clone + Sync,
    {
        AsyncNomad::from_task_nomad_either(TaskNomadEither::right_nomad(nomad))
    }

    /// Lift an asynchronous function whose output is the failure payload.
    pub fn left_task<F, Fut>(f: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = L> + Send + 'static,
    {
        AsyncNomad::from_task_nomad_either(TaskNomadEither::left_task(f))
    }

    /// Lift an asynchronous function whose output is the success payload.
    pub fn right_task<F, Fut>(f: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
    {
        AsyncNomad::from_task_nomad_either(TaskNomadEither::right_task(f))
    }

    /// Call `f` on every run and fail with its output.
    pub fn left_io<F>(f: F) -> Self
    where
        F: Fn() -> L + Send + Sync + 'static,
    {
        AsyncNomad::from_task_nomad_either(TaskNomadEither::left_io(f))
    }

    /// Call `f` on every run and succeed with its output.
    pub fn right_io<F>(f: F) -> Self
    where
        F: Fn() -> R + Send + Sync + 'static,
    {
        AsyncNomad::from_task_nomad_either(TaskNomadEither::right_io(f))
    }

    /// Call `f` on every run and resolve to the `Either` it returns.
    pub fn from_io_either<F>(f: F) -> Self
    where
        F: Fn() -> Either<L, R> + Send + Sync + 'static,
    {
        AsyncNomad::from_task_nomad_either(TaskNomadEither::from_io_either(f))
    }

    /// Lift an asynchronous function returning an `Either`.
    pub fn from_task_either<F, Fut>(f: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Either<L, R>> + Send + 'static,
    {
        AsyncNomad::from_task_nomad_either(TaskNomadEither::from_task_either(f))
    }

    /// Succeed with a value projected out of the dependency.
    ///
    /// `f` is called on every run.
    pub fn asks<F>(f: F) -> Self
    where
        F: Fn(Dep) -> R + Send + Sync + 'static,
    {
        let f = Arc::new(f);
        AsyncNomad::new(move |dep: Dep| {
            let f = Arc::clone(&f);
            TaskNomadEither::new(move || futures::future::ready(NomadEither::right(f(dep.clone()))))
        })
    }

    /// Call `run` with the dependency on every invocation; `Ok` becomes a
    /// success and `Err` goes through `on_reject` to become the failure
    /// payload.
    ///
    /// ```
    /// use nomad::{AsyncNomad, NomadEither};
    ///
    /// #[derive(Clone)]
    /// struct Deps {
    ///     result: i32,
    /// }
    ///
    /// # tokio_test::block_on(async {
    /// let fetch = AsyncNomad::<Deps, (), String, i32>::try_catch(
    ///     |dep: Deps| async move { Ok::<_, String>(dep.result) },
    ///     |e| e,
    /// );
    /// assert_eq!(fetch.execute(Deps { result: 1 }).await, NomadEither::right(1));
    /// # });
    /// ```
    pub fn try_catch<X, F, Fut, H>(run: F, on_reject: H) -> Self
    where
        F: Fn(Dep) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<R, X>> + Send + 'static,
        H: Fn(X) -> L + Send + Sync + 'static,
    {
        let run = Arc::new(run);
        let on_reject = Arc::new(on_reject);
        AsyncNomad::new(move |dep: Dep| {
            let run = Arc::clone(&run);
            let on_reject = Arc::clone(&on_reject);
            TaskNomadEither::try_catch(move || run(dep.clone()), move |x| on_reject(x))
        })
    }

    /// Synchronous counterpart of [`try_catch`](AsyncNomad::try_catch).
    pub fn try_catch_sync<X, F, H>(run: F, on_reject: H) -> Self
    where
        F: Fn(&Dep) -> Result<R, X> + Send + Sync + 'static,
        H: Fn(X) -> L + Send + Sync + 'static,
    {
        let run = Arc::new(run);
        let on_reject = Arc::new(on_reject);
        AsyncNomad::new(move |dep: Dep| {
            let run = Arc::clone(&run);
            let on_reject = Arc::clone(&on_reject);
            TaskNomadEither::try_catch_sync(move || run(&dep), move |x| on_reject(x))
        })
    }

    /// Adapt to a different dependency through `project`.
    ///
    /// ```
    /// use nomad::{AsyncNomad, Either};
    ///
    /// # tokio_test::block_on(async {
    /// let port = AsyncNomad::<u16, (), (), u16>::asks(|port| port + 1);
    /// let from_pair = port.local(|(_, port): (String, u16)| port);
    /// let result = from_pair.evaluate(("localhost".to_string(), 8079)).await;
    /// assert_eq!(result, Either::right(8080));
    /// # });
    /// ```
    pub fn local<Dep0, P>(self, project: P) -> AsyncNomad<Dep0, E, L, R>
    where
        Dep0: Clone + Send + Sync + 'static,
        P: Fn(Dep0) -> Dep + Send + Sync + 'static,
    {
        AsyncNomad(self.0.local(project))
    }

    // ========== Runners ==========

    /// Supply the dependency, yielding a computation that has not started yet.
    pub fn provide(&self, dep: Dep) -> TaskNomadEither<E, L, R> {
        self.0.run(dep)
    }

    /// Supply the dependency and run to completion, keeping the log.
    pub fn execute(&self, dep: Dep) -> BoxFuture<'static, NomadEither<E, L, R>> {
        let fut = self.provide(dep).run();
        Box::pin(async move {
            let result = fut.await;
            #[cfg(feature = "tracing")]
            tracing::trace!(
                effects = result.effects().len(),
                success = result.is_right(),
                "async nomad executed"
            );
            result
        })
    }

    /// Supply the dependency and run to completion, discarding the log.
    pub fn evaluate(&self, dep: Dep) -> BoxFuture<'static, Either<L, R>> {
        let fut = self.execute(dep);
        Box::pin(async move { fut.await.into_either() })
    }

    // ========== Lifting helpers ==========

    fn lift<E2, L2, R2, F>(self, f: F) -> AsyncNomad<Dep, E2, L2, R2>
    where
        E2: Send + 'static,
        L2: Send + 'static,
        R2: Send + 'static,
        F: Fn(TaskNomadEither<E, L, R>) -> TaskNomadEither<E2, L2, R2> + Send + Sync + 'static,
    {
        AsyncNomad::new(move |dep| f(self.provide(dep)))
    }

    // ========== Effect attachers ==========

    /// Append one effect, whatever the variant.
    pub fn effect(self, effect: E) -> Self
    where
        E: Clone + Sync,
    {
        self.lift(move |task| task.effect(effect.clone()))
    }

    /// Append several effects, whatever the variant.
    pub fn effect_many<I>(self, effects: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Clone + Sync,
    {
        let effects: Vec<E> = effects.into_iter().collect();
        self.lift(move |task| task.effect_many(effects.clone()))
    }

    /// Append the effect produced by `thunk`, evaluated once per run.
    pub fn effect_lazy<F>(self, thunk: F) -> Self
    where
        F: Fn() -> E + Send + Sync + 'static,
    {
        let thunk = Arc::new(thunk);
        self.lift(move |task| {
            let thunk = Arc::clone(&thunk);
            task.effect_lazy(move || thunk())
        })
    }

    /// Append an effect computed from the success payload, only on success.
    pub fn effect_on_right<F>(self, f: F) -> Self
    where
        F: Fn(&R) -> E + Send + Sync + 'static,
    {
        let f = Arc::new(f);
        self.lift(move |task| {
            let f = Arc::clone(&f);
            task.effect_on_right(move |r| f(r))
        })
    }

    /// Append an effect computed from the failure payload, only on failure.
    pub fn effect_on_left<F>(self, f: F) -> Self
    where
        F: Fn(&L) -> E + Send + Sync + 'static,
    {
        let f = Arc::new(f);
        self.lift(move |task| {
            let f = Arc::clone(&f);
            task.effect_on_left(move |l| f(l))
        })
    }

    // ========== Functor / Bifunctor ==========

    /// Transform the success payload.
    pub fn map<R2, F>(self, f: F) -> AsyncNomad<Dep, E, L, R2>
    where
        R2: Send + 'static,
        F: Fn(R) -> R2 + Send + Sync + 'static,
    {
        let f = Arc::new(f);
        self.lift(move |task| {
            let f = Arc::clone(&f);
            task.map(move |r| f(r))
        })
    }

    /// Transform the failure payload.
    pub fn map_left<L2, F>(self, f: F) -> AsyncNomad<Dep, E, L2, R>
    where
        L2: Send + 'static,
        F: Fn(L) -> L2 + Send + Sync + 'static,
    {
        let f = Arc::new(f);
        self.lift(move |task| {
            let f = Arc::clone(&f);
            task.map_left(move |l| f(l))
        })
    }

    /// Transform whichever payload is present.
    pub fn bimap<L2, R2, F, G>(self, on_left: F, on_right: G) -> AsyncNomad<Dep, E, L2, R2>
    where
        L2: Send + 'static,
        R2: Send + 'static,
        F: Fn(L) -> L2 + Send + Sync + 'static,
        G: Fn(R) -> R2 + Send + Sync + 'static,
    {
        let on_left = Arc::new(on_left);
        let on_right = Arc::new(on_right);
        self.lift(move |task| {
            let on_left = Arc::clone(&on_left);
            let on_right = Arc::clone(&on_right);
            task.bimap(move |l| on_left(l), move |r| on_right(r))
        })
    }

    /// Exchange failure and success.
    pub fn swap(self) -> AsyncNomad<Dep, E, R, L> {
        self.lift(TaskNomadEither::swap)
    }

    // ========== Monad ==========

    /// Sequence a computation on the success payload. The continuation sees
    /// the same dependency.
    pub fn chain<R2, F>(self, f: F) -> AsyncNomad<Dep, E, L, R2>
    where
        R2: Send + 'static,
        F: Fn(R) -> AsyncNomad<Dep, E, L, R2> + Send + Sync + 'static,
    {
        let f = Arc::new(f);
        AsyncNomad::new(move |dep: Dep| {
            let f = Arc::clone(&f);
            let next_dep = dep.clone();
            self.provide(dep)
                .chain(move |r| f(r).provide(next_dep.clone()))
        })
    }

    /// Run `f` on the success payload for its effects and failure, keeping
    /// the current payload.
    pub fn chain_first<R2, F>(self, f: F) -> Self
    where
        R2: Send + 'static,
        F: Fn(&R) -> AsyncNomad<Dep, E, L, R2> + Send + Sync + 'static,
    {
        let f = Arc::new(f);
        AsyncNomad::new(move |dep: Dep| {
            let f = Arc::clone(&f);
            let next_dep = dep.clone();
            self.provide(dep)
                .chain_first(move |r| f(r).provide(next_dep.clone()))
        })
    }

    /// Add a named binding to a record under construction.
    ///
    /// ```
    /// use nomad::{AsyncNomad, Either};
    ///
    /// #[derive(Debug, PartialEq)]
    /// struct Record {
    ///     user: String,
    ///     greeting: String,
    /// }
    ///
    /// # tokio_test::block_on(async {
    /// let program = AsyncNomad::<String, (), (), ()>::unit()
    ///     .bind(|_| AsyncNomad::ask(), |(), user| user)
    ///     .bind(
    ///         |user| {
    ///             let user = user.clone();
    ///             AsyncNomad::asks(move |_| format!("hello, {}", user))
    ///         },
    ///         |user, greeting| Record { user, greeting },
    ///     );
    /// let record = program.evaluate("ada".to_string()).await;
    /// assert_eq!(
    ///     record,
    ///     Either::right(Record { user: "ada".into(), greeting: "hello, ada".into() })
    /// );
    /// # });
    /// ```
    pub fn bind<B, C, F, M>(self, f: F, merge: M) -> AsyncNomad<Dep, E, L, C>
    where
        B: Send + 'static,
        C: Send + 'static,
        F: Fn(&R) -> AsyncNomad<Dep, E, L, B> + Send + Sync + 'static,
        M: Fn(R, B) -> C + Send + Sync + 'static,
    {
        let f = Arc::new(f);
        let merge = Arc::new(merge);
        AsyncNomad::new(move |dep: Dep| {
            let f = Arc::clone(&f);
            let merge = Arc::clone(&merge);
            let next_dep = dep.clone();
            self.provide(dep).bind(
                move |r| f(r).provide(next_dep.clone()),
                move |r, b| merge(r, b),
            )
        })
    }

    /// Keep this payload, sequencing `other` through [`ap`](AsyncNomad::ap).
    pub fn ap_first<R2>(self, other: AsyncNomad<Dep, E, L, R2>) -> Self
    where
        R2: Send + 'static,
    {
        self.map(|a| move |_: R2| a).ap(other)
    }

    /// Keep `other`'s payload, sequencing through [`ap`](AsyncNomad::ap).
    pub fn ap_second<R2>(self, other: AsyncNomad<Dep, E, L, R2>) -> AsyncNomad<Dep, E, L, R2>
    where
        R2: Send + 'static,
    {
        self.map(|_| |b: R2| b).ap(other)
    }

    // ========== Recovery ==========

    /// Recover from a failure with another computation reading the same
    /// dependency.
    pub fn or_else<L2, F>(self, f: F) -> AsyncNomad<Dep, E, L2, R>
    where
        L2: Send + 'static,
        F: Fn(L) -> AsyncNomad<Dep, E, L2, R> + Send + Sync + 'static,
    {
        let f = Arc::new(f);
        AsyncNomad::new(move |dep: Dep| {
            let f = Arc::clone(&f);
            let next_dep = dep.clone();
            self.provide(dep)
                .or_else(move |l| f(l).provide(next_dep.clone()))
        })
    }

    /// Keep this success, or fall back to the computation built by `that`.
    ///
    /// `that` is neither called nor run when this computation succeeds. When
    /// both fail, the failure of `that` is returned with both logs.
    pub fn alt<F>(self, that: F) -> Self
    where
        F: Fn() -> Self + Send + Sync + 'static,
    {
        let that = Arc::new(that);
        AsyncNomad::new(move |dep: Dep| {
            let that = Arc::clone(&that);
            let next_dep = dep.clone();
            self.provide(dep)
                .alt(move || that().provide(next_dep.clone()))
        })
    }

    /// Like [`alt`](AsyncNomad::alt), but two failures are merged with
    /// `combine(first, second)`.
    pub fn alt_validation_with<F, C>(self, that: F, combine: C) -> Self
    where
        F: Fn() -> Self + Send + Sync + 'static,
        C: Fn(L, L) -> L + Send + Sync + 'static,
    {
        let that = Arc::new(that);
        let combine = Arc::new(combine);
        AsyncNomad::new(move |dep: Dep| {
            let that = Arc::clone(&that);
            let combine = Arc::clone(&combine);
            let next_dep = dep.clone();
            self.provide(dep).alt_validation_with(
                move || that().provide(next_dep.clone()),
                move |a, b| combine(a, b),
            )
        })
    }

    // ========== Destructors ==========

    /// Eliminate the failure channel; both branches read the dependency and
    /// produce a [`TaskNomad`].
    pub fn fold<T, F, G>(self, on_left: F, on_right: G) -> Reader<Dep, TaskNomad<E, T>>
    where
        T: Send + 'static,
        F: Fn(L) -> Reader<Dep, TaskNomad<E, T>> + Send + Sync + 'static,
        G: Fn(R) -> Reader<Dep, TaskNomad<E, T>> + Send + Sync + 'static,
    {
        let on_left = Arc::new(on_left);
        let on_right = Arc::new(on_right);
        Reader::new(move |dep: Dep| {
            let on_left = Arc::clone(&on_left);
            let on_right = Arc::clone(&on_right);
            let left_dep = dep.clone();
            let right_dep = dep.clone();
            self.provide(dep).fold(
                move |l| on_left(l).run(left_dep.clone()),
                move |r| on_right(r).run(right_dep.clone()),
            )
        })
    }

    /// Resolve to the success payload, or to the one computed from the failure.
    pub fn get_or_else<F>(self, on_left: F) -> Reader<Dep, TaskNomad<E, R>>
    where
        F: Fn(L) -> Reader<Dep, TaskNomad<E, R>> + Send + Sync + 'static,
    {
        let on_left = Arc::new(on_left);
        Reader::new(move |dep: Dep| {
            let on_left = Arc::clone(&on_left);
            let left_dep = dep.clone();
            self.provide(dep)
                .get_or_else(move |l| on_left(l).run(left_dep.clone()))
        })
    }

    // ========== Combining two computations ==========

    /// Run both concurrently with the same dependency; left-most success wins
    /// and two successes merge with `combine`. Logs are `self ++ other`.
    pub fn combine_first_success_with<C>(self, other: Self, combine: C) -> Self
    where
        C: Fn(R, R) -> R + Send + Sync + 'static,
    {
        let combine = Arc::new(combine);
        AsyncNomad::new(move |dep: Dep| {
            let combine = Arc::clone(&combine);
            self.provide(dep.clone())
                .combine_first_success_with(other.provide(dep), move |a, b| combine(a, b))
        })
    }

    /// Run both concurrently with the same dependency; left-most failure wins
    /// and two successes merge with `combine`. Logs are `self ++ other`.
    pub fn combine_first_failure_with<C>(self, other: Self, combine: C) -> Self
    where
        C: Fn(R, R) -> R + Send + Sync + 'static,
    {
        let combine = Arc::new(combine);
        AsyncNomad::new(move |dep: Dep| {
            let combine = Arc::clone(&combine);
            self.provide(dep.clone())
                .combine_first_failure_with(other.provide(dep), move |a, b| combine(a, b))
        })
    }
}

impl<Dep, E, L, F> AsyncNomad<Dep, E, L, F>
where
    Dep: Clone + Send + Sync + 'static,
    E: Send + 'static,
    L: Send + 'static,
    F: Send + 'static,
{
    /// Apply the held function to the payload produced by `fa`.
    ///
    /// Both sides receive the same dependency and run concurrently. The log
    /// is always `fa ++ self`; when both fail the function side's failure is
    /// kept.
    pub fn ap<A, B>(self, fa: AsyncNomad<Dep, E, L, A>) -> AsyncNomad<Dep, E, L, B>
    where
        F: FnOnce(A) -> B,
        A: Send + 'static,
        B: Send + 'static,
    {
        AsyncNomad::new(move |dep: Dep| self.provide(dep.clone()).ap(fa.provide(dep)))
    }

    /// Like [`ap`](AsyncNomad::ap), but two failures are merged with
    /// `combine(function_failure, argument_failure)`.
    pub fn ap_validation_with<A, B, C>(
        self,
        fa: AsyncNomad<Dep, E, L, A>,
        combine: C,
    ) -> AsyncNomad<Dep, E, L, B>
    where
        F: FnOnce(A) -> B,
        A: Send + 'static,
        B: Send + 'static,
        C: Fn(L, L) -> L + Send + Sync + 'static,
    {
        let combine = Arc::new(combine);
        AsyncNomad::new(move |dep: Dep| {
            let combine = Arc::clone(&combine);
            self.provide(dep.clone())
                .ap_validation_with(fa.provide(dep), move |a, b| combine(a, b))
        })
    }
}

impl<Dep, E, L, F> AsyncNomad<Dep, E, L, F>
where
    Dep: Clone + Send + Sync + 'static,
    E: Send + 'static,
    L: Semigroup + Send + 'static,
    F: Send + 'static,
{
    /// [`ap_validation_with`](AsyncNomad::ap_validation_with) using `L`'s semigroup.
    pub fn ap_validation<A, B>(self, fa: AsyncNomad<Dep, E, L, A>) -> AsyncNomad<Dep, E, L, B>
    where
        F: FnOnce(A) -> B,
        A: Send + 'static,
        B: Send + 'static,
    {
        self.ap_validation_with(fa, L::combine)
    }
}

impl<Dep, E, L, R> AsyncNomad<Dep, E, L, R>
where
    Dep: Clone + Send + Sync + 'static,
    E: Send + 'static,
    L: Semigroup + Send + 'static,
    R: Send + 'static,
{
    /// [`alt_validation_with`](AsyncNomad::alt_validation_with) using `L`'s semigroup.
    pub fn alt_validation<F>(self, that: F) -> Self
    where
        F: Fn() -> Self + Send + Sync + 'static,
    {
        self.alt_validation_with(that, L::combine)
    }
}

impl<Dep, E, L, R> AsyncNomad<Dep, E, L, R>
where
    Dep: Clone + Send + Sync + 'static,
    E: Send + 'static,
    L: Send + 'static,
    R: Semigroup + Send + 'static,
{
    /// [`combine_first_success_with`](AsyncNomad::combine_first_success_with) using `R`'s semigroup.
    pub fn combine_first_success(self, other: Self) -> Self {
        self.combine_first_success_with(other, R::combine)
    }

    /// [`combine_first_failure_with`](AsyncNomad::combine_first_failure_with) using `R`'s semigroup.
    pub fn combine_first_failure(self, other: Self) -> Self {
        self.combine_first_failure_with(other, R::combine)
    }
}

impl<Dep, E, L, R> AsyncNomad<Dep, E, L, R>
where
    Dep: Clone + Send + Sync + 'static,
    E: Send + 'static,
    L: Send + 'static,
    R: Monoid + Send + 'static,
{
    /// Fold with [`combine_first_success`](AsyncNomad::combine_first_success),
    /// starting from a success holding `R::empty()`.
    pub fn concat_all_first_success<I>(items: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        items
            .into_iter()
            .fold(Self::empty_right(), Self::combine_first_success)
    }

    /// Fold with [`combine_first_failure`](AsyncNomad::combine_first_failure),
    /// starting from a success holding `R::empty()`.
    pub fn concat_all_first_failure<I>(items: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        items
            .into_iter()
            .fold(Self::empty_right(), Self::combine_first_failure)
    }

    fn empty_right() -> Self {
        AsyncNomad::new(|_| TaskNomadEither::new(|| async { NomadEither::right(R::empty()) }))
    }
}

impl<Dep, E, L, R> AsyncNomad<Dep, E, L, AsyncNomad<Dep, E, L, R>>
where
    Dep: Clone + Send + Sync + 'static,
    E: Send + 'static,
    L: Send + 'static,
    R: Send + 'static,
{
    /// Remove one level of nesting.
    pub fn flatten(self) -> AsyncNomad<Dep, E, L, R> {
        self.chain(|inner| inner)
    }
}

impl<Dep, E, L, R> From<Reader<Dep, TaskNomadEither<E, L, R>>> for AsyncNomad<Dep, E, L, R> {
    fn from(reader: Reader<Dep, TaskNomadEither<E, L, R>>) -> Self {
        AsyncNomad(reader)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monoid::Sum;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    type An<R> = AsyncNomad<i32, &'static str, &'static str, R>;

    #[derive(Clone)]
    struct Deps {
        result: i32,
        error_message: String,
    }

    fn deps() -> Deps {
        Deps {
            result: 1,
            error_message: "error".to_string(),
        }
    }

    #[tokio::test]
    async fn test_try_catch_resolve() {
        let program = AsyncNomad::<Deps, (), String, i32>::try_catch(
            |dep: Deps| async move { Ok::<_, String>(dep.result) },
            |e| e,
        );
        assert_eq!(program.execute(deps()).await, NomadEither::right(1));
    }

    #[tokio::test]
    async fn test_try_catch_reject() {
        let program = AsyncNomad::<Deps, (), String, i32>::try_catch(
            |dep: Deps| async move { Err::<i32, _>(dep.error_message) },
            |e| e,
        );
        assert_eq!(
            program.execute(deps()).await,
            NomadEither::left("error".to_string())
        );
    }

    #[tokio::test]
    async fn test_io_constructors_run_on_each_execute() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let program = An::<usize>::right_io(move || counter.fetch_add(1, Ordering::SeqCst))
            .effect("counted");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(
            program.execute(0).await,
            NomadEither::right(0).effect("counted")
        );
        assert_eq!(program.evaluate(0).await, Either::right(1));
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        let evaluated = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&evaluated);
        let failing = An::<i32>::left_io(move || {
            flag.store(true, Ordering::SeqCst);
            "io failure"
        });
        assert!(!evaluated.load(Ordering::SeqCst));
        assert_eq!(failing.evaluate(0).await, Either::left("io failure"));
        assert!(evaluated.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_from_io_either_is_rerun() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let program = An::<usize>::from_io_either(move || {
            match counter.fetch_add(1, Ordering::SeqCst) {
                0 => Either::left("not yet"),
                n => Either::right(n),
            }
        });
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(program.evaluate(0).await, Either::left("not yet"));
        assert_eq!(program.evaluate(0).await, Either::right(1));
    }

    #[tokio::test]
    async fn test_try_catch_sync_reads_dependency() {
        let parse = AsyncNomad::<String, (), String, i32>::try_catch_sync(
            |raw: &String| raw.parse::<i32>(),
            |e| e.to_string(),
        );
        assert_eq!(parse.evaluate("42".to_string()).await, Either::right(42));
        assert!(parse.evaluate("x".to_string()).await.is_left());
    }

    #[tokio::test]
    async fn test_dependency_identity_is_shared() {
        struct Config;

        let program = AsyncNomad::<Arc<Config>, (), (), Arc<Config>>::ask().chain(|first| {
            AsyncNomad::ask().map(move |second: Arc<Config>| Arc::ptr_eq(&first, &second))
        });
        assert_eq!(program.evaluate(Arc::new(Config)).await, Either::right(true));
    }

    #[tokio::test]
    async fn test_runs_again_on_every_execute() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let program = An::asks(move |dep| dep + counter.fetch_add(1, Ordering::SeqCst) as i32);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(program.evaluate(10).await, Either::right(10));
        assert_eq!(program.evaluate(10).await, Either::right(11));
    }

    #[tokio::test]
    async fn test_provide_is_lazy() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let program = An::asks(move |dep| {
            counter.fetch_add(1, Ordering::SeqCst);
            dep
        });
        let task = program.provide(3);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(task.run().await.into_either(), Either::right(3));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_local() {
        let length = AsyncNomad::<String, (), (), usize>::asks(|s| s.len());
        let program = length.local(|n: usize| "x".repeat(n));
        assert_eq!(program.evaluate(4).await, Either::right(4));
    }

    #[tokio::test]
    async fn test_fold() {
        let program = An::<i32>::left("oops").effect("start");
        let folded = program.fold(
            |l| Reader::new(move |dep: i32| TaskNomad::pure(l.len() as i32 + dep).effect("left")),
            |r| Reader::new(move |_| TaskNomad::pure(r)),
        );
        assert_eq!(
            folded.run(10).run().await,
            Nomad::new(vec!["start", "left"], 14)
        );
    }

    #[tokio::test]
    async fn test_get_or_else() {
        let recovered = An::<i32>::left("bad").get_or_else(|_| Reader::new(TaskNomad::pure));
        assert_eq!(recovered.run(7).run().await, Nomad::pure(7));

        let kept = An::right(1).get_or_else(|_| Reader::new(TaskNomad::pure));
        assert_eq!(kept.run(7).run().await, Nomad::pure(1));
    }

    #[tokio::test]
    async fn test_or_else_sees_dependency() {
        let program = An::<i32>::left("four")
            .effect("first")
            .or_else(|l| AsyncNomad::<i32, &str, (), i32>::asks(move |dep| dep + l.len() as i32));
        assert_eq!(
            program.execute(1).await.into_parts(),
            (vec!["first"], Either::right(5))
        );
    }

    #[tokio::test]
    async fn test_swap_and_bimap() {
        assert_eq!(An::<i32>::left("l").swap().evaluate(0).await, Either::right("l"));
        assert_eq!(
            An::right(2).bimap(|l: &str| l.len(), |r| r * 2).evaluate(0).await,
            Either::right(4)
        );
        assert_eq!(
            An::<i32>::left("abc").map_left(|l| l.len()).evaluate(0).await,
            Either::left(3)
        );
    }

    #[tokio::test]
    async fn test_map() {
        let program = An::right(1).effect("one").map(|x| x + 1);
        assert_eq!(
            program.execute(0).await.into_parts(),
            (vec!["one"], Either::right(2))
        );
    }

    #[tokio::test]
    async fn test_ap() {
        let fab = An::right(|s: &str| format!("hello, {}!", s)).effect("two");
        let fa = An::right("world").effect("one");
        assert_eq!(
            fab.ap(fa).execute(0).await.into_parts(),
            (vec!["one", "two"], Either::right("hello, world!".to_string()))
        );
    }

    #[tokio::test]
    async fn test_ap_first_and_second() {
        let first = An::right(1).effect("that effect");
        let second = An::right(2).effect("this effect");
        assert_eq!(
            first.clone().ap_first(second.clone()).execute(0).await.into_parts(),
            (vec!["this effect", "that effect"], Either::right(1))
        );
        assert_eq!(
            first.ap_second(second).execute(0).await.into_parts(),
            (vec!["this effect", "that effect"], Either::right(2))
        );
    }

    #[tokio::test]
    async fn test_chain() {
        let program = An::right("world")
            .effect("one")
            .chain(|s| AsyncNomad::right(format!("hello, {}!", s)).effect("two"));
        assert_eq!(
            program.execute(0).await.into_parts(),
            (vec!["one", "two"], Either::right("hello, world!".to_string()))
        );
    }

    #[tokio::test]
    async fn test_chain_short_circuits() {
        let called = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&called);
        let program = An::<i32>::left("stop").chain(move |x| {
            flag.store(true, Ordering::SeqCst);
            An::right(x)
        });
        assert_eq!(program.evaluate(0).await, Either::left("stop"));
        assert!(!called.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_chain_first() {
        let program = An::right(3).chain_first(|x| An::right(*x * 2).effect("side"));
        assert_eq!(
            program.execute(0).await.into_parts(),
            (vec!["side"], Either::right(3))
        );
    }

    #[tokio::test]
    async fn test_alt() {
        let program = An::<i32>::left("first")
            .effect("a")
            .alt(|| AsyncNomad::asks(|dep| dep * 2).effect("b"));
        assert_eq!(
            program.execute(21).await.into_parts(),
            (vec!["a", "b"], Either::right(42))
        );
    }

    #[tokio::test]
    async fn test_first_success_monoid_is_order_dependent() {
        type Sn = AsyncNomad<(), &'static str, Sum<i32>, Sum<i32>>;

        assert_eq!(
            Sn::right(Sum(952)).combine_first_success(Sn::right(Sum(17))).evaluate(()).await,
            Either::right(Sum(969))
        );

        let one = Sn::right(Sum(952)).effect("one");
        let two = Sn::left(Sum(17)).effect("two");
        assert_eq!(
            one.clone().combine_first_success(two.clone()).execute(()).await.into_parts(),
            (vec!["one", "two"], Either::right(Sum(952)))
        );
        assert_eq!(
            two.combine_first_success(one).execute(()).await.into_parts(),
            (vec!["two", "one"], Either::right(Sum(952)))
        );
    }

    #[tokio::test]
    async fn test_first_failure_monoid() {
        type Sn = AsyncNomad<(), &'static str, Sum<i32>, Sum<i32>>;

        assert_eq!(
            Sn::right(Sum(952)).combine_first_failure(Sn::left(Sum(17))).evaluate(()).await,
            Either::left(Sum(17))
        );
        assert_eq!(
            Sn::concat_all_first_failure(vec![Sn::right(Sum(1)), Sn::right(Sum(2))])
                .evaluate(())
                .await,
            Either::right(Sum(3))
        );
        assert_eq!(
            Sn::concat_all_first_success(Vec::new()).evaluate(()).await,
            Either::right(Sum(0))
        );
    }

    #[tokio::test]
    async fn test_validation() {
        type Vn<R> = AsyncNomad<(), &'static str, Sum<i32>, R>;

        let fab: Vn<fn(&str) -> String> = AsyncNomad::left(Sum(952)).effect("two");
        let fa: Vn<&str> = AsyncNomad::left(Sum(17)).effect("one");
        assert_eq!(
            fab.ap_validation(fa).execute(()).await.into_parts(),
            (vec!["one", "two"], Either::left(Sum(969)))
        );

        let first: Vn<i32> = AsyncNomad::left(Sum(952)).effect("one");
        let alt = first.alt_validation(|| AsyncNomad::left(Sum(17)).effect("two"));
        assert_eq!(
            alt.execute(()).await.into_parts(),
            (vec!["one", "two"], Either::left(Sum(969)))
        );
    }

    #[tokio::test]
    async fn test_do_notation() {
        #[derive(Debug, PartialEq)]
        struct Record {
            key: String,
        }

        let program = AsyncNomad::<(), String, String, ()>::unit().bind(
            |_| AsyncNomad::right("value".to_string()),
            |(), key| Record { key },
        );
        assert_eq!(
            program.execute(()).await,
            NomadEither::right(Record {
                key: "value".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_flatten() {
        let nested = An::right(An::asks(|dep| dep + 1).effect("inner")).effect("outer");
        assert_eq!(
            nested.flatten().execute(1).await.into_parts(),
            (vec!["outer", "inner"], Either::right(2))
        );
    }

    #[test]
    fn test_debug_hides_closure() {
        let program = An::right(1);
        assert_eq!(format!("{:?}", program), "AsyncNomad { run_fn: \"<function>\" }");
    }
}
