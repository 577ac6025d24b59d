//! Deferred logged computations that may fail.
//!
//! `TaskNomadEither<E, L, R>` runs asynchronously and resolves to a
//! [`NomadEither<E, L, R>`](crate::NomadEither). It combines the laziness of
//! [`TaskNomad`] with the short-circuiting of the failure channel: once a step
//! resolves to `Left`, later success-only steps are never started.
//!
//! [`try_catch`](TaskNomadEither::try_catch) is the boundary where an `Err`
//! coming out of caller code is turned into a `Left`.
//!
//! # Example
//!
//! ```
//! use nomad::{Either, TaskNomadEither};
//!
//! async fn fetch_price(sku: &str) -> Result<u32, String> {
//!     if sku == "apple" { Ok(3) } else { Err(format!("unknown sku {}", sku)) }
//! }
//!
//! # tokio_test::block_on(async {
//! let total = TaskNomadEither::try_catch(|| fetch_price("apple"), |e| e)
//!     .effect("priced".to_string())
//!     .map(|price| price * 4)
//!     .effect_on_right(|total| format!("total {}", total));
//!
//! let result = total.run().await;
//! assert_eq!(result.value(), &Either::right(12));
//! assert_eq!(result.effects(), &["priced", "total 12"]);
//! # });
//! ```

use std::future::Future;
use std::sync::Arc;

use crate::task_nomad::BoxFuture;
use crate::{Either, Monoid, Nomad, NomadEither, Semigroup, TaskNomad};

/// A re-runnable asynchronous computation producing a [`NomadEither`].
pub struct TaskNomadEither<E, L, R>(TaskNomad<E, Either<L, R>>);

impl<E, L, R> Clone for TaskNomadEither<E, L, R> {
    fn clone(&self) -> Self {
        TaskNomadEither(self.0.clone())
    }
}

impl<E, L, R> std::fmt::Debug for TaskNomadEither<E, L, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("TaskNomadEither").field(&self.0).finish()
    }
}

impl<E, L> TaskNomadEither<E, L, ()>
where
    E: Send + 'static,
    L: Send + 'static,
{
    /// Starting point for do-notation.
    pub fn unit() -> Self {
        TaskNomadEither::new(|| async { NomadEither::right(()) })
    }
}

impl<E, L, R> TaskNomadEither<E, L, R>
where
    E: Send + 'static,
    L: Send + 'static,
    R: Send + 'static,
{
    // ========== Constructors ==========

    /// Create from a function that starts a fresh computation on every call.
    pub fn new<F, Fut>(f: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = NomadEither<E, L, R>> + Send + 'static,
    {
        TaskNomadEither(TaskNomad::new(move || {
            let fut = f();
            async move { fut.await.into_nomad() }
        }))
    }

    /// Start the computation and return a future of its result.
    pub fn run(&self) -> BoxFuture<'static, NomadEither<E, L, R>> {
        let fut = self.0.run();
        Box::pin(async move { NomadEither::from_nomad(fut.await) })
    }

    /// A computation that always fails with `value`.
    pub fn left(value: L) -> Self
    where
        L: Clone + Sync,
    {
        TaskNomadEither::new(move || futures::future::ready(NomadEither::left(value.clone())))
    }

    /// A computation that always succeeds with `value`.
    pub fn right(value: R) -> Self
    where
        R: Clone + Sync,
    {
        TaskNomadEither::new(move || futures::future::ready(NomadEither::right(value.clone())))
    }

    /// Alias of [`right`](TaskNomadEither::right).
    pub fn of(value: R) -> Self
    where
        R: Clone + Sync,
    {
        TaskNomadEither::right(value)
    }

    /// A computation resolving to `either` with no effects.
    pub fn from_either(either: Either<L, R>) -> Self
    where
        L: Clone + Sync,
        R: Clone + Sync,
    {
        TaskNomadEither::new(move || futures::future::ready(NomadEither::from_either(either.clone())))
    }

    /// A computation resolving to a copy of `ne`.
    pub fn from_nomad_either(ne: NomadEither<E, L, R>) -> Self
    where
        E: Clone + Sync,
        L: Clone + Sync,
        R: Clone + Sync,
    {
        TaskNomadEither::new(move || futures::future::ready(ne.clone()))
    }

    /// A failure carrying the log of `nomad`.
    pub fn left_nomad(nomad: Nomad<E, L>) -> Self
    where
        E: Clone + Sync,
        L: Clone + Sync,
    {
        TaskNomadEither(TaskNomad::from_nomad(nomad).map(Either::Left))
    }

    /// A success carrying the log of `nomad`.
    pub fn right_nomad(nomad: Nomad<E, R>) -> Self
    where
        E: Clone + Sync,
        R: Clone + Sync,
    {
        TaskNomadEither(TaskNomad::from_nomad(nomad).map(Either::Right))
    }

    /// Lift an asynchronous function whose output is the failure payload.
    pub fn left_task<F, Fut>(f: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = L> + Send + 'static,
    {
        TaskNomadEither::new(move || {
            let fut = f();
            async move { NomadEither::left(fut.await) }
        })
    }

    /// Lift an asynchronous function whose output is the success payload.
    pub fn right_task<F, Fut>(f: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
    {
        TaskNomadEither::new(move || {
            let fut = f();
            async move { NomadEither::right(fut.await) }
        })
    }

    /// Call `f` on every run and fail with its output.
    pub fn left_io<F>(f: F) -> Self
    where
        F: Fn() -> L + Send + Sync + 'static,
    {
        TaskNomadEither::new(move || futures::future::ready(NomadEither::left(f())))
    }

    /// Call `f` on every run and succeed with its output.
    pub fn right_io<F>(f: F) -> Self
    where
        F: Fn() -> R + Send + Sync + 'static,
    {
        TaskNomadEither::new(move || futures::future::ready(NomadEither::right(f())))
    }

    /// Call `f` on every run and resolve to the `Either` it returns.
    pub fn from_io_either<F>(f: F) -> Self
    where
        F: Fn() -> Either<L, R> + Send + Sync + 'static,
    {
        TaskNomadEither::new(move || futures::future::ready(NomadEither::from_either(f())))
    }

    /// A failure produced by a [`TaskNomad`], keeping its log.
    pub fn left_task_nomad(task: TaskNomad<E, L>) -> Self {
        TaskNomadEither(task.map(Either::Left))
    }

    /// A success produced by a [`TaskNomad`], keeping its log.
    pub fn right_task_nomad(task: TaskNomad<E, R>) -> Self {
        TaskNomadEither(task.map(Either::Right))
    }

    /// Wrap a [`TaskNomad`] that already resolves to an `Either`.
    pub fn from_task_nomad(task: TaskNomad<E, Either<L, R>>) -> Self {
        TaskNomadEither(task)
    }

    /// Lift an asynchronous function returning an `Either`.
    pub fn from_task_either<F, Fut>(f: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Either<L, R>> + Send + 'static,
    {
        TaskNomadEither::new(move || {
            let fut = f();
            async move { NomadEither::from_either(fut.await) }
        })
    }

    /// Lift an asynchronous function returning a `Result` whose error is
    /// already the failure payload.
    pub fn from_result_task<F, Fut>(f: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<R, L>> + Send + 'static,
    {
        TaskNomadEither::new(move || {
            let fut = f();
            async move { NomadEither::from_result(fut.await) }
        })
    }

    /// Run `run` on every invocation; `Ok` becomes a success and `Err` goes
    /// through `on_reject` to become the failure payload.
    ///
    /// ```
    /// use nomad::{NomadEither, TaskNomadEither};
    ///
    /// # tokio_test::block_on(async {
    /// let ok = TaskNomadEither::<(), String, i32>::try_catch(|| async { Ok::<_, &str>(11) }, String::from);
    /// assert_eq!(ok.run().await, NomadEither::right(11));
    ///
    /// let failed = TaskNomadEither::<(), String, i32>::try_catch(
    ///     || async { Err("error") },
    ///     |e: &str| e.to_string(),
    /// );
    /// assert_eq!(failed.run().await, NomadEither::left("error".to_string()));
    /// # });
    /// ```
    pub fn try_catch<X, F, Fut, H>(run: F, on_reject: H) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<R, X>> + Send + 'static,
        H: Fn(X) -> L + Send + Sync + 'static,
    {
        let on_reject = Arc::new(on_reject);
        TaskNomadEither::new(move || {
            let fut = run();
            let on_reject = Arc::clone(&on_reject);
            async move {
                match fut.await {
                    Ok(r) => NomadEither::right(r),
                    Err(x) => NomadEither::left(on_reject(x)),
                }
            }
        })
    }

    /// Synchronous counterpart of [`try_catch`](TaskNomadEither::try_catch).
    ///
    /// `run` is called when the computation is invoked, not when it is built.
    pub fn try_catch_sync<X, F, H>(run: F, on_reject: H) -> Self
    where
        F: Fn() -> Result<R, X> + Send + Sync + 'static,
        H: Fn(X) -> L + Send + Sync + 'static,
    {
        TaskNomadEither::new(move || {
            let ne = match run() {
                Ok(r) => NomadEither::right(r),
                Err(x) => NomadEither::left(on_reject(x)),
            };
            futures::future::ready(ne)
        })
    }

    /// Unwrap into the underlying [`TaskNomad`].
    pub fn into_task_nomad(self) -> TaskNomad<E, Either<L, R>> {
        self.0
    }

    // ========== Lifting helpers ==========

    fn transform<E2, L2, R2, F>(self, f: F) -> TaskNomadEither<E2, L2, R2>
    where
        E2: Send + 'static,
        L2: Send + 'static,
        R2: Send + 'static,
        F: Fn(NomadEither<E, L, R>) -> NomadEither<E2, L2, R2> + Send + Sync + 'static,
    {
        let f = Arc::new(f);
        TaskNomadEither::new(move || {
            let fut = self.run();
            let f = Arc::clone(&f);
            async move { f(fut.await) }
        })
    }

    fn transform_async<L2, R2, F, Fut>(self, f: F) -> TaskNomadEither<E, L2, R2>
    where
        L2: Send + 'static,
        R2: Send + 'static,
        F: Fn(NomadEither<E, L, R>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = NomadEither<E, L2, R2>> + Send + 'static,
    {
        let f = Arc::new(f);
        TaskNomadEither::new(move || {
            let fut = self.run();
            let f = Arc::clone(&f);
            async move { f(fut.await).await }
        })
    }

    // ========== Effect attachers ==========

    /// Append one effect, whatever the variant.
    pub fn effect(self, effect: E) -> Self
    where
        E: Clone + Sync,
    {
        self.transform(move |ne| ne.effect(effect.clone()))
    }

    /// Append several effects, whatever the variant.
    pub fn effect_many<I>(self, effects: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Clone + Sync,
    {
        let effects: Vec<E> = effects.into_iter().collect();
        self.transform(move |ne| ne.effect_many(effects.clone()))
    }

    /// Append the effect produced by `thunk`, evaluated once per run.
    pub fn effect_lazy<F>(self, thunk: F) -> Self
    where
        F: Fn() -> E + Send + Sync + 'static,
    {
        self.transform(move |ne| ne.effect_lazy(&thunk))
    }

    /// Append an effect computed from the success payload, only on success.
    pub fn effect_on_right<F>(self, f: F) -> Self
    where
        F: Fn(&R) -> E + Send + Sync + 'static,
    {
        self.transform(move |ne| ne.effect_on_right(&f))
    }

    /// Append an effect computed from the failure payload, only on failure.
    pub fn effect_on_left<F>(self, f: F) -> Self
    where
        F: Fn(&L) -> E + Send + Sync + 'static,
    {
        self.transform(move |ne| ne.effect_on_left(&f))
    }

    // ========== Functor / Bifunctor ==========

    /// Transform the success payload.
    pub fn map<R2, F>(self, f: F) -> TaskNomadEither<E, L, R2>
    where
        R2: Send + 'static,
        F: Fn(R) -> R2 + Send + Sync + 'static,
    {
        self.transform(move |ne| ne.map(&f))
    }

    /// Transform the failure payload.
    pub fn map_left<L2, F>(self, f: F) -> TaskNomadEither<E, L2, R>
    where
        L2: Send + 'static,
        F: Fn(L) -> L2 + Send + Sync + 'static,
    {
        self.transform(move |ne| ne.map_left(&f))
    }

    /// Transform whichever payload is present.
    pub fn bimap<L2, R2, F, G>(self, on_left: F, on_right: G) -> TaskNomadEither<E, L2, R2>
    where
        L2: Send + 'static,
        R2: Send + 'static,
        F: Fn(L) -> L2 + Send + Sync + 'static,
        G: Fn(R) -> R2 + Send + Sync + 'static,
    {
        self.transform(move |ne| ne.bimap(&on_left, &on_right))
    }

    /// Exchange failure and success.
    pub fn swap(self) -> TaskNomadEither<E, R, L> {
        self.transform(NomadEither::swap)
    }

    // ========== Monad ==========

    /// Sequence a computation on the success payload.
    ///
    /// A failure skips `f` entirely and the continuation is never started.
    pub fn chain<R2, F>(self, f: F) -> TaskNomadEither<E, L, R2>
    where
        R2: Send + 'static,
        F: Fn(R) -> TaskNomadEither<E, L, R2> + Send + Sync + 'static,
    {
        let f = Arc::new(f);
        self.transform_async(move |ne| {
            let f = Arc::clone(&f);
            async move {
                let (effects, either) = ne.into_parts();
                match either {
                    Either::Left(l) => NomadEither::left(l).after(effects),
                    Either::Right(r) => f(r).run().await.after(effects),
                }
            }
        })
    }

    /// Run `f` on the success payload for its effects and failure, keeping
    /// the current payload.
    pub fn chain_first<R2, F>(self, f: F) -> Self
    where
        R2: Send + 'static,
        F: Fn(&R) -> TaskNomadEither<E, L, R2> + Send + Sync + 'static,
    {
        let f = Arc::new(f);
        self.transform_async(move |ne| {
            let f = Arc::clone(&f);
            async move {
                let (effects, either) = ne.into_parts();
                match either {
                    Either::Left(l) => NomadEither::left(l).after(effects),
                    Either::Right(r) => {
                        let next = f(&r).run().await;
                        next.map(move |_| r).after(effects)
                    }
                }
            }
        })
    }

    /// Add a named binding to a record under construction.
    ///
    /// ```
    /// use nomad::{NomadEither, TaskNomadEither};
    ///
    /// #[derive(Debug, PartialEq)]
    /// struct Record {
    ///     key: String,
    /// }
    ///
    /// # tokio_test::block_on(async {
    /// let task = TaskNomadEither::<(), (), ()>::unit().bind(
    ///     |_| TaskNomadEither::right("value".to_string()),
    ///     |(), key| Record { key },
    /// );
    /// assert_eq!(task.run().await, NomadEither::right(Record { key: "value".to_string() }));
    /// # });
    /// ```
    pub fn bind<B, C, F, M>(self, f: F, merge: M) -> TaskNomadEither<E, L, C>
    where
        B: Send + 'static,
        C: Send + 'static,
        F: Fn(&R) -> TaskNomadEither<E, L, B> + Send + Sync + 'static,
        M: Fn(R, B) -> C + Send + Sync + 'static,
    {
        let f = Arc::new(f);
        let merge = Arc::new(merge);
        self.transform_async(move |ne| {
            let f = Arc::clone(&f);
            let merge = Arc::clone(&merge);
            async move {
                let (effects, either) = ne.into_parts();
                match either {
                    Either::Left(l) => NomadEither::left(l).after(effects),
                    Either::Right(r) => {
                        let bound = f(&r).run().await;
                        bound.map(move |b| merge(r, b)).after(effects)
                    }
                }
            }
        })
    }

    /// Keep this payload, sequencing `other` through [`ap`](TaskNomadEither::ap).
    pub fn ap_first<R2>(self, other: TaskNomadEither<E, L, R2>) -> Self
    where
        R2: Send + 'static,
    {
        self.map(|a| move |_: R2| a).ap(other)
    }

    /// Keep `other`'s payload, sequencing through [`ap`](TaskNomadEither::ap).
    pub fn ap_second<R2>(self, other: TaskNomadEither<E, L, R2>) -> TaskNomadEither<E, L, R2>
    where
        R2: Send + 'static,
    {
        self.map(|_| |b: R2| b).ap(other)
    }

    // ========== Recovery ==========

    /// Recover from a failure with another computation.
    ///
    /// The recovery's log is appended after the existing one; a success
    /// passes through and `f` is never called.
    pub fn or_else<L2, F>(self, f: F) -> TaskNomadEither<E, L2, R>
    where
        L2: Send + 'static,
        F: Fn(L) -> TaskNomadEither<E, L2, R> + Send + Sync + 'static,
    {
        let f = Arc::new(f);
        self.transform_async(move |ne| {
            let f = Arc::clone(&f);
            async move {
                let (effects, either) = ne.into_parts();
                match either {
                    Either::Left(l) => f(l).run().await.after(effects),
                    Either::Right(r) => NomadEither::right(r).after(effects),
                }
            }
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
        self.transform_async(move |ne| {
            let that = Arc::clone(&that);
            async move {
                if ne.is_right() {
                    return ne;
                }
                let (effects, _) = ne.into_parts();
                that().run().await.after(effects)
            }
        })
    }

    /// Like [`alt`](TaskNomadEither::alt), but two failures are merged with
    /// `combine(first, second)`.
    pub fn alt_validation_with<F, C>(self, that: F, combine: C) -> Self
    where
        F: Fn() -> Self + Send + Sync + 'static,
        C: Fn(L, L) -> L + Send + Sync + 'static,
    {
        let that = Arc::new(that);
        let combine = Arc::new(combine);
        self.transform_async(move |ne| {
            let that = Arc::clone(&that);
            let combine = Arc::clone(&combine);
            async move {
                if ne.is_right() {
                    return ne;
                }
                let second = that().run().await;
                ne.alt_validation_with(|| second, |a, b| combine(a, b))
            }
        })
    }

    // ========== Destructors ==========

    /// Eliminate the failure channel; both branches produce a [`TaskNomad`].
    pub fn fold<T, F, G>(self, on_left: F, on_right: G) -> TaskNomad<E, T>
    where
        T: Send + 'static,
        F: Fn(L) -> TaskNomad<E, T> + Send + Sync + 'static,
        G: Fn(R) -> TaskNomad<E, T> + Send + Sync + 'static,
    {
        let on_left = Arc::new(on_left);
        let on_right = Arc::new(on_right);
        TaskNomad::new(move || {
            let fut = self.run();
            let on_left = Arc::clone(&on_left);
            let on_right = Arc::clone(&on_right);
            async move {
                let (effects, either) = fut.await.into_parts();
                let next = match either {
                    Either::Left(l) => on_left(l),
                    Either::Right(r) => on_right(r),
                };
                next.run().await.after(effects)
            }
        })
    }

    /// Resolve to the success payload, or to the one computed from the failure.
    pub fn get_or_else<F>(self, on_left: F) -> TaskNomad<E, R>
    where
        F: Fn(L) -> TaskNomad<E, R> + Send + Sync + 'static,
    {
        let on_left = Arc::new(on_left);
        TaskNomad::new(move || {
            let fut = self.run();
            let on_left = Arc::clone(&on_left);
            async move {
                let (effects, either) = fut.await.into_parts();
                match either {
                    Either::Left(l) => on_left(l).run().await.after(effects),
                    Either::Right(r) => Nomad::new(effects, r),
                }
            }
        })
    }

    // ========== Combining two computations ==========

    /// Run both concurrently; left-most success wins and two successes merge
    /// with `combine`. Logs are `self ++ other`.
    pub fn combine_first_success_with<C>(self, other: Self, combine: C) -> Self
    where
        C: Fn(R, R) -> R + Send + Sync + 'static,
    {
        let combine = Arc::new(combine);
        TaskNomadEither::new(move || {
            let first = self.run();
            let second = other.run();
            let combine = Arc::clone(&combine);
            async move {
                let (first, second) = futures::join!(first, second);
                first.combine_first_success_with(second, |a, b| combine(a, b))
            }
        })
    }

    /// Run both concurrently; left-most failure wins and two successes merge
    /// with `combine`. Logs are `self ++ other`.
    pub fn combine_first_failure_with<C>(self, other: Self, combine: C) -> Self
    where
        C: Fn(R, R) -> R + Send + Sync + 'static,
    {
        let combine = Arc::new(combine);
        TaskNomadEither::new(move || {
            let first = self.run();
            let second = other.run();
            let combine = Arc::clone(&combine);
            async move {
                let (first, second) = futures::join!(first, second);
                first.combine_first_failure_with(second, |a, b| combine(a, b))
            }
        })
    }
}

impl<E, L, F> TaskNomadEither<E, L, F>
where
    E: Send + 'static,
    L: Send + 'static,
    F: Send + 'static,
{
    /// Apply the held function to the payload produced by `fa`.
    ///
    /// Both computations run concurrently. The log is always `fa ++ self`;
    /// when both fail the function side's failure is kept.
    ///
    /// ```
    /// use nomad::{Either, TaskNomadEither};
    ///
    /// # tokio_test::block_on(async {
    /// let fab = TaskNomadEither::<&str, &str, _>::right(|x: i32| x * 3).effect("fn");
    /// let fa = TaskNomadEither::right(14).effect("arg");
    /// let result = fab.ap(fa).run().await;
    /// assert_eq!(result.into_parts(), (vec!["arg", "fn"], Either::right(42)));
    /// # });
    /// ```
    pub fn ap<A, B>(self, fa: TaskNomadEither<E, L, A>) -> TaskNomadEither<E, L, B>
    where
        F: FnOnce(A) -> B,
        A: Send + 'static,
        B: Send + 'static,
    {
        TaskNomadEither::new(move || {
            let fab = self.run();
            let fa = fa.run();
            async move {
                let (fab, fa) = futures::join!(fab, fa);
                fab.ap(fa)
            }
        })
    }

    /// Like [`ap`](TaskNomadEither::ap), but two failures are merged with
    /// `combine(function_failure, argument_failure)`.
    pub fn ap_validation_with<A, B, C>(
        self,
        fa: TaskNomadEither<E, L, A>,
        combine: C,
    ) -> TaskNomadEither<E, L, B>
    where
        F: FnOnce(A) -> B,
        A: Send + 'static,
        B: Send + 'static,
        C: Fn(L, L) -> L + Send + Sync + 'static,
    {
        let combine = Arc::new(combine);
        TaskNomadEither::new(move || {
            let fab = self.run();
            let fa = fa.run();
            let combine = Arc::clone(&combine);
            async move {
                let (fab, fa) = futures::join!(fab, fa);
                fab.ap_validation_with(fa, |a, b| combine(a, b))
            }
        })
    }
}

impl<E, L, F> TaskNomadEither<E, L, F>
where
    E: Send + 'static,
    L: Semigroup + Send + 'static,
    F: Send + 'static,
{
    /// [`ap_validation_with`](TaskNomadEither::ap_validation_with) using `L`'s semigroup.
    pub fn ap_validation<A, B>(self, fa: TaskNomadEither<E, L, A>) -> TaskNomadEither<E, L, B>
    where
        F: FnOnce(A) -> B,
        A: Send + 'static,
        B: Send + 'static,
    {
        self.ap_validation_with(fa, L::combine)
    }
}

impl<E, L, R> TaskNomadEither<E, L, R>
where
    E: Send + 'static,
    L: Semigroup + Send + 'static,
    R: Send + 'static,
{
    /// [`alt_validation_with`](TaskNomadEither::alt_validation_with) using `L`'s semigroup.
    pub fn alt_validation<F>(self, that: F) -> Self
    where
        F: Fn() -> Self + Send + Sync + 'static,
    {
        self.alt_validation_with(that, L::combine)
    }
}

impl<E, L, R> TaskNomadEither<E, L, R>
where
    E: Send + 'static,
    L: Send + 'static,
    R: Semigroup + Send + 'static,
{
    /// [`combine_first_success_with`](TaskNomadEither::combine_first_success_with) using `R`'s semigroup.
    pub fn combine_first_success(self, other: Self) -> Self {
        self.combine_first_success_with(other, R::combine)
    }

    /// [`combine_first_failure_with`](TaskNomadEither::combine_first_failure_with) using `R`'s semigroup.
    pub fn combine_first_failure(self, other: Self) -> Self {
        self.combine_first_failure_with(other, R::combine)
    }
}

impl<E, L, R> TaskNomadEither<E, L, R>
where
    E: Send + 'static,
    L: Send + 'static,
    R: Monoid + Send + 'static,
{
    /// Fold with [`combine_first_success`](TaskNomadEither::combine_first_success),
    /// starting from a success holding `R::empty()`.
    pub fn concat_all_first_success<I>(items: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        items
            .into_iter()
            .fold(Self::empty_right(), Self::combine_first_success)
    }

    /// Fold with [`combine_first_failure`](TaskNomadEither::combine_first_failure),
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
        TaskNomadEither::new(|| async { NomadEither::right(R::empty()) })
    }
}

impl<E, L, R> TaskNomadEither<E, L, TaskNomadEither<E, L, R>>
where
    E: Send + 'static,
    L: Send + 'static,
    R: Send + 'static,
{
    /// Remove one level of nesting.
    pub fn flatten(self) -> TaskNomadEither<E, L, R> {
        self.chain(|inner| inner)
    }
}

impl<E, L, R> From<TaskNomad<E, Either<L, R>>> for TaskNomadEither<E, L, R> {
    fn from(task: TaskNomad<E, Either<L, R>>) -> Self {
        TaskNomadEither(task)
    }
}
