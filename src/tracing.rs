//! Tracing support for the asynchronous layers.
//!
//! [`InstrumentExt::instrument`] wraps every run of a computation in a
//! `tracing::Span`, following the standard `tracing::Instrument` pattern for
//! async code. Feature-gated behind `tracing`.
//!
//! The span only scopes diagnostics emitted while the computation runs; the
//! effect log is never forwarded to `tracing`.

use ::tracing::Span;

use crate::{AsyncNomad, TaskNomad, TaskNomadEither};

/// Extension trait for running computations inside a tracing span.
///
/// # Example
///
/// ```rust
/// use nomad::tracing::InstrumentExt;
/// use nomad::{Either, TaskNomadEither};
///
/// # tokio_test::block_on(async {
/// let order_id = 42;
/// let task = TaskNomadEither::<String, String, i32>::right(order_id)
///     .instrument(tracing::info_span!("fetch_order", order_id));
///
/// assert_eq!(task.run().await.into_either(), Either::right(42));
/// # });
/// ```
pub trait InstrumentExt: Sized {
    /// Enter `span` while each run is started and whenever it is polled.
    fn instrument(self, span: Span) -> Self;
}

impl<E, V> InstrumentExt for TaskNomad<E, V>
where
    E: Send + 'static,
    V: Send + 'static,
{
    fn instrument(self, span: Span) -> Self {
        TaskNomad::new(move || {
            let fut = span.in_scope(|| self.run());
            ::tracing::Instrument::instrument(fut, span.clone())
        })
    }
}

impl<E, L, R> InstrumentExt for TaskNomadEither<E, L, R>
where
    E: Send + 'static,
    L: Send + 'static,
    R: Send + 'static,
{
    fn instrument(self, span: Span) -> Self {
        TaskNomadEither::from_task_nomad(InstrumentExt::instrument(self.into_task_nomad(), span))
    }
}

impl<Dep, E, L, R> InstrumentExt for AsyncNomad<Dep, E, L, R>
where
    Dep: Clone + Send + Sync + 'static,
    E: Send + 'static,
    L: Send + 'static,
    R: Send + 'static,
{
    fn instrument(self, span: Span) -> Self {
        AsyncNomad::new(move |dep| InstrumentExt::instrument(self.provide(dep), span.clone()))
    }
}
