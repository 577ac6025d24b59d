//! Timing and delay decorators for the asynchronous layers.
//!
//! Available with the `async` feature. [`DecoratorExt::timed`] appends one
//! [`Timed`] effect measuring how long the wrapped computation took, and
//! [`DecoratorExt::delay`] waits after the wrapped computation completes.
//! Both leave the result untouched.
//!
//! Effect types opt in to timing through `From<Timed>`:
//!
//! ```
//! use std::time::Duration;
//! use nomad::decorators::{DecoratorExt, Timed};
//! use nomad::{Either, TaskNomadEither};
//!
//! #[derive(Debug)]
//! enum Event {
//!     Timed(Timed),
//! }
//!
//! impl From<Timed> for Event {
//!     fn from(t: Timed) -> Self {
//!         Event::Timed(t)
//!     }
//! }
//!
//! # tokio_test::block_on(async {
//! let lookup = TaskNomadEither::<Event, String, usize>::right_task(|| async { "example.com".len() })
//!     .delay(Duration::from_millis(5))
//!     .timed("lookup");
//!
//! let result = lookup.run().await;
//! assert_eq!(result.value(), &Either::right(11));
//! match &result.effects()[0] {
//!     Event::Timed(t) => {
//!         assert_eq!(t.operation_name, "lookup");
//!         assert!(t.time_ms >= 5.0);
//!     }
//! }
//! # });
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;
use uuid::Uuid;

use crate::{AsyncNomad, TaskNomadEither};

/// Severity attached to a [`Timed`] record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
pub enum Level {
    /// Failures.
    Error,
    /// Suspicious but recoverable.
    Warn,
    /// Normal operation.
    Info,
    /// Diagnostic detail.
    Debug,
    /// Very verbose detail.
    Trace,
    /// Never reported.
    Silent,
}

/// Timing record appended by [`DecoratorExt::timed`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timed {
    /// Severity; `timed` always records [`Level::Info`].
    pub level: Level,
    /// Unique id of this run (uuid v4).
    pub span_id: String,
    /// Name given to `timed`.
    pub operation_name: String,
    /// Elapsed wall-clock time in milliseconds.
    pub time_ms: f64,
    /// Free-form key/value details.
    pub details: BTreeMap<String, String>,
}

impl Timed {
    /// An `Info` record with a fresh span id and no details.
    pub fn new(operation_name: impl Into<String>, time_ms: f64) -> Self {
        Timed {
            level: Level::Info,
            span_id: Uuid::new_v4().to_string(),
            operation_name: operation_name.into(),
            time_ms,
            details: BTreeMap::new(),
        }
    }

    /// Replace the level.
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Replace the span id.
    pub fn with_span_id(mut self, span_id: impl Into<String>) -> Self {
        self.span_id = span_id.into();
        self
    }

    /// Add a detail entry.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}

/// Timing and delay combinators for [`TaskNomadEither`] and [`AsyncNomad`].
pub trait DecoratorExt: Sized {
    /// Measure each run of the computation and append a [`Timed`] effect.
    ///
    /// The clock starts when the computation is invoked, so time spent
    /// between building and running it is not counted.
    fn timed(self, operation_name: impl Into<String>) -> Self;

    /// Sleep for `duration` after the computation completes, keeping its
    /// value and log.
    fn delay(self, duration: Duration) -> Self;
}

impl<E, L, R> DecoratorExt for TaskNomadEither<E, L, R>
where
    E: From<Timed> + Send + 'static,
    L: Send + 'static,
    R: Send + 'static,
{
    fn timed(self, operation_name: impl Into<String>) -> Self {
        let operation_name: Arc<str> = Arc::from(operation_name.into());
        TaskNomadEither::new(move || {
            let span_id = Uuid::new_v4().to_string();
            let start = Instant::now();
            #[cfg(feature = "tracing")]
            tracing::debug!(
                span_id = %span_id,
                operation = %operation_name,
                "timed operation started"
            );
            let fut = self.run();
            let operation_name = Arc::clone(&operation_name);
            async move {
                let result = fut.await;
                let elapsed = start.elapsed().as_secs_f64() * 1000.0;
                let timed = Timed::new(operation_name.as_ref(), elapsed).with_span_id(span_id);
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    span_id = %timed.span_id,
                    operation = %timed.operation_name,
                    time_ms = timed.time_ms,
                    "timed operation finished"
                );
                result.effect(E::from(timed))
            }
        })
    }

    fn delay(self, duration: Duration) -> Self {
        TaskNomadEither::new(move || {
            let fut = self.run();
            async move {
                let result = fut.await;
                tokio::time::sleep(duration).await;
                result
            }
        })
    }
}

impl<Dep, E, L, R> DecoratorExt for AsyncNomad<Dep, E, L, R>
where
    Dep: Clone + Send + Sync + 'static,
    E: From<Timed> + Send + 'static,
    L: Send + 'static,
    R: Send + 'static,
{
    fn timed(self, operation_name: impl Into<String>) -> Self {
        let operation_name: String = operation_name.into();
        AsyncNomad::new(move |dep| self.provide(dep).timed(operation_name.clone()))
    }

    fn delay(self, duration: Duration) -> Self {
        AsyncNomad::new(move |dep| self.provide(dep).delay(duration))
    }
}
