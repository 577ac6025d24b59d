//! # Nomad
//!
//! > *Carry your effects with you.*
//!
//! A Rust library for computations that return a value together with an
//! ordered log of effects describing what happened along the way.
//!
//! ## Philosophy
//!
//! Effects are **data**, not actions: a step records "an email should be
//! sent" or "the cache was missed" instead of doing it. The caller decides
//! what to do with the log once the computation has finished.
//!
//! - [`Nomad`]: a value plus its effect log
//! - [`NomadEither`]: the same, where the value is a success or a failure
//! - [`TaskNomad`] / [`TaskNomadEither`]: lazy, re-runnable async versions
//! - [`AsyncNomad`]: an async computation that reads an injected dependency
//!
//! Logs always grow as *existing* followed by *new*, across every layer.
//!
//! ## Quick Example
//!
//! ```rust
//! use nomad::{Either, NomadEither};
//!
//! #[derive(Debug, Clone, PartialEq)]
//! enum Event {
//!     Validated(String),
//!     Rejected(String),
//! }
//!
//! fn validate_email(email: &str) -> NomadEither<Event, String, String> {
//!     if email.contains('@') {
//!         NomadEither::right(email.to_string()).effect(Event::Validated(email.to_string()))
//!     } else {
//!         NomadEither::left("Email must contain @".to_string())
//!             .effect(Event::Rejected(email.to_string()))
//!     }
//! }
//!
//! let result = validate_email("user@example.com").map(|e| e.to_uppercase());
//! assert_eq!(result.value(), &Either::right("USER@EXAMPLE.COM".to_string()));
//! assert_eq!(result.effects(), &[Event::Validated("user@example.com".to_string())]);
//! ```
//!
//! ## Cargo features
//!
//! - `async`: timing and delay decorators ([`decorators`])
//! - `tracing`: span instrumentation and runner events ([`tracing`](crate::tracing))
//! - `serde`: `Serialize`/`Deserialize` for the data types
//! - `proptest`: `Arbitrary` implementations for [`Either`] and [`Nomad`]

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod async_nomad;
#[cfg(feature = "async")]
pub mod decorators;
pub mod either;
pub mod monoid;
pub mod nomad;
pub mod nomad_either;
pub mod reader;
pub mod semigroup;
pub mod task_nomad;
pub mod task_nomad_either;
pub mod testing;
#[cfg(feature = "tracing")]
pub mod tracing;

// Re-exports
pub use async_nomad::AsyncNomad;
pub use either::Either;
pub use monoid::Monoid;
pub use nomad::Nomad;
pub use nomad_either::NomadEither;
pub use reader::Reader;
pub use semigroup::Semigroup;
pub use task_nomad::{BoxFuture, TaskNomad};
pub use task_nomad_either::TaskNomadEither;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::async_nomad::AsyncNomad;
    #[cfg(feature = "async")]
    pub use crate::decorators::{DecoratorExt, Level, Timed};
    pub use crate::either::Either;
    pub use crate::monoid::{First, Last, Max, Min, Monoid, Product, Sum};
    pub use crate::nomad::Nomad;
    pub use crate::nomad_either::NomadEither;
    pub use crate::reader::Reader;
    pub use crate::semigroup::Semigroup;
    pub use crate::task_nomad::TaskNomad;
    pub use crate::task_nomad_either::TaskNomadEither;
    #[cfg(feature = "tracing")]
    pub use crate::tracing::InstrumentExt;
}
