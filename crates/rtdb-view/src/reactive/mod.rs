//! Reactive primitives: the small observable toolkit the pipeline is built on.
//!
//! # Modules
//!
//! - [`event_emitter`]: Generic typed pub/sub ([`EventEmitter<T>`]).
//! - [`subscription`]: Owned cancellation token ([`Subscription`]).
//! - [`subject`]: Replay-latest value stream ([`ReplaySubject<T>`]) and the
//!   [`Observable`] trait.
//! - [`combine`]: [`combine_latest`] over two observables.

pub mod combine;
pub mod event_emitter;
pub mod subject;
pub mod subscription;

pub use combine::combine_latest;
pub use event_emitter::{EventEmitter, ListenerId};
pub use subject::{Observable, ReplaySubject};
pub use subscription::{Subscription, Unsubscribe};
