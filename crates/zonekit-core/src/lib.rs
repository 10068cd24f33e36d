//! # ZoneKit Core
//!
//! Core types shared by every ZoneKit crate:
//!
//! - **Geometry**: the normalized-coordinate [`Rect`] primitive that all
//!   zone math operates on
//! - **Errors**: the error taxonomy (`thiserror`-based) covering
//!   validation, store lookups, and external-service round trips
//! - **Events**: a synchronous event bus used by the editing core to
//!   notify observers of zone, selection, and layout changes
//! - **Constants**: shared tolerances, defaults, and limits
//!
//! The editing core is single-threaded by design; the event bus delivers
//! events on the publishing thread.

pub mod constants;
pub mod error;
pub mod events;
pub mod geometry;

pub use error::{Error, Result, ServiceError, StoreError, ValidationError};
pub use events::{EditorEvent, EventBus, EventCategory, EventFilter, SubscriptionId};
pub use geometry::Rect;
