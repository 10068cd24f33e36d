//! Editor event distribution.
//!
//! A synchronous observer mechanism: components subscribe callbacks,
//! publishers deliver events on the publishing thread. The zone store
//! batches its `ZonesChanged` notifications through this bus so that a
//! multi-zone mutation produces exactly one refresh.

mod bus;
mod events;

pub use bus::{EventBus, EventFilter, SubscriptionId};
pub use events::{EditorEvent, EventCategory};
