//! bs-core: shared foundation for bulksim.
//!
//! Contains:
//! - items (item specs, equipment slots)
//! - numeric (display-safe arithmetic guards)
//! - events (typed change notification)
//! - error (shared error types)

pub mod error;
pub mod events;
pub mod items;
pub mod numeric;

pub use error::BsError;
pub use events::{EventId, ListenerId, TypedEvent};
pub use items::*;
pub use numeric::*;
