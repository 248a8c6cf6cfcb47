//! Fieldnote API - Backend Wire Layer
//!
//! Everything that touches the backend's JSON representation lives here: the
//! tolerant wire structs, the request bodies, and the transform that turns a
//! backend payload into a [`fieldnote_core::Note`]. The HTTP wrappers
//! themselves live in the client crate; this crate stays pure.

pub mod transform;
pub mod types;

pub use transform::{parse_backend_timestamp, transform, TransformError};
pub use types::*;

// Re-export the pure derivations so callers of the transform can recompute
// derived fields without a direct core dependency.
pub use fieldnote_core::{generate_preview, pinned_to_priority, priority_to_pinned};
