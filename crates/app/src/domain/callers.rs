//! Caller identity.
//!
//! Authentication happens upstream; the core only ever sees the resolved
//! caller identity, threaded explicitly through every cart operation.

use crate::uuids::TypedUuid;

/// Marker for caller identifiers.
#[derive(Debug)]
pub struct Caller;

/// The identity a cart belongs to.
pub type CallerUuid = TypedUuid<Caller>;
