//! Domain layer: the opaque payload type accepted by the receiver.

pub mod payload;

pub use payload::{MISSING_FIELD, RawPayload};
