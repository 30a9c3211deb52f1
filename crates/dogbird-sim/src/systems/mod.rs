//! Systems that operate on the entity store each tick.
//!
//! Systems are free functions over `&mut impl EntityStore` (or `&impl` for
//! read-only). Entity state lives in the store; the only state held outside
//! it is the interaction controller's drag slot.

pub mod cleanup;
pub mod interaction;
pub mod motion;
pub mod snapshot;
