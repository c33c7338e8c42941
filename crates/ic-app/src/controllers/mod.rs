//! Screen-level controllers.
//!
//! Each controller is an explicit tagged-state machine over one input
//! field: validate synchronously on every change, dispatch a network call
//! only for definitive input, and discard responses that a newer request
//! has superseded.

pub mod creation;
pub mod resolution;

pub use creation::{CreateState, CreationController};
pub use resolution::{ResolutionController, ResolveState};
