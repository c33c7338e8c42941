//! Clip domain model and error taxonomy.

pub mod error;
pub mod model;

pub use error::ClipError;
pub use model::{Clip, ClipSignature, OEmbed};
