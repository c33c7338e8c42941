//! User preference model.

pub mod model;

pub use model::Preferences;
