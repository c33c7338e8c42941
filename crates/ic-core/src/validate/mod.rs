//! Synchronous input validators.
//!
//! Pure functions with no hidden state: the same input always yields the
//! same outcome, and no network call is ever made here.

pub mod code;
pub mod url;

pub use code::{normalize_code, validate_code, CodeValidation};
pub use url::{validate_url, UrlValidation};
