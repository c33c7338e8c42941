//! Candidate URL validation.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use url::Url;

/// Characters percent-encoded before parsing. Mirrors what `encodeURI`
/// did to the raw input in the original client: spaces and angle brackets
/// must not make an otherwise fine URL unparsable.
const INPUT_ENCODE_SET: &AsciiSet = &CONTROLS.add(b' ').add(b'<').add(b'>');

/// Outcome of validating a candidate URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlValidation {
    /// Nothing typed yet; "not yet started" rather than invalid.
    Empty,
    /// Not a well-formed absolute URL. A missing scheme counts as
    /// malformed: the resolution flow needs the scheme to dispatch safely.
    Malformed,
    Valid,
}

impl UrlValidation {
    pub fn is_valid(&self) -> bool {
        matches!(self, UrlValidation::Valid)
    }

    /// User-facing diagnostic, `None` when the URL is valid.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            UrlValidation::Empty => Some("Start pasting or typing in the URL"),
            UrlValidation::Malformed => Some("This doesn't seem to be a valid URL"),
            UrlValidation::Valid => None,
        }
    }
}

/// Validate a candidate URL string, requiring an explicit scheme.
pub fn validate_url(raw: &str) -> UrlValidation {
    let encoded = utf8_percent_encode(raw, INPUT_ENCODE_SET).to_string();

    if encoded.is_empty() {
        return UrlValidation::Empty;
    }
    // An absolute parse fails on relative (scheme-less) input, which is
    // exactly the strictness the creation flow needs.
    match Url::parse(&encoded) {
        Ok(_) => UrlValidation::Valid,
        Err(_) => UrlValidation::Malformed,
    }
}
