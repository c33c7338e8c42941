//! Clip code validation.

use crate::config::ClipConfig;

/// Outcome of validating a candidate clip code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeValidation {
    /// Nothing typed yet. Distinct from [`CodeValidation::TooShort`] so the
    /// UI can show an invitation instead of a countdown.
    Empty,
    /// At least one character outside `[A-Za-z0-9]`. Takes priority over
    /// length violations, matching the original validator which tests the
    /// character class before the length.
    InvalidCharacters,
    /// All characters valid but below the minimum length.
    TooShort { remaining: usize },
    /// All characters valid but above the maximum length. There is no
    /// input-capture layer here to truncate upstream, so over-long codes
    /// get an explicit outcome instead of being silently accepted.
    TooLong { max: usize },
    Valid,
}

impl CodeValidation {
    pub fn is_valid(&self) -> bool {
        matches!(self, CodeValidation::Valid)
    }

    /// User-facing diagnostic, `None` when the code is valid.
    pub fn message(&self) -> Option<String> {
        match self {
            CodeValidation::Empty => {
                Some("Just type in the code above and see the magic happen.".to_string())
            }
            CodeValidation::InvalidCharacters => {
                Some("There are some characters, that shouldn't be there.".to_string())
            }
            CodeValidation::TooShort { remaining } => Some(format!(
                "{remaining} more character{} please",
                if *remaining == 1 { "" } else { "s" }
            )),
            CodeValidation::TooLong { max } => {
                Some(format!("The code can't be longer than {max} characters"))
            }
            CodeValidation::Valid => None,
        }
    }
}

/// Normalize a candidate code the way the input screens do: strip spaces
/// and lowercase.
pub fn normalize_code(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Validate a candidate clip code against the configured length bounds
/// and the `[A-Za-z0-9]` character class.
pub fn validate_code(raw: &str, config: &ClipConfig) -> CodeValidation {
    let code = normalize_code(raw);

    if code.is_empty() {
        return CodeValidation::Empty;
    }
    if code.chars().any(|c| !c.is_ascii_alphanumeric()) {
        return CodeValidation::InvalidCharacters;
    }
    if code.len() < config.minimum_code_length {
        return CodeValidation::TooShort {
            remaining: config.minimum_code_length - code.len(),
        };
    }
    if code.len() > config.maximum_code_length {
        return CodeValidation::TooLong {
            max: config.maximum_code_length,
        };
    }
    CodeValidation::Valid
}
