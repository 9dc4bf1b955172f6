//! Korean mobile phone number.

use std::fmt;

use super::ValidationFailure;

const DIGITS: usize = 11;
const PREFIX: &str = "010";

/// Validation errors returned by [`PhoneNumber::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhoneNumberValidationError {
    Empty,
    InvalidCharacters,
    InvalidLength { expected: usize },
    InvalidPrefix,
}

impl fmt::Display for PhoneNumberValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "전화번호를 입력해주세요"),
            Self::InvalidCharacters => write!(f, "전화번호는 숫자와 하이픈만 포함할 수 있습니다"),
            Self::InvalidLength { expected } => {
                write!(f, "전화번호는 {expected}자리 숫자여야 합니다")
            }
            Self::InvalidPrefix => write!(f, "휴대폰 번호는 010으로 시작해야 합니다"),
        }
    }
}

impl std::error::Error for PhoneNumberValidationError {}

impl ValidationFailure for PhoneNumberValidationError {
    fn code(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::InvalidCharacters => "invalid_characters",
            Self::InvalidLength { .. } => "invalid_length",
            Self::InvalidPrefix => "invalid_prefix",
        }
    }
}

/// Mobile number normalised to `010-XXXX-XXXX`.
///
/// Hyphens and spaces in the input are ignored, so differently formatted
/// spellings of one number compare equal.
///
/// # Examples
/// ```
/// use carebridge::domain::value_objects::PhoneNumber;
///
/// let a = PhoneNumber::new("010-1234-5678").expect("valid");
/// let b = PhoneNumber::new("01012345678").expect("valid");
/// assert_eq!(a, b);
/// assert_eq!(a.masked(), "010-****-5678");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Validate and normalise a phone number.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, PhoneNumberValidationError> {
        let raw = raw.as_ref().trim();
        if raw.is_empty() {
            return Err(PhoneNumberValidationError::Empty);
        }
        let digits: String = raw.chars().filter(|c| *c != '-' && *c != ' ').collect();
        if !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(PhoneNumberValidationError::InvalidCharacters);
        }
        if digits.len() != DIGITS {
            return Err(PhoneNumberValidationError::InvalidLength { expected: DIGITS });
        }
        if !digits.starts_with(PREFIX) {
            return Err(PhoneNumberValidationError::InvalidPrefix);
        }
        let (prefix, rest) = digits.split_at(PREFIX.len());
        let (middle, last) = rest.split_at(4);
        Ok(Self(format!("{prefix}-{middle}-{last}")))
    }

    /// Normalised `010-XXXX-XXXX` form.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Number with the middle block hidden, e.g. `010-****-5678`.
    pub fn masked(&self) -> String {
        match self.0.rsplit_once('-') {
            Some((_, last)) => format!("{PREFIX}-****-{last}"),
            None => format!("{PREFIX}-****-****"),
        }
    }
}

impl AsRef<str> for PhoneNumber {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
