//! Login email address.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use super::ValidationFailure;

/// Maximum accepted email length.
pub const EMAIL_MAX: usize = 254;

/// Shape check only; deliverability is not verified.
#[expect(
    clippy::expect_used,
    reason = "constant pattern; compilation is exercised by every email test"
)]
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9._%+-]+@[a-z0-9-]+(\.[a-z0-9-]+)*\.[a-z]{2,}$")
        .expect("email pattern compiles")
});

/// Validation errors returned by [`Email::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailValidationError {
    Empty,
    TooLong { max: usize },
    InvalidFormat,
}

impl fmt::Display for EmailValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "이메일을 입력해주세요"),
            Self::TooLong { max } => write!(f, "이메일은 최대 {max}자까지 입력할 수 있습니다"),
            Self::InvalidFormat => write!(f, "올바른 이메일 형식이 아닙니다"),
        }
    }
}

impl std::error::Error for EmailValidationError {}

impl ValidationFailure for EmailValidationError {
    fn code(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::TooLong { .. } => "too_long",
            Self::InvalidFormat => "invalid_format",
        }
    }
}

/// Lower-cased email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    /// Validate and normalise an email address.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, EmailValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(EmailValidationError::Empty);
        }
        if trimmed.chars().count() > EMAIL_MAX {
            return Err(EmailValidationError::TooLong { max: EMAIL_MAX });
        }
        let lowered = trimmed.to_lowercase();
        if !EMAIL_RE.is_match(&lowered) {
            return Err(EmailValidationError::InvalidFormat);
        }
        Ok(Self(lowered))
    }

    pub(crate) fn restore(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Normalised address.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn lower_cases_and_trims() {
        let email = Email::new("  Guardian@Example.COM ").expect("valid");
        assert_eq!(email.as_str(), "guardian@example.com");
    }

    #[rstest]
    #[case("", EmailValidationError::Empty)]
    #[case("no-at-sign", EmailValidationError::InvalidFormat)]
    #[case("a@b", EmailValidationError::InvalidFormat)]
    #[case("a b@example.com", EmailValidationError::InvalidFormat)]
    fn rejects(#[case] raw: &str, #[case] expected: EmailValidationError) {
        assert_eq!(Email::new(raw), Err(expected));
    }

    #[rstest]
    fn rejects_overlong() {
        let raw = format!("{}@example.com", "a".repeat(250));
        assert_eq!(Email::new(raw), Err(EmailValidationError::TooLong { max: 254 }));
    }
}
