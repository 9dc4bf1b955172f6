//! Plain-text password input and its stored hash.

use std::fmt;

use zeroize::Zeroizing;

use super::ValidationFailure;

/// Minimum password length in characters.
pub const PASSWORD_MIN: usize = 8;
/// Maximum password length in characters.
pub const PASSWORD_MAX: usize = 100;

const COMMON_WORDS: &[&str] = &[
    "password", "qwerty", "letmein", "welcome", "iloveyou", "admin", "asdf", "1q2w3e",
];

/// Validation errors returned by [`Password::new`] and [`Password::new_strong`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasswordValidationError {
    TooShort { min: usize },
    TooLong { max: usize },
    MissingLetter,
    MissingDigit,
    MissingSpecial,
    Weak,
}

impl fmt::Display for PasswordValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooShort { min } => write!(f, "비밀번호는 최소 {min}자 이상이어야 합니다"),
            Self::TooLong { max } => write!(f, "비밀번호는 최대 {max}자까지 입력할 수 있습니다"),
            Self::MissingLetter => write!(f, "비밀번호에 영문자가 포함되어야 합니다"),
            Self::MissingDigit => write!(f, "비밀번호에 숫자가 포함되어야 합니다"),
            Self::MissingSpecial => write!(f, "비밀번호에 특수문자가 포함되어야 합니다"),
            Self::Weak => write!(f, "추측하기 쉬운 비밀번호는 사용할 수 없습니다"),
        }
    }
}

impl std::error::Error for PasswordValidationError {}

impl ValidationFailure for PasswordValidationError {
    fn code(&self) -> &'static str {
        match self {
            Self::TooShort { .. } => "too_short",
            Self::TooLong { .. } => "too_long",
            Self::MissingLetter => "missing_letter",
            Self::MissingDigit => "missing_digit",
            Self::MissingSpecial => "missing_special",
            Self::Weak => "weak",
        }
    }
}

/// Validated plain-text password.
///
/// The buffer is wiped on drop and never printed by `Debug`. There is no
/// `restore`: only hashes are persisted.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(Zeroizing<String>);

impl Password {
    /// Check length and character classes.
    ///
    /// Used when verifying an existing password, where weak passwords that
    /// predate the strength rules must still be accepted.
    pub fn new(raw: impl Into<String>) -> Result<Self, PasswordValidationError> {
        let raw = Zeroizing::new(raw.into());
        let length = raw.chars().count();
        if length < PASSWORD_MIN {
            return Err(PasswordValidationError::TooShort { min: PASSWORD_MIN });
        }
        if length > PASSWORD_MAX {
            return Err(PasswordValidationError::TooLong { max: PASSWORD_MAX });
        }
        if !raw.chars().any(|c| c.is_ascii_alphabetic()) {
            return Err(PasswordValidationError::MissingLetter);
        }
        if !raw.chars().any(|c| c.is_ascii_digit()) {
            return Err(PasswordValidationError::MissingDigit);
        }
        if !raw
            .chars()
            .any(|c| !c.is_alphanumeric() && !c.is_whitespace())
        {
            return Err(PasswordValidationError::MissingSpecial);
        }
        Ok(Self(raw))
    }

    /// [`Password::new`] plus rejection of guessable patterns: common words,
    /// a character repeated three times in a row, or four ascending
    /// characters such as `1234` or `abcd`.
    ///
    /// # Examples
    /// ```
    /// use carebridge::domain::value_objects::{Password, PasswordValidationError};
    ///
    /// assert!(Password::new_strong("Tr4ce!Kite").is_ok());
    /// assert_eq!(
    ///     Password::new_strong("Password1!").err(),
    ///     Some(PasswordValidationError::Weak)
    /// );
    /// ```
    pub fn new_strong(raw: impl Into<String>) -> Result<Self, PasswordValidationError> {
        let password = Self::new(raw)?;
        if password.is_weak() {
            return Err(PasswordValidationError::Weak);
        }
        Ok(password)
    }

    /// Expose the secret for hashing.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }

    fn is_weak(&self) -> bool {
        let lowered = Zeroizing::new(self.0.to_lowercase());
        if COMMON_WORDS.iter().any(|word| lowered.contains(word)) {
            return true;
        }
        let chars: Zeroizing<Vec<char>> = Zeroizing::new(lowered.chars().collect());
        let repeated = chars
            .windows(3)
            .any(|w| matches!(w, [a, b, c] if a == b && b == c));
        let ascending = chars.windows(4).any(|w| {
            w.iter().all(char::is_ascii_alphanumeric)
                && w
                    .windows(2)
                    .all(|pair| matches!(pair, [a, b] if u32::from(*b) == u32::from(*a) + 1))
        });
        repeated || ascending
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

/// Encoded password hash as produced by a `PasswordHasher`.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap an encoded hash produced by a hasher adapter.
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Encoded form for storage.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("a1!", PasswordValidationError::TooShort { min: 8 })]
    #[case("12345678!", PasswordValidationError::MissingLetter)]
    #[case("abcdefgh!", PasswordValidationError::MissingDigit)]
    #[case("abcdefg12", PasswordValidationError::MissingSpecial)]
    fn rejects_missing_rules(#[case] raw: &str, #[case] expected: PasswordValidationError) {
        assert_eq!(Password::new(raw).err(), Some(expected));
    }

    #[rstest]
    fn rejects_overlong() {
        let raw = format!("a1!{}", "x".repeat(98));
        assert_eq!(
            Password::new(raw).err(),
            Some(PasswordValidationError::TooLong { max: 100 })
        );
    }

    #[rstest]
    #[case("Qwerty9!x")]
    #[case("Zaaa9!xy")]
    #[case("x!9abcdQ")]
    #[case("Kw!56789")]
    fn strong_check_rejects_guessable(#[case] raw: &str) {
        assert!(Password::new(raw).is_ok());
        assert_eq!(Password::new_strong(raw).err(), Some(PasswordValidationError::Weak));
    }

    #[rstest]
    fn debug_does_not_leak_secret() {
        let password = Password::new("Tr4ce!Kite").expect("valid");
        assert!(!format!("{password:?}").contains("Tr4ce"));
    }
}
