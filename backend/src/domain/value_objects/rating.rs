//! Review star rating.

use std::fmt;

use super::ValidationFailure;

/// Lowest accepted rating.
pub const RATING_MIN: u8 = 1;
/// Highest accepted rating.
pub const RATING_MAX: u8 = 5;

/// Validation errors returned by [`Rating::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RatingValidationError {
    /// The value lies outside `1..=5`.
    OutOfRange { value: i64 },
}

impl fmt::Display for RatingValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { .. } => write!(f, "별점은 1-5 사이여야 합니다"),
        }
    }
}

impl std::error::Error for RatingValidationError {}

impl ValidationFailure for RatingValidationError {
    fn code(&self) -> &'static str {
        match self {
            Self::OutOfRange { .. } => "out_of_range",
        }
    }
}

/// Integer star rating between one and five.
///
/// # Examples
/// ```
/// use carebridge::domain::value_objects::Rating;
///
/// assert_eq!(Rating::new(4).map(|r| r.value()), Ok(4));
/// assert!(Rating::new(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Rating(u8);

impl Rating {
    /// Validate and construct a rating.
    pub fn new(value: i64) -> Result<Self, RatingValidationError> {
        u8::try_from(value)
            .ok()
            .filter(|v| (RATING_MIN..=RATING_MAX).contains(v))
            .map(Self)
            .ok_or(RatingValidationError::OutOfRange { value })
    }

    pub(crate) fn restore(value: u8) -> Self {
        Self(value)
    }

    /// Numeric rating.
    pub fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(i64::MIN)]
    #[case(-1)]
    #[case(0)]
    #[case(1)]
    #[case(3)]
    #[case(5)]
    #[case(6)]
    #[case(256)]
    #[case(i64::MAX)]
    fn accepts_exactly_one_through_five(#[case] value: i64) {
        assert_eq!(Rating::new(value).is_ok(), (1..=5).contains(&value));
    }

    #[rstest]
    fn rating_six_reports_canonical_message() {
        let err = Rating::new(6).expect_err("six is out of range");
        assert_eq!(err.to_string(), "별점은 1-5 사이여야 합니다");
        assert_eq!(err.code(), "out_of_range");
    }

    #[rstest]
    fn restore_keeps_stored_value() {
        assert_eq!(Rating::restore(2).value(), 2);
    }
}
