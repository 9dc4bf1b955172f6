//! Length-bounded free-text value objects.
//!
//! Each type trims its input and counts Unicode scalar values, so Hangul
//! syllables count one each.

use std::fmt;

use super::ValidationFailure;

macro_rules! bounded_text {
    (
        $(#[$meta:meta])*
        $name:ident, $error:ident,
        subject = $subject:literal,
        min = $min:literal,
        max = $max:literal $(,)?
    ) => {
        /// Validation errors for
        #[doc = concat!("[`", stringify!($name), "`].")]
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub enum $error {
            /// Input was empty or whitespace only.
            Empty,
            /// Trimmed input is shorter than the minimum.
            TooShort { min: usize },
            /// Trimmed input is longer than the maximum.
            TooLong { max: usize },
        }

        impl fmt::Display for $error {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self {
                    Self::Empty => write!(f, concat!($subject, "을(를) 입력해주세요")),
                    Self::TooShort { min } => {
                        write!(f, concat!($subject, "은(는) 최소 {}자 이상이어야 합니다"), min)
                    }
                    Self::TooLong { max } => {
                        write!(f, concat!($subject, "은(는) 최대 {}자까지 입력할 수 있습니다"), max)
                    }
                }
            }
        }

        impl std::error::Error for $error {}

        impl ValidationFailure for $error {
            fn code(&self) -> &'static str {
                match self {
                    Self::Empty => "empty",
                    Self::TooShort { .. } => "too_short",
                    Self::TooLong { .. } => "too_long",
                }
            }
        }

        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(String);

        impl $name {
            /// Minimum length in characters after trimming.
            pub const MIN_CHARS: usize = $min;
            /// Maximum length in characters after trimming.
            pub const MAX_CHARS: usize = $max;

            /// Validate and construct the value from raw input.
            pub fn new(raw: impl AsRef<str>) -> Result<Self, $error> {
                let trimmed = raw.as_ref().trim();
                if trimmed.is_empty() {
                    return Err($error::Empty);
                }
                let length = trimmed.chars().count();
                if length < Self::MIN_CHARS {
                    return Err($error::TooShort { min: Self::MIN_CHARS });
                }
                if length > Self::MAX_CHARS {
                    return Err($error::TooLong { max: Self::MAX_CHARS });
                }
                Ok(Self(trimmed.to_owned()))
            }

            pub(crate) fn restore(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Borrow the normalised text.
            pub fn as_str(&self) -> &str {
                self.0.as_str()
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

bounded_text! {
    /// Body of an institution review.
    ///
    /// # Examples
    /// ```
    /// use carebridge::domain::value_objects::{ReviewContent, ReviewContentValidationError};
    ///
    /// assert!(ReviewContent::new("아이가 정말 즐겁게 지냈어요").is_ok());
    /// assert_eq!(ReviewContent::new("   "), Err(ReviewContentValidationError::Empty));
    /// assert_eq!(
    ///     ReviewContent::new("short"),
    ///     Err(ReviewContentValidationError::TooShort { min: 10 })
    /// );
    /// ```
    ReviewContent, ReviewContentValidationError,
    subject = "리뷰 내용",
    min = 10,
    max = 1000,
}

bounded_text! {
    /// Registered name of a care institution.
    InstitutionName, InstitutionNameValidationError,
    subject = "기관명",
    min = 2,
    max = 100,
}

bounded_text! {
    /// Display name of a person (user or child).
    PersonName, PersonNameValidationError,
    subject = "이름",
    min = 1,
    max = 50,
}

bounded_text! {
    /// Title of a counsel report.
    ReportTitle, ReportTitleValidationError,
    subject = "보고서 제목",
    min = 1,
    max = 100,
}

bounded_text! {
    /// Body of a counsel report.
    ReportBody, ReportBodyValidationError,
    subject = "보고서 내용",
    min = 10,
    max = 10000,
}

bounded_text! {
    /// Guardian's description of why counselling is requested.
    CounselReason, CounselReasonValidationError,
    subject = "상담 사유",
    min = 10,
    max = 2000,
}
