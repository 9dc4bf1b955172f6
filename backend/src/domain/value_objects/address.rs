//! Postal address of an institution.

use std::fmt;

use super::ValidationFailure;

/// Maximum length of the street address.
pub const ADDRESS_MAX: usize = 200;
/// Maximum length of the detail line.
pub const DETAIL_MAX: usize = 100;
/// Exact number of digits in a postal code.
pub const POSTAL_CODE_LEN: usize = 5;

/// Validation errors returned by [`Address::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressValidationError {
    EmptyAddress,
    AddressTooLong { max: usize },
    DetailTooLong { max: usize },
    InvalidPostalCode,
}

impl fmt::Display for AddressValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyAddress => write!(f, "주소를 입력해주세요"),
            Self::AddressTooLong { max } => write!(f, "주소는 최대 {max}자까지 입력할 수 있습니다"),
            Self::DetailTooLong { max } => {
                write!(f, "상세 주소는 최대 {max}자까지 입력할 수 있습니다")
            }
            Self::InvalidPostalCode => write!(f, "우편번호는 5자리 숫자여야 합니다"),
        }
    }
}

impl std::error::Error for AddressValidationError {}

impl ValidationFailure for AddressValidationError {
    fn code(&self) -> &'static str {
        match self {
            Self::EmptyAddress => "empty_address",
            Self::AddressTooLong { .. } => "address_too_long",
            Self::DetailTooLong { .. } => "detail_too_long",
            Self::InvalidPostalCode => "invalid_postal_code",
        }
    }
}

/// Street address with optional detail line and postal code.
///
/// A blank detail line or postal code is treated as absent.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Address {
    address: String,
    detail: Option<String>,
    postal_code: Option<String>,
}

impl Address {
    /// Validate and construct an address.
    ///
    /// # Examples
    /// ```
    /// use carebridge::domain::value_objects::Address;
    ///
    /// let address = Address::new("서울시 마포구 월드컵로 1", Some("  "), Some("04001"))
    ///     .expect("valid address");
    /// assert_eq!(address.detail(), None);
    /// assert_eq!(address.postal_code(), Some("04001"));
    /// ```
    pub fn new(
        address: &str,
        detail: Option<&str>,
        postal_code: Option<&str>,
    ) -> Result<Self, AddressValidationError> {
        let address = address.trim();
        if address.is_empty() {
            return Err(AddressValidationError::EmptyAddress);
        }
        if address.chars().count() > ADDRESS_MAX {
            return Err(AddressValidationError::AddressTooLong { max: ADDRESS_MAX });
        }

        let detail = non_blank(detail);
        if detail.is_some_and(|d| d.chars().count() > DETAIL_MAX) {
            return Err(AddressValidationError::DetailTooLong { max: DETAIL_MAX });
        }

        let postal_code = non_blank(postal_code);
        if postal_code.is_some_and(|code| !is_postal_code(code)) {
            return Err(AddressValidationError::InvalidPostalCode);
        }

        Ok(Self {
            address: address.to_owned(),
            detail: detail.map(str::to_owned),
            postal_code: postal_code.map(str::to_owned),
        })
    }

    pub(crate) fn restore(
        address: String,
        detail: Option<String>,
        postal_code: Option<String>,
    ) -> Self {
        Self {
            address,
            detail,
            postal_code,
        }
    }

    /// Street address line.
    pub fn address(&self) -> &str {
        self.address.as_str()
    }

    /// Optional detail line (building, floor, unit).
    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    /// Optional five-digit postal code.
    pub fn postal_code(&self) -> Option<&str> {
        self.postal_code.as_deref()
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(code) = &self.postal_code {
            write!(f, "({code}) ")?;
        }
        f.write_str(&self.address)?;
        if let Some(detail) = &self.detail {
            write!(f, " {detail}")?;
        }
        Ok(())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn is_postal_code(value: &str) -> bool {
    value.len() == POSTAL_CODE_LEN && value.bytes().all(|b| b.is_ascii_digit())
}
