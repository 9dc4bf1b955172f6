//! Counsel report status lattice.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::UnknownVariant;

/// Lifecycle status of a counsel report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CounselReportStatus {
    Draft,
    Submitted,
    Reviewed,
    Approved,
}

/// Every permitted `(from, to)` pair. Nothing else may change a status.
pub const TRANSITIONS: &[(CounselReportStatus, CounselReportStatus)] = &[
    (CounselReportStatus::Draft, CounselReportStatus::Submitted),
    (CounselReportStatus::Submitted, CounselReportStatus::Reviewed),
    (CounselReportStatus::Submitted, CounselReportStatus::Draft),
    (CounselReportStatus::Reviewed, CounselReportStatus::Approved),
];

impl CounselReportStatus {
    /// All statuses in lattice order.
    pub const ALL: [Self; 4] = [Self::Draft, Self::Submitted, Self::Reviewed, Self::Approved];

    /// Whether the table contains `self -> to`.
    ///
    /// # Examples
    /// ```
    /// use carebridge::domain::counsel_report::CounselReportStatus::*;
    ///
    /// assert!(Draft.can_transition_to(Submitted));
    /// assert!(!Draft.can_transition_to(Reviewed));
    /// assert!(!Approved.can_transition_to(Draft));
    /// ```
    pub fn can_transition_to(self, to: Self) -> bool {
        TRANSITIONS.contains(&(self, to))
    }

    /// Counselors may only edit drafts.
    pub fn is_counselor_editable(self) -> bool {
        matches!(self, Self::Draft)
    }

    /// Guardians see every report that has left the draft state.
    pub fn is_guardian_viewable(self) -> bool {
        !matches!(self, Self::Draft)
    }

    /// Storage and wire representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::Submitted => "SUBMITTED",
            Self::Reviewed => "REVIEWED",
            Self::Approved => "APPROVED",
        }
    }
}

impl fmt::Display for CounselReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CounselReportStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownVariant(s.to_owned()))
    }
}
