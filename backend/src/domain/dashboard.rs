//! Derived dashboard counters.
//!
//! Counters are simple filters over the fetched application sequence; there
//! is no separate aggregation query.

use serde::Serialize;
use utoipa::ToSchema;

use super::application::{ApplicationStatus, VisaApplication};

/// Counters shown on the applicant dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    /// Total number of applications.
    pub total: usize,
    /// Applications awaiting review.
    pub pending: usize,
    /// Approved applications.
    pub approved: usize,
    /// Completed applications.
    pub completed: usize,
}

impl DashboardSummary {
    /// Compute counters over the caller's applications.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::DashboardSummary;
    ///
    /// let summary = DashboardSummary::summarize(&[]);
    /// assert_eq!(summary.total, 0);
    /// ```
    pub fn summarize(applications: &[VisaApplication]) -> Self {
        let count = |status: ApplicationStatus| {
            applications.iter().filter(|a| a.status == status).count()
        };
        Self {
            total: applications.len(),
            pending: count(ApplicationStatus::Pending),
            approved: count(ApplicationStatus::Approved),
            completed: count(ApplicationStatus::Completed),
        }
    }
}
