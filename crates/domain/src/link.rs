//! Supervision edges and therapist↔client delegation links.

use std::str::FromStr;

use carelink_core::AppError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::PersonId;

/// Lifecycle state shared by supervision edges and delegation links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkStatus {
    /// Link currently participates in visibility resolution.
    Active,
    /// Link was closed by link management.
    Ended,
    /// Link was archived and is kept only for history.
    Archived,
}

impl LinkStatus {
    /// Returns a stable storage value for this status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Ended => "ended",
            Self::Archived => "archived",
        }
    }
}

impl FromStr for LinkStatus {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "active" => Ok(Self::Active),
            "ended" => Ok(Self::Ended),
            "archived" => Ok(Self::Archived),
            _ => Err(AppError::Validation(format!(
                "unknown link status value '{value}'"
            ))),
        }
    }
}

/// Directed supervision relationship: `supervisor_id` oversees
/// `clinician_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupervisionEdge {
    /// Supervising person.
    pub supervisor_id: PersonId,
    /// Supervised clinician.
    pub clinician_id: PersonId,
    /// Lifecycle state.
    pub status: LinkStatus,
    /// Start of the supervision period.
    pub start_date: DateTime<Utc>,
    /// End of the supervision period, when closed.
    pub end_date: Option<DateTime<Utc>>,
}

impl SupervisionEdge {
    /// Returns whether the edge participates in scope resolution.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == LinkStatus::Active
    }
}

/// Time-bounded grant letting one therapist see one client's data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelegationLink {
    /// Therapist receiving visibility.
    pub therapist_id: PersonId,
    /// Client whose records become visible.
    pub client_id: PersonId,
    /// Lifecycle state.
    pub status: LinkStatus,
    /// First instant the link grants access.
    pub start_date: DateTime<Utc>,
    /// Instant the link stops granting access; open-ended when absent.
    pub end_date: Option<DateTime<Utc>>,
}

impl DelegationLink {
    /// Returns whether the link grants access at `now`.
    ///
    /// The end bound is exclusive, so a link whose `end_date` equals `now`
    /// no longer grants access even if its status was never updated.
    #[must_use]
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.status == LinkStatus::Active
            && self.start_date <= now
            && self.end_date.is_none_or(|end_date| end_date > now)
    }
}
