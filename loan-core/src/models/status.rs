use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raised when an integer outside the known status set is converted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown application status {0}; expected one of 0, 1, 2")]
pub struct StatusError(pub u8);

/// Processing status of an application.
///
/// The backend only ever sends 0, 1 or 2 and assigns no meaning the form
/// relies on, so the value is kept opaque.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct ApplicationStatus(u8);

impl ApplicationStatus {
    /// Every status the form offers, in display order.
    pub const ALL: [ApplicationStatus; 3] = [Self(0), Self(1), Self(2)];

    pub fn as_u8(self) -> u8 {
        self.0
    }

    /// Parses the textual form used by inputs and CSV cells (`"0"`, `" 2 "`).
    pub fn parse(s: &str) -> Option<Self> {
        s.trim()
            .parse::<u8>()
            .ok()
            .and_then(|v| Self::try_from(v).ok())
    }
}

impl TryFrom<u8> for ApplicationStatus {
    type Error = StatusError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0..=2 => Ok(Self(value)),
            other => Err(StatusError(other)),
        }
    }
}

impl From<ApplicationStatus> for u8 {
    fn from(status: ApplicationStatus) -> Self {
        status.0
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
