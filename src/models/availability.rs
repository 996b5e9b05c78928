use serde::Serialize;
use std::fmt;

/// A trainer's answer for one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AvailabilityStatus {
    Yes,
    Maybe,
    No,
}

impl AvailabilityStatus {
    /// Strict parse of the stored / submitted value. Anything other than
    /// `Yes`, `Maybe` or `No` is rejected.
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "Yes" => Some(Self::Yes),
            "Maybe" => Some(Self::Maybe),
            "No" => Some(Self::No),
            _ => None,
        }
    }

    pub fn to_db_str(&self) -> &'static str {
        match self {
            Self::Yes => "Yes",
            Self::Maybe => "Maybe",
            Self::No => "No",
        }
    }
}

impl fmt::Display for AvailabilityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_db_str())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AvailabilityEntry {
    pub id: i64,
    pub user_id: i64,
    pub session_id: i64,
    pub status: AvailabilityStatus,
    pub comment: String,
}
