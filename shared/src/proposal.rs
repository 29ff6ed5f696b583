use serde::{Deserialize, Serialize};

use super::{DEFAULT_LINK, DEFAULT_LOCATION};

pub const PENDING_STATUS: &str = "Pending";

/// Body posted to the events endpoint when someone proposes an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventProposal {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub date: String,
    pub description: String,
    pub location: String,
    pub link: String,
    pub status: String,
}

impl EventProposal {
    pub fn new(
        title: impl Into<String>,
        kind: impl Into<String>,
        date: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            kind: kind.into(),
            date: date.into(),
            description: description.into(),
            location: DEFAULT_LOCATION.to_string(),
            link: DEFAULT_LINK.to_string(),
            status: PENDING_STATUS.to_string(),
        }
    }
}

/// Outcome of a proposal POST that reached the endpoint.
///
/// Some endpoints (Apps Script web apps among them) answer with a redirect or
/// an opaque body, so a delivered proposal is not necessarily a stored one.
/// `confirmed` is only set for a success status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    pub status: u16,
    pub confirmed: bool,
}

impl SubmissionReceipt {
    pub const fn from_status(status: u16) -> Self {
        Self {
            status,
            confirmed: status >= 200 && status < 300,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proposal_defaults() {
        let proposal = EventProposal::new("Rust Night", "Workshop", "2025-04-01", "Intro to Rust");
        let json = serde_json::to_value(&proposal).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "title": "Rust Night",
                "type": "Workshop",
                "date": "2025-04-01",
                "description": "Intro to Rust",
                "location": "TBD",
                "link": "#",
                "status": "Pending",
            })
        );
    }

    #[test]
    fn receipt_confirmation() {
        assert!(SubmissionReceipt::from_status(200).confirmed);
        assert!(!SubmissionReceipt::from_status(302).confirmed);
        assert!(!SubmissionReceipt::from_status(500).confirmed);
    }
}
