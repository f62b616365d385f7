use chrono::{DateTime, Utc};

/// Review state of a user's KYC submission.
///
/// `Rejected` is terminal for the reviewed bundle (its documents are purged)
/// but the user may resubmit, which moves the state back to `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KycStatus {
    NotSubmitted,
    Pending,
    Approved,
    Rejected,
}

impl KycStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            KycStatus::NotSubmitted => "not_submitted",
            KycStatus::Pending => "pending",
            KycStatus::Approved => "approved",
            KycStatus::Rejected => "rejected",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "not_submitted" => Some(KycStatus::NotSubmitted),
            "pending" => Some(KycStatus::Pending),
            "approved" => Some(KycStatus::Approved),
            "rejected" => Some(KycStatus::Rejected),
            _ => None,
        }
    }
}

impl std::fmt::Display for KycStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The document bundle embedded in a user record.
///
/// Both documents exist together or not at all; the `public_id` fields are
/// the object-store deletion handles required to reverse an upload.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct KycDocuments {
    pub id_document_url: String,
    pub id_document_public_id: String,
    pub address_document_url: String,
    pub address_document_public_id: String,
    pub contact_email: String,
    pub contact_phone: Option<String>,
    pub submitted_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kyc_status_round_trip() {
        for status in [
            KycStatus::NotSubmitted,
            KycStatus::Pending,
            KycStatus::Approved,
            KycStatus::Rejected,
        ] {
            assert_eq!(KycStatus::from_str(status.as_str()), Some(status));
        }
    }

    #[test]
    fn test_kyc_status_unknown_value() {
        assert_eq!(KycStatus::from_str("in_review"), None);
    }
}
