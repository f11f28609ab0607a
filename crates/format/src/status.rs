//! Status labels and colors for campaigns and KYC records.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Badge color attached to a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusColor {
    /// Neutral.
    Gray,
    /// Running.
    Blue,
    /// Success.
    Green,
    /// Closed out.
    Purple,
    /// Waiting.
    Yellow,
}

impl StatusColor {
    /// Lowercase color name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Gray => "gray",
            Self::Blue => "blue",
            Self::Green => "green",
            Self::Purple => "purple",
            Self::Yellow => "yellow",
        }
    }
}

impl fmt::Display for StatusColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display status of a campaign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CampaignStatus {
    /// Accepting contributions.
    Active,
    /// Goal reached, funds not yet withdrawn.
    Completed,
    /// Funds withdrawn by the creator.
    Withdrawn,
    /// Neither active, completed nor withdrawn.
    Inactive,
}

const CAMPAIGN_TABLE: [(CampaignStatus, &str, StatusColor); 4] = [
    (CampaignStatus::Active, "Active", StatusColor::Blue),
    (CampaignStatus::Completed, "Completed", StatusColor::Green),
    (CampaignStatus::Withdrawn, "Withdrawn", StatusColor::Purple),
    (CampaignStatus::Inactive, "Inactive", StatusColor::Gray),
];

impl CampaignStatus {
    /// Derives the status from the contract flags.
    ///
    /// Withdrawn takes precedence over completed, which takes precedence over active.
    pub const fn from_flags(active: bool, completed: bool, withdrawn: bool) -> Self {
        if withdrawn {
            Self::Withdrawn
        } else if completed {
            Self::Completed
        } else if active {
            Self::Active
        } else {
            Self::Inactive
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        CAMPAIGN_TABLE.iter().find(|(s, _, _)| s == self).map_or("Unknown", |(_, l, _)| *l)
    }

    /// Badge color.
    pub fn color(&self) -> StatusColor {
        CAMPAIGN_TABLE.iter().find(|(s, _, _)| s == self).map_or(StatusColor::Gray, |(_, _, c)| *c)
    }
}

impl fmt::Display for CampaignStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Display status of a KYC record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KycStatus {
    /// No record exists for the address.
    NotSubmitted,
    /// Submitted and awaiting review.
    Pending,
    /// Approved by the admin.
    Approved,
}

const KYC_TABLE: [(KycStatus, &str, StatusColor); 3] = [
    (KycStatus::NotSubmitted, "Not Submitted", StatusColor::Gray),
    (KycStatus::Pending, "Pending", StatusColor::Yellow),
    (KycStatus::Approved, "Approved", StatusColor::Green),
];

impl KycStatus {
    /// Derives the status from the registry flags.
    pub const fn from_flags(exists: bool, approved: bool) -> Self {
        match (exists, approved) {
            (false, _) => Self::NotSubmitted,
            (true, true) => Self::Approved,
            (true, false) => Self::Pending,
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        KYC_TABLE.iter().find(|(s, _, _)| s == self).map_or("Unknown", |(_, l, _)| *l)
    }

    /// Badge color.
    pub fn color(&self) -> StatusColor {
        KYC_TABLE.iter().find(|(s, _, _)| s == self).map_or(StatusColor::Gray, |(_, _, c)| *c)
    }
}

impl fmt::Display for KycStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(false, false, false, "Inactive", StatusColor::Gray)]
    #[case(true, false, false, "Active", StatusColor::Blue)]
    #[case(true, true, false, "Completed", StatusColor::Green)]
    #[case(false, true, false, "Completed", StatusColor::Green)]
    #[case(true, true, true, "Withdrawn", StatusColor::Purple)]
    #[case(false, false, true, "Withdrawn", StatusColor::Purple)]
    #[case(true, false, true, "Withdrawn", StatusColor::Purple)]
    #[case(false, true, true, "Withdrawn", StatusColor::Purple)]
    fn test_campaign_status_precedence(
        #[case] active: bool,
        #[case] completed: bool,
        #[case] withdrawn: bool,
        #[case] label: &str,
        #[case] color: StatusColor,
    ) {
        let status = CampaignStatus::from_flags(active, completed, withdrawn);
        assert_eq!(status.label(), label);
        assert_eq!(status.color(), color);
        assert_eq!(status.to_string(), label);
    }

    #[rstest]
    #[case(false, false, "Not Submitted", StatusColor::Gray)]
    #[case(false, true, "Not Submitted", StatusColor::Gray)]
    #[case(true, false, "Pending", StatusColor::Yellow)]
    #[case(true, true, "Approved", StatusColor::Green)]
    fn test_kyc_status(
        #[case] exists: bool,
        #[case] approved: bool,
        #[case] label: &str,
        #[case] color: StatusColor,
    ) {
        let status = KycStatus::from_flags(exists, approved);
        assert_eq!(status.label(), label);
        assert_eq!(status.color(), color);
    }

    #[test]
    fn test_status_color_serde_lowercase() {
        let json = serde_json::to_string(&StatusColor::Purple).unwrap();
        assert_eq!(json, "\"purple\"");
    }
}
