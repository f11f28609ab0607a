//! Navigation targets.

use std::fmt;

/// A page of the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// Landing page.
    Home,
    /// Campaign list.
    Campaigns,
    /// One campaign.
    Campaign(u64),
    /// Campaign form.
    CreateCampaign,
    /// KYC status and form.
    Kyc,
    /// Admin dashboard.
    Admin,
}

impl Route {
    /// Path of the page.
    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::Campaigns => "/campaigns".to_string(),
            Self::Campaign(id) => format!("/campaign/{id}"),
            Self::CreateCampaign => "/create-campaign".to_string(),
            Self::Kyc => "/kyc".to_string(),
            Self::Admin => "/admin".to_string(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
