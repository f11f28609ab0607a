//! Landing page.

use std::fmt;

use crowdfund_session::Session;

use crate::Route;

const FEATURES: [(&str, &str); 3] = [
    (
        "Secure & Transparent",
        "All transactions are recorded on the blockchain, ensuring complete transparency and security for both creators and contributors.",
    ),
    (
        "KYC Verified",
        "Campaign creators undergo KYC verification, adding an extra layer of trust and credibility to every project.",
    ),
    (
        "Fast & Efficient",
        "Instant contributions and withdrawals powered by smart contracts. No intermediaries, no delays, just pure efficiency.",
    ),
];

const STEPS: [(&str, &str); 4] = [
    ("Connect Wallet", "Connect your wallet to get started"),
    ("Complete KYC", "Submit KYC details for verification (creators only)"),
    ("Create or Fund", "Launch your campaign or support existing projects"),
    ("Achieve Goals", "Reach funding goals and withdraw funds instantly"),
];

/// The landing page with role-gated calls to action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomePage {
    connected: bool,
    can_create: bool,
    needs_kyc: bool,
}

impl HomePage {
    /// Landing page for `session`.
    pub const fn new<P>(session: &Session<P>) -> Self {
        let connected = session.account.is_some();
        Self {
            connected,
            can_create: connected && session.can_create(),
            needs_kyc: connected && !session.is_verified && !session.is_admin,
        }
    }

    /// Hero actions: label and target.
    pub fn actions(&self) -> Vec<(&'static str, Route)> {
        let mut actions = vec![("Browse Campaigns", Route::Campaigns)];
        if self.can_create {
            actions.push(("Create Campaign", Route::CreateCampaign));
        }
        if self.needs_kyc {
            actions.push(("Complete KYC", Route::Kyc));
        }
        actions
    }
}

impl fmt::Display for HomePage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Decentralized Crowdfunding")?;
        writeln!(
            f,
            "Fund innovative projects on the blockchain with transparency, security, and complete trust"
        )?;
        for (label, route) in self.actions() {
            writeln!(f, "  > {label} ({route})")?;
        }

        writeln!(f, "\nWhy Choose Our Platform?")?;
        for (title, body) in FEATURES {
            writeln!(f, "  * {title}: {body}")?;
        }

        writeln!(f, "\nHow It Works")?;
        for (i, (title, body)) in STEPS.iter().enumerate() {
            writeln!(f, "  {}. {title}: {body}", i + 1)?;
        }

        writeln!(f, "\nReady to Get Started?")?;
        if self.connected {
            write!(f, "  > Explore Campaigns ({})", Route::Campaigns)?;
            if self.can_create {
                write!(f, "\n  > Create Your Campaign ({})", Route::CreateCampaign)?;
            }
            Ok(())
        } else {
            write!(f, "  Connect your wallet to explore campaigns and start contributing")
        }
    }
}
