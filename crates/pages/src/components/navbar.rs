//! Navigation bar.

use std::fmt;

use crowdfund_format::truncate_address;
use crowdfund_session::Session;

use crate::Route;

/// A navigation link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavLink {
    /// Link text.
    pub label: &'static str,
    /// Target page.
    pub route: Route,
}

/// Links, role badges and wallet state for the current session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navbar {
    links: Vec<NavLink>,
    badges: Vec<&'static str>,
    wallet: WalletState,
    current: Route,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum WalletState {
    Connected { account: String, balance: String, symbol: String },
    Connecting,
    Disconnected,
}

impl Navbar {
    /// Navbar for `session`, highlighting `current`.
    pub fn new<P>(session: &Session<P>, is_connecting: bool, symbol: &str, current: Route) -> Self {
        let mut links = vec![
            NavLink { label: "Home", route: Route::Home },
            NavLink { label: "Campaigns", route: Route::Campaigns },
        ];
        if session.can_create() {
            links.push(NavLink { label: "Create Campaign", route: Route::CreateCampaign });
        }
        if session.is_admin {
            links.push(NavLink { label: "Admin Panel", route: Route::Admin });
        } else {
            links.push(NavLink { label: "KYC", route: Route::Kyc });
        }

        let mut badges = Vec::new();
        if session.is_admin {
            badges.push("Admin");
        }
        if session.is_verified {
            badges.push("✓ Verified");
        }

        let wallet = match session.account {
            Some(account) => WalletState::Connected {
                account: truncate_address(&account.to_string()),
                balance: session.balance_display(),
                symbol: symbol.to_string(),
            },
            None if is_connecting => WalletState::Connecting,
            None => WalletState::Disconnected,
        };

        Self { links, badges, wallet, current }
    }

    /// Links visible to the session.
    pub fn links(&self) -> &[NavLink] {
        &self.links
    }

    /// Role badges.
    pub fn badges(&self) -> &[&'static str] {
        &self.badges
    }
}

impl fmt::Display for Navbar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CrowdFund DApp |")?;
        for link in &self.links {
            if link.route == self.current {
                write!(f, " *{}*", link.label)?;
            } else {
                write!(f, " {}", link.label)?;
            }
        }
        f.write_str(" | ")?;
        match &self.wallet {
            WalletState::Connected { account, balance, symbol } => {
                for badge in &self.badges {
                    write!(f, "[{badge}] ")?;
                }
                write!(f, "{balance} {symbol} {account} (Disconnect)")
            }
            WalletState::Connecting => f.write_str("Connecting..."),
            WalletState::Disconnected => f.write_str("Connect Wallet"),
        }
    }
}
