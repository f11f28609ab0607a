//! Campaign card.

use std::fmt;

use crowdfund_contracts::Campaign;
use crowdfund_format::{format_display, truncate_address};

use super::progress_bar;
use crate::Route;

/// Summary of one campaign as shown in lists.
#[derive(Debug, Clone, Copy)]
pub struct CampaignCard<'a> {
    campaign: &'a Campaign,
    symbol: &'a str,
}

impl<'a> CampaignCard<'a> {
    /// Card for `campaign`, amounts in `symbol`.
    pub const fn new(campaign: &'a Campaign, symbol: &'a str) -> Self {
        Self { campaign, symbol }
    }
}

impl fmt::Display for CampaignCard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = self.campaign;
        let status = c.status();
        writeln!(f, "#{} {}  [{}]", c.id, c.title, status.label())?;
        writeln!(f, "  {}", c.description)?;
        writeln!(f, "  Creator: {}", truncate_address(&c.creator.to_string()))?;
        writeln!(f, "  Progress {} {}%", progress_bar(c.progress()), c.percentage())?;
        writeln!(
            f,
            "  Raised: {} {sym}  Goal: {} {sym}",
            format_display(c.funds_raised),
            format_display(c.goal),
            sym = self.symbol
        )?;
        write!(f, "  View Details: {}", Route::Campaign(c.id))
    }
}
