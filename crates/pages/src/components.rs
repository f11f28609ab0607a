//! Presentational components rendered as plain text.

mod card;
pub use card::CampaignCard;

mod footer;
pub use footer::Footer;

mod modal;
pub use modal::Modal;

mod navbar;
pub use navbar::{NavLink, Navbar};

mod spinner;
pub use spinner::{Spinner, SpinnerSize};

/// Cells in a progress bar.
const BAR_CELLS: usize = 20;

/// A bar of [`BAR_CELLS`] cells filled to `width` percent.
pub fn progress_bar(width: u8) -> String {
    let filled = usize::from(width.min(100)) * BAR_CELLS / 100;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_CELLS - filled))
}
