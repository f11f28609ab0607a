//! Formatting helpers for the crowdfund client.

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod address;
pub use address::{format_address, is_valid_address, truncate_address};

mod error;
pub use error::{ErrorKind, REJECTED_CODE, translate_error};

mod status;
pub use status::{CampaignStatus, KycStatus, StatusColor};

mod units;
pub use units::{
    NATIVE_DECIMALS, UnitsError, calculate_percentage, format_display, format_ether, parse_ether,
    progress_width,
};
