//! Page view models and text components.

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod admin;
pub use admin::{AdminAccess, AdminPage, PendingDecision, Processing};

mod campaigns;
pub use campaigns::{CampaignFilter, CampaignsPage, ParseFilterError};

pub mod components;

mod create;
pub use create::{CreateCampaignForm, CreateCampaignPage, CreateGate};

mod detail;
pub use detail::{CampaignDetailPage, DetailActions};

mod error;
pub use error::{PageError, ValidationError};

mod home;
pub use home::HomePage;

mod kyc;
pub use kyc::{KycForm, KycPage, KycView};

mod notice;
pub use notice::{Notice, NoticeLevel, Outcome};

mod route;
pub use route::Route;

mod write;
