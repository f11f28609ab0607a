//! User-facing notifications.

use std::fmt;

use crowdfund_session::SessionUpdate;
use serde::{Deserialize, Serialize};

use crate::Route;

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    /// Progress information.
    Info,
    /// An operation completed.
    Success,
    /// An operation failed.
    Error,
}

impl NoticeLevel {
    /// Lowercase name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

/// A message for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    /// Severity.
    pub level: NoticeLevel,
    /// Text shown to the user.
    pub message: String,
}

impl Notice {
    /// Progress notice.
    pub fn info(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Info, message: message.into() }
    }

    /// Success notice.
    pub fn success(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Success, message: message.into() }
    }

    /// Failure notice.
    pub fn error(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Error, message: message.into() }
    }

    /// The notice shown for a session lifecycle change, if any.
    pub fn from_update(update: &SessionUpdate) -> Option<Self> {
        match update {
            SessionUpdate::Connecting => None,
            SessionUpdate::Connected { .. } => Some(Self::success("Wallet connected successfully!")),
            SessionUpdate::Failed(message) => Some(Self::error(message.clone())),
            SessionUpdate::Disconnected => Some(Self::info("Wallet disconnected")),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.level.as_str(), self.message)
    }
}

/// What a page operation produced: notices in order and an optional redirect.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    /// Notices in the order they were raised.
    pub notices: Vec<Notice>,
    /// Page to navigate to.
    pub redirect: Option<Route>,
}

impl Outcome {
    /// Outcome carrying a single failure.
    pub fn failed(message: impl Into<String>) -> Self {
        let mut outcome = Self::default();
        outcome.push(Notice::error(message));
        outcome
    }

    /// Records `notice`, logging it.
    pub fn push(&mut self, notice: Notice) {
        match notice.level {
            NoticeLevel::Error => tracing::warn!(message = %notice.message, "notice"),
            NoticeLevel::Info | NoticeLevel::Success => {
                tracing::info!(message = %notice.message, "notice")
            }
        }
        self.notices.push(notice);
    }

    /// Sets the redirect.
    pub const fn redirect_to(mut self, route: Route) -> Self {
        self.redirect = Some(route);
        self
    }

    /// Whether no failure was raised.
    pub fn succeeded(&self) -> bool {
        self.notices.iter().all(|notice| notice.level != NoticeLevel::Error)
    }

    /// Messages in order, for display and assertions.
    pub fn messages(&self) -> Vec<&str> {
        self.notices.iter().map(|notice| notice.message.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::Address;

    use super::*;

    #[test]
    fn test_notice_display() {
        assert_eq!(Notice::error("boom").to_string(), "[error] boom");
        assert_eq!(Notice::success("done").to_string(), "[success] done");
    }

    #[test]
    fn test_from_update() {
        let connected = SessionUpdate::Connected { account: Address::ZERO, chain_id: 31337 };
        assert_eq!(
            Notice::from_update(&connected),
            Some(Notice::success("Wallet connected successfully!"))
        );
        assert_eq!(
            Notice::from_update(&SessionUpdate::Disconnected),
            Some(Notice::info("Wallet disconnected"))
        );
        assert_eq!(Notice::from_update(&SessionUpdate::Connecting), None);
    }

    #[test]
    fn test_outcome_failed() {
        let outcome = Outcome::failed("Please fill in all fields");
        assert!(!outcome.succeeded());
        assert_eq!(outcome.messages(), vec!["Please fill in all fields"]);
        assert_eq!(outcome.redirect, None);
    }
}
