//! KYC submission page.

use std::fmt;

use crowdfund_contracts::KycRecord;
use crowdfund_format::KycStatus;
use crowdfund_provider::WalletProvider;
use crowdfund_session::{Session, WalletContext};

use crate::{Notice, Outcome, Route, ValidationError, write::confirm};

/// Length of a national identity number.
pub const CNIC_LENGTH: usize = 13;

/// Values entered in the KYC form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KycForm {
    /// Full name.
    pub name: String,
    /// National identity number.
    pub cnic: String,
}

impl KycForm {
    /// Checks the fields and returns them trimmed.
    pub fn validate(&self) -> Result<(&str, &str), ValidationError> {
        let name = self.name.trim();
        let cnic = self.cnic.trim();
        if name.is_empty() || cnic.is_empty() {
            return Err(ValidationError::MissingFields);
        }
        if cnic.chars().count() != CNIC_LENGTH {
            return Err(ValidationError::CnicLength);
        }
        Ok((name, cnic))
    }
}

/// What the page shows for a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KycView {
    /// No wallet is connected.
    NotConnected,
    /// Admins have no KYC; the page sends them home.
    Admin,
    /// A submission exists; the form is hidden.
    Status(KycRecord),
    /// No submission yet; the form is shown.
    Form,
}

impl KycView {
    /// View for `session`.
    pub fn for_session<P>(session: &Session<P>) -> Self {
        if !session.is_connected() {
            return Self::NotConnected;
        }
        if session.is_admin {
            return Self::Admin;
        }
        match &session.kyc_status {
            Some(record) if record.exists => Self::Status(record.clone()),
            _ => Self::Form,
        }
    }
}

/// Message shown for a submitted record.
fn status_message(status: KycStatus) -> Option<&'static str> {
    match status {
        KycStatus::Approved => Some("Your KYC is approved! You can now create campaigns."),
        KycStatus::Pending => Some("Your KYC is pending admin approval."),
        KycStatus::NotSubmitted => None,
    }
}

/// The KYC page.
#[derive(Debug, Clone, Default)]
pub struct KycPage {
    /// Current form values.
    pub form: KycForm,
}

impl KycPage {
    /// Page with `form` filled in.
    pub const fn new(form: KycForm) -> Self {
        Self { form }
    }

    /// Re-reads the account's KYC state.
    ///
    /// Admins are redirected home.
    pub async fn load<P>(&self, context: &mut WalletContext<P>) -> Option<Route>
    where
        P: WalletProvider + Clone,
    {
        if context.session().is_admin {
            return Some(Route::Home);
        }
        context.refresh().await;
        None
    }

    /// Submits the form to the registry.
    pub async fn submit<P>(&mut self, context: &mut WalletContext<P>) -> Outcome
    where
        P: WalletProvider + Clone,
    {
        let Some(contracts) = context.session().contracts.clone() else {
            return Outcome::failed(ValidationError::NotConnected.to_string());
        };
        let (name, cnic) = match self.form.validate() {
            Ok(fields) => fields,
            Err(err) => return Outcome::failed(err.to_string()),
        };

        let mut outcome = Outcome::default();
        let submitted = contracts.kyc.submit_kyc(name, cnic).await;
        let message = "Transaction submitted. Waiting for confirmation...";
        if confirm(submitted, message, &mut outcome).await.is_none() {
            return outcome;
        }
        outcome.push(Notice::success("KYC submitted successfully! Please wait for admin approval."));
        self.form = KycForm::default();
        context.refresh().await;
        outcome
    }

    /// Renders the page for `session`.
    pub fn render<P>(&self, session: &Session<P>) -> String {
        KycPageView { form: &self.form, view: KycView::for_session(session) }.to_string()
    }
}

struct KycPageView<'a> {
    form: &'a KycForm,
    view: KycView,
}

impl fmt::Display for KycPageView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.view {
            KycView::NotConnected => {
                writeln!(f, "Wallet Not Connected")?;
                write!(f, "Please connect your wallet to submit KYC")
            }
            KycView::Admin => write!(f, "Admins do not need KYC. Redirecting to {}", Route::Home),
            KycView::Status(record) => {
                let status = record.status();
                writeln!(f, "KYC Verification")?;
                writeln!(f, "Status: {} ({})", status.label(), status.color())?;
                writeln!(f, "Name: {}", record.name)?;
                write!(f, "CNIC: {}", record.cnic)?;
                if let Some(message) = status_message(status) {
                    write!(f, "\n{message}")?;
                }
                Ok(())
            }
            KycView::Form => {
                writeln!(f, "KYC Verification")?;
                writeln!(f, "Complete your KYC to start creating campaigns")?;
                writeln!(f, "Full Name: {}", self.form.name)?;
                writeln!(f, "CNIC Number: {}", self.form.cnic)?;
                write!(f, "Enter your {CNIC_LENGTH}-digit CNIC without dashes")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::Address;
    use rstest::rstest;

    use super::*;

    fn form(name: &str, cnic: &str) -> KycForm {
        KycForm { name: name.into(), cnic: cnic.into() }
    }

    #[rstest]
    #[case(form("", "1234512345123"), ValidationError::MissingFields)]
    #[case(form("Alice", "   "), ValidationError::MissingFields)]
    #[case(form("Alice", "123451234512"), ValidationError::CnicLength)]
    #[case(form("Alice", "12345123451234"), ValidationError::CnicLength)]
    fn test_validate_rejects(#[case] form: KycForm, #[case] expected: ValidationError) {
        assert_eq!(form.validate(), Err(expected));
    }

    #[test]
    fn test_validate_trims() {
        let form = form("  Alice ", " 1234512345123 ");
        assert_eq!(form.validate(), Ok(("Alice", "1234512345123")));
    }

    fn connected() -> Session<()> {
        Session { account: Some(Address::repeat_byte(0x11)), ..Default::default() }
    }

    #[test]
    fn test_view_not_connected() {
        let page = KycPage::default();
        let session = Session::<()>::default();
        assert_eq!(KycView::for_session(&session), KycView::NotConnected);
        assert!(page.render(&session).contains("Please connect your wallet to submit KYC"));
    }

    #[test]
    fn test_view_admin() {
        let session = Session { is_admin: true, ..connected() };
        assert_eq!(KycView::for_session(&session), KycView::Admin);
    }

    #[test]
    fn test_form_shown_without_record() {
        let mut session = connected();
        assert_eq!(KycView::for_session(&session), KycView::Form);
        session.kyc_status = Some(KycRecord::default());
        assert_eq!(KycView::for_session(&session), KycView::Form);
    }

    #[rstest]
    #[case(false, "Pending", "Your KYC is pending admin approval.")]
    #[case(true, "Approved", "Your KYC is approved! You can now create campaigns.")]
    fn test_status_hides_form(#[case] approved: bool, #[case] label: &str, #[case] message: &str) {
        let record = KycRecord {
            name: "Alice".into(),
            cnic: "1234512345123".into(),
            approved,
            exists: true,
        };
        let session = Session { kyc_status: Some(record), ..connected() };
        let rendered = KycPage::default().render(&session);
        assert!(rendered.contains(label));
        assert!(rendered.contains(message));
        assert!(!rendered.contains("CNIC Number:"));
    }
}
