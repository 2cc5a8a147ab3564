//! Email flow of the reports directory.
//!
//! Nothing is transmitted: a send validates the draft, logs it and reports `delivered: false`.

use serde::{Deserialize, Serialize};

use rbc_domain::{ReportRecord, text};

use crate::{ComplianceService, Error, Result};

/// Prefilled message for a report: its submission address and title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailDraft {
	pub to: String,
	pub subject: String,
	pub message: String,
}
impl EmailDraft {
	pub fn for_report(report: &ReportRecord) -> Self {
		Self {
			to: report.submission_email().unwrap_or_default().to_string(),
			subject: report.title.clone(),
			message: String::new(),
		}
	}
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmailRequest {
	pub report_title: Option<String>,
	pub to: Option<String>,
	pub subject: Option<String>,
	pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailReceipt {
	pub sent: bool,
	pub delivered: bool,
	pub to: String,
	pub subject: String,
}

impl ComplianceService {
	pub fn email_draft(&self, report_title: &str) -> Result<EmailDraft> {
		self.reports()
			.find_by_title(report_title)
			.map(EmailDraft::for_report)
			.ok_or_else(|| Error::NotFound { message: format!("No report titled {report_title:?}.") })
	}

	/// Fields left blank are taken from the named report's draft.
	pub fn send_email(&self, req: &EmailRequest) -> Result<EmailReceipt> {
		let draft = match non_blank(req.report_title.as_deref()) {
			Some(title) => Some(self.email_draft(title)?),
			None => None,
		};
		let to = non_blank(req.to.as_deref())
			.or_else(|| draft.as_ref().map(|draft| draft.to.as_str()).filter(|to| !to.is_empty()))
			.ok_or_else(|| Error::InvalidRequest { message: "to is required.".to_string() })?;

		if text::extract_email_address(to) != Some(to) {
			return Err(Error::InvalidRequest {
				message: "to must be a single email address.".to_string(),
			});
		}

		let subject = non_blank(req.subject.as_deref())
			.or_else(|| draft.as_ref().map(|draft| draft.subject.as_str()))
			.unwrap_or_default();
		let message = req.message.as_deref().unwrap_or_default();

		tracing::info!(
			to,
			subject,
			message_len = message.len(),
			"Email send requested; delivery is not performed."
		);

		Ok(EmailReceipt { sent: true, delivered: false, to: to.to_string(), subject: subject.to_string() })
	}
}

fn non_blank(value: Option<&str>) -> Option<&str> {
	value.map(str::trim).filter(|value| !value.is_empty())
}
