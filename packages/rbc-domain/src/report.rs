use serde::{Deserialize, Serialize};

use crate::text;

/// One row of the BSP required-reports list.
///
/// Field names on the wire are the column headers of the source sheet so that the reports
/// endpoint serves rows in the shape the directory UI already consumes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRecord {
	#[serde(rename = "Category", default)]
	pub category: String,
	#[serde(rename = "Form No.", default)]
	pub form_no: String,
	#[serde(rename = "MOR Ref.", default)]
	pub mor_ref: String,
	#[serde(rename = "Report Title", default)]
	pub title: String,
	#[serde(rename = "Frequency", default)]
	pub frequency: String,
	#[serde(rename = "Submission Deadline", default)]
	pub submission_deadline: String,
	#[serde(rename = "Submission Procedure / E-mail Address", default)]
	pub submission_procedure: String,
}
impl ReportRecord {
	/// Fields the approximate matcher looks at, in a fixed order.
	pub fn searchable_fields(&self) -> [&str; 7] {
		[
			&self.category,
			&self.form_no,
			&self.mor_ref,
			&self.title,
			&self.frequency,
			&self.submission_deadline,
			&self.submission_procedure,
		]
	}

	pub fn frequency_kind(&self) -> Frequency {
		Frequency::classify(&self.frequency)
	}

	/// First email address embedded in the submission procedure, if any.
	pub fn submission_email(&self) -> Option<&str> {
		text::extract_email_address(&self.submission_procedure)
	}
}

/// Reporting cadence. Labels outside the known set classify as `Other`; the record keeps its
/// original label either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
	Weekly,
	Monthly,
	Quarterly,
	Semestral,
	Annually,
	Other,
}
impl Frequency {
	pub fn classify(label: &str) -> Self {
		match label.trim().to_ascii_lowercase().as_str() {
			"weekly" => Self::Weekly,
			"monthly" => Self::Monthly,
			"quarterly" => Self::Quarterly,
			"semestral" => Self::Semestral,
			"annually" => Self::Annually,
			_ => Self::Other,
		}
	}
}
