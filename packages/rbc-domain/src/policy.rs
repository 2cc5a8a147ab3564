use serde::Serialize;

/// The two status vocabularies that appear across revisions of the policy register.
///
/// They are kept apart on purpose: a legacy `Compliant` judgment is not the same claim as a
/// revised `Fully Compliant` one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusVocabulary {
	Legacy,
	Revised,
}
impl StatusVocabulary {
	pub fn statuses(self) -> [PolicyStatus; 3] {
		match self {
			Self::Legacy => LEGACY_RANKS.map(|(status, _)| status),
			Self::Revised => REVISED_RANKS.map(|(status, _)| status),
		}
	}

	/// The vocabulary most of `statuses` belong to. No statuses, or an even split, means the
	/// revised register.
	pub fn dominant(statuses: impl IntoIterator<Item = PolicyStatus>) -> Self {
		let (mut legacy, mut revised) = (0_usize, 0_usize);

		for status in statuses {
			match status.vocabulary() {
				Self::Legacy => legacy += 1,
				Self::Revised => revised += 1,
			}
		}

		if legacy > revised { Self::Legacy } else { Self::Revised }
	}

	/// Status assigned to values that are not part of the vocabulary: the least compliant one.
	pub fn fallback(self) -> PolicyStatus {
		match self {
			Self::Legacy => PolicyStatus::NotCompliant,
			Self::Revised => PolicyStatus::NonExistent,
		}
	}

	fn rank_table(self) -> &'static [(PolicyStatus, u8); 3] {
		match self {
			Self::Legacy => &LEGACY_RANKS,
			Self::Revised => &REVISED_RANKS,
		}
	}
}

// Most compliant first.
const LEGACY_RANKS: [(PolicyStatus, u8); 3] = [
	(PolicyStatus::Compliant, 1),
	(PolicyStatus::Outdated, 2),
	(PolicyStatus::NotCompliant, 3),
];
const REVISED_RANKS: [(PolicyStatus, u8); 3] = [
	(PolicyStatus::FullyCompliant, 1),
	(PolicyStatus::SlightlyCompliant, 2),
	(PolicyStatus::NonExistent, 3),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PolicyStatus {
	#[serde(rename = "Compliant")]
	Compliant,
	#[serde(rename = "Not Compliant")]
	NotCompliant,
	#[serde(rename = "Outdated")]
	Outdated,
	#[serde(rename = "Fully Compliant")]
	FullyCompliant,
	#[serde(rename = "Slightly Compliant")]
	SlightlyCompliant,
	#[serde(rename = "Non-Existent")]
	NonExistent,
}
impl PolicyStatus {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Compliant => "Compliant",
			Self::NotCompliant => "Not Compliant",
			Self::Outdated => "Outdated",
			Self::FullyCompliant => "Fully Compliant",
			Self::SlightlyCompliant => "Slightly Compliant",
			Self::NonExistent => "Non-Existent",
		}
	}

	/// Label shown to compliance staff. Only the revised vocabulary has wording that differs
	/// from the stored value.
	pub fn display_label(self) -> &'static str {
		match self {
			Self::SlightlyCompliant => "Partial Compliance",
			Self::NonExistent => "NA - Information Only",
			other => other.as_str(),
		}
	}

	pub fn vocabulary(self) -> StatusVocabulary {
		match self {
			Self::Compliant | Self::NotCompliant | Self::Outdated => StatusVocabulary::Legacy,
			Self::FullyCompliant | Self::SlightlyCompliant | Self::NonExistent =>
				StatusVocabulary::Revised,
		}
	}

	/// Severity rank inside the status's own vocabulary; 1 is the most compliant.
	pub fn severity_rank(self) -> u8 {
		self.vocabulary()
			.rank_table()
			.iter()
			.find(|(status, _)| *status == self)
			.map(|(_, rank)| *rank)
			.unwrap_or(u8::MAX)
	}

	/// Exact label match after trimming, falling back to a case-insensitive match.
	pub fn parse(raw: &str) -> Option<Self> {
		let trimmed = raw.trim();
		let all = [StatusVocabulary::Legacy, StatusVocabulary::Revised].map(|v| v.statuses());

		let mut known = all.iter().flatten();

		known
			.clone()
			.find(|status| status.as_str() == trimmed)
			.or_else(|| known.find(|status| status.as_str().eq_ignore_ascii_case(trimmed)))
			.copied()
	}

	/// Never fails: unknown or empty input becomes the vocabulary's fallback status.
	pub fn normalize(raw: &str, vocabulary: StatusVocabulary) -> Self {
		Self::parse(raw).unwrap_or(vocabulary.fallback())
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Priority {
	High,
	Medium,
	Low,
}
impl Priority {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::High => "High",
			Self::Medium => "Medium",
			Self::Low => "Low",
		}
	}

	/// High sorts first when ascending.
	pub fn rank(self) -> u8 {
		match self {
			Self::High => 1,
			Self::Medium => 2,
			Self::Low => 3,
		}
	}

	pub fn parse(raw: &str) -> Option<Self> {
		match raw.trim().to_ascii_lowercase().as_str() {
			"high" => Some(Self::High),
			"medium" => Some(Self::Medium),
			"low" => Some(Self::Low),
			_ => None,
		}
	}
}

/// A tracked policy obligation, normalized from either revision of the register.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyRecord {
	pub id: String,
	/// Policy number in the revised register, policy title in the legacy one.
	pub title: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub subject: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub category: Option<String>,
	pub status: PolicyStatus,
	/// Proof of compliance, reason for non-compliance or the compliance gap.
	pub supporting_text: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub policy: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub priority: Option<Priority>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub last_reviewed: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub next_deadline: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub effective_date: Option<String>,
	pub bsp_reference: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub bsp_issuance: Option<String>,
}
impl PolicyRecord {
	pub fn document_path(&self) -> Option<String> {
		self.bsp_issuance
			.as_deref()
			.map(str::trim)
			.filter(|issuance| !issuance.is_empty())
			.map(|issuance| format!("/pdfs/{issuance}.pdf"))
	}
}
