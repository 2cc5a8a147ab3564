use serde::{Deserialize, Serialize};

use rbc_domain::{PolicyRecord, PolicyStatus, StatusVocabulary, text};

use crate::{
	ComplianceService,
	filter::{FilterSet, PolicyField},
	sort::{self, SortDirection, SortKey, SortState},
	text_search,
};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PoliciesRequest {
	pub search: Option<String>,
	pub status: Option<String>,
	pub category: Option<String>,
	pub priority: Option<String>,
	pub sort: Option<String>,
	pub direction: Option<String>,
}

/// A resolved policy query: search term, filters and ordering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PolicyQuery {
	pub search: String,
	pub filters: FilterSet<PolicyField>,
	pub sort: SortState,
}
impl From<&PoliciesRequest> for PolicyQuery {
	/// Unknown sort keys and directions fall back to title, ascending.
	fn from(req: &PoliciesRequest) -> Self {
		let filters = FilterSet::new()
			.with(PolicyField::Status, req.status.as_deref())
			.with(PolicyField::Category, req.category.as_deref())
			.with(PolicyField::Priority, req.priority.as_deref());
		let key = req.sort.as_deref().and_then(SortKey::parse).unwrap_or_default();
		let direction = req.direction.as_deref().and_then(SortDirection::parse).unwrap_or_default();

		Self {
			search: req.search.clone().unwrap_or_default(),
			filters,
			sort: SortState::new(key, direction),
		}
	}
}

/// Search, then filter, then sort. Returns the whole result; policies are not paginated.
pub fn query_policies<'a>(records: &'a [PolicyRecord], query: &PolicyQuery) -> Vec<&'a PolicyRecord> {
	let matched = text_search::search_policies(records, &query.search);
	let filtered = query.filters.apply(matched);

	sort::sort_policies(&filtered, query.sort)
}

/// A policy as the table renders it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyRow {
	#[serde(flatten)]
	pub record: PolicyRecord,
	pub status_label: &'static str,
	pub supporting_text_formatted: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub policy_formatted: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub document_path: Option<String>,
}
impl From<&PolicyRecord> for PolicyRow {
	fn from(record: &PolicyRecord) -> Self {
		Self {
			status_label: record.status.display_label(),
			supporting_text_formatted: text::format_multiline_text(&record.supporting_text),
			policy_formatted: record.policy.as_deref().map(text::format_multiline_text),
			document_path: record.document_path(),
			record: record.clone(),
		}
	}
}

#[derive(Debug, Clone, Serialize)]
pub struct PoliciesResponse {
	pub data: Vec<PolicyRow>,
	pub total: usize,
	pub filters: PolicyFilters,
	pub sort: SortState,
}

#[derive(Debug, Clone, Serialize)]
pub struct PolicyFilters {
	pub categories: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PolicySummary {
	pub total: usize,
	pub vocabulary: StatusVocabulary,
	pub statuses: Vec<StatusCount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusCount {
	pub status: PolicyStatus,
	pub label: &'static str,
	pub count: usize,
}

/// Every status of the register's vocabulary, zero counts included, followed by any status of
/// the other vocabulary that actually occurs.
pub fn summarize(records: &[PolicyRecord], vocabulary: StatusVocabulary) -> PolicySummary {
	let count = |status: PolicyStatus| records.iter().filter(|record| record.status == status).count();
	let mut statuses: Vec<StatusCount> = vocabulary
		.statuses()
		.into_iter()
		.map(|status| StatusCount { status, label: status.display_label(), count: count(status) })
		.collect();

	for other in [StatusVocabulary::Legacy, StatusVocabulary::Revised] {
		if other == vocabulary {
			continue;
		}

		statuses.extend(
			other
				.statuses()
				.into_iter()
				.map(|status| StatusCount { status, label: status.display_label(), count: count(status) })
				.filter(|entry| entry.count > 0),
		);
	}

	PolicySummary { total: records.len(), vocabulary, statuses }
}

impl ComplianceService {
	pub fn query_policies(&self, req: &PoliciesRequest) -> PoliciesResponse {
		let query = PolicyQuery::from(req);
		let rows: Vec<PolicyRow> =
			query_policies(self.policies(), &query).into_iter().map(PolicyRow::from).collect();

		tracing::debug!(
			search = %query.search,
			total = rows.len(),
			sort = ?query.sort.key,
			direction = ?query.sort.direction,
			"Policies query served."
		);

		PoliciesResponse {
			total: rows.len(),
			data: rows,
			filters: PolicyFilters { categories: self.policy_categories().to_vec() },
			sort: query.sort,
		}
	}

	pub fn policy_summary(&self) -> PolicySummary {
		summarize(self.policies(), self.policy_vocabulary())
	}
}
