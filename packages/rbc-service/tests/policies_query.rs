use std::path::Path;

use rbc_domain::{PolicyRecord, PolicyStatus};
use rbc_service::{
	ComplianceService, PoliciesRequest, PolicyQuery, SortDirection, SortKey, SortState,
	policies::query_policies,
};

fn service(policies: Vec<PolicyRecord>) -> ComplianceService {
	ComplianceService::new(
		rbc_testkit::config_at(Path::new("fixtures")),
		rbc_testkit::bsp_reports(),
		policies,
	)
}

fn sorted_ids(records: &[PolicyRecord], key: SortKey, direction: SortDirection) -> Vec<String> {
	let query = PolicyQuery { sort: SortState::new(key, direction), ..Default::default() };

	query_policies(records, &query).into_iter().map(|record| record.id.clone()).collect()
}

#[test]
fn default_order_is_title_ascending() {
	let service = service(rbc_testkit::sample_policies());
	let response = service.query_policies(&PoliciesRequest::default());
	let ids: Vec<&str> = response.data.iter().map(|row| row.record.id.as_str()).collect();

	assert_eq!(ids, vec!["p1", "p4", "p2", "p3"]);
	assert_eq!(response.total, 4);
	assert_eq!(response.sort, SortState::default());
}

#[test]
fn status_sort_groups_by_severity_and_keeps_input_order() {
	let records = vec![
		rbc_testkit::policy("a", "Alpha", PolicyStatus::FullyCompliant),
		rbc_testkit::policy("b", "Bravo", PolicyStatus::SlightlyCompliant),
		rbc_testkit::policy("c", "Charlie", PolicyStatus::NonExistent),
		rbc_testkit::policy("d", "Delta", PolicyStatus::FullyCompliant),
	];

	assert_eq!(sorted_ids(&records, SortKey::Status, SortDirection::Asc), vec!["a", "d", "b", "c"]);
	assert_eq!(sorted_ids(&records, SortKey::Status, SortDirection::Desc), vec!["c", "b", "a", "d"]);
}

#[test]
fn priority_and_category_sorts() {
	let records = rbc_testkit::sample_policies();

	assert_eq!(
		sorted_ids(&records, SortKey::Priority, SortDirection::Asc),
		vec!["p1", "p4", "p2", "p3"]
	);
	assert_eq!(
		sorted_ids(&records, SortKey::Category, SortDirection::Asc),
		vec!["p1", "p2", "p4", "p3"]
	);
}

#[test]
fn dates_sort_chronologically_with_missing_values_last() {
	let records = rbc_testkit::sample_policies();

	assert_eq!(
		sorted_ids(&records, SortKey::LastReviewed, SortDirection::Asc),
		vec!["p4", "p2", "p1", "p3"]
	);
	assert_eq!(
		sorted_ids(&records, SortKey::LastReviewed, SortDirection::Desc),
		vec!["p1", "p2", "p4", "p3"]
	);
	assert_eq!(
		sorted_ids(&records, SortKey::NextDeadline, SortDirection::Asc),
		vec!["p4", "p2", "p1", "p3"]
	);
}

#[test]
fn every_sort_is_a_permutation_and_leaves_input_alone() {
	let records = rbc_testkit::sample_policies();
	let before = records.clone();
	let mut expected: Vec<String> = records.iter().map(|record| record.id.clone()).collect();

	expected.sort();

	for key in [
		SortKey::Title,
		SortKey::Status,
		SortKey::Category,
		SortKey::Priority,
		SortKey::LastReviewed,
		SortKey::NextDeadline,
	] {
		for direction in [SortDirection::Asc, SortDirection::Desc] {
			let mut ids = sorted_ids(&records, key, direction);

			ids.sort();

			assert_eq!(ids, expected, "{key:?} {direction:?}");
		}
	}

	assert_eq!(records, before);
}

#[test]
fn search_is_a_trimmed_case_insensitive_substring_match() {
	let service = service(rbc_testkit::sample_policies());
	let req = PoliciesRequest { search: Some("  GOVERNANCE ".to_string()), ..Default::default() };
	let ids: Vec<String> =
		service.query_policies(&req).data.into_iter().map(|row| row.record.id).collect();

	assert_eq!(ids, vec!["p4", "p2"]);

	let req = PoliciesRequest { search: Some("no. 950".to_string()), ..Default::default() };

	assert_eq!(service.query_policies(&req).total, 1);
}

#[test]
fn filters_are_exact_and_conjunctive() {
	let service = service(rbc_testkit::sample_policies());
	let req = PoliciesRequest {
		status: Some("Fully Compliant".to_string()),
		category: Some("Governance".to_string()),
		priority: Some("all".to_string()),
		..Default::default()
	};
	let response = service.query_policies(&req);

	assert_eq!(response.total, 1);
	assert_eq!(response.data[0].record.id, "p4");

	let req = PoliciesRequest { status: Some("fully compliant".to_string()), ..Default::default() };

	assert_eq!(service.query_policies(&req).total, 0);
}

#[test]
fn category_options_come_from_the_whole_register() {
	let service = service(rbc_testkit::sample_policies());
	let req = PoliciesRequest { search: Some("RB-IT".to_string()), ..Default::default() };
	let response = service.query_policies(&req);

	assert_eq!(response.total, 1);
	assert_eq!(response.filters.categories, vec!["AML/CFT", "Governance", "Operations"]);
}

#[test]
fn response_serializes_rows_and_sort_state() {
	let service = service(rbc_testkit::sample_policies());
	let req = PoliciesRequest {
		sort: Some("nextDeadline".to_string()),
		direction: Some("desc".to_string()),
		..Default::default()
	};
	let json = serde_json::to_value(service.query_policies(&req)).expect("Failed to serialize.");

	assert_eq!(json["sort"], serde_json::json!({ "key": "nextDeadline", "direction": "desc" }));
	assert_eq!(json["data"][0]["id"], "p1");
	assert_eq!(json["data"][0]["status"], "Fully Compliant");
	assert_eq!(json["data"][0]["statusLabel"], "Fully Compliant");
	assert_eq!(json["data"][0]["documentPath"], "/pdfs/C950.pdf");
	assert_eq!(json["data"][0]["bspReference"], "BSP Circular No. 950");
	assert!(json["data"][3].get("documentPath").is_none());
}

#[test]
fn summary_counts_every_status_of_the_register() {
	let service = service(rbc_testkit::sample_policies());
	let summary = service.policy_summary();
	let counts: Vec<(PolicyStatus, usize)> =
		summary.statuses.iter().map(|entry| (entry.status, entry.count)).collect();

	assert_eq!(summary.total, 4);
	assert_eq!(
		counts,
		vec![
			(PolicyStatus::FullyCompliant, 2),
			(PolicyStatus::SlightlyCompliant, 1),
			(PolicyStatus::NonExistent, 1),
		]
	);
}
