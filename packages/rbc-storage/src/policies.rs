use std::{collections::HashSet, fs, path::Path};

use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::{Error, Result};
use rbc_domain::{PolicyRecord, PolicyStatus, Priority, StatusVocabulary};

const ROW_ID_NAMESPACE: Uuid = Uuid::NAMESPACE_OID;

/// One entry of the policy register as written by either revision of the export.
///
/// The legacy export carries `category`, `proof`, `priority` and review dates; the revised one
/// carries `subject`, `policy`, `compliance_Gap`, `effectiveDate` and `bspIssuance`.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawPolicy {
	id: Option<Value>,
	title: Option<String>,
	subject: Option<String>,
	category: Option<String>,
	status: Option<String>,
	proof: Option<String>,
	reason: Option<String>,
	#[serde(alias = "compliance_Gap", alias = "compliance_gap")]
	compliance_gap: Option<String>,
	policy: Option<String>,
	priority: Option<String>,
	last_reviewed: Option<String>,
	next_deadline: Option<String>,
	effective_date: Option<String>,
	bsp_reference: Option<String>,
	bsp_issuance: Option<String>,
}

pub fn load_policies(path: &Path) -> Result<Vec<PolicyRecord>> {
	let raw = fs::read(path).map_err(|err| Error::Read { path: path.to_path_buf(), source: err })?;
	let records = parse_policies(path, raw.as_slice())?;

	tracing::info!(path = %path.display(), count = records.len(), "Loaded policy register.");

	Ok(records)
}

pub fn parse_policies(path: &Path, raw: &[u8]) -> Result<Vec<PolicyRecord>> {
	let rows: Vec<RawPolicy> = serde_json::from_slice(raw)
		.map_err(|err| Error::Json { path: path.to_path_buf(), source: err })?;

	if rows.is_empty() {
		return Err(Error::Empty { path: path.to_path_buf() });
	}

	let vocabulary = detect_vocabulary(&rows);
	let mut seen = HashSet::with_capacity(rows.len());
	let mut records = Vec::with_capacity(rows.len());

	for (index, row) in rows.into_iter().enumerate() {
		records.push(normalize_row(index, row, vocabulary, &mut seen));
	}

	Ok(records)
}

fn detect_vocabulary(rows: &[RawPolicy]) -> StatusVocabulary {
	StatusVocabulary::dominant(
		rows.iter().filter_map(|row| row.status.as_deref()).filter_map(PolicyStatus::parse),
	)
}

fn normalize_row(
	index: usize,
	row: RawPolicy,
	vocabulary: StatusVocabulary,
	seen: &mut HashSet<String>,
) -> PolicyRecord {
	let id = resolve_id(index, row.id.as_ref(), seen);
	let raw_status = row.status.unwrap_or_default();
	let status = PolicyStatus::normalize(&raw_status, vocabulary);

	if PolicyStatus::parse(&raw_status).is_none() {
		tracing::warn!(
			row = index,
			%id,
			raw_status = %raw_status,
			normalized = status.as_str(),
			"Unrecognized policy status normalized to the weakest status."
		);
	}

	let priority = non_blank(row.priority).map(|raw| {
		Priority::parse(&raw).unwrap_or_else(|| {
			tracing::warn!(
				row = index,
				%id,
				raw_priority = %raw,
				"Unrecognized priority normalized to Low."
			);

			Priority::Low
		})
	});
	let supporting_text = non_blank(row.compliance_gap)
		.or_else(|| non_blank(row.proof))
		.or_else(|| non_blank(row.reason))
		.unwrap_or_default();

	PolicyRecord {
		id,
		title: non_blank(row.title).unwrap_or_default(),
		subject: non_blank(row.subject),
		category: non_blank(row.category),
		status,
		supporting_text,
		policy: non_blank(row.policy),
		priority,
		last_reviewed: non_blank(row.last_reviewed),
		next_deadline: non_blank(row.next_deadline),
		effective_date: non_blank(row.effective_date),
		bsp_reference: non_blank(row.bsp_reference).unwrap_or_default(),
		bsp_issuance: non_blank(row.bsp_issuance),
	}
}

/// Natural key when present and unused, otherwise an id derived from the row position.
fn resolve_id(index: usize, natural: Option<&Value>, seen: &mut HashSet<String>) -> String {
	let natural = match natural {
		Some(Value::String(value)) => Some(value.trim().to_string()),
		Some(Value::Number(value)) => Some(value.to_string()),
		_ => None,
	}
	.filter(|value| !value.is_empty());

	if let Some(id) = natural {
		if seen.insert(id.clone()) {
			return id;
		}

		tracing::warn!(row = index, %id, "Duplicate policy id replaced with a row-derived id.");
	}

	let derived = row_id(index);

	seen.insert(derived.clone());

	derived
}

pub(crate) fn row_id(index: usize) -> String {
	Uuid::new_v5(&ROW_ID_NAMESPACE, format!("rbc-policy-row:{index}").as_bytes()).to_string()
}

fn non_blank(value: Option<String>) -> Option<String> {
	value.map(|value| value.trim().to_string()).filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
	use super::*;

	fn parse(raw: Value) -> Vec<PolicyRecord> {
		parse_policies(Path::new("inline.json"), raw.to_string().as_bytes())
			.expect("Failed to parse policies.")
	}

	#[test]
	fn legacy_register_keeps_legacy_vocabulary() {
		let records = parse(serde_json::json!([
			{"id": "1", "title": "Credit Risk Management", "category": "Prudential", "status": "Compliant", "proof": "Board resolution 2024-12", "priority": "High", "lastReviewed": "2024-11-02", "nextDeadline": "2025-11-02", "bspReference": "Circular 855"},
			{"id": "2", "title": "Consumer Protection", "category": "Consumer", "status": "Under review", "proof": "", "priority": "Critical", "bspReference": "Circular 1160"}
		]));

		assert_eq!(records[0].status, PolicyStatus::Compliant);
		assert_eq!(records[0].supporting_text, "Board resolution 2024-12");
		assert_eq!(records[1].status, PolicyStatus::NotCompliant);
		assert_eq!(records[1].priority, Some(Priority::Low));
		assert_eq!(records[1].last_reviewed, None);
	}

	#[test]
	fn revised_register_maps_compliance_gap_and_issuance() {
		let records = parse(serde_json::json!([
			{"title": "RB-GOV-004", "subject": "Corporate Governance", "status": "Slightly Compliant", "compliance_Gap": "No board-level compliance committee.", "policy": "Governance manual", "effectiveDate": "2023-01-01", "bspReference": "Circular 1129", "bspIssuance": "C1129"},
			{"title": "RB-IT-002", "status": "???", "bspReference": "Circular 982"}
		]));

		assert_eq!(records[0].status, PolicyStatus::SlightlyCompliant);
		assert_eq!(records[0].supporting_text, "No board-level compliance committee.");
		assert_eq!(records[0].bsp_issuance.as_deref(), Some("C1129"));
		assert_eq!(records[1].status, PolicyStatus::NonExistent);
		assert_eq!(records[1].priority, None);
	}

	#[test]
	fn ids_are_unique_and_stable() {
		let raw = serde_json::json!([
			{"id": "A", "title": "one", "status": "Fully Compliant"},
			{"id": "A", "title": "two", "status": "Fully Compliant"},
			{"title": "three", "status": "Fully Compliant"},
			{"id": 7, "title": "four", "status": "Fully Compliant"}
		]);
		let first = parse(raw.clone());
		let second = parse(raw);
		let ids: HashSet<_> = first.iter().map(|record| record.id.clone()).collect();

		assert_eq!(ids.len(), first.len());
		assert_eq!(first[0].id, "A");
		assert_eq!(first[1].id, row_id(1));
		assert_eq!(first[2].id, row_id(2));
		assert_eq!(first[3].id, "7");
		assert_eq!(
			first.iter().map(|r| &r.id).collect::<Vec<_>>(),
			second.iter().map(|r| &r.id).collect::<Vec<_>>()
		);
	}

	#[test]
	fn empty_register_is_an_error() {
		let err = parse_policies(Path::new("inline.json"), b"[]").expect_err("Expected empty error.");

		assert!(matches!(err, Error::Empty { .. }));
	}

	#[test]
	fn malformed_register_is_an_error() {
		let err = parse_policies(Path::new("inline.json"), b"{\"not\": \"a list\"}")
			.expect_err("Expected parse error.");

		assert!(matches!(err, Error::Json { .. }));
	}
}
