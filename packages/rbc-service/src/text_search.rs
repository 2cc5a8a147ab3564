//! Plain substring search for the policy register.
//!
//! Unlike the reports directory this does not tolerate typos: the trimmed, lowercased query
//! must appear verbatim in the record's searchable text.

use rbc_domain::PolicyRecord;

pub fn search_policies<'a>(records: &'a [PolicyRecord], query: &str) -> Vec<&'a PolicyRecord> {
	let needle = query.trim().to_lowercase();

	if needle.is_empty() {
		return records.iter().collect();
	}

	records.iter().filter(|record| haystack(record).contains(&needle)).collect()
}

fn haystack(record: &PolicyRecord) -> String {
	[
		Some(record.title.as_str()),
		Some(record.bsp_reference.as_str()),
		Some(record.supporting_text.as_str()),
		record.subject.as_deref(),
		record.category.as_deref(),
		record.policy.as_deref(),
	]
	.into_iter()
	.flatten()
	.collect::<Vec<_>>()
	.join(" ")
	.to_lowercase()
}
