use std::collections::HashSet;

/// Distinct non-blank values in first-occurrence order.
pub fn distinct_values<'a>(values: impl IntoIterator<Item = &'a str>) -> Vec<String> {
	let mut seen = HashSet::new();
	let mut out = Vec::new();

	for value in values {
		if value.trim().is_empty() {
			continue;
		}
		if seen.insert(value) {
			out.push(value.to_string());
		}
	}

	out
}
